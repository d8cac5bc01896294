//! Error types for sessions and payload encoding.

use thiserror::Error;

/// Errors that can occur while decoding a message payload.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Hex text must have two characters per byte.
    #[error("hex payload has odd length ({0} characters)")]
    OddLength(usize),

    /// A character outside `[0-9a-fA-F]`.
    #[error("invalid hex character {c:?} at position {index}")]
    InvalidCharacter {
        /// The offending character.
        c: char,
        /// Its position in the input.
        index: usize,
    },

    /// Malformed base64 input.
    #[error("invalid base64 payload: {0}")]
    InvalidBase64(String),
}

/// Errors that abort a step or a phase.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Reading from or writing to the transport failed.
    #[error("transport error: {0}")]
    Transport(#[from] std::io::Error),

    /// The device replied with something other than the expected response.
    #[error("response to {request:?} was {actual:?}, expected {expected:?}")]
    ResponseMismatch {
        /// Request that was sent.
        request: String,
        /// Reply the configuration expects.
        expected: String,
        /// Reply the device produced.
        actual: String,
    },

    /// The device kept reporting the negative marker while polling for
    /// network attach.
    #[error("could not establish network after {attempts} attempts, last reply: {last_reply:?}")]
    NetworkUnavailable {
        /// Number of polls made.
        attempts: u32,
        /// Reply to the final poll.
        last_reply: String,
    },

    /// Payload encoding failed.
    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// Result type alias for session operations.
pub type SessionResult<T> = Result<T, SessionError>;
