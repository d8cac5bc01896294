//! Errors surfaced by the command-line front end, and their exit codes.

use senbiot_model::ModelError;
use senbiot_session::{CodecError, SessionError};
use thiserror::Error;

/// Exit code for usage and selection errors.
pub const EXIT_USAGE: u8 = 2;
/// Exit code for configuration and setup lookup errors.
pub const EXIT_CONFIG: u8 = 3;
/// Exit code for serial port and transport errors.
pub const EXIT_TRANSPORT: u8 = 4;
/// Exit code when a device reply does not match the configuration.
pub const EXIT_MISMATCH: u8 = 5;
/// Exit code when the device never attached to the network.
pub const EXIT_NETWORK: u8 = 6;
/// Exit code for payload decoding errors.
pub const EXIT_CODEC: u8 = 7;

/// Errors that end a `senbiot` invocation.
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or conflicting command-line input.
    #[error("{0}")]
    Usage(String),

    /// Configuration could not be loaded, or no setup matched.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// A phase failed.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// A payload could not be decoded.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// The serial port could not be opened.
    #[error("serial port [{port}] can not be opened: {source}")]
    OpenPort {
        /// Port name.
        port: String,
        /// Underlying error.
        #[source]
        source: serialport::Error,
    },

    /// Port enumeration failed.
    #[error("listing serial ports failed: {0}")]
    Serial(#[from] serialport::Error),

    /// Port enumeration found nothing.
    #[error("no serial ports found")]
    NoPorts,

    /// Reading a piped message failed.
    #[error("reading message from stdin failed: {0}")]
    Stdin(#[source] std::io::Error),

    /// Writing replies to standard output failed.
    #[error("writing output failed: {0}")]
    Output(#[source] std::io::Error),
}

impl AppError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Usage(_) | AppError::Model(ModelError::UnknownPhase(_)) => EXIT_USAGE,
            AppError::Model(_) => EXIT_CONFIG,
            AppError::Session(SessionError::ResponseMismatch { .. }) => EXIT_MISMATCH,
            AppError::Session(SessionError::NetworkUnavailable { .. }) => EXIT_NETWORK,
            AppError::Session(SessionError::Codec(_)) | AppError::Codec(_) => EXIT_CODEC,
            AppError::Session(SessionError::Transport(_))
            | AppError::OpenPort { .. }
            | AppError::Serial(_)
            | AppError::NoPorts
            | AppError::Stdin(_)
            | AppError::Output(_) => EXIT_TRANSPORT,
        }
    }
}

/// Result type for the front end.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(AppError::Usage("no device".into()).exit_code(), EXIT_USAGE);
        assert_eq!(
            AppError::Model(ModelError::SetupNotFound {
                provider: "kpn".into(),
                device: "ublox01b".into(),
            })
            .exit_code(),
            EXIT_CONFIG
        );
        assert_eq!(
            AppError::Session(SessionError::NetworkUnavailable {
                attempts: 10,
                last_reply: "+CGATT:0".into(),
            })
            .exit_code(),
            EXIT_NETWORK
        );
        assert_eq!(
            AppError::Session(SessionError::ResponseMismatch {
                request: "AT".into(),
                expected: "OK".into(),
                actual: "ERROR".into(),
            })
            .exit_code(),
            EXIT_MISMATCH
        );
        assert_eq!(AppError::Codec(CodecError::OddLength(3)).exit_code(), EXIT_CODEC);
        assert_eq!(AppError::NoPorts.exit_code(), EXIT_TRANSPORT);
    }
}
