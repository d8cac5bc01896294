//! Payload encoding for outgoing messages.
//!
//! Messages are embedded in a `SendMessage` request as lowercase hex text.
//! Payloads that arrive base64-encoded can be decoded as well, but are never
//! produced by this crate.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::error::CodecError;

/// Encode a payload as lowercase hex, two characters per byte.
pub fn encode(payload: &[u8]) -> String {
    hex::encode(payload)
}

/// Decode hex text (either case) back into bytes.
pub fn decode(text: &str) -> Result<Vec<u8>, CodecError> {
    hex::decode(text).map_err(|e| match e {
        hex::FromHexError::InvalidHexCharacter { c, index } => {
            CodecError::InvalidCharacter { c, index }
        }
        hex::FromHexError::OddLength | hex::FromHexError::InvalidStringLength => {
            CodecError::OddLength(text.len())
        }
    })
}

/// Decode standard-alphabet, padded base64 text.
pub fn decode_base64(text: &str) -> Result<Vec<u8>, CodecError> {
    STANDARD
        .decode(text)
        .map_err(|e| CodecError::InvalidBase64(e.to_string()))
}
