//! Message payloads from `--message` or piped standard input.

use std::io::{IsTerminal, Read};

use tracing::debug;

use crate::error::{AppError, AppResult};

/// Read standard input if it is piped rather than a terminal.
pub fn read_piped_stdin() -> AppResult<Option<Vec<u8>>> {
    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }
    let mut data = Vec::new();
    stdin.read_to_end(&mut data).map_err(AppError::Stdin)?;
    debug!("Read {} bytes from stdin", data.len());
    Ok(Some(data))
}

/// The `--message` flag if given, otherwise non-empty piped input.
///
/// Stdin is only read when the flag is absent, so an inherited pipe that
/// never closes cannot block a command that already has its message.
pub fn read_message(flag: Option<&str>) -> AppResult<Option<Vec<u8>>> {
    match flag {
        Some(flag) => Ok(Some(flag.as_bytes().to_vec())),
        None => Ok(read_piped_stdin()?.filter(|data| !data.is_empty())),
    }
}

/// Encoded text for `decode`, with trailing whitespace removed.
pub fn encoded_text(message: &[u8]) -> String {
    String::from_utf8_lossy(message).trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_is_used_without_reading_stdin() {
        assert_eq!(read_message(Some("flag")).unwrap(), Some(b"flag".to_vec()));
        assert_eq!(read_message(Some("")).unwrap(), Some(Vec::new()));
    }

    #[test]
    fn test_encoded_text_trims_newline() {
        assert_eq!(encoded_text(b"68656c6c6f\n"), "68656c6c6f");
        assert_eq!(encoded_text(b"SGVsbG8=\r\n"), "SGVsbG8=");
    }
}
