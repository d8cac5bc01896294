//! Reply framing.
//!
//! Modems answer a command with text surrounded by line breaks, e.g.
//! `\r\nOK\r\n`, optionally preceded by an echo of the command. A reply is
//! collected byte by byte:
//!
//! - `\r` is dropped
//! - `\n` counts as a line break
//! - everything else is part of the reply text
//!
//! The reply is complete once the number of line breaks required by the
//! [`FramingStrategy`] has been seen.

use bytes::BytesMut;
use senbiot_model::FramingStrategy;

/// Initial capacity of the reply buffer.
pub const REPLY_CAPACITY: usize = 64;

/// Accumulates one device reply.
#[derive(Debug)]
pub struct ReplyFramer {
    /// Reply text collected so far, without line breaks.
    text: BytesMut,
    /// Line feeds seen since the request was written.
    line_breaks: usize,
    /// Line feeds that complete the reply.
    required: usize,
}

impl ReplyFramer {
    /// Create a framer for the given strategy.
    pub fn new(strategy: FramingStrategy) -> Self {
        ReplyFramer {
            text: BytesMut::with_capacity(REPLY_CAPACITY),
            line_breaks: 0,
            required: strategy.line_breaks(),
        }
    }

    /// Feed received bytes.
    ///
    /// Returns the number of bytes consumed. Bytes after the one that
    /// completes the reply are not consumed.
    pub fn push(&mut self, data: &[u8]) -> usize {
        for (i, &byte) in data.iter().enumerate() {
            if self.is_complete() {
                return i;
            }
            match byte {
                b'\r' => {}
                b'\n' => self.line_breaks += 1,
                _ => self.text.extend_from_slice(&[byte]),
            }
        }
        data.len()
    }

    /// Whether the reply is complete.
    pub fn is_complete(&self) -> bool {
        self.line_breaks >= self.required
    }

    /// Number of line feeds seen so far.
    pub fn line_breaks(&self) -> usize {
        self.line_breaks
    }

    /// The reply text. Invalid UTF-8 is replaced rather than rejected.
    pub fn finish(self) -> String {
        String::from_utf8_lossy(&self.text).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_between_line_breaks() {
        let mut framer = ReplyFramer::new(FramingStrategy::EchoAndReply);
        framer.push(b"\r\nOK\r\n");
        assert!(framer.is_complete());
        assert_eq!(framer.finish(), "OK");
    }

    #[test]
    fn test_partial_reply() {
        let mut framer = ReplyFramer::new(FramingStrategy::EchoAndReply);
        framer.push(b"\r\n+CSQ:");
        assert!(!framer.is_complete());
        assert_eq!(framer.line_breaks(), 1);

        framer.push(b"17,99\r\n");
        assert!(framer.is_complete());
        assert_eq!(framer.finish(), "+CSQ:17,99");
    }

    #[test]
    fn test_one_byte_at_a_time() {
        let mut framer = ReplyFramer::new(FramingStrategy::EchoAndReply);
        for &byte in b"\r\nERROR\r\n" {
            framer.push(&[byte]);
        }
        assert!(framer.is_complete());
        assert_eq!(framer.finish(), "ERROR");
    }

    #[test]
    fn test_echo_line_is_kept_in_reply() {
        // With echo enabled the echoed command ends up in front of the reply.
        let mut framer = ReplyFramer::new(FramingStrategy::EchoAndReply);
        framer.push(b"AT\r\nOK\r\n");
        assert_eq!(framer.finish(), "ATOK");
    }

    #[test]
    fn test_trailing_bytes_are_not_consumed() {
        let mut framer = ReplyFramer::new(FramingStrategy::EchoAndReply);
        let consumed = framer.push(b"\r\nOK\r\n+URC");
        assert_eq!(consumed, 6);
        assert_eq!(framer.finish(), "OK");
    }

    #[test]
    fn test_single_line_strategy() {
        let mut framer = ReplyFramer::new(FramingStrategy::SingleLine);
        framer.push(b"OK\r\n");
        assert!(framer.is_complete());
        assert_eq!(framer.finish(), "OK");
    }
}
