//! Session timing and framing policy.
//!
//! Devices need time to settle between commands, to attach to the network, and
//! to boot after a reboot. The defaults match what the supported modems need;
//! a configuration document can override them in its `policy` section:
//!
//! ```yaml
//! policy:
//!   settle_delay_ms: 1000
//!   retry_backoff_ms: 1000
//!   network_attempts: 10
//!   reboot_delay_ms: 7000
//!   framing: echo_and_reply
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::ModelError;

/// Default pause after every successful step (milliseconds).
pub const DEFAULT_SETTLE_DELAY_MS: u64 = 1000;

/// Default pause between network attach polls (milliseconds).
pub const DEFAULT_RETRY_BACKOFF_MS: u64 = 1000;

/// Default number of network attach polls per step.
pub const DEFAULT_NETWORK_ATTEMPTS: u32 = 10;

/// Default time allowed for the device to boot after a reboot (milliseconds).
pub const DEFAULT_REBOOT_DELAY_MS: u64 = 7000;

/// How the end of a device reply is detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FramingStrategy {
    /// The reply is complete after two line feeds. Modems answer with
    /// `\r\n<reply>\r\n`, or echo the command on its own line first.
    #[default]
    EchoAndReply,
    /// The reply is complete after the first line feed.
    SingleLine,
}

impl FramingStrategy {
    /// Number of line feeds that complete a reply.
    pub fn line_breaks(&self) -> usize {
        match self {
            FramingStrategy::EchoAndReply => 2,
            FramingStrategy::SingleLine => 1,
        }
    }
}

/// Delays, retry budget and framing used by a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionPolicy {
    pub settle_delay_ms: u64,
    pub retry_backoff_ms: u64,
    pub network_attempts: u32,
    pub reboot_delay_ms: u64,
    pub framing: FramingStrategy,
}

impl Default for SessionPolicy {
    fn default() -> Self {
        SessionPolicy {
            settle_delay_ms: DEFAULT_SETTLE_DELAY_MS,
            retry_backoff_ms: DEFAULT_RETRY_BACKOFF_MS,
            network_attempts: DEFAULT_NETWORK_ATTEMPTS,
            reboot_delay_ms: DEFAULT_REBOOT_DELAY_MS,
            framing: FramingStrategy::default(),
        }
    }
}

impl SessionPolicy {
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }

    pub fn reboot_delay(&self) -> Duration {
        Duration::from_millis(self.reboot_delay_ms)
    }

    /// Reject values that would make a phase meaningless.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.network_attempts == 0 {
            return Err(ModelError::InvalidPolicy(
                "network_attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let policy = SessionPolicy::default();
        assert_eq!(policy.settle_delay(), Duration::from_millis(1000));
        assert_eq!(policy.retry_backoff(), Duration::from_millis(1000));
        assert_eq!(policy.network_attempts, 10);
        assert_eq!(policy.reboot_delay(), Duration::from_millis(7000));
        assert_eq!(policy.framing.line_breaks(), 2);
    }

    #[test]
    fn test_partial_policy_keeps_defaults() {
        let policy: SessionPolicy =
            serde_yaml::from_str("network_attempts: 3\nframing: single_line\n").unwrap();
        assert_eq!(policy.network_attempts, 3);
        assert_eq!(policy.framing, FramingStrategy::SingleLine);
        assert_eq!(policy.settle_delay_ms, DEFAULT_SETTLE_DELAY_MS);
        assert_eq!(policy.reboot_delay_ms, DEFAULT_REBOOT_DELAY_MS);
    }

    #[test]
    fn test_zero_attempts_is_rejected() {
        let policy = SessionPolicy {
            network_attempts: 0,
            ..Default::default()
        };
        assert!(matches!(policy.validate(), Err(ModelError::InvalidPolicy(_))));
    }
}
