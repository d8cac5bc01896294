//! Phase execution.
//!
//! Most phases run their steps once, top to bottom, and stop at the first
//! failure. Two phases differ:
//!
//! - `WaitForNetwork` polls each step until the reply no longer contains the
//!   step's negative marker, pausing between polls, for at most
//!   `network_attempts` polls.
//! - `SendMessage` has no step list. It sends a single request built from the
//!   setup's message prefix and the hex-encoded payload.
//!
//! `Reboot` pauses after its steps so the device can boot.

use senbiot_model::{Phase, Setup, Step};
use tracing::{debug, info, warn};

use crate::codec;
use crate::error::{SessionError, SessionResult};
use crate::transcript::{Delay, Pause, Session, Transport};

/// Build the request that sends `payload`:
/// `<prefix><length of hex text>,<hex text>`.
pub fn message_request(prefix: &str, payload: &[u8]) -> String {
    let encoded = codec::encode(payload);
    format!("{}{},{}", prefix, encoded.len(), encoded)
}

impl<T: Transport, D: Delay> Session<T, D> {
    /// Run `phase` of `setup` and return the replies in step order.
    ///
    /// `message` is only used by [`Phase::SendMessage`].
    pub fn run_phase(
        &mut self,
        setup: &Setup,
        phase: Phase,
        message: &[u8],
    ) -> SessionResult<Vec<String>> {
        info!("Running {} for {} ({})", phase, setup.name, setup.provider);
        let replies = match phase {
            Phase::Reboot => self.reboot(setup)?,
            Phase::WaitForNetwork => self.wait_for_network(setup)?,
            Phase::SendMessage => vec![self.send_message(setup, message)?],
            Phase::Init => self.init(setup)?,
            Phase::SetupNetwork => self.setup_network(setup)?,
            Phase::ConfigInfo => self.config_info(setup)?,
            Phase::NetworkInfo => self.network_info(setup)?,
            Phase::MessageResponse => self.message_response(setup)?,
        };
        info!("{} finished ({} replies)", phase, replies.len());
        Ok(replies)
    }

    /// Run the reboot steps, then wait for the device to boot.
    pub fn reboot(&mut self, setup: &Setup) -> SessionResult<Vec<String>> {
        let replies = self.run_steps(&setup.reboot)?;
        let boot = self.policy.reboot_delay();
        debug!("Waiting {:?} for the device to boot", boot);
        self.delay.pause(Pause::Boot, boot);
        Ok(replies)
    }

    /// Run the one-off initialisation steps.
    pub fn init(&mut self, setup: &Setup) -> SessionResult<Vec<String>> {
        self.run_steps(&setup.init)
    }

    pub fn setup_network(&mut self, setup: &Setup) -> SessionResult<Vec<String>> {
        self.run_steps(&setup.setup_network)
    }

    pub fn config_info(&mut self, setup: &Setup) -> SessionResult<Vec<String>> {
        self.run_steps(&setup.config_info)
    }

    pub fn network_info(&mut self, setup: &Setup) -> SessionResult<Vec<String>> {
        self.run_steps(&setup.network_info)
    }

    pub fn message_response(&mut self, setup: &Setup) -> SessionResult<Vec<String>> {
        self.run_steps(&setup.message_response)
    }

    /// Poll every network step until the device stops reporting its
    /// negative marker.
    ///
    /// Returns the first clean reply of each step.
    pub fn wait_for_network(&mut self, setup: &Setup) -> SessionResult<Vec<String>> {
        setup
            .wait_for_network
            .iter()
            .map(|step| self.poll_until_attached(step))
            .collect()
    }

    /// Send `payload` using the setup's message prefix and return the reply.
    ///
    /// Any reply is accepted.
    pub fn send_message(&mut self, setup: &Setup, payload: &[u8]) -> SessionResult<String> {
        if payload.is_empty() {
            warn!("Sending an empty message");
        }
        let step = Step::new(message_request(&setup.send_message_prefix, payload));
        self.execute_step(&step)
    }

    fn run_steps(&mut self, steps: &[Step]) -> SessionResult<Vec<String>> {
        steps.iter().map(|step| self.execute_step(step)).collect()
    }

    fn poll_until_attached(&mut self, step: &Step) -> SessionResult<String> {
        let attempts = self.policy.network_attempts;
        let mut last_reply = String::new();

        for attempt in 1..=attempts {
            last_reply = self.execute_step(step)?;
            if !step.is_negative(&last_reply) {
                debug!("Network attached after {} attempts", attempt);
                return Ok(last_reply);
            }
            warn!(
                "Network not ready ({}/{}): {:?} contains {:?}",
                attempt, attempts, last_reply, step.negative_response
            );
            if attempt < attempts {
                self.delay.pause(Pause::RetryBackoff, self.policy.retry_backoff());
            }
        }

        Err(SessionError::NetworkUnavailable {
            attempts,
            last_reply,
        })
    }
}
