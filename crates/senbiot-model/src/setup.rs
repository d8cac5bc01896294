//! Setup records, steps, and phase names.
//!
//! A [`Setup`] holds every command dialog needed to drive one device model on
//! one network provider. The dialogs are grouped into phases; each phase is an
//! ordered list of [`Step`]s that are sent to the device in declaration order.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ModelError;

// ============================================================================
// Step
// ============================================================================

/// One request/response unit of a device dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// Literal command text, sent with a trailing CR+LF.
    pub request: String,
    /// Exact reply the device must produce. Empty accepts any reply.
    #[serde(default, rename = "response", skip_serializing_if = "String::is_empty")]
    pub expected_response: String,
    /// Substring marking a "not ready yet" reply. Only used while waiting for
    /// the network.
    #[serde(default, rename = "negativeresponse", skip_serializing_if = "String::is_empty")]
    pub negative_response: String,
    /// Accepted from configuration but not used for matching.
    #[serde(default, rename = "waitforresponse", skip_serializing_if = "String::is_empty")]
    pub wait_for_response: String,
}

impl Step {
    /// Create a step that accepts any reply.
    pub fn new(request: impl Into<String>) -> Self {
        Step {
            request: request.into(),
            ..Default::default()
        }
    }

    /// Require the framed reply to equal `expected` exactly.
    pub fn expecting(mut self, expected: impl Into<String>) -> Self {
        self.expected_response = expected.into();
        self
    }

    /// Set the negative marker used while polling for network attach.
    pub fn with_negative(mut self, negative: impl Into<String>) -> Self {
        self.negative_response = negative.into();
        self
    }

    /// Whether this step checks the reply against an expected value.
    pub fn has_expectation(&self) -> bool {
        !self.expected_response.is_empty()
    }

    /// Whether `reply` carries this step's negative marker.
    ///
    /// An empty marker never matches, so a step without one is satisfied by
    /// the first reply.
    pub fn is_negative(&self, reply: &str) -> bool {
        !self.negative_response.is_empty() && reply.contains(&self.negative_response)
    }
}

// ============================================================================
// Phase
// ============================================================================

/// Named phases of a setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Reboot the device, then wait for it to come back up.
    Reboot,
    /// One-off initialisation, stored in the device's non-volatile memory.
    Init,
    /// Configure the network connection.
    SetupNetwork,
    /// Poll until the device reports a network attach.
    WaitForNetwork,
    /// Query device configuration.
    ConfigInfo,
    /// Query network status.
    NetworkInfo,
    /// Read back the response to a previously sent message.
    MessageResponse,
    /// Send an encoded payload.
    SendMessage,
}

impl Phase {
    /// All phases, in the order they are usually run.
    pub const ALL: [Phase; 8] = [
        Phase::Reboot,
        Phase::Init,
        Phase::SetupNetwork,
        Phase::WaitForNetwork,
        Phase::ConfigInfo,
        Phase::NetworkInfo,
        Phase::SendMessage,
        Phase::MessageResponse,
    ];

    /// Canonical phase name, as accepted on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Reboot => "Reboot",
            Phase::Init => "Init",
            Phase::SetupNetwork => "SetupNetwork",
            Phase::WaitForNetwork => "WaitForNetwork",
            Phase::ConfigInfo => "ConfigInfo",
            Phase::NetworkInfo => "NetworkInfo",
            Phase::MessageResponse => "MessageResponse",
            Phase::SendMessage => "SendMessage",
        }
    }

    /// Key of this phase's step list in the configuration document.
    ///
    /// `SendMessage` is synthesized from the setup's message prefix and has no
    /// step list.
    pub fn config_key(&self) -> Option<&'static str> {
        match self {
            Phase::Reboot => Some("reboot"),
            Phase::Init => Some("init"),
            Phase::SetupNetwork => Some("setupnetwork"),
            Phase::WaitForNetwork => Some("waitfornetwork"),
            Phase::ConfigInfo => Some("configinfo"),
            Phase::NetworkInfo => Some("networkinfo"),
            Phase::MessageResponse => Some("getmsgresponse"),
            Phase::SendMessage => None,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Phase {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Phase::ALL
            .iter()
            .copied()
            .find(|phase| phase.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ModelError::UnknownPhase(s.to_string()))
    }
}

// ============================================================================
// Setup
// ============================================================================

/// The complete command sequences for one (provider, device) pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Setup {
    /// Device model this setup drives, e.g. `ublox01b`.
    #[serde(rename = "setup")]
    pub name: String,
    /// Network provider, e.g. `t-mobilenl`.
    pub provider: String,
    /// Informational creation date.
    #[serde(default, rename = "date")]
    pub created_date: String,
    #[serde(default)]
    pub reboot: Vec<Step>,
    #[serde(default)]
    pub init: Vec<Step>,
    #[serde(default, rename = "setupnetwork")]
    pub setup_network: Vec<Step>,
    #[serde(default, rename = "waitfornetwork")]
    pub wait_for_network: Vec<Step>,
    #[serde(default, rename = "configinfo")]
    pub config_info: Vec<Step>,
    #[serde(default, rename = "networkinfo")]
    pub network_info: Vec<Step>,
    #[serde(default, rename = "getmsgresponse")]
    pub message_response: Vec<Step>,
    /// Text placed in front of `<length>,<hex payload>` when sending a message.
    #[serde(
        default,
        rename = "sendmesssagestring",
        alias = "sendmessagestring",
        alias = "sendmessageprefix"
    )]
    pub send_message_prefix: String,
}

impl Setup {
    /// Create an empty setup for a device/provider pair.
    pub fn new(name: impl Into<String>, provider: impl Into<String>) -> Self {
        Setup {
            name: name.into(),
            provider: provider.into(),
            ..Default::default()
        }
    }

    /// Step list for `phase`, or `None` for [`Phase::SendMessage`].
    pub fn steps(&self, phase: Phase) -> Option<&[Step]> {
        let steps = match phase {
            Phase::Reboot => &self.reboot,
            Phase::Init => &self.init,
            Phase::SetupNetwork => &self.setup_network,
            Phase::WaitForNetwork => &self.wait_for_network,
            Phase::ConfigInfo => &self.config_info,
            Phase::NetworkInfo => &self.network_info,
            Phase::MessageResponse => &self.message_response,
            Phase::SendMessage => return None,
        };
        Some(steps.as_slice())
    }

    /// Whether this setup belongs to the given provider and device.
    pub fn matches(&self, provider: &str, device: &str) -> bool {
        self.provider == provider && self.name == device
    }

    /// Check that every step of every phase carries a request.
    ///
    /// Errors name the phase by its configuration key, the way it appears in
    /// the file being fixed.
    pub fn validate(&self) -> Result<(), ModelError> {
        for phase in Phase::ALL {
            let (Some(key), Some(steps)) = (phase.config_key(), self.steps(phase)) else {
                continue;
            };
            if let Some(step) = steps.iter().position(|s| s.request.is_empty()) {
                return Err(ModelError::EmptyRequest {
                    setup: self.name.clone(),
                    provider: self.provider.clone(),
                    phase: key.to_string(),
                    step,
                });
            }
        }
        Ok(())
    }
}
