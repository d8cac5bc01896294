//! The top-level configuration document.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{ModelError, Result, SessionPolicy, Setup};

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "config.yml";

/// A configuration document: process-level defaults plus every known setup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Setups {
    /// Default device (setup name) when none is given on the command line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
    /// Default provider when none is given on the command line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    /// Default serial port when none is given on the command line.
    #[serde(
        default,
        rename = "portID",
        alias = "portId",
        skip_serializing_if = "Option::is_none"
    )]
    pub port_id: Option<String>,
    /// Session timing and framing.
    #[serde(default)]
    pub policy: SessionPolicy,
    /// Known setups, in document order.
    #[serde(default)]
    pub setups: Vec<Setup>,
}

impl Setups {
    /// Parse and validate a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let mut doc: Setups = serde_yaml::from_str(yaml)?;
        doc.normalize();
        doc.validate()?;
        debug!("Loaded {} setups", doc.setups.len());
        Ok(doc)
    }

    /// Read, parse and validate a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.display().to_string(),
            source,
        })?;
        debug!("Reading configuration from {}", path.display());
        Self::from_yaml_str(&yaml)
    }

    /// Find the setup for a provider/device pair. The first match wins.
    pub fn find_setup(&self, provider: &str, device: &str) -> Result<&Setup> {
        self.setups
            .iter()
            .find(|s| s.matches(provider, device))
            .ok_or_else(|| ModelError::SetupNotFound {
                provider: provider.to_string(),
                device: device.to_string(),
            })
    }

    /// Distinct `(provider, device)` pairs, in document order.
    pub fn pairs(&self) -> Vec<(&str, &str)> {
        let mut pairs: Vec<(&str, &str)> = Vec::with_capacity(self.setups.len());
        for setup in &self.setups {
            let pair = (setup.provider.as_str(), setup.name.as_str());
            if !pairs.contains(&pair) {
                pairs.push(pair);
            }
        }
        pairs
    }

    // Empty defaults in YAML (`device: ""`) mean "not set".
    fn normalize(&mut self) {
        for field in [&mut self.device, &mut self.provider, &mut self.port_id] {
            if field.as_deref().is_some_and(str::is_empty) {
                *field = None;
            }
        }
    }

    fn validate(&self) -> Result<()> {
        self.policy.validate()?;
        for (index, setup) in self.setups.iter().enumerate() {
            if setup.name.is_empty() {
                return Err(ModelError::MissingField { index, field: "setup" });
            }
            if setup.provider.is_empty() {
                return Err(ModelError::MissingField { index, field: "provider" });
            }
            setup.validate()?;
        }
        Ok(())
    }
}
