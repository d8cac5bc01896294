//! Error types for the setup model.

use thiserror::Error;

/// Errors that can occur when loading or querying a configuration document.
#[derive(Debug, Error)]
pub enum ModelError {
    /// I/O error reading the configuration file.
    #[error("error reading config file {path}: {source}")]
    Io {
        /// Path of the file that could not be read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid YAML or does not match the schema.
    #[error("reading config file failed: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A required field is missing or empty.
    #[error("setup #{index} is missing required field '{field}'")]
    MissingField {
        /// Position of the setup in the document.
        index: usize,
        /// YAML name of the missing field.
        field: &'static str,
    },

    /// A step in a phase has an empty request string.
    #[error("setup '{setup}' ({provider}): step {step} of {phase} has an empty request")]
    EmptyRequest {
        /// Setup (device) name.
        setup: String,
        /// Provider name.
        provider: String,
        /// Phase the step belongs to.
        phase: String,
        /// Zero-based position of the step within the phase.
        step: usize,
    },

    /// A policy value is out of range.
    #[error("invalid policy: {0}")]
    InvalidPolicy(String),

    /// Unknown phase name.
    #[error("unknown phase '{0}' (expected one of Reboot, Init, SetupNetwork, WaitForNetwork, ConfigInfo, NetworkInfo, MessageResponse, SendMessage)")]
    UnknownPhase(String),

    /// No setup matches the requested provider/device pair.
    #[error("could not find setup for device {device} for provider {provider}")]
    SetupNotFound {
        /// Requested provider.
        provider: String,
        /// Requested device (setup name).
        device: String,
    },
}
