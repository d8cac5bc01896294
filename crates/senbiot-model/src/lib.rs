//! # senbiot-model
//!
//! Configuration model for driving NB-IoT modems over a serial line.
//!
//! A configuration document lists one [`Setup`] per (provider, device) pair.
//! Each setup groups the AT command dialogs for a device into phases
//! (reboot, init, network setup, network attach polling, info queries) and
//! carries the prefix used to build outgoing messages.
//!
//! ## Example
//!
//! ```
//! use senbiot_model::{Phase, Setups};
//!
//! let doc = Setups::from_yaml_str(r#"
//! device: ublox01b
//! provider: t-mobilenl
//! setups:
//!   - setup: ublox01b
//!     provider: t-mobilenl
//!     date: "2017-10-01"
//!     init:
//!       - request: AT+NCONFIG="AUTOCONNECT","TRUE"
//!         response: OK
//!     sendmesssagestring: AT+NSOST=0,172.27.131.100,15683,
//! "#)?;
//!
//! let setup = doc.find_setup("t-mobilenl", "ublox01b")?;
//! assert_eq!(setup.steps(Phase::Init).map(|s| s.len()), Some(1));
//! # Ok::<(), senbiot_model::ModelError>(())
//! ```

mod document;
mod error;
mod policy;
mod setup;

pub use document::{Setups, DEFAULT_CONFIG_FILE};
pub use error::ModelError;
pub use policy::{
    FramingStrategy, SessionPolicy, DEFAULT_NETWORK_ATTEMPTS, DEFAULT_REBOOT_DELAY_MS,
    DEFAULT_RETRY_BACKOFF_MS, DEFAULT_SETTLE_DELAY_MS,
};
pub use setup::{Phase, Setup, Step};

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
