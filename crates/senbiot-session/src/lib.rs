//! AT command sessions for NB-IoT modems.
//!
//! This crate drives a modem through the command dialogs of a
//! [`Setup`](senbiot_model::Setup) over any blocking byte stream, usually a
//! serial port.
//!
//! # Protocol Overview
//!
//! The protocol is line-based text:
//!
//! - **Requests** (host → modem): command text terminated with `\r\n`
//! - **Replies** (modem → host): text framed by line breaks, e.g. `\r\nOK\r\n`
//! - **Messages**: payloads are sent as `<prefix><len>,<hex>`, where `<len>`
//!   is the length of the lowercase hex text
//!
//! # Example
//!
//! ```rust,ignore
//! use senbiot_model::{Phase, Setups};
//! use senbiot_session::Session;
//!
//! let doc = Setups::from_file("config.yml")?;
//! let setup = doc.find_setup("t-mobilenl", "ublox01b")?;
//!
//! let mut session = Session::with_policy(port, doc.policy.clone());
//! session.run_phase(setup, Phase::WaitForNetwork, &[])?;
//! let reply = session.send_message(setup, b"hello")?;
//! ```

pub mod codec;
mod error;
mod framing;
mod runner;
mod transcript;

pub use error::*;
pub use framing::*;
pub use runner::message_request;
pub use transcript::*;
