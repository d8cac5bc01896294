//! # senbiot-cli
//!
//! Command-line front end for senbiot. One binary replaces the separate
//! tools for running device phases, sending messages, checking a device,
//! decoding received payloads and listing serial ports:
//!
//! ```text
//! senbiot --device ublox01b --provider t-mobilenl --port /dev/ttyUSB0 run Reboot,Init
//! senbiot run                      # SetupNetwork,WaitForNetwork,SendMessage
//! echo -n hello | senbiot send
//! senbiot check                    # ConfigInfo,NetworkInfo
//! senbiot decode -m 68656c6c6f
//! senbiot ports
//! ```

pub mod app;
pub mod cli;
pub mod error;
pub mod payload;
pub mod selection;
pub mod serial;

pub use app::run;
pub use cli::{Cli, Command};
pub use error::{AppError, AppResult};
