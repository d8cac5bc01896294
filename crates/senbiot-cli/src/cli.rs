//! Command-line arguments.

use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser, Subcommand};
use senbiot_model::{Phase, DEFAULT_CONFIG_FILE};

/// Default serial baud rate of the supported modems.
pub const DEFAULT_BAUD_RATE: u32 = 9600;

/// Default serial read timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Phases run by `senbiot run` when none are given.
pub const DEFAULT_RUN_PHASES: [Phase; 3] =
    [Phase::SetupNetwork, Phase::WaitForNetwork, Phase::SendMessage];

/// Phases run by `senbiot check`.
pub const CHECK_PHASES: [Phase; 2] = [Phase::ConfigInfo, Phase::NetworkInfo];

/// Drive NB-IoT modems through configured AT command sequences.
#[derive(Debug, Parser)]
#[command(name = "senbiot", version)]
pub struct Cli {
    /// Configuration file with the device setups.
    #[arg(long, short = 'c', default_value = DEFAULT_CONFIG_FILE, env = "SENBIOT_CONFIG", global = true)]
    pub config: PathBuf,

    /// Device name (setup) to use, e.g. ublox01b. Overrides the config default.
    #[arg(long, short = 'd', env = "SENBIOT_DEVICE", global = true)]
    pub device: Option<String>,

    /// Network provider, e.g. t-mobilenl. Overrides the config default.
    #[arg(long, env = "SENBIOT_PROVIDER", global = true)]
    pub provider: Option<String>,

    /// Serial port to communicate on. Overrides the config default.
    #[arg(long, short = 'p', alias = "portID", env = "SENBIOT_PORT", global = true)]
    pub port: Option<String>,

    /// Serial baud rate.
    #[arg(long, default_value_t = DEFAULT_BAUD_RATE, global = true)]
    pub baud: u32,

    /// Seconds to wait for the device before a read fails.
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, global = true)]
    pub timeout: u64,

    /// More logging (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// Default log filter for the verbosity level.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run phases in order (default: SetupNetwork,WaitForNetwork,SendMessage).
    Run {
        /// Comma-separated phases: Reboot, Init, SetupNetwork, WaitForNetwork,
        /// ConfigInfo, NetworkInfo, SendMessage, MessageResponse.
        #[arg(value_delimiter = ',')]
        phases: Vec<Phase>,

        /// Message to send. Piped stdin is used instead when present.
        #[arg(long, short = 'm')]
        message: Option<String>,
    },

    /// Send a message on an already attached device.
    Send {
        /// Message to send. Piped stdin is used instead when present.
        #[arg(long, short = 'm')]
        message: Option<String>,
    },

    /// Show device configuration and network status.
    Check,

    /// Decode a received hex (or base64) payload and print it.
    Decode {
        /// Encoded payload. Piped stdin is used instead when present.
        #[arg(long, short = 'm')]
        message: Option<String>,

        /// Payload is base64 instead of hex.
        #[arg(long)]
        base64: bool,
    },

    /// List available serial ports.
    Ports,
}

impl Command {
    /// Phases this command runs against a device, if any.
    pub fn phases(&self) -> Option<Vec<Phase>> {
        match self {
            Command::Run { phases, .. } if phases.is_empty() => Some(DEFAULT_RUN_PHASES.to_vec()),
            Command::Run { phases, .. } => Some(phases.clone()),
            Command::Send { .. } => Some(vec![Phase::SendMessage]),
            Command::Check => Some(CHECK_PHASES.to_vec()),
            Command::Decode { .. } | Command::Ports => None,
        }
    }

    /// The `--message` flag, if this command takes one.
    pub fn message_flag(&self) -> Option<&str> {
        match self {
            Command::Run { message, .. }
            | Command::Send { message }
            | Command::Decode { message, .. } => message.as_deref(),
            Command::Check | Command::Ports => None,
        }
    }
}
