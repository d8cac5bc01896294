//! Resolving which device, provider and port to use.
//!
//! Command-line values win over the defaults in the configuration document.

use senbiot_model::Setups;

use crate::error::{AppError, AppResult};

/// The (provider, device) pair a command runs against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub provider: String,
    pub device: String,
}

fn pick(flag: Option<&str>, default: Option<&str>) -> Option<String> {
    flag.filter(|s| !s.is_empty())
        .or(default.filter(|s| !s.is_empty()))
        .map(str::to_string)
}

/// Resolve the provider/device pair from flags and document defaults.
pub fn resolve_selection(
    device: Option<&str>,
    provider: Option<&str>,
    doc: &Setups,
) -> AppResult<Selection> {
    let device = pick(device, doc.device.as_deref()).ok_or_else(|| {
        AppError::Usage(
            "no device name present, please set --device (see the config file for device names, e.g. ublox01b)"
                .to_string(),
        )
    })?;
    let provider = pick(provider, doc.provider.as_deref()).ok_or_else(|| {
        AppError::Usage(
            "no provider present, please set --provider (see the config file for provider names, e.g. t-mobilenl)"
                .to_string(),
        )
    })?;
    Ok(Selection { provider, device })
}

/// Resolve the serial port from the flag and the document default.
pub fn resolve_port(port: Option<&str>, doc: &Setups) -> Option<String> {
    pick(port, doc.port_id.as_deref())
}
