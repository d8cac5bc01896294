//! Serial port access.

use std::time::Duration;

use serialport::{SerialPort, SerialPortInfo, SerialPortType};
use tracing::{debug, info};

use crate::error::{AppError, AppResult};

/// List available serial ports. An empty list is an error.
pub fn available_ports() -> AppResult<Vec<SerialPortInfo>> {
    let ports = serialport::available_ports()?;
    if ports.is_empty() {
        return Err(AppError::NoPorts);
    }
    Ok(ports)
}

/// One-line description of a port.
pub fn describe(port: &SerialPortInfo) -> String {
    match &port.port_type {
        SerialPortType::UsbPort(usb) => format!(
            "{} (USB {:04x}:{:04x}{})",
            port.port_name,
            usb.vid,
            usb.pid,
            usb.product
                .as_deref()
                .map(|p| format!(" {p}"))
                .unwrap_or_default()
        ),
        SerialPortType::BluetoothPort => format!("{} (Bluetooth)", port.port_name),
        SerialPortType::PciPort => format!("{} (PCI)", port.port_name),
        SerialPortType::Unknown => port.port_name.clone(),
    }
}

/// Log the available ports, ignoring enumeration failures.
pub fn log_available_ports() {
    match available_ports() {
        Ok(ports) => {
            info!("Available ports:");
            for port in &ports {
                info!("  {}", describe(port));
            }
        }
        Err(e) => info!("{}", e),
    }
}

/// Open `path` at `baud`, 8N1, with the given read timeout.
pub fn open_port(path: &str, baud: u32, timeout: Duration) -> AppResult<Box<dyn SerialPort>> {
    debug!("Opening {} at {} baud", path, baud);
    serialport::new(path, baud)
        .timeout(timeout)
        .open()
        .map_err(|source| AppError::OpenPort {
            port: path.to_string(),
            source,
        })
}
