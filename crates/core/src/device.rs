//! Device discovery and open-failure classification.

use crate::error::{Error, Result};
use crate::{pids, HOLTEK_VID};
use tracing::{debug, info};

/// Information about one HID interface of the mouse.
///
/// The mouse exposes several interfaces; each shows up as its own entry.
#[derive(Debug, Clone)]
pub struct DeviceInfo {
    pub vid: u16,
    pub pid: u16,
    pub path: String,
    pub serial: Option<String>,
    pub product: Option<String>,
    pub interface_number: i32,
}

impl DeviceInfo {
    /// `VID:PID` in the usual hex notation.
    pub fn id(&self) -> String {
        format!("{:04X}:{:04X}", self.vid, self.pid)
    }
}

/// Whether a USB id pair belongs to the supported mouse.
pub fn is_supported(vid: u16, pid: u16) -> bool {
    vid == HOLTEK_VID && pid == pids::ANKER_MOUSE
}

/// Discover all HID interfaces of connected supported mice.
pub fn discover_devices() -> Result<Vec<DeviceInfo>> {
    debug!("Starting HID device enumeration");
    let api = hidapi::HidApi::new().map_err(|e| Error::Hid(e.to_string()))?;

    let mut devices = Vec::new();
    for info in api.device_list() {
        if !is_supported(info.vendor_id(), info.product_id()) {
            continue;
        }

        info!(
            vid = format_args!("0x{:04X}", info.vendor_id()),
            pid = format_args!("0x{:04X}", info.product_id()),
            interface = info.interface_number(),
            path = %info.path().to_string_lossy(),
            "Found mouse interface"
        );
        devices.push(DeviceInfo {
            vid: info.vendor_id(),
            pid: info.product_id(),
            path: info.path().to_string_lossy().into_owned(),
            serial: info.serial_number().map(|s| s.to_string()),
            product: info.product_string().map(|s| s.to_string()),
            interface_number: info.interface_number(),
        });
    }

    debug!(count = devices.len(), "Device enumeration complete");
    Ok(devices)
}

/// Classify an hidapi open failure message.
///
/// hidapi reports every open failure as a string, so permission problems
/// are recognised by their wording.
pub fn open_error(message: &str) -> Error {
    let lower = message.to_lowercase();
    if lower.contains("permission") || lower.contains("access denied") || lower.contains("eacces")
    {
        Error::PermissionDenied(format!(
            "{message} (on Linux, install a udev rule granting access to {:04X}:{:04X})",
            HOLTEK_VID,
            pids::ANKER_MOUSE
        ))
    } else {
        Error::DeviceNotFound(format!(
            "{:04X}:{:04X}: {message}",
            HOLTEK_VID,
            pids::ANKER_MOUSE
        ))
    }
}
