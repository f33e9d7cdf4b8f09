//! anker-mouse-core: report encoding, profile model and configuration
//! write sequence for the Anker gaming mouse.
//!
//! The mouse is configured entirely through HID feature reports. This crate
//! builds those reports from typed settings, assembles them into the script
//! the firmware expects and sends them through a pluggable transport.

pub mod builder;
pub mod buttons;
pub mod color;
pub mod config;
pub mod device;
pub mod dpi;
pub mod error;
pub mod light;
pub mod profile;
pub mod report;
pub mod safety;
pub mod sequence;
pub mod transport;

/// Holtek USB Vendor ID (the mouse's controller vendor).
pub const HOLTEK_VID: u16 = 0x04D9;

/// Known product IDs.
pub mod pids {
    /// Anker gaming mouse.
    pub const ANKER_MOUSE: u16 = 0xFA50;
}
