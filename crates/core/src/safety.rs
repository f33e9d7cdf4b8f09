//! Safety layer: validates every user-supplied setting against the ranges
//! the firmware is known to accept, before any report is encoded or sent.
//!
//! # Bounds
//!
//! ## Light
//! - **Brightness**: 0–3 (0 = off)
//! - **Breath speed**: 0–3 (0 = always on)
//!
//! ## DPI
//! - **Range**: 50 – 12,750 per axis, or 0 to disable a level
//! - **Encoding**: one byte per axis holding `dpi / 50` (truncated), so
//!   12,750 (`255 × 50`) is the largest representable value
//! - **Levels**: exactly 4 per profile
//!
//! ## Buttons
//! - **Slots**: 9 per profile, fixed physical order
//!
//! ## Profiles
//! - **Slots**: 1 or 2
//!
//! ## Invariants
//! 1. Nothing out of range is ever encoded: validated values are carried in
//!    types ([`LightLevel`](crate::light::LightLevel),
//!    [`ProfileSlot`]) that cannot hold anything else.
//! 2. All validation happens BEFORE the device is opened, so a rejected
//!    setting never leaves a half-written configuration behind.

use crate::buttons::BUTTON_COUNT;
use crate::dpi::DPI_LEVEL_COUNT;
use crate::error::{Error, Result};
use crate::profile::ProfileSlot;

/// Warning to show when a configuration write stops part-way.
pub const PARTIAL_WRITE_WARNING: &str = "\
WARNING: the mouse only applies a configuration once the complete report \
sequence has been received, and the protocol has no rollback. A write that \
failed part-way may leave the mouse partially configured. Re-run the same \
command to send the full sequence again.";

/// Highest brightness / breath speed step.
pub const LIGHT_LEVEL_MAX: u8 = 3;

/// DPI constraints.
pub const DPI_MIN: u32 = 50;
pub const DPI_MAX: u32 = 12750;
pub const DPI_STEP: u32 = 50;

fn validate_light_level(field: &'static str, value: u32) -> Result<u8> {
    if value > LIGHT_LEVEL_MAX as u32 {
        return Err(Error::OutOfRange {
            field,
            value,
            min: 0,
            max: LIGHT_LEVEL_MAX as u32,
        });
    }
    Ok(value as u8)
}

/// Validate a light brightness step.
pub fn validate_brightness(value: u32) -> Result<u8> {
    validate_light_level("brightness", value)
}

/// Validate a light breath speed step.
pub fn validate_breath_speed(value: u32) -> Result<u8> {
    validate_light_level("breath_speed", value)
}

/// Validate a 1-based profile number.
pub fn validate_profile_number(number: u32) -> Result<ProfileSlot> {
    match number {
        1 => Ok(ProfileSlot::One),
        2 => Ok(ProfileSlot::Two),
        _ => Err(Error::OutOfRange {
            field: "profile",
            value: number,
            min: 1,
            max: 2,
        }),
    }
}

/// Validate a non-zero DPI value and return its wire multiplier (`dpi / 50`).
///
/// Values that are not a multiple of 50 are truncated, matching the vendor
/// software.
pub fn validate_dpi(dpi: u32) -> Result<u8> {
    if !(DPI_MIN..=DPI_MAX).contains(&dpi) {
        return Err(Error::OutOfRange {
            field: "dpi",
            value: dpi,
            min: DPI_MIN,
            max: DPI_MAX,
        });
    }
    Ok((dpi / DPI_STEP) as u8)
}

/// Validate a 0-based DPI level index.
pub fn validate_dpi_level_index(index: usize) -> Result<()> {
    if index >= DPI_LEVEL_COUNT {
        return Err(Error::OutOfRange {
            field: "dpi_level",
            value: index as u32,
            min: 0,
            max: (DPI_LEVEL_COUNT - 1) as u32,
        });
    }
    Ok(())
}

/// Validate a 0-based button slot index.
pub fn validate_button_index(index: usize) -> Result<()> {
    if index >= BUTTON_COUNT {
        return Err(Error::OutOfRange {
            field: "button_index",
            value: index as u32,
            min: 0,
            max: (BUTTON_COUNT - 1) as u32,
        });
    }
    Ok(())
}
