//! Indicator light settings and the two light report layouts.
//!
//! Standalone light report (16 bytes), applied immediately and not stored:
//!
//! | offset | value |
//! |---|---|
//! | 0 | report id `0x02` |
//! | 1 | internal id `0x04` |
//! | 2..5 | `255 - r`, `255 - g`, `255 - b` |
//! | 5 | brightness |
//! | 6 | breath speed |
//! | 7..16 | zero |
//!
//! Profile light report (16 bytes), sent as part of the configuration
//! sequence:
//!
//! | offset | value |
//! |---|---|
//! | 0 | report id `0x02` |
//! | 1 | internal id `0x02` |
//! | 2 | `0x81` |
//! | 3 | profile id (`0x08` / `0x11`) |
//! | 4..8 | `06 00 FA FA` |
//! | 8..11 | `255 - r`, `255 - g`, `255 - b` |
//! | 11 | brightness |
//! | 12 | breath speed |
//! | 13..16 | zero |

use crate::builder::ReportBuilder;
use crate::color::Rgb;
use crate::error::{Error, Result};
use crate::profile::ProfileSlot;
use crate::safety;
use serde::{Deserialize, Deserializer, Serialize};

/// Standalone light report length.
pub const LIGHT_REPORT_LEN: usize = 16;
/// In-sequence profile light report length.
pub const PROFILE_LIGHT_REPORT_LEN: usize = 16;

const LIGHT_REPORT_ID: u8 = 0x02;
const LIGHT_INTERNAL_ID: u8 = 0x04;

const PROFILE_LIGHT_INTERNAL_ID: u8 = 0x02;
const PROFILE_LIGHT_CONSTANT: u8 = 0x81;
const PROFILE_LIGHT_PREAMBLE: [u8; 4] = [0x06, 0x00, 0xFA, 0xFA];

/// A brightness or breath speed step, always within `0..=3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct LightLevel(u8);

impl LightLevel {
    pub const OFF: LightLevel = LightLevel(0);
    pub const MAX: LightLevel = LightLevel(safety::LIGHT_LEVEL_MAX);

    /// Validate a brightness step.
    pub fn brightness(value: u32) -> Result<Self> {
        safety::validate_brightness(value).map(Self)
    }

    /// Validate a breath speed step.
    pub fn breath_speed(value: u32) -> Result<Self> {
        safety::validate_breath_speed(value).map(Self)
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for LightLevel {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        Self::brightness(value as u32)
    }
}

impl From<LightLevel> for u8 {
    fn from(level: LightLevel) -> Self {
        level.0
    }
}

/// Color, brightness and breathing speed of the indicator light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LightSetting {
    pub color: Rgb,
    pub brightness: LightLevel,
    #[serde(deserialize_with = "breath_speed_from_u8")]
    pub breath_speed: LightLevel,
}

// LightLevel's own TryFrom validates as a brightness.
fn breath_speed_from_u8<'de, D>(deserializer: D) -> std::result::Result<LightLevel, D::Error>
where
    D: Deserializer<'de>,
{
    let value = u8::deserialize(deserializer)?;
    LightLevel::breath_speed(value as u32).map_err(serde::de::Error::custom)
}

impl LightSetting {
    pub fn new(color: Rgb, brightness: LightLevel, breath_speed: LightLevel) -> Self {
        Self {
            color,
            brightness,
            breath_speed,
        }
    }

    /// Build a setting from raw CLI values, validating both steps.
    pub fn from_raw(color: Rgb, brightness: u32, breath_speed: u32) -> Result<Self> {
        Ok(Self::new(
            color,
            LightLevel::brightness(brightness)?,
            LightLevel::breath_speed(breath_speed)?,
        ))
    }

    /// Parse `color:brightness:breath`, e.g. `#0000ff:2:0`.
    pub fn parse(spec: &str) -> Result<Self> {
        let parts: Vec<&str> = spec.split(':').collect();
        let [color, brightness, breath] = parts.as_slice() else {
            return Err(Error::parse(
                "light",
                spec,
                "expected color:brightness:breath",
            ));
        };

        let number = |s: &str| {
            s.trim()
                .parse::<u32>()
                .map_err(|e| Error::parse("light", spec, e.to_string()))
        };

        Self::from_raw(Rgb::from_hex(color)?, number(*brightness)?, number(*breath)?)
    }
}

impl Default for LightSetting {
    fn default() -> Self {
        Self::new(Rgb::BLUE, LightLevel(2), LightLevel::OFF)
    }
}

/// Encode the standalone (immediate) light report.
pub fn encode_light(setting: &LightSetting) -> [u8; LIGHT_REPORT_LEN] {
    let mut b = ReportBuilder::<LIGHT_REPORT_LEN>::new();
    b.write_u8(LIGHT_REPORT_ID)
        .write_u8(LIGHT_INTERNAL_ID)
        .write_bytes(&setting.color.inverted())
        .write_u8(setting.brightness.get())
        .write_u8(setting.breath_speed.get());
    b.finish()
}

/// Encode the light report for one profile of the configuration sequence.
pub fn encode_profile_light(
    setting: &LightSetting,
    slot: ProfileSlot,
) -> [u8; PROFILE_LIGHT_REPORT_LEN] {
    let mut b = ReportBuilder::<PROFILE_LIGHT_REPORT_LEN>::new();
    b.write_u8(LIGHT_REPORT_ID)
        .write_u8(PROFILE_LIGHT_INTERNAL_ID)
        .write_u8(PROFILE_LIGHT_CONSTANT)
        .write_u8(slot.light_id())
        .write_bytes(&PROFILE_LIGHT_PREAMBLE)
        .write_bytes(&setting.color.inverted())
        .write_u8(setting.brightness.get())
        .write_u8(setting.breath_speed.get());
    b.finish()
}
