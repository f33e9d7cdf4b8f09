//! Onboard profiles: two slots, each holding a light, DPI table and button map.

use crate::buttons::{ButtonBinding, ButtonMap};
use crate::color::Rgb;
use crate::dpi::{DpiSpec, DpiTable};
use crate::error::{Error, Result};
use crate::light::{LightLevel, LightSetting};
use crate::safety;
use serde::{Deserialize, Serialize};

/// One of the two on-device configuration slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ProfileSlot {
    One,
    Two,
}

impl ProfileSlot {
    pub const ALL: [ProfileSlot; 2] = [ProfileSlot::One, ProfileSlot::Two];

    /// Validate a 1-based profile number.
    pub fn from_number(number: u32) -> Result<Self> {
        safety::validate_profile_number(number)
    }

    /// 1-based profile number.
    pub fn number(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
        }
    }

    /// 0-based index.
    pub fn index(self) -> usize {
        self.number() as usize - 1
    }

    /// Profile id byte in the in-sequence light report.
    pub fn light_id(self) -> u8 {
        match self {
            Self::One => 0x08,
            Self::Two => 0x11,
        }
    }

    /// Profile id byte in the DPI and button reports.
    pub fn table_id(self) -> u8 {
        match self {
            Self::One => 0x00,
            Self::Two => 0x09,
        }
    }

    /// Profile id byte in the two profile-switch reports.
    pub fn switch_id(self) -> u8 {
        self.index() as u8
    }
}

impl std::fmt::Display for ProfileSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "profile {}", self.number())
    }
}

impl TryFrom<u8> for ProfileSlot {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        Self::from_number(value as u32)
    }
}

impl From<ProfileSlot> for u8 {
    fn from(slot: ProfileSlot) -> Self {
        slot.number()
    }
}

/// Settings stored in one profile slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    slot: ProfileSlot,
    light: LightSetting,
    #[serde(default)]
    dpi: DpiTable,
    #[serde(default)]
    buttons: ButtonMap,
}

impl Profile {
    /// Factory settings for `slot`: blue light on profile 1, green on profile 2.
    pub fn new(slot: ProfileSlot) -> Self {
        let mut light = LightSetting::default();
        if slot == ProfileSlot::Two {
            light.color = Rgb::GREEN;
        }
        Self {
            slot,
            light,
            dpi: DpiTable::default(),
            buttons: ButtonMap::default(),
        }
    }

    pub fn slot(&self) -> ProfileSlot {
        self.slot
    }

    pub fn light(&self) -> &LightSetting {
        &self.light
    }

    pub fn dpi(&self) -> &DpiTable {
        &self.dpi
    }

    pub fn buttons(&self) -> &ButtonMap {
        &self.buttons
    }

    pub fn set_light(&mut self, light: LightSetting) {
        self.light = light;
    }

    pub fn set_color(&mut self, color: Rgb) {
        self.light.color = color;
    }

    pub fn set_brightness(&mut self, brightness: u32) -> Result<()> {
        self.light.brightness = LightLevel::brightness(brightness)?;
        Ok(())
    }

    pub fn set_breath_speed(&mut self, breath_speed: u32) -> Result<()> {
        self.light.breath_speed = LightLevel::breath_speed(breath_speed)?;
        Ok(())
    }

    /// Replace all four DPI levels; see [`DpiTable::apply`].
    pub fn set_dpi(&mut self, spec: &DpiSpec) -> Result<()> {
        self.dpi.apply(spec)
    }

    pub fn set_dpi_level(&mut self, index: usize, x_dpi: u32, y_dpi: u32) -> Result<()> {
        self.dpi.set_level(index, x_dpi, y_dpi)
    }

    pub fn set_button(&mut self, index: usize, binding: ButtonBinding) -> Result<()> {
        self.buttons.set(index, binding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buttons::ButtonEvent;

    #[test]
    fn slot_id_bytes_differ_per_report_type() {
        assert_eq!(ProfileSlot::One.light_id(), 0x08);
        assert_eq!(ProfileSlot::Two.light_id(), 0x11);
        assert_eq!(ProfileSlot::One.table_id(), 0x00);
        assert_eq!(ProfileSlot::Two.table_id(), 0x09);
        assert_eq!(ProfileSlot::One.switch_id(), 0x00);
        assert_eq!(ProfileSlot::Two.switch_id(), 0x01);
    }

    #[test]
    fn slot_from_number() {
        assert_eq!(ProfileSlot::from_number(2).unwrap(), ProfileSlot::Two);
        assert!(ProfileSlot::from_number(0).is_err());
        assert!(ProfileSlot::try_from(3u8).is_err());
    }

    #[test]
    fn defaults_per_slot() {
        assert_eq!(Profile::new(ProfileSlot::One).light().color, Rgb::BLUE);
        assert_eq!(Profile::new(ProfileSlot::Two).light().color, Rgb::GREEN);
    }

    #[test]
    fn setters_validate_before_mutating() {
        let mut p = Profile::new(ProfileSlot::One);
        p.set_brightness(3).unwrap();
        assert!(p.set_brightness(4).is_err());
        assert_eq!(p.light().brightness.get(), 3);
        assert!(p.set_breath_speed(9).is_err());
        assert_eq!(p.light().breath_speed.get(), 0);
        assert!(p.set_button(9, ButtonBinding::new(ButtonEvent::Back)).is_err());
    }

    #[test]
    fn profiles_do_not_share_state() {
        let mut a = Profile::new(ProfileSlot::One);
        let b = Profile::new(ProfileSlot::One);
        a.set_color(Rgb::new(1, 2, 3));
        a.set_dpi_level(0, 400, 400).unwrap();
        assert_ne!(a, b);
        assert_eq!(b.dpi(), &DpiTable::default());
    }

    #[test]
    fn profile_serialization_roundtrip() {
        let mut profile = Profile::new(ProfileSlot::Two);
        profile.set_button(4, ButtonBinding::key(0x04)).unwrap();
        let json = serde_json::to_string(&profile).expect("serialize profile");
        let back: Profile = serde_json::from_str(&json).expect("deserialize profile");
        assert_eq!(back, profile);
    }

    #[test]
    fn profile_json_defaults_tables() {
        let json = r##"{"slot":1,"light":{"color":"#ff0000","brightness":1,"breath_speed":2}}"##;
        let profile: Profile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.slot(), ProfileSlot::One);
        assert_eq!(profile.dpi(), &DpiTable::default());
        assert_eq!(profile.buttons(), &ButtonMap::default());
    }
}
