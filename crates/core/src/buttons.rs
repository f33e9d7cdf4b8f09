//! Button remapping: nine bindings per profile, in physical slot order.
//!
//! Button report (1024 bytes):
//!
//! | offset | value |
//! |---|---|
//! | 0 | report id `0x04` |
//! | 1 | internal id `0x02` |
//! | 2 | `0x90` |
//! | 3 | profile id (`0x00` / `0x09`) |
//! | 4..9 | `41 00 FA FA 10` |
//! | 9..45 | 9 × (event, extended info, key code LE) |
//! | 45 | `0x0D` |
//! | 46..1024 | zero |

use crate::builder::ReportBuilder;
use crate::error::{Error, Result};
use crate::profile::ProfileSlot;
use crate::safety;
use serde::{Deserialize, Serialize};

/// Button report length.
pub const BUTTON_REPORT_LEN: usize = 1024;
/// Number of remappable buttons.
pub const BUTTON_COUNT: usize = 9;

const BUTTON_REPORT_ID: u8 = 0x04;
const BUTTON_INTERNAL_ID: u8 = 0x02;
const BUTTON_CONSTANT: u8 = 0x90;
const BUTTON_PREAMBLE: [u8; 5] = [0x41, 0x00, 0xFA, 0xFA, 0x10];
const BUTTON_TRAILER: u8 = 0x0D;

/// Event codes written in the first byte of each binding.
pub mod events {
    pub const LEFT_CLICK: u8 = 0x01;
    pub const RIGHT_CLICK: u8 = 0x02;
    pub const MIDDLE_CLICK: u8 = 0x03;
    pub const BACK: u8 = 0x04;
    pub const FORWARD: u8 = 0x05;
    pub const MACRO_RECORD: u8 = 0x08;
    pub const DISABLED: u8 = 0x0E;
    pub const SINGLE_KEY: u8 = 0x10;
    pub const MACRO_PLAY: u8 = 0x11;
    pub const DPI_SWITCH: u8 = 0x13;
}

/// What a button does when pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ButtonEvent {
    LeftClick,
    RightClick,
    MiddleClick,
    Back,
    Forward,
    /// Sends the binding's key code.
    SingleKey,
    MacroPlay,
    MacroRecord,
    DpiSwitch,
    Disabled,
}

impl ButtonEvent {
    /// All available events.
    pub const ALL: &'static [ButtonEvent] = &[
        ButtonEvent::LeftClick,
        ButtonEvent::RightClick,
        ButtonEvent::MiddleClick,
        ButtonEvent::Back,
        ButtonEvent::Forward,
        ButtonEvent::SingleKey,
        ButtonEvent::MacroPlay,
        ButtonEvent::MacroRecord,
        ButtonEvent::DpiSwitch,
        ButtonEvent::Disabled,
    ];

    /// Wire event code.
    pub fn code(self) -> u8 {
        match self {
            Self::LeftClick => events::LEFT_CLICK,
            Self::RightClick => events::RIGHT_CLICK,
            Self::MiddleClick => events::MIDDLE_CLICK,
            Self::Back => events::BACK,
            Self::Forward => events::FORWARD,
            Self::SingleKey => events::SINGLE_KEY,
            Self::MacroPlay => events::MACRO_PLAY,
            Self::MacroRecord => events::MACRO_RECORD,
            Self::DpiSwitch => events::DPI_SWITCH,
            Self::Disabled => events::DISABLED,
        }
    }

    /// Look up an event from its wire code.
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|e| e.code() == code)
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::LeftClick => "Left Click",
            Self::RightClick => "Right Click",
            Self::MiddleClick => "Middle Click",
            Self::Back => "Back",
            Self::Forward => "Forward",
            Self::SingleKey => "Key",
            Self::MacroPlay => "Macro Play",
            Self::MacroRecord => "Macro Record",
            Self::DpiSwitch => "DPI Switch",
            Self::Disabled => "Disabled",
        }
    }

    /// Parse an event name (case-insensitive).
    ///
    /// - "left", "left-click" → LeftClick
    /// - "right", "right-click" → RightClick
    /// - "middle", "middle-click" → MiddleClick
    /// - "back", "forward"
    /// - "key", "single-key" → SingleKey
    /// - "macro-play", "macro-record"
    /// - "dpi", "dpi-switch" → DpiSwitch
    /// - "none", "disabled" → Disabled
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "left" | "left-click" | "leftclick" => Some(Self::LeftClick),
            "right" | "right-click" | "rightclick" => Some(Self::RightClick),
            "middle" | "middle-click" | "middleclick" => Some(Self::MiddleClick),
            "back" => Some(Self::Back),
            "forward" => Some(Self::Forward),
            "key" | "single-key" => Some(Self::SingleKey),
            "macro-play" | "macro" => Some(Self::MacroPlay),
            "macro-record" | "record" => Some(Self::MacroRecord),
            "dpi" | "dpi-switch" => Some(Self::DpiSwitch),
            "none" | "disabled" | "off" => Some(Self::Disabled),
            _ => None,
        }
    }
}

impl std::fmt::Display for ButtonEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One button slot's binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonBinding {
    pub event: ButtonEvent,
    /// Opaque second byte; `0x80` for DPI switch in captured traffic, else zero.
    #[serde(default)]
    pub extended_info: u8,
    /// USB HID usage for [`ButtonEvent::SingleKey`]; zero otherwise.
    #[serde(default)]
    pub key_code: u16,
}

impl ButtonBinding {
    /// A binding with the extended info byte the vendor software uses for `event`.
    pub const fn new(event: ButtonEvent) -> Self {
        let extended_info = match event {
            ButtonEvent::DpiSwitch => 0x80,
            _ => 0x00,
        };
        Self {
            event,
            extended_info,
            key_code: 0,
        }
    }

    /// A single-key binding sending `key_code`.
    pub const fn key(key_code: u16) -> Self {
        Self {
            event: ButtonEvent::SingleKey,
            extended_info: 0,
            key_code,
        }
    }

    const fn raw(event: ButtonEvent, extended_info: u8, key_code: u16) -> Self {
        Self {
            event,
            extended_info,
            key_code,
        }
    }

    /// Parse an action such as `left`, `dpi-switch`, `key:0xE2` or `macro-play:21`.
    pub fn parse(input: &str) -> Result<Self> {
        let (name, arg) = match input.split_once(':') {
            Some((name, arg)) => (name.trim(), Some(arg.trim())),
            None => (input.trim(), None),
        };

        let event = ButtonEvent::from_name(name)
            .ok_or_else(|| Error::parse("button", input, format!("unknown action '{name}'")))?;

        match (event, arg) {
            (ButtonEvent::SingleKey, Some(code)) => Ok(Self::key(parse_code(input, code)?)),
            (ButtonEvent::SingleKey, None) => {
                Err(Error::parse("button", input, "key needs a code, e.g. key:0xE2"))
            }
            (ButtonEvent::MacroPlay, Some(code)) => Ok(Self::raw(
                ButtonEvent::MacroPlay,
                0,
                parse_code(input, code)?,
            )),
            (_, None) => Ok(Self::new(event)),
            (_, Some(_)) => Err(Error::parse(
                "button",
                input,
                format!("'{name}' takes no argument"),
            )),
        }
    }
}

fn parse_code(input: &str, code: &str) -> Result<u16> {
    let parsed = match code.strip_prefix("0x").or_else(|| code.strip_prefix("0X")) {
        Some(hex) => u16::from_str_radix(hex, 16),
        None => code.parse::<u16>(),
    };
    parsed.map_err(|e| Error::parse("button", input, format!("key code '{code}': {e}")))
}

/// Parse `N=ACTION`, where `N` is the 1-based button slot.
///
/// Returns the 0-based slot index and the binding.
pub fn parse_button_assignment(input: &str) -> Result<(usize, ButtonBinding)> {
    let (slot, action) = input
        .split_once('=')
        .ok_or_else(|| Error::parse("button", input, "expected N=ACTION"))?;
    let number: usize = slot
        .trim()
        .parse()
        .map_err(|e| Error::parse("button", input, format!("slot '{}': {e}", slot.trim())))?;
    if number == 0 {
        return Err(Error::OutOfRange {
            field: "button",
            value: 0,
            min: 1,
            max: BUTTON_COUNT as u32,
        });
    }
    let index = number - 1;
    safety::validate_button_index(index)?;
    Ok((index, ButtonBinding::parse(action)?))
}

/// Nine button bindings in physical slot order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ButtonMap {
    bindings: [ButtonBinding; BUTTON_COUNT],
}

impl Default for ButtonMap {
    /// The vendor application's factory mapping.
    fn default() -> Self {
        Self {
            bindings: [
                ButtonBinding::new(ButtonEvent::LeftClick),
                ButtonBinding::new(ButtonEvent::RightClick),
                ButtonBinding::new(ButtonEvent::MiddleClick),
                ButtonBinding::new(ButtonEvent::Forward),
                ButtonBinding::key(0x00E2), // left alt
                ButtonBinding::new(ButtonEvent::Back),
                ButtonBinding::raw(ButtonEvent::MacroPlay, 0x00, 0x0015),
                ButtonBinding::new(ButtonEvent::MacroRecord),
                ButtonBinding::new(ButtonEvent::DpiSwitch),
            ],
        }
    }
}

impl ButtonMap {
    pub fn bindings(&self) -> &[ButtonBinding; BUTTON_COUNT] {
        &self.bindings
    }

    pub fn get(&self, index: usize) -> Option<&ButtonBinding> {
        self.bindings.get(index)
    }

    /// Replace the binding of one 0-based slot.
    pub fn set(&mut self, index: usize, binding: ButtonBinding) -> Result<()> {
        safety::validate_button_index(index)?;
        self.bindings[index] = binding;
        Ok(())
    }
}

/// Encode the button report for one profile.
pub fn encode_button_table(map: &ButtonMap, slot: ProfileSlot) -> [u8; BUTTON_REPORT_LEN] {
    let mut b = ReportBuilder::<BUTTON_REPORT_LEN>::new();
    b.write_u8(BUTTON_REPORT_ID)
        .write_u8(BUTTON_INTERNAL_ID)
        .write_u8(BUTTON_CONSTANT)
        .write_u8(slot.table_id())
        .write_bytes(&BUTTON_PREAMBLE);
    for binding in map.bindings() {
        b.write_u8(binding.event.code())
            .write_u8(binding.extended_info)
            .write_u16_le(binding.key_code);
    }
    b.write_u8(BUTTON_TRAILER);
    b.finish()
}
