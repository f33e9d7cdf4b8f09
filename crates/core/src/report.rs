//! The closed set of feature reports this crate knows how to build.
//!
//! Profile switch reports (16 bytes each, sent as a pair):
//!
//! | report | layout |
//! |---|---|
//! | select | `02 02 40 00 01 00 FA FA id` + zeros |
//! | apply | `02 01 01 id` + zeros |
//!
//! `id` is `0x00` for profile 1 and `0x01` for profile 2.

use crate::buttons::{encode_button_table, ButtonMap, BUTTON_REPORT_LEN};
use crate::builder::ReportBuilder;
use crate::dpi::{encode_dpi_table, DpiTable, DPI_REPORT_LEN};
use crate::light::{
    encode_light, encode_profile_light, LightSetting, LIGHT_REPORT_LEN, PROFILE_LIGHT_REPORT_LEN,
};
use crate::profile::ProfileSlot;

/// Profile switch report length.
pub const PROFILE_SWITCH_REPORT_LEN: usize = 16;

const SWITCH_REPORT_ID: u8 = 0x02;
const SWITCH_SELECT_PREAMBLE: [u8; 7] = [0x02, 0x40, 0x00, 0x01, 0x00, 0xFA, 0xFA];
const SWITCH_APPLY_CONSTANT: u16 = 0x0101;

/// Encode the two reports that make `slot` the active profile.
pub fn encode_profile_switch(
    slot: ProfileSlot,
) -> (
    [u8; PROFILE_SWITCH_REPORT_LEN],
    [u8; PROFILE_SWITCH_REPORT_LEN],
) {
    let mut select = ReportBuilder::<PROFILE_SWITCH_REPORT_LEN>::new();
    select
        .write_u8(SWITCH_REPORT_ID)
        .write_bytes(&SWITCH_SELECT_PREAMBLE)
        .write_u8(slot.switch_id());

    let mut apply = ReportBuilder::<PROFILE_SWITCH_REPORT_LEN>::new();
    apply
        .write_u8(SWITCH_REPORT_ID)
        .write_u16_le(SWITCH_APPLY_CONSTANT)
        .write_u8(slot.switch_id());

    (select.finish(), apply.finish())
}

/// A single feature report, ready to encode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    /// Immediate light change, not stored in any profile.
    Light(LightSetting),
    /// Light settings of one profile.
    ProfileLight {
        slot: ProfileSlot,
        light: LightSetting,
    },
    /// DPI levels of one profile.
    DpiTable { slot: ProfileSlot, table: DpiTable },
    /// Button bindings of one profile.
    ButtonTable { slot: ProfileSlot, buttons: ButtonMap },
    /// First half of a profile switch.
    ProfileSwitchSelect(ProfileSlot),
    /// Second half of a profile switch.
    ProfileSwitchApply(ProfileSlot),
}

impl Report {
    /// Both reports needed to switch to `slot`, in send order.
    pub fn profile_switch(slot: ProfileSlot) -> [Report; 2] {
        [
            Report::ProfileSwitchSelect(slot),
            Report::ProfileSwitchApply(slot),
        ]
    }

    /// Encode into the exact bytes sent as a feature report.
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Self::Light(light) => encode_light(light).to_vec(),
            Self::ProfileLight { slot, light } => encode_profile_light(light, *slot).to_vec(),
            Self::DpiTable { slot, table } => encode_dpi_table(table, *slot).to_vec(),
            Self::ButtonTable { slot, buttons } => encode_button_table(buttons, *slot).to_vec(),
            Self::ProfileSwitchSelect(slot) => encode_profile_switch(*slot).0.to_vec(),
            Self::ProfileSwitchApply(slot) => encode_profile_switch(*slot).1.to_vec(),
        }
    }

    /// Length of the encoded report. Fixed per report kind.
    pub fn wire_len(&self) -> usize {
        match self {
            Self::Light(_) => LIGHT_REPORT_LEN,
            Self::ProfileLight { .. } => PROFILE_LIGHT_REPORT_LEN,
            Self::DpiTable { .. } => DPI_REPORT_LEN,
            Self::ButtonTable { .. } => BUTTON_REPORT_LEN,
            Self::ProfileSwitchSelect(_) | Self::ProfileSwitchApply(_) => {
                PROFILE_SWITCH_REPORT_LEN
            }
        }
    }

    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Light(_) => "light",
            Self::ProfileLight { .. } => "profile-light",
            Self::DpiTable { .. } => "dpi-table",
            Self::ButtonTable { .. } => "button-table",
            Self::ProfileSwitchSelect(_) => "profile-switch-select",
            Self::ProfileSwitchApply(_) => "profile-switch-apply",
        }
    }
}
