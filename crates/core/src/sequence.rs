//! The configuration write sequence.
//!
//! The firmware only applies a configuration when it receives one exact
//! script of feature reports, in order. Most of the script is constant
//! captured traffic; a few fixed positions carry the encoded light, DPI and
//! button reports of each profile. Positions and script length are per
//! firmware variant and are not derived from anything.
//!
//! The static scripts are never mutated: every [`ReportTemplate`] owns its
//! own copy, and [`ReportTemplate::assemble`] fills a fresh clone per call.

use crate::builder::padded;
use crate::error::{Error, Result};
use crate::profile::{Profile, ProfileSlot};
use crate::report::Report;
use serde::{Deserialize, Serialize};
use tracing::trace;

// Captured constant reports. Names follow the third byte; their meaning is
// unknown and the bytes must be sent exactly as recorded.
const START: [u8; 16] = padded(&[0x02, 0x06]);
const BLOCK_10: [u8; 16] = padded(&[
    0x02, 0x02, 0x10, 0x00, 0x08, 0x00, 0xFA, 0xFA, 0xE2, 0x30, 0x97, 0x2F, 0xCF, 0xBB, 0xE4, 0x40,
]);
const BLOCK_40: [u8; 16] = padded(&[0x02, 0x03, 0x40, 0x00, 0x01, 0x00, 0xFA, 0xFA]);
// Byte 8 may be the report rate.
const BLOCK_45: [u8; 16] = padded(&[0x02, 0x02, 0x45, 0x00, 0x01, 0x00, 0xFA, 0xFA, 0x02]);
const BLOCK_48: [u8; 16] = padded(&[0x02, 0x03, 0x48, 0x00, 0x20]);
const BLOCK_D1_BODY: [u8; 21] = [
    0x81, 0x01, 0x01, 0x06, 0x01, 0x00, 0x01, 0x01, 0x01, 0x06, 0x02, 0x00, 0x81, 0x01, 0x01, 0x06,
    0x01, 0x00, 0x01, 0x01, 0x01,
];
const BLOCK_D1_PROFILE_1: [u8; 64] = d1_block(0x00);
const BLOCK_D1_PROFILE_2: [u8; 64] = d1_block(0x09);
const COMMIT: [u8; 16] = padded(&[0x02, 0x01, 0x01]);

/// Filled in by [`ReportTemplate::assemble`].
const PLACEHOLDER: &[u8] = &[];

const fn d1_block(profile_id: u8) -> [u8; 64] {
    let mut out: [u8; 64] = padded(&[0x03, 0x02, 0xD1, profile_id, 0x15, 0x00, 0xFA, 0xFA]);
    let mut i = 0;
    while i < BLOCK_D1_BODY.len() {
        out[8 + i] = BLOCK_D1_BODY[i];
        i += 1;
    }
    out
}

static FULL_SCRIPT: [&[u8]; 14] = [
    &START,
    &BLOCK_10,
    &BLOCK_40,
    &BLOCK_45,
    &BLOCK_48,
    PLACEHOLDER,
    &BLOCK_D1_PROFILE_1,
    PLACEHOLDER,
    PLACEHOLDER,
    PLACEHOLDER,
    &BLOCK_D1_PROFILE_2,
    PLACEHOLDER,
    PLACEHOLDER,
    &COMMIT,
];

static FULL_SUBSTITUTIONS: [Substitution; 6] = [
    Substitution::new(5, Placeholder::Buttons(ProfileSlot::One)),
    Substitution::new(7, Placeholder::Light(ProfileSlot::One)),
    Substitution::new(8, Placeholder::Dpi(ProfileSlot::One)),
    Substitution::new(9, Placeholder::Buttons(ProfileSlot::Two)),
    Substitution::new(11, Placeholder::Light(ProfileSlot::Two)),
    Substitution::new(12, Placeholder::Dpi(ProfileSlot::Two)),
];

static LIGHT_AND_DPI_SCRIPT: [&[u8]; 12] = [
    &START,
    &BLOCK_10,
    &BLOCK_40,
    &BLOCK_45,
    &BLOCK_48,
    &BLOCK_D1_PROFILE_1,
    PLACEHOLDER,
    PLACEHOLDER,
    &BLOCK_D1_PROFILE_2,
    PLACEHOLDER,
    PLACEHOLDER,
    &COMMIT,
];

static LIGHT_AND_DPI_SUBSTITUTIONS: [Substitution; 4] = [
    Substitution::new(6, Placeholder::Light(ProfileSlot::One)),
    Substitution::new(7, Placeholder::Dpi(ProfileSlot::One)),
    Substitution::new(9, Placeholder::Light(ProfileSlot::Two)),
    Substitution::new(10, Placeholder::Dpi(ProfileSlot::Two)),
];

/// Known firmware command scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FirmwareVariant {
    /// 14 reports, including both button tables.
    #[default]
    Full,
    /// 12 reports; button tables are not written.
    LightAndDpi,
}

impl FirmwareVariant {
    pub const ALL: &'static [FirmwareVariant] =
        &[FirmwareVariant::Full, FirmwareVariant::LightAndDpi];

    pub fn name(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::LightAndDpi => "light-and-dpi",
        }
    }

    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_lowercase().as_str() {
            "full" => Ok(Self::Full),
            "light-and-dpi" | "light-dpi" => Ok(Self::LightAndDpi),
            _ => Err(Error::parse(
                "firmware",
                name,
                "expected 'full' or 'light-and-dpi'",
            )),
        }
    }

    /// Whether this script carries the button tables.
    pub fn writes_buttons(self) -> bool {
        self.substitutions()
            .iter()
            .any(|s| matches!(s.placeholder, Placeholder::Buttons(_)))
    }

    fn script(self) -> &'static [&'static [u8]] {
        match self {
            Self::Full => &FULL_SCRIPT,
            Self::LightAndDpi => &LIGHT_AND_DPI_SCRIPT,
        }
    }

    /// Positions in the script that receive per-profile reports.
    pub fn substitutions(self) -> &'static [Substitution] {
        match self {
            Self::Full => &FULL_SUBSTITUTIONS,
            Self::LightAndDpi => &LIGHT_AND_DPI_SUBSTITUTIONS,
        }
    }
}

impl std::fmt::Display for FirmwareVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Which per-profile report fills a placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    Light(ProfileSlot),
    Dpi(ProfileSlot),
    Buttons(ProfileSlot),
}

impl Placeholder {
    pub fn slot(self) -> ProfileSlot {
        match self {
            Self::Light(slot) | Self::Dpi(slot) | Self::Buttons(slot) => slot,
        }
    }

    /// Build the report for this position from the matching profile.
    pub fn report(self, profile: &Profile) -> Report {
        let slot = self.slot();
        match self {
            Self::Light(_) => Report::ProfileLight {
                slot,
                light: *profile.light(),
            },
            Self::Dpi(_) => Report::DpiTable {
                slot,
                table: *profile.dpi(),
            },
            Self::Buttons(_) => Report::ButtonTable {
                slot,
                buttons: *profile.buttons(),
            },
        }
    }
}

/// A fixed script position and what goes there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Substitution {
    pub index: usize,
    pub placeholder: Placeholder,
}

impl Substitution {
    const fn new(index: usize, placeholder: Placeholder) -> Self {
        Self { index, placeholder }
    }
}

/// An owned copy of one firmware variant's script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportTemplate {
    variant: FirmwareVariant,
    frames: Vec<Vec<u8>>,
}

impl ReportTemplate {
    pub fn new(variant: FirmwareVariant) -> Self {
        Self {
            variant,
            frames: variant.script().iter().map(|f| f.to_vec()).collect(),
        }
    }

    pub fn variant(&self) -> FirmwareVariant {
        self.variant
    }

    /// Number of reports in the script.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// The unfilled script; placeholder positions are empty.
    pub fn frames(&self) -> &[Vec<u8>] {
        &self.frames
    }

    pub fn substitutions(&self) -> &'static [Substitution] {
        self.variant.substitutions()
    }

    /// Produce the complete ordered report list for `profiles`.
    ///
    /// `profiles[0]` must be slot 1 and `profiles[1]` slot 2.
    pub fn assemble(&self, profiles: &[Profile; 2]) -> Vec<Vec<u8>> {
        let mut frames = self.frames.clone();
        for sub in self.substitutions() {
            let slot = sub.placeholder.slot();
            let profile = &profiles[slot.index()];
            debug_assert_eq!(profile.slot(), slot, "profiles out of slot order");

            let report = sub.placeholder.report(profile);
            let bytes = report.encode();
            trace!(
                index = sub.index,
                report = report.name(),
                slot = slot.number(),
                len = bytes.len(),
                "Filled script position"
            );
            frames[sub.index] = bytes;
        }
        debug_assert!(
            frames.iter().all(|f| !f.is_empty()),
            "unfilled placeholder in {} script",
            self.variant
        );
        frames
    }
}
