//! Full device configuration: both profiles plus the write script.
//!
//! Settings can be read from a JSON file:
//!
//! ```json
//! {
//!   "firmware": "full",
//!   "profiles": [
//!     { "slot": 1, "light": { "color": "#0000ff", "brightness": 2, "breath_speed": 0 } },
//!     { "slot": 2, "light": { "color": "#00ff00", "brightness": 2, "breath_speed": 0 } }
//!   ]
//! }
//! ```
//!
//! `dpi` and `buttons` may be omitted per profile and fall back to the
//! factory tables. The file is only ever read.

use crate::error::{Error, Result};
use crate::profile::{Profile, ProfileSlot};
use crate::sequence::{FirmwareVariant, ReportTemplate};
use crate::transport::{self, FeatureReportTransport};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Serialize, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    firmware: FirmwareVariant,
    profiles: Vec<Profile>,
}

/// Two profiles and the script they are written with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    profiles: [Profile; 2],
    template: ReportTemplate,
}

impl Default for Config {
    fn default() -> Self {
        Self::new(FirmwareVariant::default())
    }
}

impl Config {
    /// Factory profiles for the given firmware variant.
    pub fn new(variant: FirmwareVariant) -> Self {
        Self {
            profiles: [Profile::new(ProfileSlot::One), Profile::new(ProfileSlot::Two)],
            template: ReportTemplate::new(variant),
        }
    }

    pub fn variant(&self) -> FirmwareVariant {
        self.template.variant()
    }

    /// Switch to another firmware script, keeping the profiles.
    pub fn set_variant(&mut self, variant: FirmwareVariant) {
        if variant != self.variant() {
            self.template = ReportTemplate::new(variant);
        }
    }

    pub fn profile(&self, slot: ProfileSlot) -> &Profile {
        &self.profiles[slot.index()]
    }

    pub fn profile_mut(&mut self, slot: ProfileSlot) -> &mut Profile {
        &mut self.profiles[slot.index()]
    }

    pub fn profiles(&self) -> &[Profile; 2] {
        &self.profiles
    }

    /// The complete ordered report list for the current settings.
    pub fn reports(&self) -> Vec<Vec<u8>> {
        self.template.assemble(&self.profiles)
    }

    /// Write the whole configuration to the device.
    ///
    /// On failure some reports may already be applied; see
    /// [`Error::ReportWrite`].
    pub fn write(&self, transport: &dyn FeatureReportTransport) -> Result<()> {
        let frames = self.reports();
        info!(
            firmware = %self.variant(),
            reports = frames.len(),
            "Writing configuration"
        );
        transport::send_sequence(transport, &frames)
    }

    /// Parse settings from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let file: ConfigFile =
            serde_json::from_str(json).map_err(|e| Error::Profile(e.to_string()))?;
        Self::from_file(file)
    }

    /// Serialize settings to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        let file = ConfigFile {
            firmware: self.variant(),
            profiles: self.profiles.to_vec(),
        };
        serde_json::to_string_pretty(&file).map_err(|e| Error::Profile(e.to_string()))
    }

    /// Read settings from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "Loading settings file");
        let json = std::fs::read_to_string(path)
            .map_err(|e| Error::Profile(format!("{}: {e}", path.display())))?;
        Self::from_json(&json)
    }

    fn from_file(file: ConfigFile) -> Result<Self> {
        if file.profiles.len() != ProfileSlot::ALL.len() {
            return Err(Error::Profile(format!(
                "expected {} profiles, found {}",
                ProfileSlot::ALL.len(),
                file.profiles.len()
            )));
        }

        let mut config = Self::new(file.firmware);
        let mut seen = [false; 2];
        for profile in file.profiles {
            let index = profile.slot().index();
            if seen[index] {
                return Err(Error::Profile(format!(
                    "{} is defined more than once",
                    profile.slot()
                )));
            }
            seen[index] = true;
            config.profiles[index] = profile;
        }
        Ok(config)
    }
}
