//! DPI step table: four selectable sensitivity levels per profile.
//!
//! DPI report (64 bytes):
//!
//! | offset | value |
//! |---|---|
//! | 0 | report id `0x03` |
//! | 1 | internal id `0x02` |
//! | 2 | profile id (`0x00` / `0x09`) |
//! | 3..9 | `20 00 FA FA 04 01` (captured, meaning unknown) |
//! | 9..21 | 4 × (enabled, X, Y), X/Y in units of 50 DPI |
//! | 21..64 | zero |

use crate::builder::ReportBuilder;
use crate::error::{Error, Result};
use crate::profile::ProfileSlot;
use crate::safety;
use serde::{Deserialize, Serialize};

/// DPI report length.
pub const DPI_REPORT_LEN: usize = 64;
/// Number of DPI levels per profile.
pub const DPI_LEVEL_COUNT: usize = 4;

const DPI_REPORT_ID: u8 = 0x03;
const DPI_INTERNAL_ID: u8 = 0x02;
const DPI_PREAMBLE: [u8; 6] = [0x20, 0x00, 0xFA, 0xFA, 0x04, 0x01];

/// Requested raw DPI per level as `(x, y)`; `None` or `x == 0` disables the level.
pub type DpiSpec = [Option<(u32, u32)>; DPI_LEVEL_COUNT];

/// One DPI level as stored on the device.
///
/// `x` and `y` are multipliers of 50 DPI (20 = 1000 DPI).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DpiLevel {
    pub enabled: bool,
    pub x: u8,
    pub y: u8,
}

impl DpiLevel {
    /// An enabled level with the given multipliers.
    pub const fn new(x: u8, y: u8) -> Self {
        Self {
            enabled: true,
            x,
            y,
        }
    }

    /// X axis DPI.
    pub fn x_dpi(&self) -> u32 {
        self.x as u32 * safety::DPI_STEP
    }

    /// Y axis DPI.
    pub fn y_dpi(&self) -> u32 {
        self.y as u32 * safety::DPI_STEP
    }
}

/// The four DPI levels of one profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DpiTable {
    levels: [DpiLevel; DPI_LEVEL_COUNT],
}

impl Default for DpiTable {
    /// 1000, 2000, 4000 and 8200 DPI, all enabled.
    fn default() -> Self {
        Self {
            levels: [
                DpiLevel::new(20, 20),
                DpiLevel::new(40, 40),
                DpiLevel::new(80, 80),
                DpiLevel::new(164, 164),
            ],
        }
    }
}

impl DpiTable {
    pub fn levels(&self) -> &[DpiLevel; DPI_LEVEL_COUNT] {
        &self.levels
    }

    pub fn level(&self, index: usize) -> Option<&DpiLevel> {
        self.levels.get(index)
    }

    /// Set one level from raw DPI values.
    ///
    /// `x_dpi == 0` disables the level and keeps its previous X/Y bytes,
    /// which the firmware ignores for disabled levels. A zero `y_dpi` on an
    /// enabled level is out of range.
    pub fn set_level(&mut self, index: usize, x_dpi: u32, y_dpi: u32) -> Result<()> {
        safety::validate_dpi_level_index(index)?;
        let level = resolve_level(self.levels[index], x_dpi, y_dpi)?;
        self.levels[index] = level;
        Ok(())
    }

    /// Apply a full four-level request. Nothing is changed if any level is invalid.
    pub fn apply(&mut self, spec: &DpiSpec) -> Result<()> {
        let mut next = self.levels;
        for (level, requested) in next.iter_mut().zip(spec) {
            let (x, y) = requested.unwrap_or((0, 0));
            *level = resolve_level(*level, x, y)?;
        }
        self.levels = next;
        Ok(())
    }
}

fn resolve_level(current: DpiLevel, x_dpi: u32, y_dpi: u32) -> Result<DpiLevel> {
    if x_dpi == 0 {
        return Ok(DpiLevel {
            enabled: false,
            ..current
        });
    }
    Ok(DpiLevel::new(
        safety::validate_dpi(x_dpi)?,
        safety::validate_dpi(y_dpi)?,
    ))
}

/// Parse four comma-separated levels, each `X` or `X:Y`; an empty entry
/// disables that level. Example: `1000:800,2000,,8200`.
pub fn parse_dpi_spec(input: &str) -> Result<DpiSpec> {
    let entries: Vec<&str> = input.split(',').collect();
    if entries.len() != DPI_LEVEL_COUNT {
        return Err(Error::parse(
            "dpi",
            input,
            format!(
                "expected {DPI_LEVEL_COUNT} comma-separated levels, got {}",
                entries.len()
            ),
        ));
    }

    let number = |s: &str| {
        s.trim()
            .parse::<u32>()
            .map_err(|e| Error::parse("dpi", input, format!("'{}': {e}", s.trim())))
    };

    let mut spec: DpiSpec = [None; DPI_LEVEL_COUNT];
    for (slot, entry) in spec.iter_mut().zip(&entries) {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }
        let axes: Vec<&str> = entry.split(':').collect();
        *slot = match axes.as_slice() {
            [xy] => {
                let v = number(*xy)?;
                Some((v, v))
            }
            [x, y] => Some((number(*x)?, number(*y)?)),
            _ => return Err(Error::parse("dpi", input, format!("bad level '{entry}'"))),
        };
    }
    Ok(spec)
}

/// Encode the DPI report for one profile.
pub fn encode_dpi_table(table: &DpiTable, slot: ProfileSlot) -> [u8; DPI_REPORT_LEN] {
    let mut b = ReportBuilder::<DPI_REPORT_LEN>::new();
    b.write_u8(DPI_REPORT_ID)
        .write_u8(DPI_INTERNAL_ID)
        .write_u8(slot.table_id())
        .write_bytes(&DPI_PREAMBLE);
    for level in table.levels() {
        b.write_u8(level.enabled as u8)
            .write_u8(level.x)
            .write_u8(level.y);
    }
    b.finish()
}
