//! Error types for anker-mouse-core.

use thiserror::Error;

/// Core library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// HID device communication failure.
    #[error("HID error: {0}")]
    Hid(String),

    /// Device not found during enumeration or open.
    #[error("device not found: {0}")]
    DeviceNotFound(String),

    /// Permission denied opening the device (missing udev rule on Linux).
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// Value out of safe range.
    #[error("value out of range: {field} = {value} (allowed {min}..={max})")]
    OutOfRange {
        field: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },

    /// Malformed setting string (color, light, DPI or button spec).
    #[error("invalid {field} '{input}': {reason}")]
    Parse {
        field: &'static str,
        input: String,
        reason: String,
    },

    /// A feature report in a write sequence was not accepted by the device.
    ///
    /// Reports before `index` have already been sent and are not undone.
    #[error("failed to write report {index} of {total}: {reason}")]
    ReportWrite {
        index: usize,
        total: usize,
        reason: String,
    },

    /// Settings file error.
    #[error("profile error: {0}")]
    Profile(String),
}

impl Error {
    /// Shorthand for building a [`Error::Parse`].
    pub(crate) fn parse(field: &'static str, input: &str, reason: impl Into<String>) -> Self {
        Self::Parse {
            field,
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    /// Whether this error was raised before any device I/O took place.
    pub fn is_pre_io(&self) -> bool {
        matches!(
            self,
            Self::OutOfRange { .. } | Self::Parse { .. } | Self::Profile(_)
        )
    }
}

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_error_mentions_index() {
        let err = Error::ReportWrite {
            index: 7,
            total: 14,
            reason: "broken pipe".into(),
        };
        assert_eq!(
            err.to_string(),
            "failed to write report 7 of 14: broken pipe"
        );
        assert!(!err.is_pre_io());
    }

    #[test]
    fn validation_and_parse_errors_are_pre_io() {
        let range = Error::OutOfRange {
            field: "brightness",
            value: 4,
            min: 0,
            max: 3,
        };
        assert!(range.is_pre_io());
        assert!(Error::parse("color", "#zz", "bad hex").is_pre_io());
        assert!(!Error::DeviceNotFound("04D9:FA50".into()).is_pre_io());
    }
}
