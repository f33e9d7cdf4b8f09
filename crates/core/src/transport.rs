//! HID transport abstraction for device communication.
//!
//! Provides a trait-based transport layer so that the real HID device and
//! the recording mock used in tests share the same interface.

use crate::error::{Error, Result};
use crate::report::Report;
use tracing::{debug, info, trace, warn};

/// Abstraction over a raw HID feature report write.
///
/// The device gives no response to these reports; success means the write
/// was accepted by the OS.
pub trait FeatureReportTransport: Send {
    /// Send one complete feature report, report id byte first.
    fn send_feature_report(&self, data: &[u8]) -> Result<()>;
}

/// Encode and send a single report.
pub fn send_report(transport: &dyn FeatureReportTransport, report: &Report) -> Result<()> {
    let encoded = report.encode();
    debug_assert_eq!(encoded.len(), report.wire_len(), "{} length", report.name());
    trace!(
        report = report.name(),
        len = encoded.len(),
        report_hex = format_args!("{:02X?}", encoded),
        "HID TX"
    );
    transport.send_feature_report(&encoded)?;
    debug!(report = report.name(), "Report sent");
    Ok(())
}

/// Send an ordered report sequence.
///
/// Stops at the first rejected report and returns [`Error::ReportWrite`]
/// carrying its 0-based index. Earlier reports stay applied and nothing is
/// retried, since resending part of the sequence is undefined for the
/// firmware.
pub fn send_sequence(transport: &dyn FeatureReportTransport, frames: &[Vec<u8>]) -> Result<()> {
    let total = frames.len();
    for (index, frame) in frames.iter().enumerate() {
        trace!(
            index,
            total,
            len = frame.len(),
            report_hex = format_args!("{:02X?}", frame),
            "HID TX"
        );
        if let Err(e) = transport.send_feature_report(frame) {
            warn!(index, total, error = %e, "Report rejected, sequence aborted");
            return Err(Error::ReportWrite {
                index,
                total,
                reason: e.to_string(),
            });
        }
    }
    info!(reports = total, "Report sequence written");
    Ok(())
}

/// Encode and send several reports as one sequence.
///
/// Failures carry the failing report's index, as with [`send_sequence`].
pub fn send_reports(transport: &dyn FeatureReportTransport, reports: &[Report]) -> Result<()> {
    let frames: Vec<Vec<u8>> = reports
        .iter()
        .map(|report| {
            let encoded = report.encode();
            debug_assert_eq!(encoded.len(), report.wire_len(), "{} length", report.name());
            encoded
        })
        .collect();
    debug!(
        reports = ?reports.iter().map(Report::name).collect::<Vec<_>>(),
        "Sending report group"
    );
    send_sequence(transport, &frames)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::ProfileSlot;

    #[test]
    fn send_report_writes_encoded_bytes() {
        let mock = mock::RecordingTransport::new();
        let report = Report::ProfileSwitchApply(ProfileSlot::Two);
        send_report(&mock, &report).unwrap();
        assert_eq!(mock.sent(), vec![report.encode()]);
    }

    #[test]
    fn sequence_is_sent_in_order() {
        let mock = mock::RecordingTransport::new();
        let frames = vec![vec![1, 0], vec![2, 0], vec![3, 0]];
        send_sequence(&mock, &frames).unwrap();
        assert_eq!(mock.sent(), frames);
    }

    #[test]
    fn sequence_stops_at_first_failure() {
        let mock = mock::RecordingTransport::failing_at(1);
        let frames = vec![vec![1], vec![2], vec![3]];
        let err = send_sequence(&mock, &frames).unwrap_err();
        assert!(matches!(err, Error::ReportWrite { index: 1, total: 3, .. }));
        assert_eq!(mock.sent(), vec![vec![1]]);
    }

    #[test]
    fn profile_switch_failure_carries_index() {
        let mock = mock::RecordingTransport::failing_at(1);
        let err = send_reports(&mock, &Report::profile_switch(ProfileSlot::Two)).unwrap_err();
        assert!(matches!(err, Error::ReportWrite { index: 1, total: 2, .. }));
        assert_eq!(
            mock.sent(),
            vec![Report::ProfileSwitchSelect(ProfileSlot::Two).encode()]
        );
    }

    #[test]
    fn send_reports_encodes_in_order() {
        let mock = mock::RecordingTransport::new();
        let pair = Report::profile_switch(ProfileSlot::One);
        send_reports(&mock, &pair).unwrap();
        assert_eq!(mock.sent(), vec![pair[0].encode(), pair[1].encode()]);
    }

    #[test]
    fn single_report_failure_passes_through() {
        let mock = mock::RecordingTransport::failing_at(0);
        let err = send_report(&mock, &Report::ProfileSwitchSelect(ProfileSlot::One)).unwrap_err();
        assert!(matches!(err, Error::Hid(_)));
        assert!(mock.sent().is_empty());
    }
}
