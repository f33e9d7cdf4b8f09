//! Fixed-length feature report builder.
//!
//! Every report the mouse accepts has a length fixed by its report type.
//! [`ReportBuilder`] writes fields at consecutive offsets into a zeroed
//! `[u8; N]`, so whatever is not written stays zero padding and the output
//! length never depends on field values. Multi-byte fields are little-endian.

/// Cursor over a zero-initialised report buffer of length `N`.
#[derive(Debug, Clone)]
pub struct ReportBuilder<const N: usize> {
    buf: [u8; N],
    pos: usize,
}

impl<const N: usize> ReportBuilder<N> {
    /// Start an all-zero report.
    pub fn new() -> Self {
        Self {
            buf: [0; N],
            pos: 0,
        }
    }

    /// Write one byte at the current offset.
    pub fn write_u8(&mut self, value: u8) -> &mut Self {
        self.buf[self.pos] = value;
        self.pos += 1;
        self
    }

    /// Write a little-endian `u16` at the current offset.
    pub fn write_u16_le(&mut self, value: u16) -> &mut Self {
        self.write_bytes(&value.to_le_bytes())
    }

    /// Copy a byte block at the current offset.
    pub fn write_bytes(&mut self, data: &[u8]) -> &mut Self {
        let end = self.pos + data.len();
        self.buf[self.pos..end].copy_from_slice(data);
        self.pos = end;
        self
    }

    /// Current write offset.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Finish the report; bytes past [`position`](Self::position) stay zero.
    pub fn finish(self) -> [u8; N] {
        self.buf
    }
}

impl<const N: usize> Default for ReportBuilder<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Zero-pad `head` to a fixed-length array at compile time.
///
/// Used for the captured constant reports of the configuration script.
pub(crate) const fn padded<const N: usize>(head: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    let mut i = 0;
    while i < head.len() {
        out[i] = head[i];
        i += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_land_at_consecutive_offsets() {
        let mut b = ReportBuilder::<8>::new();
        b.write_u8(0x02).write_u16_le(0xFAFA).write_bytes(&[1, 2]);
        assert_eq!(b.position(), 5);
        assert_eq!(b.finish(), [0x02, 0xFA, 0xFA, 1, 2, 0, 0, 0]);
    }

    #[test]
    fn u16_is_little_endian() {
        let mut b = ReportBuilder::<2>::new();
        b.write_u16_le(0x00E2);
        assert_eq!(b.finish(), [0xE2, 0x00]);
    }

    #[test]
    fn empty_builder_is_all_padding() {
        assert_eq!(ReportBuilder::<16>::default().finish(), [0u8; 16]);
    }

    #[test]
    #[should_panic]
    fn overflowing_the_report_panics() {
        let mut b = ReportBuilder::<2>::new();
        b.write_bytes(&[1, 2, 3]);
    }

    #[test]
    fn padded_copies_head() {
        const P: [u8; 6] = padded(&[2, 1, 1]);
        assert_eq!(P, [2, 1, 1, 0, 0, 0]);
    }
}
