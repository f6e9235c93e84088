//! Lenient UTF-8 decoding restricted to the Basic Multilingual Plane.
//!
//! Descriptor rows, advance keys and laid-out text all go through here. A
//! malformed sequence never aborts decoding: the offending lead byte is skipped
//! and decoding resumes at the next byte. Scalars above U+FFFF decode fine but
//! are dropped by the BMP helpers, since glyph tables are keyed by `u16`.

/// Outcome of decoding one step from the front of a byte slice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decoded {
    /// A well-formed scalar value and the number of bytes it used.
    Scalar(char, usize),
    /// A malformed sequence; one byte must be skipped.
    Invalid,
}

/// Expected sequence length for a lead byte, or `0` if it can never start one.
fn sequence_width(lead: u8) -> usize {
    match lead {
        0x00..=0x7F => 1,
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => 0,
    }
}

/// Decodes the first scalar of `bytes`. Returns `None` on empty input.
pub fn decode_next(bytes: &[u8]) -> Option<Decoded> {
    let &lead = bytes.first()?;
    let width = sequence_width(lead);
    if width == 0 || bytes.len() < width {
        return Some(Decoded::Invalid);
    }

    match std::str::from_utf8(&bytes[..width]) {
        Ok(s) => Some(s.chars().next().map_or(Decoded::Invalid, |ch| {
            Decoded::Scalar(ch, width)
        })),
        Err(_) => Some(Decoded::Invalid),
    }
}

/// Narrows a scalar to a BMP codepoint.
pub fn to_bmp(ch: char) -> Option<u16> {
    u16::try_from(u32::from(ch)).ok()
}

/// Iterator over the BMP codepoints of a byte slice, with byte offsets.
///
/// Yields `(offset, codepoint)`; malformed bytes and non-BMP scalars are
/// skipped without being reported.
pub struct BmpCodepoints<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> BmpCodepoints<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }
}

impl Iterator for BmpCodepoints<'_> {
    type Item = (usize, u16);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let start = self.offset;
            match decode_next(&self.bytes[start..])? {
                Decoded::Invalid => self.offset += 1,
                Decoded::Scalar(ch, width) => {
                    self.offset += width;
                    match to_bmp(ch) {
                        Some(code) => return Some((start, code)),
                        None => log::trace!("dropping non-BMP codepoint U+{:X}", u32::from(ch)),
                    }
                }
            }
        }
    }
}

/// Decodes every BMP codepoint in `bytes`, in order.
pub fn decode_bmp(bytes: &[u8]) -> Vec<u16> {
    BmpCodepoints::new(bytes).map(|(_, code)| code).collect()
}

/// Decodes only the leading scalar of `bytes`, as a raw value.
///
/// Empty input and a malformed leading sequence both yield `0`; trailing bytes
/// are ignored.
pub fn first_scalar(bytes: &[u8]) -> u32 {
    match decode_next(bytes) {
        Some(Decoded::Scalar(ch, _)) => u32::from(ch),
        _ => 0,
    }
}
