//! Decoding of single-byte code page exports
//!
//! The object designer writes exports in a single-byte code page. Each
//! source byte decodes to exactly one character, so an offset into the
//! decoded UTF-8 text maps back to a byte offset by counting the extra
//! UTF-8 bytes of the non-ASCII characters before it.

use encoding_rs::{Encoding, WINDOWS_1252};
use text_size::{TextRange, TextSize};

/// Offsets of decoded text, mapped back to the bytes it came from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceMap {
    /// Decoded offset just past each multi-byte character, with the total
    /// extra bytes up to and including that character
    shifts: Vec<(TextSize, TextSize)>,
}

impl SourceMap {
    /// Decode `bytes` in `encoding`, one character per byte.
    ///
    /// Encodings that are not single-byte fall back to windows-1252.
    pub fn decode(bytes: &[u8], encoding: &'static Encoding) -> (String, Self) {
        let encoding = if encoding.is_single_byte() {
            encoding
        } else {
            tracing::warn!(
                encoding = encoding.name(),
                "not a single-byte encoding, decoding as windows-1252"
            );
            WINDOWS_1252
        };
        let (text, _) = encoding.decode_without_bom_handling(bytes);
        let text = text.into_owned();

        let mut shifts = Vec::new();
        let mut extra = 0u32;
        for (idx, c) in text.char_indices() {
            let len = c.len_utf8();
            if len > 1 {
                extra += len as u32 - 1;
                shifts.push((TextSize::new((idx + len) as u32), TextSize::new(extra)));
            }
        }
        tracing::trace!(
            bytes = bytes.len(),
            wide_chars = shifts.len(),
            "decoded single-byte source"
        );
        (text, Self { shifts })
    }

    /// True when the decoded text is byte-for-byte the source (pure ASCII)
    pub fn is_identity(&self) -> bool {
        self.shifts.is_empty()
    }

    /// Byte offset in the source of a character boundary in the decoded text
    pub fn to_source(&self, offset: TextSize) -> TextSize {
        match self.shifts.partition_point(|(at, _)| *at <= offset) {
            0 => offset,
            n => offset - self.shifts[n - 1].1,
        }
    }

    pub fn range_to_source(&self, range: TextRange) -> TextRange {
        TextRange::new(self.to_source(range.start()), self.to_source(range.end()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_decode_ascii_is_identity() {
        let (text, map) = SourceMap::decode(b"OBJECT Table 18", WINDOWS_1252);
        assert_eq!(text, "OBJECT Table 18");
        assert!(map.is_identity());
        assert_eq!(map.to_source(TextSize::new(7)), TextSize::new(7));
    }

    #[rstest]
    #[case(0, 0)]
    #[case(2, 2)]
    // 'ü' is two bytes decoded, one in the source
    #[case(4, 3)]
    #[case(5, 4)]
    // '€' (0x80) is three bytes decoded
    #[case(8, 5)]
    #[case(9, 6)]
    fn test_offsets_map_to_source_bytes(#[case] decoded: u32, #[case] source: u32) {
        let (text, map) = SourceMap::decode(b"ab\xFCc\x80d", WINDOWS_1252);
        assert_eq!(text, "abüc€d");
        assert_eq!(map.to_source(TextSize::new(decoded)), TextSize::new(source));
    }

    #[test]
    fn test_other_single_byte_code_page() {
        let (text, map) = SourceMap::decode(b"\x81", encoding_rs::IBM866);
        assert_eq!(text, "Б");
        assert_eq!(map.to_source(TextSize::of(text.as_str())), TextSize::new(1));
    }

    #[test]
    fn test_multi_byte_encoding_falls_back() {
        let (text, _) = SourceMap::decode(b"\xFC", encoding_rs::UTF_8);
        assert_eq!(text, "ü");
    }
}
