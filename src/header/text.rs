// src/header/text.rs
use crate::error::{Result, SegyError};
use crate::utils::{char_to_ebcdic, ebcdic_to_char, EBCDIC_SPACE};

/// 3200-byte EBCDIC textual header, held as exactly 3200 characters.
///
/// Each byte maps to one character in U+0000..=U+00FF, so any text drawn
/// from that range survives an encode/decode round trip. Wider characters
/// are written as spaces.
///
/// # Example
///
/// ```
/// use segy_rs::header::TextHeader;
///
/// let header = TextHeader::new("C 1 CLIENT: ACME");
/// let bytes = header.encode();
/// assert_eq!(bytes.len(), 3200);
/// assert_eq!(bytes[0], 0xC3); // 'C'
/// assert_eq!(bytes[3199], 0x40); // padding
///
/// let decoded = TextHeader::decode(&bytes).unwrap();
/// assert!(decoded.as_str().starts_with("C 1 CLIENT: ACME"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextHeader {
    text: String,
}

impl TextHeader {
    pub const SIZE: usize = 3200;

    /// Width of one card image line
    pub const LINE_WIDTH: usize = 80;

    /// Build from free text, truncating or space-padding to 3200 characters
    pub fn new(text: &str) -> Self {
        let mut normalized: String = text.chars().take(Self::SIZE).collect();
        let count = normalized.chars().count();
        normalized.extend(std::iter::repeat(' ').take(Self::SIZE - count));
        TextHeader { text: normalized }
    }

    /// Decode the first 3200 bytes of `bytes`
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let block = bytes.get(..Self::SIZE).ok_or_else(|| {
            SegyError::MalformedHeader(format!(
                "text header needs {} bytes, found {}",
                Self::SIZE,
                bytes.len()
            ))
        })?;

        Ok(TextHeader {
            text: block.iter().map(|&b| ebcdic_to_char(b)).collect(),
        })
    }

    pub fn encode(&self) -> [u8; Self::SIZE] {
        Self::encode_str(&self.text)
    }

    /// Encode arbitrary text straight to an EBCDIC block
    pub fn encode_str(text: &str) -> [u8; Self::SIZE] {
        let mut out = [EBCDIC_SPACE; Self::SIZE];
        for (slot, c) in out.iter_mut().zip(text.chars()) {
            *slot = char_to_ebcdic(c);
        }
        out
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Replace the text, keeping the 3200 character length
    pub fn set_text(&mut self, text: &str) {
        *self = Self::new(text);
    }

    /// The 40 card images of 80 characters each
    pub fn lines(&self) -> Vec<String> {
        let chars: Vec<char> = self.text.chars().collect();
        chars
            .chunks(Self::LINE_WIDTH)
            .map(|line| line.iter().collect())
            .collect()
    }
}

impl Default for TextHeader {
    fn default() -> Self {
        Self::new("")
    }
}

impl std::fmt::Display for TextHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, line) in self.lines().iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            f.write_str(line.trim_end())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_default_is_all_spaces() {
        let header = TextHeader::default();
        assert_eq!(header.as_str().chars().count(), TextHeader::SIZE);
        assert!(header.encode().iter().all(|&b| b == EBCDIC_SPACE));
    }

    #[test]
    fn test_truncates_long_text() {
        let long = "X".repeat(5000);
        let header = TextHeader::new(&long);
        assert_eq!(header.as_str().chars().count(), TextHeader::SIZE);
    }

    #[test]
    fn test_lines() {
        let header = TextHeader::new(&format!("{:<80}{}", "C 1 FIRST", "C 2 SECOND"));
        let lines = header.lines();
        assert_eq!(lines.len(), 40);
        assert!(lines[0].starts_with("C 1 FIRST"));
        assert!(lines[1].starts_with("C 2 SECOND"));
        assert_eq!(header.to_string().lines().next(), Some("C 1 FIRST"));
    }

    #[test]
    fn test_decode_short_input() {
        assert!(matches!(
            TextHeader::decode(&[0x40; 10]),
            Err(SegyError::MalformedHeader(_))
        ));
    }

    #[test]
    fn test_all_256_bytes_roundtrip() {
        let bytes: Vec<u8> = (0..TextHeader::SIZE).map(|i| (i % 256) as u8).collect();
        let header = TextHeader::decode(&bytes).unwrap();
        assert_eq!(&header.encode()[..], &bytes[..]);
    }

    #[test]
    fn test_non_latin1_becomes_space() {
        let bytes = TextHeader::encode_str("a\u{263A}b");
        assert_eq!(bytes[1], EBCDIC_SPACE);
    }

    proptest! {
        #[test]
        fn prop_text_roundtrip(codes in proptest::collection::vec(0u8..=255, 0..4000)) {
            let text: String = codes.iter().map(|&b| char::from(b)).collect();
            let bytes = TextHeader::encode_str(&text);
            prop_assert_eq!(bytes.len(), TextHeader::SIZE);

            let decoded = TextHeader::decode(&bytes).unwrap();
            prop_assert_eq!(decoded, TextHeader::new(&text));
        }
    }
}
