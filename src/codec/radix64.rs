//! Radix-64 decoding for `.mda` data lines.
//!
//! Data lines carry bytes packed 3-to-4 into a 64-symbol alphabet, much like
//! base64 but with a different symbol order and no `=` padding:
//!
//! | Symbols      | Values  |
//! |--------------|---------|
//! | `0`..=`9`    | 0..=9   |
//! | `A`..=`Z`    | 10..=35 |
//! | `a`..=`z`    | 36..=61 |
//! | `.`          | 62      |
//! | `/`          | 63      |
//!
//! Each group of four symbols is folded into a 24-bit big-endian value which
//! is emitted as exactly three bytes.
//!
//! # Examples
//!
//! ```
//! use mda::codec::Radix64Decoder;
//!
//! let bytes = Radix64Decoder::decode(b"0000////").unwrap();
//! assert_eq!(bytes, vec![0x00, 0x00, 0x00, 0xFF, 0xFF, 0xFF]);
//! ```

use byteorder::{BigEndian, WriteBytesExt};

use crate::{MdaError, Result};

/// The symbol alphabet in value order: `ALPHABET[v]` is the symbol for value `v`.
pub const ALPHABET: &[u8; 64] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz./";

/// Number of symbols in one group.
pub const SYMBOLS_PER_GROUP: usize = 4;

/// Number of bytes one group decodes to.
pub const BYTES_PER_GROUP: usize = 3;

/// Maps one alphabet symbol to its 6-bit value.
///
/// Returns `None` for any byte outside the 64-symbol alphabet.
#[inline]
pub fn symbol_value(symbol: u8) -> Option<u8> {
    match symbol {
        b'0'..=b'9' => Some(symbol - b'0'),
        b'A'..=b'Z' => Some(10 + (symbol - b'A')),
        b'a'..=b'z' => Some(36 + (symbol - b'a')),
        b'.' => Some(62),
        b'/' => Some(63),
        _ => None,
    }
}

/// Stateless decoder for a single data line payload.
pub struct Radix64Decoder;

impl Radix64Decoder {
    /// Decodes one data line payload into bytes.
    ///
    /// The payload is the text after the leading `&` with trailing whitespace
    /// already removed.
    ///
    /// # Arguments
    ///
    /// * `payload` - Alphabet symbols, a whole number of 4-symbol groups
    ///
    /// # Returns
    ///
    /// Returns `3 * (payload.len() / 4)` decoded bytes.
    ///
    /// # Errors
    ///
    /// Returns [`MdaError::MalformedDataLine`] if the payload length is not a
    /// multiple of 4, or [`MdaError::InvalidSymbol`] for the first character that
    /// is not part of the alphabet. Payloads that are valid UTF-8 are measured
    /// and reported in characters; other payloads fall back to raw bytes.
    pub fn decode(payload: &[u8]) -> Result<Vec<u8>> {
        // Non-ASCII text can never decode; report it per character.
        if let Ok(text) = std::str::from_utf8(payload) {
            if !text.is_ascii() {
                return Err(Self::reject_text(text));
            }
        }
        if payload.len() % SYMBOLS_PER_GROUP != 0 {
            return Err(MdaError::malformed_data_line(payload.len()));
        }
        let mut decoded: Vec<u8> = Vec::with_capacity(Self::decoded_len(payload.len()));
        for (group_no, group) in payload.chunks_exact(SYMBOLS_PER_GROUP).enumerate() {
            let value = Self::group_value(group, group_no * SYMBOLS_PER_GROUP)?;
            decoded.write_u24::<BigEndian>(value)?;
        }
        Ok(decoded)
    }

    /// Number of bytes a payload of `payload_len` symbols decodes to.
    #[inline]
    pub fn decoded_len(payload_len: usize) -> usize {
        payload_len / SYMBOLS_PER_GROUP * BYTES_PER_GROUP
    }

    /// Picks the error for a payload holding non-ASCII characters.
    ///
    /// Length and position are counted in characters, not bytes.
    fn reject_text(text: &str) -> MdaError {
        let length = text.chars().count();
        if length % SYMBOLS_PER_GROUP != 0 {
            return MdaError::malformed_data_line(length);
        }
        text.chars()
            .enumerate()
            .find(|(_, c)| !c.is_ascii() || symbol_value(*c as u8).is_none())
            .map(|(position, c)| MdaError::invalid_symbol(c, position))
            .unwrap_or_else(|| MdaError::malformed_data_line(length))
    }

    /// Folds one 4-symbol group into its 24-bit value.
    fn group_value(group: &[u8], offset: usize) -> Result<u32> {
        let mut value: u32 = 0;
        for (i, &symbol) in group.iter().enumerate() {
            let digit = symbol_value(symbol)
                .ok_or_else(|| MdaError::invalid_symbol(symbol as char, offset + i))?;
            value = value * 64 + digit as u32;
        }
        Ok(value)
    }
}

/// Inverse packer, only needed to check the decoder.
#[cfg(test)]
pub(crate) fn encode(bytes: &[u8]) -> Vec<u8> {
    assert_eq!(bytes.len() % BYTES_PER_GROUP, 0);
    let mut out = Vec::new();
    for triple in bytes.chunks_exact(BYTES_PER_GROUP) {
        let value = (triple[0] as u32) << 16 | (triple[1] as u32) << 8 | triple[2] as u32;
        for shift in [18, 12, 6, 0] {
            out.push(ALPHABET[((value >> shift) & 0x3F) as usize]);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alphabet_is_bijective() {
        let mut seen = [false; 64];
        for (expected, &symbol) in ALPHABET.iter().enumerate() {
            let value = symbol_value(symbol).expect("alphabet symbol rejected");
            assert_eq!(value as usize, expected);
            assert!(!seen[value as usize], "value {} mapped twice", value);
            seen[value as usize] = true;
        }
        let accepted = (0..=255u8).filter(|b| symbol_value(*b).is_some()).count();
        assert_eq!(accepted, 64);
    }

    #[test]
    fn test_alphabet_ranges() {
        assert_eq!(symbol_value(b'0'), Some(0));
        assert_eq!(symbol_value(b'9'), Some(9));
        assert_eq!(symbol_value(b'A'), Some(10));
        assert_eq!(symbol_value(b'Z'), Some(35));
        assert_eq!(symbol_value(b'a'), Some(36));
        assert_eq!(symbol_value(b'z'), Some(61));
        assert_eq!(symbol_value(b'.'), Some(62));
        assert_eq!(symbol_value(b'/'), Some(63));
        assert_eq!(symbol_value(b'+'), None);
        assert_eq!(symbol_value(b'='), None);
        assert_eq!(symbol_value(b' '), None);
    }

    #[test]
    fn test_decode_extremes() {
        assert_eq!(Radix64Decoder::decode(b"0000").unwrap(), vec![0, 0, 0]);
        assert_eq!(Radix64Decoder::decode(b"////").unwrap(), vec![0xFF, 0xFF, 0xFF]);
        // 1*64^3 + 2*64^2 + 3*64 + 4 = 270532 = 0x0420C4
        assert_eq!(Radix64Decoder::decode(b"1234").unwrap(), vec![0x04, 0x20, 0xC4]);
    }

    #[test]
    fn test_decode_empty_payload() {
        assert!(Radix64Decoder::decode(b"").unwrap().is_empty());
    }

    #[test]
    fn test_decoded_length_is_three_per_group() {
        for groups in 0..16 {
            let payload = vec![b'z'; groups * SYMBOLS_PER_GROUP];
            let decoded = Radix64Decoder::decode(&payload).unwrap();
            assert_eq!(decoded.len(), groups * BYTES_PER_GROUP);
            assert_eq!(decoded.len(), Radix64Decoder::decoded_len(payload.len()));
        }
    }

    #[test]
    fn test_malformed_length() {
        let err = Radix64Decoder::decode(b"12345").unwrap_err();
        assert!(matches!(err, MdaError::MalformedDataLine { length: 5, .. }));
    }

    #[test]
    fn test_invalid_symbol_reports_ordinal() {
        let err = Radix64Decoder::decode(b"0000AB@D").unwrap_err();
        match err {
            MdaError::InvalidSymbol { symbol, ordinal, position, .. } => {
                assert_eq!(symbol, '@');
                assert_eq!(ordinal, 64);
                assert_eq!(position, 6);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_non_utf8_byte_reported_as_byte() {
        let err = Radix64Decoder::decode(&[b'0', b'0', 0xE9, b'0']).unwrap_err();
        assert!(matches!(err, MdaError::InvalidSymbol { symbol: '\u{e9}', ordinal: 0xE9, position: 2, .. }));
    }

    #[test]
    fn test_non_ascii_symbol_counted_as_one_char() {
        let err = Radix64Decoder::decode("000\u{e9}".as_bytes()).unwrap_err();
        assert!(matches!(err, MdaError::InvalidSymbol { symbol: '\u{e9}', ordinal: 233, position: 3, .. }));

        let err = Radix64Decoder::decode("00\u{20ac}0".as_bytes()).unwrap_err();
        assert!(matches!(err, MdaError::InvalidSymbol { symbol: '\u{20ac}', ordinal: 0x20AC, position: 2, .. }));
    }

    #[test]
    fn test_non_ascii_payload_length_in_chars() {
        let err = Radix64Decoder::decode("000\u{e9}0".as_bytes()).unwrap_err();
        assert!(matches!(err, MdaError::MalformedDataLine { length: 5, .. }));
    }

    #[test]
    fn test_earlier_ascii_symbol_reported_first() {
        let err = Radix64Decoder::decode("@00\u{e9}".as_bytes()).unwrap_err();
        assert!(matches!(err, MdaError::InvalidSymbol { symbol: '@', ordinal: 64, position: 0, .. }));
    }

    #[test]
    fn test_round_trip() {
        let mut data: Vec<u8> = (0..=255u8).collect();
        data.extend((0..=255u8).rev());
        data.extend(b"The quick brown fox jumps over the lazy dog");
        data.truncate(data.len() / 3 * 3);

        let encoded = encode(&data);
        assert_eq!(encoded.len(), data.len() / 3 * 4);
        assert_eq!(Radix64Decoder::decode(&encoded).unwrap(), data);
    }

    #[test]
    fn test_round_trip_all_lengths() {
        for len in (0..=96).step_by(3) {
            for seed in [0u8, 0x55, 0xA7, 0xFF] {
                let data: Vec<u8> = (0..len).map(|i| (i as u8).wrapping_mul(31).wrapping_add(seed)).collect();
                assert_eq!(Radix64Decoder::decode(&encode(&data)).unwrap(), data, "len {} seed {}", len, seed);
            }
        }
    }

    #[test]
    fn test_round_trip_arbitrary_bytes() {
        fn round_trips(mut data: Vec<u8>) -> bool {
            data.truncate(data.len() / BYTES_PER_GROUP * BYTES_PER_GROUP);
            Radix64Decoder::decode(&encode(&data)).map_or(false, |decoded| decoded == data)
        }
        quickcheck::quickcheck(round_trips as fn(Vec<u8>) -> bool);
    }

    #[test]
    fn test_group_value_bounded() {
        fn in_range(symbols: Vec<u8>) -> bool {
            let group: Vec<u8> = symbols.iter().cycle().take(SYMBOLS_PER_GROUP).map(|b| ALPHABET[(*b & 0x3F) as usize]).collect();
            symbols.is_empty() || Radix64Decoder::group_value(&group, 0).is_ok_and(|value| value < 1 << 24)
        }
        quickcheck::quickcheck(in_range as fn(Vec<u8>) -> bool);
    }
}
