//! Chunk header parsing and padding arithmetic.
//!
//! A header line has a fixed layout:
//!
//! ```text
//! $MESH 0000012C 0000012F ...
//! ^^^^^ ^^^^^^^^ ^^^^^^^^
//! |     |        padded size, hex, columns [15,23)
//! |     logical size, hex, columns [6,14)
//! marker + 4-byte chunk tag, columns [1,5)
//! ```
//!
//! Decoding always produces whole 3-byte groups, so the padded size is rounded
//! up to a multiple of 3 and the surplus is removed from the front of the
//! decoded data.

use std::borrow::Cow;
use std::ops::Range;

use byteorder::{BigEndian, ByteOrder};

use crate::codec::radix64::BYTES_PER_GROUP;
use crate::{MdaError, Result};

pub const CHUNK_TAG_LEN: usize = 4;
pub const CHUNK_TAG_RANGE: Range<usize> = 1..5;
pub const LOGICAL_SIZE_RANGE: Range<usize> = 6..14;
pub const PADDED_SIZE_RANGE: Range<usize> = 15..23;
pub const MIN_HEADER_LEN: usize = PADDED_SIZE_RANGE.end;

/// Sizes declared by one chunk header line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkHeader {
    /// The 4-byte chunk tag
    pub chunk_type: [u8; CHUNK_TAG_LEN],
    /// Bytes kept after padding removal
    pub logical_size: u64,
    /// Bytes declared before padding removal
    pub padded_size: u64,
}

impl ChunkHeader {
    /// Parses a header line with its line terminator already removed.
    ///
    /// # Errors
    ///
    /// Returns [`MdaError::HeaderParseError`] if the line does not start with `$`,
    /// is shorter than 23 bytes, or either size field is not 8 hex digits.
    pub fn parse(line: &[u8]) -> Result<Self> {
        if line.first() != Some(&b'$') {
            return Err(MdaError::header_parse_error("Header line must start with '$'"));
        }
        if line.len() < MIN_HEADER_LEN {
            return Err(MdaError::header_parse_error(format!(
                "Header line too short: {} bytes, need at least {}",
                line.len(),
                MIN_HEADER_LEN
            )));
        }
        let mut chunk_type = [0u8; CHUNK_TAG_LEN];
        chunk_type.copy_from_slice(&line[CHUNK_TAG_RANGE]);
        Ok(Self {
            chunk_type,
            logical_size: parse_size_field(&line[LOGICAL_SIZE_RANGE])?,
            padded_size: parse_size_field(&line[PADDED_SIZE_RANGE])?,
        })
    }

    /// The chunk tag as text, lossily decoded.
    pub fn chunk_type_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.chunk_type)
    }

    /// Leading bytes to discard after decoding.
    pub fn prefix_padding(&self) -> u64 {
        prefix_padding(self.padded_size)
    }

    /// Total decoded bytes the chunk's data lines must supply.
    pub fn bytes_to_consume(&self) -> u64 {
        self.padded_size + self.prefix_padding()
    }

    /// Rejects headers whose logical size exceeds the padded size.
    pub fn check_sizes(&self) -> Result<()> {
        if self.padded_size < self.logical_size {
            return Err(MdaError::header_parse_error(format!(
                "Chunk {}: padded size {} is smaller than logical size {}",
                self.chunk_type_str(),
                self.padded_size,
                self.logical_size
            )));
        }
        Ok(())
    }
}

/// Returns the chunk tag of a header line, if it is long enough to carry one.
pub fn header_tag(line: &[u8]) -> Option<&[u8]> {
    line.get(CHUNK_TAG_RANGE)
}

/// Bytes needed to round `padded_size` up to a whole number of groups.
pub fn prefix_padding(padded_size: u64) -> u64 {
    let group = BYTES_PER_GROUP as u64;
    match padded_size % group {
        0 => 0,
        remainder => group - remainder,
    }
}

fn parse_size_field(field: &[u8]) -> Result<u64> {
    let mut raw = [0u8; 4];
    hex::decode_to_slice(field, &mut raw)?;
    Ok(BigEndian::read_u32(&raw) as u64)
}
