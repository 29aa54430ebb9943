//! Chunk locator and extractor for `.mda` containers.
//!
//! This module provides the single-pass extraction of one named chunk:
//! - Scanning the container for the header whose tag matches the request
//! - Consuming exactly enough data lines to cover the padded size
//! - Decoding each data line and removing the alignment padding
//!
//! It also provides a read-only directory listing of every chunk header.
//!
//! # Examples
//!
//! ```
//! use std::io::Cursor;
//! use mda::readers::ChunkExtractor;
//!
//! # fn main() -> mda::Result<()> {
//! let container = "$TEXT 00000003 00000003\n&GMZ.\n";
//! let extractor = ChunkExtractor::new(Cursor::new(container), "TEXT")?;
//! let bytes = extractor.extract()?;
//! assert_eq!(bytes.len(), 3);
//! # Ok(())
//! # }
//! ```

use std::io::BufRead;

use log::{debug, info, warn};

use crate::codec::Radix64Decoder;
use crate::storage::chunk_header::{header_tag, ChunkHeader, CHUNK_TAG_LEN};
use crate::storage::container_line::{ContainerLine, LineReader};
use crate::{MdaError, Result};

/// Upper bound on the accumulator's up-front reservation.
const MAX_INITIAL_RESERVE: u64 = 1 << 20;

/// Where the extractor is in its single pass over the container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractState {
    /// Looking for a header with the requested tag.
    Scanning,
    /// The requested header was found; data lines follow.
    Extracting(ChunkHeader),
}

/// Extracts one chunk from a line-oriented container.
pub struct ChunkExtractor<R: BufRead> {
    lines: LineReader<R>,
    requested_type: [u8; CHUNK_TAG_LEN],
    strict_sizes: bool,
    state: ExtractState,
}

impl<R: BufRead> ChunkExtractor<R> {
    /// Creates an extractor for the chunk tagged `chunk_type`.
    ///
    /// # Errors
    ///
    /// Returns [`MdaError::InvalidParameter`] unless `chunk_type` is exactly 4 bytes.
    pub fn new(reader: R, chunk_type: &str) -> Result<Self> {
        let requested_type: [u8; CHUNK_TAG_LEN] = chunk_type.as_bytes().try_into().map_err(|_| {
            MdaError::invalid_parameter(format!("Chunk type must be 4 bytes, got '{}'", chunk_type))
        })?;
        Ok(Self {
            lines: LineReader::new(reader),
            requested_type,
            strict_sizes: false,
            state: ExtractState::Scanning,
        })
    }

    /// Rejects matched headers whose padded size is below their logical size.
    pub fn with_strict_sizes(mut self, strict_sizes: bool) -> Self {
        self.strict_sizes = strict_sizes;
        self
    }

    pub fn state(&self) -> &ExtractState {
        &self.state
    }

    fn requested_type_str(&self) -> String {
        String::from_utf8_lossy(&self.requested_type).into_owned()
    }

    /// Scans forward to the requested chunk header.
    ///
    /// Returns `Ok(None)` when the container ends without a match; this is not
    /// an error at this level. Once a header has been found, repeated calls
    /// return it again without reading further.
    pub fn locate(&mut self) -> Result<Option<ChunkHeader>> {
        if let ExtractState::Extracting(header) = &self.state {
            return Ok(Some(header.clone()));
        }
        while let Some(line) = self.lines.next_line()? {
            let ContainerLine::Header(line) = ContainerLine::classify(line) else {
                continue;
            };
            if header_tag(line) != Some(&self.requested_type[..]) {
                let skipped = String::from_utf8_lossy(header_tag(line).unwrap_or_default()).into_owned();
                debug!("Skipping chunk {} at line {}", skipped, self.lines.line_no());
                continue;
            }
            let header = ChunkHeader::parse(line)?;
            if self.strict_sizes {
                header.check_sizes()?;
            }
            info!(
                "Found chunk {} at line {}: logical size {}, padded size {}",
                header.chunk_type_str(),
                self.lines.line_no(),
                header.logical_size,
                header.padded_size
            );
            self.state = ExtractState::Extracting(header.clone());
            return Ok(Some(header));
        }
        debug!("Reached end of container after {} lines without chunk {}", self.lines.line_no(), self.requested_type_str());
        Ok(None)
    }

    /// Locates the requested chunk and returns its decoded, trimmed bytes.
    ///
    /// # Errors
    ///
    /// Returns [`MdaError::ChunkNotFound`] if no header matches, and any of the
    /// header, data line, or truncation errors raised while consuming the chunk.
    pub fn extract(mut self) -> Result<Vec<u8>> {
        let header = match self.locate()? {
            Some(header) => header,
            None => return Err(MdaError::chunk_not_found(self.requested_type_str())),
        };
        let data = self.read_chunk_data(&header)?;
        info!("Extracted chunk {}: {} bytes", header.chunk_type_str(), data.len());
        Ok(data)
    }

    fn read_chunk_data(&mut self, header: &ChunkHeader) -> Result<Vec<u8>> {
        let mut remaining = header.bytes_to_consume();
        let mut accumulator: Vec<u8> = Vec::with_capacity(remaining.min(MAX_INITIAL_RESERVE) as usize);

        while remaining > 0 {
            let Some(line) = self.lines.next_line()? else {
                return Err(MdaError::truncated_data(header.chunk_type_str(), remaining));
            };
            let ContainerLine::Data(payload) = ContainerLine::classify(line) else {
                continue;
            };
            let decoded = match Radix64Decoder::decode(payload) {
                Ok(decoded) => decoded,
                Err(e) => {
                    debug!("Rejected data line {}: {}", self.lines.line_no(), e);
                    return Err(e);
                }
            };
            remaining = remaining.saturating_sub(decoded.len() as u64);
            debug!("Data line {}: {} bytes, {} remaining", self.lines.line_no(), decoded.len(), remaining);
            accumulator.extend_from_slice(&decoded);
        }

        let prefix = usize::try_from(header.prefix_padding()).unwrap_or(usize::MAX);
        accumulator.drain(..prefix.min(accumulator.len()));
        accumulator.truncate(usize::try_from(header.logical_size).unwrap_or(usize::MAX));
        Ok(accumulator)
    }
}

/// Lists every well-formed chunk header in file order.
///
/// Headers whose size fields cannot be parsed are logged and skipped.
pub fn list_chunks<R: BufRead>(reader: R) -> Result<Vec<ChunkHeader>> {
    let mut lines = LineReader::new(reader);
    let mut headers = Vec::new();
    while let Some(line) = lines.next_line()? {
        if let ContainerLine::Header(line) = ContainerLine::classify(line) {
            match ChunkHeader::parse(line) {
                Ok(header) => headers.push(header),
                Err(e) => warn!("Skipping header at line {}: {}", lines.line_no(), e),
            }
        }
    }
    Ok(headers)
}
