//! Error types and result type for the MDA crate.
//!
//! This module defines all error variants that can occur while locating and
//! decoding a chunk inside an `.mda` container. It uses the `snafu` library for
//! ergonomic error handling with automatic backtrace capture.
//!
//! # Examples
//!
//! ```
//! use mda::{Result, MdaError};
//!
//! fn find_chunk() -> Result<Vec<u8>> {
//!     Err(MdaError::chunk_not_found("MESH"))
//! }
//!
//! match find_chunk() {
//!     Ok(data) => println!("Got {} bytes", data.len()),
//!     Err(e) if e.is_chunk_not_found() => println!("No such chunk"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```
//!
//! # Error Variants
//!
//! - [`MdaError::Io`]: I/O errors from the line source or the output sink
//! - [`MdaError::ChunkNotFound`]: The requested chunk type never appeared
//! - [`MdaError::MalformedDataLine`]: A data line payload is not a whole number of groups
//! - [`MdaError::InvalidSymbol`]: A data line contains a character outside the radix-64 alphabet
//! - [`MdaError::TruncatedData`]: The container ended in the middle of a chunk
//! - [`MdaError::HeaderParseError`]: A chunk header is too short or carries bad size fields
//! - [`MdaError::InvalidParameter`]: Invalid caller-supplied parameters
//! - [`MdaError::ParserError`]: Configuration file parsing errors

use std::io;
use snafu::{Snafu, Backtrace};

// Re-export snafu for context providers
pub use snafu;

/// Main error type for the MDA crate.
///
/// All errors include automatic backtrace capture for debugging purposes.
/// Use the helper methods on `MdaError` for convenient error construction.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum MdaError {
    /// I/O error occurred while reading the container or writing the output.
    #[snafu(display("IO error: {source}"))]
    Io {
        source: io::Error,
        backtrace: Backtrace,
    },

    /// The container was scanned to the end without a matching chunk header.
    #[snafu(display("Chunk not found: {chunk_type}"))]
    ChunkNotFound {
        chunk_type: String,
        backtrace: Backtrace,
    },

    /// A data line payload length is not a multiple of 4.
    #[snafu(display("Invalid data line: payload length {length} is not a multiple of 4"))]
    MalformedDataLine {
        length: usize,
        backtrace: Backtrace,
    },

    /// A data line contains a character that is not part of the radix-64 alphabet.
    #[snafu(display("Damaged data line char '{symbol}', ord was {ordinal} (at offset {position})"))]
    InvalidSymbol {
        symbol: char,
        ordinal: u32,
        position: usize,
        backtrace: Backtrace,
    },

    /// The container ended before the matched chunk supplied all of its padded bytes.
    #[snafu(display("Data terminated prematurely in chunk {chunk_type}: {remaining} bytes still expected"))]
    TruncatedData {
        chunk_type: String,
        remaining: u64,
        backtrace: Backtrace,
    },

    /// Chunk header line is too short or its size fields are not valid hexadecimal.
    #[snafu(display("Header parse error: {message}"))]
    HeaderParseError {
        message: String,
        backtrace: Backtrace,
    },

    /// Function was called with invalid parameters.
    #[snafu(display("Invalid parameter: {message}"))]
    InvalidParameter {
        message: String,
        backtrace: Backtrace,
    },

    /// Error parsing a JSON configuration file.
    #[snafu(display("Parser error: {source}"))]
    ParserError {
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
        backtrace: Backtrace,
    },
}

// For automatic conversions from standard error types
impl From<io::Error> for MdaError {
    fn from(source: io::Error) -> Self {
        Self::Io { source, backtrace: Backtrace::capture() }
    }
}

impl From<serde_json::Error> for MdaError {
    fn from(source: serde_json::Error) -> Self {
        Self::ParserError {
            source: Box::new(source),
            backtrace: Backtrace::capture(),
        }
    }
}

impl From<hex::FromHexError> for MdaError {
    fn from(source: hex::FromHexError) -> Self {
        Self::HeaderParseError {
            message: format!("Invalid hex size field: {}", source),
            backtrace: Backtrace::capture(),
        }
    }
}

/// Helper methods for creating errors without context providers.
impl MdaError {
    /// Creates a `ChunkNotFound` error for the given chunk type.
    ///
    /// # Examples
    ///
    /// ```
    /// use mda::MdaError;
    ///
    /// let error = MdaError::chunk_not_found("SKIN");
    /// assert!(error.is_chunk_not_found());
    /// ```
    pub fn chunk_not_found<S: Into<String>>(chunk_type: S) -> Self {
        Self::ChunkNotFound {
            chunk_type: chunk_type.into(),
            backtrace: Backtrace::capture(),
        }
    }

    /// Creates a `MalformedDataLine` error for a payload of the given length.
    pub fn malformed_data_line(length: usize) -> Self {
        Self::MalformedDataLine {
            length,
            backtrace: Backtrace::capture(),
        }
    }

    /// Creates an `InvalidSymbol` error for the character found at `position` in a payload.
    pub fn invalid_symbol(symbol: char, position: usize) -> Self {
        Self::InvalidSymbol {
            symbol,
            ordinal: symbol as u32,
            position,
            backtrace: Backtrace::capture(),
        }
    }

    /// Creates a `TruncatedData` error.
    pub fn truncated_data<S: Into<String>>(chunk_type: S, remaining: u64) -> Self {
        Self::TruncatedData {
            chunk_type: chunk_type.into(),
            remaining,
            backtrace: Backtrace::capture(),
        }
    }

    /// Creates a `HeaderParseError` with the given message.
    pub fn header_parse_error<S: Into<String>>(message: S) -> Self {
        Self::HeaderParseError {
            message: message.into(),
            backtrace: Backtrace::capture(),
        }
    }

    /// Creates an `InvalidParameter` error with the given message.
    pub fn invalid_parameter<S: Into<String>>(message: S) -> Self {
        Self::InvalidParameter {
            message: message.into(),
            backtrace: Backtrace::capture(),
        }
    }

    /// Creates an `InvalidParameter` error for an invalid path.
    pub fn invalid_path<S: Into<String>>(path: S) -> Self {
        Self::InvalidParameter {
            message: format!("Invalid path: {}", path.into()),
            backtrace: Backtrace::capture(),
        }
    }

    /// Checks if this error is a `ChunkNotFound` variant.
    pub fn is_chunk_not_found(&self) -> bool {
        if let MdaError::ChunkNotFound { .. } = self {
            return true;
        }
        false
    }
}

/// A specialized `Result` type for MDA operations.
///
/// This is a convenience type alias that uses [`MdaError`] as the error type.
pub type Result<T> = std::result::Result<T, MdaError>;
