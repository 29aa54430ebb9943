//! # MDA - Chunk Extractor for Text-Framed Containers
//!
//! This crate extracts a single named chunk from an `.mda` container and decodes
//! it from the container's radix-64 text encoding into raw bytes.
//!
//! An `.mda` container is line oriented:
//!
//! ```text
//! $MESH 0000012C 0000012F
//! &0Ab1.9zZ/xYq
//! &...
//! ```
//!
//! - `$` lines name a chunk with a 4-byte tag and declare its logical and padded
//!   sizes as 8-digit hex fields
//! - `&` lines carry data, four symbols per three bytes
//! - Everything else is framing and is ignored
//!
//! ## Quick Start
//!
//! ### Extracting a chunk from a file
//!
//! ```no_run
//! use mda::{extract_chunk_to_file, ExtractConfig};
//!
//! # fn main() -> mda::Result<()> {
//! let config = ExtractConfig::new("models/ship.mda", "MESH", "ship.mesh");
//! let written = extract_chunk_to_file(&config)?;
//! println!("Wrote {} bytes", written);
//! # Ok(())
//! # }
//! ```
//!
//! ### Extracting from any buffered reader
//!
//! ```
//! use std::io::Cursor;
//! use mda::ChunkExtractor;
//!
//! # fn main() -> mda::Result<()> {
//! let container = "$TEXT 00000002 00000002\n&0GMZ\n";
//! let bytes = ChunkExtractor::new(Cursor::new(container), "TEXT")?.extract()?;
//! assert_eq!(bytes.len(), 2);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - **Codec**: [`codec`] for the radix-64 symbol alphabet and decoder
//! - **Storage**: [`storage`] for line classification and chunk header parsing
//! - **Readers**: [`readers`] for the chunk extractor and the file-level driver
//! - **Configuration**: [`config`] for caller-supplied parameters
//! - **Utilities**: [`utils`] for file I/O helpers
//!
//! ## Error Handling
//!
//! All fallible operations return a [`Result<T>`] type, where errors are represented by
//! [`MdaError`]. A missing chunk is reported as [`MdaError::ChunkNotFound`], which
//! callers can tell apart with [`MdaError::is_chunk_not_found`].

pub mod codec;
pub mod config;
pub mod error;
pub mod readers;
pub mod storage;
pub mod utils;

// Re-export commonly used types for convenience
pub use codec::Radix64Decoder;
pub use config::ExtractConfig;
pub use readers::{extract_chunk_to_file, list_chunks, ChunkExtractor, ExtractState};
pub use storage::ChunkHeader;

// Re-export error types for convenience
pub use error::{MdaError, Result, snafu};
