// Readers for .mda containers
//
// This module provides the chunk extractor and the file-level driver that
// connects it to the line source and the output sink.

pub mod chunk_extractor;

use log::info;

use crate::config::ExtractConfig;
use crate::utils::io_utils::{open_file_as_reader, write_atomically};
use crate::Result;

pub use chunk_extractor::{list_chunks, ChunkExtractor, ExtractState};

/// Extracts the configured chunk from a container file into the output file.
///
/// The output file is written only when extraction succeeds completely; on any
/// error, including a missing chunk, the destination is left untouched.
///
/// # Returns
///
/// Returns the number of bytes written.
pub fn extract_chunk_to_file(config: &ExtractConfig) -> Result<usize> {
    config.validate()?;
    info!("Extracting chunk {} from {}", config.chunk_type, config.input_path);
    let reader = open_file_as_reader(&config.input_path)?;
    let data = ChunkExtractor::new(reader, &config.chunk_type)?
        .with_strict_sizes(config.strict_sizes)
        .extract()?;
    write_atomically(&config.output_file, &data)?;
    Ok(data.len())
}
