//! I/O utility functions for containers and decoded output.
//!
//! This module provides helper functions for:
//! - Opening a container file as a buffered line source
//! - Writing decoded output all-or-nothing
//!
//! # Examples
//!
//! ```no_run
//! use mda::utils::io_utils::{open_file_as_reader, write_atomically};
//!
//! let reader = open_file_as_reader("models/ship.mda").unwrap();
//! write_atomically("ship.mesh", b"decoded bytes").unwrap();
//! ```

use std::fs::{self, File};
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use log::debug;
use uuid::Uuid;

use crate::{MdaError, Result};

/// Opens a file and returns a buffered reader.
pub fn open_file_as_reader<P: AsRef<Path>>(path: P) -> Result<BufReader<File>> {
    let file = File::open(path)?;
    Ok(BufReader::new(file))
}

/// Returns a unique temporary sibling path for `path`.
fn temp_path_for(path: &Path) -> Result<PathBuf> {
    let file_name = path
        .file_name()
        .ok_or_else(|| MdaError::invalid_path(path.display().to_string()))?;
    let temp_name = format!(".{}.{}.tmp", file_name.to_string_lossy(), Uuid::new_v4());
    Ok(path.with_file_name(temp_name))
}

/// Writes `data` to `path` so that readers see either the old file or the
/// complete new one.
///
/// The bytes go to a uniquely named temporary file in the same directory, which
/// is then renamed over the destination. On failure the temporary file is
/// removed and the destination is left untouched.
///
/// # Errors
///
/// Returns an error if `path` has no file name or any I/O step fails.
pub fn write_atomically<P: AsRef<Path>>(path: P, data: &[u8]) -> Result<()> {
    let path = path.as_ref();
    let temp_path = temp_path_for(path)?;
    let result = write_and_sync(&temp_path, data)
        .and_then(|()| fs::rename(&temp_path, path).map_err(MdaError::from));
    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    } else {
        debug!("Wrote {} bytes to {}", data.len(), path.display());
    }
    result
}

fn write_and_sync(path: &Path, data: &[u8]) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data)?;
    file.sync_all()?;
    Ok(())
}
