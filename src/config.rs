//! Extraction configuration.
//!
//! [`ExtractConfig`] carries the three caller-supplied parameters (container,
//! chunk type, destination) plus policy flags. It can be built in code, from the
//! command line, or loaded from JSON.
//!
//! # Examples
//!
//! ```no_run
//! use mda::ExtractConfig;
//!
//! # fn main() -> mda::Result<()> {
//! // Build configuration directly
//! let config = ExtractConfig::new("models/ship.mda", "MESH", "ship.mesh");
//! config.validate()?;
//!
//! // Or load it from JSON
//! let config = ExtractConfig::from_json_file("extract.json")?;
//! # Ok(())
//! # }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::storage::chunk_header::CHUNK_TAG_LEN;
use crate::{MdaError, Result};

/// Parameters for extracting a single chunk to a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Path to the container file
    pub input_path: String,
    /// The 4-byte tag of the chunk to extract
    pub chunk_type: String,
    /// Path the decoded chunk is written to
    pub output_file: String,
    /// Fail when a matched header declares a padded size below its logical size
    pub strict_sizes: bool,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        ExtractConfig {
            input_path: String::new(),
            chunk_type: String::new(),
            output_file: String::new(),
            strict_sizes: false,
        }
    }
}

impl ExtractConfig {
    pub fn new<S: Into<String>>(input_path: S, chunk_type: S, output_file: S) -> Self {
        Self {
            input_path: input_path.into(),
            chunk_type: chunk_type.into(),
            output_file: output_file.into(),
            ..Default::default()
        }
    }

    /// Parses a configuration from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Checks that every required parameter is present and well-formed.
    ///
    /// # Errors
    ///
    /// Returns [`MdaError::InvalidParameter`] for empty paths or a chunk type
    /// that is not exactly 4 bytes.
    pub fn validate(&self) -> Result<()> {
        if self.input_path.is_empty() {
            return Err(MdaError::invalid_path("input path is empty"));
        }
        if self.output_file.is_empty() {
            return Err(MdaError::invalid_path("output file is empty"));
        }
        if self.chunk_type.len() != CHUNK_TAG_LEN {
            return Err(MdaError::invalid_parameter(format!(
                "Chunk type must be {} bytes, got '{}'",
                CHUNK_TAG_LEN, self.chunk_type
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_parsing() {
        let json = r#"{"input_path":"ship.mda","chunk_type":"MESH","output_file":"ship.mesh","strict_sizes":true}"#;
        let config = ExtractConfig::from_json_str(json).unwrap();
        assert_eq!(config.input_path, "ship.mda");
        assert_eq!(config.chunk_type, "MESH");
        assert_eq!(config.output_file, "ship.mesh");
        assert!(config.strict_sizes);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_json_defaults() {
        let config = ExtractConfig::from_json_str(r#"{"input_path":"a.mda","chunk_type":"TEXT","output_file":"a.txt"}"#).unwrap();
        assert!(!config.strict_sizes);
        assert_eq!(config, ExtractConfig::new("a.mda", "TEXT", "a.txt"));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(ExtractConfig::from_json_str("{not json"), Err(MdaError::ParserError { .. })));
    }

    #[test]
    fn test_validate() {
        assert!(matches!(
            ExtractConfig::new("a.mda", "TEX", "a.txt").validate(),
            Err(MdaError::InvalidParameter { .. })
        ));
        assert!(matches!(
            ExtractConfig::new("", "TEXT", "a.txt").validate(),
            Err(MdaError::InvalidParameter { .. })
        ));
        assert!(matches!(
            ExtractConfig::new("a.mda", "TEXT", "").validate(),
            Err(MdaError::InvalidParameter { .. })
        ));
    }
}
