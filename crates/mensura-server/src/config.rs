//! Predefined-constants configuration.
//!
//! The file is a JSON array of `{id, name, value}` records. Entries
//! with an empty id or a non-finite value are skipped later, at
//! validator construction; this module only reads and parses.

use mensura_validate::ConstantInput;
use std::path::Path;
use thiserror::Error;

/// Configuration loading failure.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read constants file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse constants file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Parse a constants document.
pub fn parse_constants(text: &str) -> Result<Vec<ConstantInput>, ConfigError> {
    Ok(serde_json::from_str(text)?)
}

/// Load a constants file from disk.
pub fn load_constants(path: &Path) -> Result<Vec<ConstantInput>, ConfigError> {
    parse_constants(&std::fs::read_to_string(path)?)
}
