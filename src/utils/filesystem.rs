//! File system utility functions

use anyhow::Result;
use std::path::Path;

/// Ensure a directory exists, creating it and any missing parents
pub fn ensure_directory_exists(path: impl AsRef<Path>) -> Result<()> {
    std::fs::create_dir_all(path)?;
    Ok(())
}
