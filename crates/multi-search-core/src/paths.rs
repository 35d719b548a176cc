//! Path Utilities
//!
//! Where the native build keeps its state (`~/.multi-search/`).

use std::path::PathBuf;

use crate::error::{Result, StorageError};

/// Get the base directory (`~/.multi-search/`)
pub fn multi_search_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| StorageError::unavailable("Could not determine home directory"))?;
    Ok(home.join(".multi-search"))
}

/// Get the default key-value storage file
pub fn storage_path() -> Result<PathBuf> {
    Ok(multi_search_dir()?.join("storage.json"))
}
