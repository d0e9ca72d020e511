//! Directory helpers shared by the source-tree writer and every backend.

use std::{fs, path::Path};

use eyre::{Result, WrapErr, bail};

/// Create `path` and any missing parents.
///
/// Fails when `path` already exists as something other than a directory;
/// there is no attempt to recover from that state.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if path.exists() {
        if !path.is_dir() {
            bail!("'{}' is not a directory", path.display());
        }
        return Ok(());
    }
    fs::create_dir_all(path).wrap_err_with(|| format!("failed to create '{}'", path.display()))
}
