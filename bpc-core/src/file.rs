use std::{
    fs,
    path::{Path, PathBuf},
};

use eyre::{Result, WrapErr};

use crate::dirs::ensure_dir;

/// Trait for types that represent a generated file
pub trait GeneratedFile {
    /// Get the file path relative to the base directory
    fn path(&self, base: &Path) -> PathBuf;

    /// Get the rules for writing this file
    fn rules(&self) -> FileRules {
        FileRules::default()
    }

    /// Render the file content
    fn render(&self) -> String;

    /// Write the file to disk
    fn write(&self, base: &Path) -> Result<WriteResult> {
        write_with_rules(&self.path(base), &self.render(), &self.rules())
    }
}

/// Result of a write operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written
    Written,
    /// File already held the rendered bytes and was left alone
    Unchanged,
}

/// A file to be generated
#[derive(Debug, Clone)]
pub struct File {
    path: PathBuf,
    content: String,
    rules: FileRules,
}

impl File {
    /// Create a new regular file with the given path and content
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            rules: FileRules::default(),
        }
    }

    /// Write the file according to its rules
    pub fn write(&self) -> Result<WriteResult> {
        write_with_rules(&self.path, &self.content, &self.rules)
    }
}

/// Rules that determine how a file should be written.
///
/// Files are only rewritten when the on-disk bytes differ, so timestamps of
/// unchanged descriptors survive a regeneration. The mode is enforced either
/// way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileRules {
    pub mode: FileMode,
}

impl FileRules {
    /// An executable script.
    pub fn executable() -> Self {
        Self {
            mode: FileMode::Executable,
        }
    }
}

/// Permission bits applied after writing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FileMode {
    /// `0644`
    #[default]
    Regular,
    /// `0755`
    Executable,
}

impl FileMode {
    fn bits(self) -> u32 {
        match self {
            FileMode::Regular => 0o644,
            FileMode::Executable => 0o755,
        }
    }
}

fn write_with_rules(path: &Path, content: &str, rules: &FileRules) -> Result<WriteResult> {
    let result = if fs::read(path).is_ok_and(|existing| existing == content.as_bytes()) {
        WriteResult::Unchanged
    } else {
        write_file(path, content)?;
        WriteResult::Written
    };

    set_mode(path, rules.mode)?;
    Ok(result)
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => ensure_dir(parent)?,
        _ => {}
    }
    fs::write(path, content).wrap_err_with(|| format!("failed to write '{}'", path.display()))
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: FileMode) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let current = fs::metadata(path)
        .wrap_err_with(|| format!("failed to read permissions of '{}'", path.display()))?
        .permissions()
        .mode();
    if current & 0o777 == mode.bits() {
        return Ok(());
    }
    fs::set_permissions(path, fs::Permissions::from_mode(mode.bits()))
        .wrap_err_with(|| format!("failed to set permissions on '{}'", path.display()))
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _mode: FileMode) -> Result<()> {
    Ok(())
}
