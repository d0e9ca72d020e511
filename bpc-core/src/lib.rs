//! Core utilities for the bpc build-tree generator.
//!
//! This crate provides the file-writing primitives shared by the
//! source-tree writer and every build-descriptor backend.

mod dirs;
mod file;

pub use dirs::ensure_dir;
pub use file::{File, FileMode, FileRules, GeneratedFile, WriteResult};
