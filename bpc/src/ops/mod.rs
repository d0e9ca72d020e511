//! Core operations.
//!
//! This module contains the business logic for bpc commands,
//! separated from CLI argument parsing and output rendering.

pub mod check;
pub mod generate;
pub mod info;
pub mod sources;

pub use check::check;
pub use generate::{GenerateOptions, generate};
pub use info::{info, module_list_json};
pub use sources::{SourceTreeResult, write_sources};
