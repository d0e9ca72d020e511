//! `bpc.toml` configuration for the bpc build-tree generator.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod backend;
mod config;
mod error;

pub use backend::Backend;
pub use config::{CONFIG_FILENAME, Config, Overrides};
pub use error::{Error, Result};
