//! Synthetic module graph for the bpc build-tree generator.
//!
//! The graph is the single source of truth shared by every backend:
//!
//! ```text
//! GraphParams + seed → generate() → ModuleGraph → backends (read-only)
//! ```
//!
//! Every module may only import modules created before it, so the graph is
//! acyclic by construction. Directory buckets are computed here once and
//! carried on each [`ModuleKey`]; backends never re-derive them.

mod generate;
mod graph;
mod module;
mod params;
mod sizes;

pub use generate::{generate, generate_with};
pub use graph::{GraphError, GraphStats, ModuleGraph, Touched};
pub use module::{INTERFACE_DIR, Module, ModuleKey, SOURCE_DIR};
pub use params::GraphParams;
pub use sizes::{FileSizes, SizePolicy};
