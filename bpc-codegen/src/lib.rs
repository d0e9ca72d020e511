//! Shared code generation utilities for the bpc build-descriptor backends.
//!
//! # Module Organization
//!
//! - [`builder`] - Text building blocks (CodeBuilder, Indent)
//! - [`BuildDescriptor`] - The two-operation contract every backend implements
//! - [`Buckets`] - Per-directory grouping shared by sharded backends

pub mod builder;

mod buckets;
mod descriptor;

pub use buckets::Buckets;
pub use builder::{CodeBuilder, Indent};
pub use descriptor::{BuildDescriptor, DescriptorFile, EmitResult};

/// First comment line of every emitted descriptor.
pub const GENERATED_HEADER: &str = "Generated by bpc. Do not edit.";
