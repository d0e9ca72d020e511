//! Text-building primitives shared by every backend.

mod code_builder;
mod indent;

pub use code_builder::CodeBuilder;
pub use indent::Indent;
