//! The contract every build-tool backend implements.

use std::path::{Path, PathBuf};

use bpc_core::{GeneratedFile, WriteResult};
use bpc_graph::{Module, ModuleGraph};
use eyre::{Result, WrapErr};
use tracing::debug;

/// A backend that turns modules into one build tool's descriptor files.
///
/// Modules are borrowed for `'g` and never modified. Every backend must
/// declare, for each module `m`, that `m`'s artifact depends on exactly its
/// own source, its own interface, and the interface of every import.
pub trait BuildDescriptor<'g> {
    /// Backend identifier (e.g., "ninja", "bazel")
    fn backend(&self) -> &'static str;

    /// Accumulate one module. Order is preserved; callers add each module
    /// once.
    fn add_module(&mut self, module: &'g Module);

    /// The descriptor files for the modules added so far.
    fn files(&self) -> Vec<Box<dyn GeneratedFile + '_>>;

    /// Add every module of `graph`, in id order.
    fn add_graph(&mut self, graph: &'g ModuleGraph) {
        for module in graph.modules() {
            self.add_module(module);
        }
    }

    /// Render every descriptor without touching disk.
    fn preview(&self) -> Vec<DescriptorFile> {
        self.files()
            .iter()
            .map(|file| DescriptorFile {
                path: file.path(Path::new("")).display().to_string(),
                content: file.render(),
            })
            .collect()
    }

    /// Write every descriptor under `root`.
    ///
    /// Output always matches a fresh render. Files whose bytes are already
    /// current are left untouched.
    fn write(&self, root: &Path) -> Result<EmitResult> {
        let mut result = EmitResult::default();

        for file in self.files() {
            let path = file.path(root);
            let outcome = file
                .write(root)
                .wrap_err_with(|| format!("{}: failed to write descriptor", self.backend()))?;
            debug!(backend = self.backend(), path = %path.display(), ?outcome, "descriptor");

            let relative = path.strip_prefix(root).unwrap_or(&path).to_path_buf();
            match outcome {
                WriteResult::Written => result.written.push(relative),
                WriteResult::Unchanged => result.unchanged.push(relative),
            }
        }

        Ok(result)
    }
}

/// Outcome of writing one backend's descriptors.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EmitResult {
    /// Files created or rewritten, relative to the source root
    pub written: Vec<PathBuf>,
    /// Files that already held the rendered bytes
    pub unchanged: Vec<PathBuf>,
}

impl EmitResult {
    pub fn file_count(&self) -> usize {
        self.written.len() + self.unchanged.len()
    }
}

/// A rendered descriptor for preview
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptorFile {
    /// Path relative to the source root
    pub path: String,
    /// File content
    pub content: String,
}
