//! Source tree writer.
//!
//! Each module gets an interface file and a source file, padded with `'0'`
//! to a size in KiB. Sources start with one `import` line per import.

use std::path::{Path, PathBuf};

use bpc_core::{File, GeneratedFile, WriteResult};
use bpc_graph::{FileSizes, Module, ModuleGraph, SizePolicy};
use eyre::{Result, WrapErr};
use tracing::{debug, info};

/// Counts from writing a source tree.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SourceTreeResult {
    /// Module files created or rewritten.
    pub written: usize,
    /// Module files already holding the same bytes.
    pub unchanged: usize,
    /// Total bytes across all module files.
    pub bytes: u64,
}

struct InterfaceFile<'a> {
    module: &'a Module,
    kib: u32,
}

impl GeneratedFile for InterfaceFile<'_> {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(self.module.interface_path())
    }

    fn render(&self) -> String {
        let mut content = format!("# Module '{}' interface.\n", self.module.name());
        content.push_str(&padding(self.kib));
        content
    }
}

struct SourceFile<'a> {
    module: &'a Module,
    kib: u32,
}

impl GeneratedFile for SourceFile<'_> {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(self.module.source_path())
    }

    fn render(&self) -> String {
        let mut content = String::new();
        for import in self.module.imports() {
            content.push_str(&format!("import \"{}\"\n", import.interface_file_name()));
        }
        content.push_str(&padding(self.kib));
        content
    }
}

fn padding(kib: u32) -> String {
    "0".repeat(1024 * kib as usize)
}

/// Write every module's interface and source file under `root`.
///
/// Sizes are drawn in module order, interface first, so the same seed always
/// yields the same bytes.
pub fn write_sources(
    graph: &ModuleGraph,
    root: &Path,
    policy: SizePolicy,
    seed: u64,
) -> Result<SourceTreeResult> {
    info!(modules = graph.len(), root = %root.display(), "writing source tree");

    let mut sizes = FileSizes::new(policy, seed);
    let mut result = SourceTreeResult::default();

    for module in graph.modules() {
        let interface = InterfaceFile {
            module,
            kib: sizes.interface_kib(),
        };
        let source = SourceFile {
            module,
            kib: sizes.source_kib(),
        };

        for file in [&interface as &dyn GeneratedFile, &source] {
            let content = file.render();
            result.bytes += content.len() as u64;
            let outcome = File::new(file.path(root), content)
                .write()
                .wrap_err_with(|| format!("failed to write module {}", module.name()))?;
            match outcome {
                WriteResult::Written => result.written += 1,
                WriteResult::Unchanged => result.unchanged += 1,
            }
        }

        if (module.id() + 1) % 1000 == 0 {
            debug!(modules = module.id() + 1, "source files written");
        }
    }

    Ok(result)
}
