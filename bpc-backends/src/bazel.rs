//! Bazel backend.
//!
//! Every directory bucket is its own package. Source packages load one shared
//! `artifact` macro; interface packages export their files so that modules in
//! other buckets can name them by label. Outputs land in Bazel's own output
//! tree, so no output root appears in the descriptors.

use std::path::{Path, PathBuf};

use bpc_codegen::{Buckets, BuildDescriptor, CodeBuilder, GENERATED_HEADER};
use bpc_core::GeneratedFile;
use bpc_graph::{INTERFACE_DIR, Module, ModuleKey, SOURCE_DIR};

const BUILD_FILE: &str = "BUILD.bazel";
const MACRO_FILE: &str = "artifact.bzl";

/// Bazel packages per directory bucket.
#[derive(Debug, Default)]
pub struct Bazel<'g> {
    buckets: Buckets<'g>,
}

impl<'g> Bazel<'g> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<'g> BuildDescriptor<'g> for Bazel<'g> {
    fn backend(&self) -> &'static str {
        "bazel"
    }

    fn add_module(&mut self, module: &'g Module) {
        self.buckets.add(module);
    }

    fn files(&self) -> Vec<Box<dyn GeneratedFile + '_>> {
        let mut files: Vec<Box<dyn GeneratedFile + '_>> = vec![
            Box::new(Workspace),
            Box::new(EmptyPackage { dir: None }),
            Box::new(ArtifactMacro),
            Box::new(EmptyPackage {
                dir: Some(INTERFACE_DIR),
            }),
        ];
        for (bucket, modules) in self.buckets.iter() {
            files.push(Box::new(InterfacePackage { bucket, modules }));
        }
        for (bucket, modules) in self.buckets.iter() {
            files.push(Box::new(SourcePackage { bucket, modules }));
        }
        files
    }
}

/// Label of a module's interface in its bucket's interface package.
fn interface_label(key: ModuleKey) -> String {
    format!(
        "//{}:{}",
        key.interface_dir(),
        key.interface_file_name()
    )
}

fn header() -> CodeBuilder {
    CodeBuilder::python().comment(GENERATED_HEADER)
}

struct Workspace;

impl GeneratedFile for Workspace {
    fn path(&self, base: &Path) -> PathBuf {
        base.join("WORKSPACE")
    }

    fn render(&self) -> String {
        header().line("workspace(name = \"bpc\")").build()
    }
}

/// A package marker with no targets.
struct EmptyPackage {
    dir: Option<&'static str>,
}

impl GeneratedFile for EmptyPackage {
    fn path(&self, base: &Path) -> PathBuf {
        match self.dir {
            Some(dir) => base.join(dir).join(BUILD_FILE),
            None => base.join(BUILD_FILE),
        }
    }

    fn render(&self) -> String {
        header().build()
    }
}

struct ArtifactMacro;

impl GeneratedFile for ArtifactMacro {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(MACRO_FILE)
    }

    fn render(&self) -> String {
        header()
            .blank()
            .block("def artifact(name, srcs, **kwargs):", |b| {
                b.block_with_close("native.genrule(", ")", |b| {
                    b.line("name = name,")
                        .line("srcs = srcs,")
                        .line("outs = [name + \".artifact\"],")
                        .line("cmd = \"touch $@\",")
                        .line("**kwargs")
                })
            })
            .build()
    }
}

struct InterfacePackage<'a, 'g> {
    bucket: usize,
    modules: &'a [&'g Module],
}

impl GeneratedFile for InterfacePackage<'_, '_> {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(INTERFACE_DIR)
            .join(self.bucket.to_string())
            .join(BUILD_FILE)
    }

    fn render(&self) -> String {
        header()
            .blank()
            .block_with_close("exports_files(", ")", |b| {
                b.block_with_close("[", "],", |b| {
                    b.each(self.modules.iter(), |b, module| {
                        b.line(&format!("\"{}\",", module.key().interface_file_name()))
                    })
                })
                .line("visibility = [\"//visibility:public\"],")
            })
            .build()
    }
}

struct SourcePackage<'a, 'g> {
    bucket: usize,
    modules: &'a [&'g Module],
}

impl GeneratedFile for SourcePackage<'_, '_> {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(SOURCE_DIR)
            .join(self.bucket.to_string())
            .join(BUILD_FILE)
    }

    fn render(&self) -> String {
        header()
            .blank()
            .line(&format!("load(\"//:{MACRO_FILE}\", \"artifact\")"))
            .each(self.modules.iter(), |b, module| {
                let srcs = std::iter::once(format!("\"{}\",", module.key().source_file_name()))
                    .chain(
                        std::iter::once(module.key())
                            .chain(module.imports().iter().copied())
                            .map(|key| format!("\"{}\",", interface_label(key))),
                    );
                b.blank().block_with_close("artifact(", ")", |b| {
                    b.line(&format!("name = \"{}\",", module.name()))
                        .block_with_close("srcs = [", "],", |b| b.each(srcs, |b, src| b.line(&src)))
                })
            })
            .build()
    }
}
