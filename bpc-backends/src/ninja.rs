//! Ninja backend.
//!
//! Paths are relative to the source root, so Ninja runs with `-C <root>`. The
//! output root lives in the `bod` variable, read from `bod.ninja`; that file
//! is written only when an output root is configured, otherwise the build
//! stops while loading the manifest.

use std::path::{Path, PathBuf};

use bpc_codegen::{Buckets, BuildDescriptor, CodeBuilder, GENERATED_HEADER};
use bpc_core::GeneratedFile;
use bpc_graph::{Module, SOURCE_DIR};

const FILE_NAME: &str = "build.ninja";
const BOD_FILE: &str = "bod.ninja";

/// Ninja files per directory bucket.
#[derive(Debug, Default)]
pub struct Ninja<'g> {
    buckets: Buckets<'g>,
    output_root: Option<PathBuf>,
}

impl<'g> Ninja<'g> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `bod` to `output_root` in the emitted `bod.ninja`.
    pub fn with_output_root(mut self, output_root: impl Into<PathBuf>) -> Self {
        self.output_root = Some(output_root.into());
        self
    }
}

impl<'g> BuildDescriptor<'g> for Ninja<'g> {
    fn backend(&self) -> &'static str {
        "ninja"
    }

    fn add_module(&mut self, module: &'g Module) {
        self.buckets.add(module);
    }

    fn files(&self) -> Vec<Box<dyn GeneratedFile + '_>> {
        let mut files: Vec<Box<dyn GeneratedFile + '_>> = vec![Box::new(RootManifest {
            buckets: &self.buckets,
        })];
        if let Some(output_root) = &self.output_root {
            files.push(Box::new(OutputRoot { output_root }));
        }
        for (bucket, modules) in self.buckets.iter() {
            files.push(Box::new(BucketManifest { bucket, modules }));
        }
        files
    }
}

/// Escape a path for use on the right-hand side of a Ninja binding.
fn escape(value: &str) -> String {
    value.replace('$', "$$").replace(' ', "$ ").replace(':', "$:")
}

fn artifact_output(module: &Module) -> String {
    format!("$bod/{}", module.artifact_path())
}

struct RootManifest<'a, 'g> {
    buckets: &'a Buckets<'g>,
}

impl GeneratedFile for RootManifest<'_, '_> {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(FILE_NAME)
    }

    fn render(&self) -> String {
        CodeBuilder::ninja()
            .comment(GENERATED_HEADER)
            .comment("Run as `ninja -C <source root>`; bod.ninja binds the output root.")
            .line("ninja_required_version = 1.3")
            .blank()
            .line(&format!("include {BOD_FILE}"))
            .blank()
            .block("rule touch", |b| {
                b.line("command = touch $out")
                    .line("description = TOUCH $out")
            })
            .blank()
            .each(self.buckets.numbers(), |b, bucket| {
                b.line(&format!("include {SOURCE_DIR}/{bucket}/{FILE_NAME}"))
            })
            .blank()
            .continued(
                "build all: phony",
                self.buckets.modules().map(artifact_output),
                " $",
            )
            .blank()
            .line("default all")
            .build()
    }
}

struct OutputRoot<'a> {
    output_root: &'a Path,
}

impl GeneratedFile for OutputRoot<'_> {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(BOD_FILE)
    }

    fn render(&self) -> String {
        CodeBuilder::ninja()
            .comment(GENERATED_HEADER)
            .line(&format!(
                "bod = {}",
                escape(&self.output_root.display().to_string())
            ))
            .build()
    }
}

struct BucketManifest<'a, 'g> {
    bucket: usize,
    modules: &'a [&'g Module],
}

impl GeneratedFile for BucketManifest<'_, '_> {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(SOURCE_DIR)
            .join(self.bucket.to_string())
            .join(FILE_NAME)
    }

    fn render(&self) -> String {
        let mut builder = CodeBuilder::ninja();
        builder.push_comment("#", GENERATED_HEADER);
        for module in self.modules {
            builder.push_blank().push_continued(
                &format!("build {}: touch", artifact_output(module)),
                module.prerequisites(),
                " $",
            );
        }
        builder.build()
    }
}
