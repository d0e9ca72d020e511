//! SCons backend: a single `SConstruct` with paths relative to itself.

use std::path::{Path, PathBuf};

use bpc_codegen::{BuildDescriptor, CodeBuilder, GENERATED_HEADER};
use bpc_core::GeneratedFile;
use bpc_graph::Module;

/// One `SConstruct` declaring a touch builder per artifact.
#[derive(Debug, Default)]
pub struct SCons<'g> {
    modules: Vec<&'g Module>,
}

impl<'g> SCons<'g> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<'g> BuildDescriptor<'g> for SCons<'g> {
    fn backend(&self) -> &'static str {
        "scons"
    }

    fn add_module(&mut self, module: &'g Module) {
        self.modules.push(module);
    }

    fn files(&self) -> Vec<Box<dyn GeneratedFile + '_>> {
        vec![Box::new(SConstruct {
            modules: &self.modules,
        })]
    }
}

struct SConstruct<'a, 'g> {
    modules: &'a [&'g Module],
}

fn artifact_node(module: &Module) -> String {
    format!("os.path.join(BOD, \"{}\")", module.artifact_path())
}

impl GeneratedFile for SConstruct<'_, '_> {
    fn path(&self, base: &Path) -> PathBuf {
        base.join("SConstruct")
    }

    fn render(&self) -> String {
        let builder = CodeBuilder::python()
            .comment(GENERATED_HEADER)
            .line("import os")
            .blank()
            .line("BOD = os.environ.get(\"BPC_BOD\")")
            .block("if not BOD:", |b| {
                b.line("print(\"BPC_BOD must be set to the build output location.\")")
                    .line("Exit(2)")
            })
            .block("if not os.path.isdir(BOD):", |b| {
                b.line("print(\"%s directory does not exist.\" % BOD)")
                    .line("Exit(2)")
            })
            .blank()
            .line("arti = Builder(action=\"touch $TARGET\")")
            .line("env = Environment(BUILDERS={\"CreateArtifact\": arti})")
            .blank()
            .block("if not os.environ.get(\"BPC_VERBOSE\"):", |b| {
                b.line("SetOption(\"silent\", True)")
            })
            .block("if os.environ.get(\"SCONS_MAKE\") is not None:", |b| {
                b.line("Decider(\"make\")")
            })
            .blank()
            .each(self.modules.iter(), |b, module| {
                b.block_with_close(
                    &format!("env.CreateArtifact({}, [", artifact_node(module)),
                    "])",
                    |b| {
                        b.each(module.prerequisites(), |b, input| {
                            b.line(&format!("\"{input}\","))
                        })
                    },
                )
            })
            .blank()
            .block_with_close("env.Alias(\"all\", [", "])", |b| {
                b.each(self.modules.iter(), |b, module| {
                    b.line(&format!("{},", artifact_node(module)))
                })
            })
            .line("Default(\"all\")");

        builder.build()
    }
}
