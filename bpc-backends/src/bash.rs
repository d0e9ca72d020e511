//! Bash script backend.
//!
//! `build.sh` hands off to `bash/create_directories.sh`, which creates every
//! bucket output directory and `exec`s the first artifact batch. Each batch
//! checks up to [`BATCH_SIZE`] artifacts with explicit `-ot` comparisons and
//! `exec`s the next.

use std::path::{Path, PathBuf};

use bpc_codegen::{BuildDescriptor, CodeBuilder, GENERATED_HEADER};
use bpc_core::{FileRules, GeneratedFile};
use bpc_graph::Module;

/// Modules handled by one `artifacts_<n>.sh` script.
pub const BATCH_SIZE: usize = 100;

const SCRIPT_DIR: &str = "bash";

/// Chain of Bash scripts doing explicit timestamp checks.
#[derive(Debug, Default)]
pub struct BashScript<'g> {
    modules: Vec<&'g Module>,
}

impl<'g> BashScript<'g> {
    pub fn new() -> Self {
        Self::default()
    }

    /// `(first module index, modules)` for each batch, in order.
    fn batches(&self) -> impl Iterator<Item = (usize, &[&'g Module])> {
        self.modules
            .chunks(BATCH_SIZE)
            .enumerate()
            .map(|(i, batch)| (i * BATCH_SIZE, batch))
    }
}

impl<'g> BuildDescriptor<'g> for BashScript<'g> {
    fn backend(&self) -> &'static str {
        "bash"
    }

    fn add_module(&mut self, module: &'g Module) {
        self.modules.push(module);
    }

    fn files(&self) -> Vec<Box<dyn GeneratedFile + '_>> {
        let first_batch = (!self.modules.is_empty()).then_some(0);
        let mut files: Vec<Box<dyn GeneratedFile + '_>> = vec![
            Box::new(EntryScript),
            Box::new(DirectoryScript {
                modules: &self.modules,
                next: first_batch,
            }),
        ];

        let starts: Vec<usize> = self.batches().map(|(start, _)| start).collect();
        for (i, (start, modules)) in self.batches().enumerate() {
            files.push(Box::new(ArtifactScript {
                start,
                modules,
                next: starts.get(i + 1).copied(),
            }));
        }
        files
    }
}

fn batch_script_name(start: usize) -> String {
    format!("artifacts_{start}.sh")
}

/// Shebang, header, strict mode and the `BOD`/`SRC`/`VERBOSE` variables.
///
/// `src_from_script` is the path from the script's directory to the source
/// root.
fn prolog(builder: &mut CodeBuilder, src_from_script: &str) {
    builder
        .push_line("#!/bin/bash")
        .push_comment("#", GENERATED_HEADER)
        .push_line("set -o nounset;")
        .push_line("set -o errexit;")
        .push_blank()
        .push_line("BOD=${BPC_BOD:?\"BPC_BOD must be set to the build output location\"};")
        .push_line(
            "[ -d \"${BOD}\" ] || { builtin echo \"${BOD} directory does not exist\" >&2; exit 1; };",
        )
        .push_line("VERBOSE=${BPC_VERBOSE:-};")
        .push_line(&format!(
            "SRC=\"$(cd \"$(dirname \"${{BASH_SOURCE[0]}}\")/{src_from_script}\" && pwd)\";"
        ))
        .push_blank();
}

fn exec_next(builder: &mut CodeBuilder, script: &str) {
    builder.push_line(&format!("exec \"${{SRC}}/{SCRIPT_DIR}/{script}\";"));
}

struct EntryScript;

impl GeneratedFile for EntryScript {
    fn path(&self, base: &Path) -> PathBuf {
        base.join("build.sh")
    }

    fn rules(&self) -> FileRules {
        FileRules::executable()
    }

    fn render(&self) -> String {
        let mut builder = CodeBuilder::bash();
        prolog(&mut builder, ".");
        exec_next(&mut builder, "create_directories.sh");
        builder.build()
    }
}

struct DirectoryScript<'a, 'g> {
    modules: &'a [&'g Module],
    next: Option<usize>,
}

impl GeneratedFile for DirectoryScript<'_, '_> {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(SCRIPT_DIR).join("create_directories.sh")
    }

    fn rules(&self) -> FileRules {
        FileRules::executable()
    }

    fn render(&self) -> String {
        let mut dirs: Vec<String> = self.modules.iter().map(|m| m.key().artifact_dir()).collect();
        dirs.dedup();

        let mut builder = CodeBuilder::bash();
        prolog(&mut builder, "..");
        for dir in &dirs {
            builder.push_line(&format!(
                "[ -d \"${{BOD}}/{dir}\" ] || mkdir --parents \"${{BOD}}/{dir}\";"
            ));
        }
        if let Some(start) = self.next {
            builder.push_blank();
            exec_next(&mut builder, &batch_script_name(start));
        }
        builder.build()
    }
}

struct ArtifactScript<'a, 'g> {
    start: usize,
    modules: &'a [&'g Module],
    next: Option<usize>,
}

impl GeneratedFile for ArtifactScript<'_, '_> {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(SCRIPT_DIR).join(batch_script_name(self.start))
    }

    fn rules(&self) -> FileRules {
        FileRules::executable()
    }

    fn render(&self) -> String {
        let mut builder = CodeBuilder::bash();
        prolog(&mut builder, "..");

        for module in self.modules {
            let artifact = format!("\"${{BOD}}/{}\"", module.artifact_path());
            let mut checks = vec![format!("if [ ! -f {artifact} ]")];
            checks.extend(
                module
                    .prerequisites()
                    .iter()
                    .map(|input| format!("|| [ {artifact} -ot \"${{SRC}}/{input}\" ]")),
            );
            let last = checks.len() - 1;
            checks[last].push_str("; then");

            builder
                .push_continued(&checks[0], &checks[1..], " \\")
                .push_indent()
                .push_line(&format!("builtin echo \"\" >{artifact};"))
                .push_line(&format!(
                    "[ -z \"${{VERBOSE}}\" ] || builtin echo \"Creating '${{BOD}}/{}'\";",
                    module.artifact_path()
                ))
                .push_dedent()
                .push_line("fi;");
        }

        if let Some(start) = self.next {
            builder.push_blank();
            exec_next(&mut builder, &batch_script_name(start));
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;

    use bpc_core::FileMode;
    use bpc_graph::ModuleGraph;

    use super::*;

    fn chain(n: usize) -> ModuleGraph {
        let lists: Vec<Vec<usize>> = (0..n)
            .map(|id| if id == 0 { vec![] } else { vec![id - 1] })
            .collect();
        ModuleGraph::from_import_lists(NonZeroUsize::new(50).unwrap(), &lists).unwrap()
    }

    #[test]
    fn test_batches_of_one_hundred_are_chained() {
        let graph = chain(250);
        let mut bash = BashScript::new();
        bash.add_graph(&graph);
        let files = bash.preview();

        let paths: Vec<&str> = files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "build.sh",
                "bash/create_directories.sh",
                "bash/artifacts_0.sh",
                "bash/artifacts_100.sh",
                "bash/artifacts_200.sh",
            ]
        );

        assert!(files[0].content.ends_with("exec \"${SRC}/bash/create_directories.sh\";\n"));
        assert!(files[1].content.ends_with("exec \"${SRC}/bash/artifacts_0.sh\";\n"));
        assert!(files[2].content.ends_with("exec \"${SRC}/bash/artifacts_100.sh\";\n"));
        assert!(files[3].content.ends_with("exec \"${SRC}/bash/artifacts_200.sh\";\n"));
        assert!(!files[4].content.contains("exec"));
    }

    #[test]
    fn test_creates_each_bucket_directory_once() {
        let graph = chain(120);
        let mut bash = BashScript::new();
        bash.add_graph(&graph);
        let dirs = &bash.preview()[1].content;

        assert_eq!(dirs.matches("mkdir --parents").count(), 3);
        assert!(dirs.contains(
            "[ -d \"${BOD}/source/2\" ] || mkdir --parents \"${BOD}/source/2\";\n"
        ));
    }

    #[test]
    fn test_artifact_check_compares_every_input() {
        let graph = chain(2);
        let mut bash = BashScript::new();
        bash.add_graph(&graph);
        let batch = &bash.preview()[2].content;

        let expected = "\
if [ ! -f \"${BOD}/source/0/m1.artifact\" ] \\
    || [ \"${BOD}/source/0/m1.artifact\" -ot \"${SRC}/source/0/m1.source\" ] \\
    || [ \"${BOD}/source/0/m1.artifact\" -ot \"${SRC}/interface/0/m1.interface\" ] \\
    || [ \"${BOD}/source/0/m1.artifact\" -ot \"${SRC}/interface/0/m0.interface\" ]; then
    builtin echo \"\" >\"${BOD}/source/0/m1.artifact\";
    [ -z \"${VERBOSE}\" ] || builtin echo \"Creating '${BOD}/source/0/m1.artifact'\";
fi;
";
        assert!(batch.ends_with(expected), "{batch}");
    }

    #[test]
    fn test_prolog_defers_output_root_check() {
        let bash = BashScript::new();
        let entry = &bash.preview()[0].content;

        assert!(entry.starts_with("#!/bin/bash\n"));
        assert!(entry.contains("BOD=${BPC_BOD:?"));
        assert!(entry.contains("[ -d \"${BOD}\" ] ||"));
    }

    #[test]
    fn test_scripts_are_executable() {
        let graph = chain(1);
        let mut bash = BashScript::new();
        bash.add_graph(&graph);

        for file in bash.files() {
            assert_eq!(file.rules().mode, FileMode::Executable);
        }
    }
}
