use std::path::{Path, PathBuf};

use bpc_codegen::{Buckets, BuildDescriptor, CodeBuilder, GENERATED_HEADER};
use bpc_core::GeneratedFile;
use bpc_graph::{Module, ModuleKey, SOURCE_DIR};

use super::{QUIET, build_done, clean_rule, directory_rule, root_prolog};

const FILE_NAME: &str = "Makefile.recursive";

/// Target each bucket Makefile builds when invoked from the root.
const SUBDIRECTORY_TARGET: &str = "subdirectory__";

/// Root Makefile that recurses into one Makefile per directory bucket.
///
/// The root creates every bucket output directory, then runs `$(MAKE)` in
/// each one with `BOD` rebound to that bucket's output directory and `VPATH`
/// pointing at its sources.
#[derive(Debug, Default)]
pub struct RecursiveMake<'g> {
    buckets: Buckets<'g>,
}

impl<'g> RecursiveMake<'g> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<'g> BuildDescriptor<'g> for RecursiveMake<'g> {
    fn backend(&self) -> &'static str {
        "recursive-make"
    }

    fn add_module(&mut self, module: &'g Module) {
        self.buckets.add(module);
    }

    fn files(&self) -> Vec<Box<dyn GeneratedFile + '_>> {
        let mut files: Vec<Box<dyn GeneratedFile + '_>> = vec![Box::new(RootMakefile {
            buckets: &self.buckets,
        })];
        for (bucket, modules) in self.buckets.iter() {
            files.push(Box::new(BucketMakefile { bucket, modules }));
        }
        files
    }
}

struct RootMakefile<'a, 'g> {
    buckets: &'a Buckets<'g>,
}

impl GeneratedFile for RootMakefile<'_, '_> {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(FILE_NAME)
    }

    fn render(&self) -> String {
        let dirs: Vec<String> = self
            .buckets
            .numbers()
            .map(|bucket| format!("{SOURCE_DIR}/{bucket}"))
            .collect();

        let mut builder = CodeBuilder::make();
        root_prolog(&mut builder);
        builder
            .push_continued("BUCKETS :=", &dirs, " \\")
            .push_blank()
            .push_line(".PHONY: build clean create-build-directories $(BUCKETS)")
            .push_blank();
        clean_rule(&mut builder);
        directory_rule(&mut builder, &dirs);
        builder
            .push_line("create-build-directories: | $(addprefix $(BOD)/,$(BUCKETS))")
            .push_blank()
            .push_line("$(BUCKETS): create-build-directories")
            .push_indent()
            .push_continued(
                "$(AT)$(MAKE) $(if $(VERBOSE),,--silent) --no-print-directory",
                [
                    "BOD=$(BOD)/$@".to_string(),
                    "SRC=$(SRC)".to_string(),
                    "VPATH=$(SRC)/$@".to_string(),
                    "-C $(BOD)/$@".to_string(),
                    format!("-f $(SRC)/$@/{FILE_NAME}"),
                    SUBDIRECTORY_TARGET.to_string(),
                ],
                " \\",
            )
            .push_dedent()
            .push_blank()
            .push_line("build: $(BUCKETS)");
        build_done(&mut builder);
        builder.build()
    }
}

struct BucketMakefile<'a, 'g> {
    bucket: usize,
    modules: &'a [&'g Module],
}

impl GeneratedFile for BucketMakefile<'_, '_> {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(SOURCE_DIR)
            .join(self.bucket.to_string())
            .join(FILE_NAME)
    }

    fn render(&self) -> String {
        let mut builder = CodeBuilder::make();
        builder
            .push_comment("#", GENERATED_HEADER)
            .push_comment("#", &format!("Invoked by the root {FILE_NAME}; do not run directly."))
            .push_line("$(if $(BOD),,$(error BOD must be set to the bucket output directory))")
            .push_line("$(if $(SRC),,$(error SRC must be set to the source root))")
            .push_line(QUIET)
            .push_blank()
            .push_line("%.artifact: %.source")
            .push_indent()
            .push_line("$(AT)touch $@$(if $(VERBOSE),; echo \"Creating '$(BOD)/$@'\")")
            .push_dedent()
            .push_blank()
            .push_continued(
                "SOURCE :=",
                self.modules.iter().map(|m| m.key().source_file_name()),
                " \\",
            )
            .push_blank()
            .push_line("ARTIFACT := $(SOURCE:.source=.artifact)")
            .push_blank();

        // The pattern rule supplies the source; interfaces are explicit.
        for module in self.modules {
            let interfaces: Vec<String> = std::iter::once(module.key())
                .chain(module.imports().iter().copied())
                .map(|key: ModuleKey| format!("$(SRC)/{}", key.interface_path()))
                .collect();
            builder.push_line(&format!(
                "{}: {}",
                module.key().artifact_file_name(),
                interfaces.join(" ")
            ));
        }

        builder
            .push_blank()
            .push_line(&format!(".PHONY: {SUBDIRECTORY_TARGET}"))
            .push_line(&format!("{SUBDIRECTORY_TARGET}: $(ARTIFACT)"));
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;

    use bpc_graph::ModuleGraph;

    use super::*;

    fn graph() -> ModuleGraph {
        ModuleGraph::from_import_lists(NonZeroUsize::new(2).unwrap(), &[vec![], vec![0usize], vec![1, 0]])
            .unwrap()
    }

    #[test]
    fn test_one_file_per_bucket_plus_root() {
        let graph = graph();
        let mut make = RecursiveMake::new();
        make.add_graph(&graph);

        let paths: Vec<String> = make.preview().into_iter().map(|f| f.path).collect();
        assert_eq!(
            paths,
            vec![
                "Makefile.recursive",
                "source/0/Makefile.recursive",
                "source/1/Makefile.recursive",
            ]
        );
    }

    #[test]
    fn test_root_recurses_with_rebound_output_root() {
        let graph = graph();
        let mut make = RecursiveMake::new();
        make.add_graph(&graph);
        let root = &make.preview()[0].content;

        assert!(root.contains("BUCKETS := \\\n\tsource/0 \\\n\tsource/1\n"));
        assert!(root.contains("$(addprefix $(BOD)/,source/0 source/1):\n"));
        assert!(root.contains("\t\tBOD=$(BOD)/$@ \\\n"));
        assert!(root.contains("\t\tVPATH=$(SRC)/$@ \\\n"));
        assert!(root.contains("\t\t-f $(SRC)/$@/Makefile.recursive \\\n\t\tsubdirectory__\n"));
        assert!(root.contains("$(error BOD must be set"));
    }

    #[test]
    fn test_root_rejects_output_root_that_is_not_a_directory() {
        let graph = graph();
        let mut make = RecursiveMake::new();
        make.add_graph(&graph);
        let root = &make.preview()[0].content;

        // `$(wildcard X/.)` only matches when X is a directory.
        assert!(root.contains(
            "$(if $(wildcard $(BOD)/.),,$(error $(BOD) directory does not exist))\n"
        ));
        assert!(!root.contains("$(wildcard $(BOD)),"));
    }

    #[test]
    fn test_bucket_lists_interface_prerequisites() {
        let graph = graph();
        let mut make = RecursiveMake::new();
        make.add_graph(&graph);
        let files = make.preview();

        let bucket0 = &files[1].content;
        assert!(bucket0.contains("SOURCE := \\\n\tm0.source \\\n\tm1.source\n"));
        assert!(bucket0.contains("m0.artifact: $(SRC)/interface/0/m0.interface\n"));
        assert!(bucket0.contains(
            "m1.artifact: $(SRC)/interface/0/m1.interface $(SRC)/interface/0/m0.interface\n"
        ));

        let bucket1 = &files[2].content;
        assert!(bucket1.contains(
            "m2.artifact: $(SRC)/interface/1/m2.interface $(SRC)/interface/0/m1.interface \
             $(SRC)/interface/0/m0.interface\n"
        ));
    }
}
