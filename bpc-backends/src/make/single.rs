use std::path::{Path, PathBuf};

use bpc_codegen::{Buckets, BuildDescriptor, CodeBuilder, GENERATED_HEADER};
use bpc_core::GeneratedFile;
use bpc_graph::{Module, SOURCE_DIR};

use super::{build_done, clean_rule, directory_rule, root_prolog};

const FILE_NAME: &str = "Makefile.single";

/// One Makefile that includes a fragment per directory bucket.
///
/// Every module gets an explicit rule; the bucket's output directory is an
/// order-only prerequisite of every artifact in that bucket.
#[derive(Debug, Default)]
pub struct SingleMake<'g> {
    buckets: Buckets<'g>,
}

impl<'g> SingleMake<'g> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<'g> BuildDescriptor<'g> for SingleMake<'g> {
    fn backend(&self) -> &'static str {
        "single-make"
    }

    fn add_module(&mut self, module: &'g Module) {
        self.buckets.add(module);
    }

    fn files(&self) -> Vec<Box<dyn GeneratedFile + '_>> {
        let mut files: Vec<Box<dyn GeneratedFile + '_>> = vec![Box::new(RootMakefile {
            buckets: &self.buckets,
        })];
        for (bucket, modules) in self.buckets.iter() {
            files.push(Box::new(BucketFragment { bucket, modules }));
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
        builder.push_line(".PHONY: build clean").push_blank();
        clean_rule(&mut builder);
        directory_rule(&mut builder, &dirs);

        // `ARTIFACT` is reassigned by each fragment, so consume it right away.
        for dir in &dirs {
            builder
                .push_line(&format!("include $(SRC)/{dir}/{FILE_NAME}"))
                .push_line(&format!("$(ARTIFACT): | $(BOD)/{dir}"))
                .push_line("build: $(ARTIFACT)")
                .push_blank();
        }

        build_done(&mut builder);
        builder.build()
    }
}

struct BucketFragment<'a, 'g> {
    bucket: usize,
    modules: &'a [&'g Module],
}

impl GeneratedFile for BucketFragment<'_, '_> {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(SOURCE_DIR)
            .join(self.bucket.to_string())
            .join(FILE_NAME)
    }

    fn render(&self) -> String {
        let mut builder = CodeBuilder::make();
        builder
            .push_comment("#", GENERATED_HEADER)
            .push_comment("#", &format!("Included by the root {FILE_NAME}."))
            .push_continued(
                "ARTIFACT :=",
                self.modules
                    .iter()
                    .map(|m| format!("$(BOD)/{}", m.artifact_path())),
                " \\",
            );

        for module in self.modules {
            let prereqs: Vec<String> = module
                .prerequisites()
                .into_iter()
                .map(|path| format!("$(SRC)/{path}"))
                .collect();
            builder
                .push_blank()
                .push_line(&format!(
                    "$(BOD)/{}: {}",
                    module.artifact_path(),
                    prereqs.join(" ")
                ))
                .push_indent()
                .push_line("$(AT)touch $@$(if $(VERBOSE),; echo \"Creating '$@'\")")
                .push_dedent();
        }

        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;

    use bpc_graph::ModuleGraph;

    use super::*;

    #[test]
    fn test_root_includes_each_bucket_with_order_only_directory() {
        let graph =
            ModuleGraph::from_import_lists(NonZeroUsize::new(1).unwrap(), &[vec![], vec![0usize]])
                .unwrap();
        let mut make = SingleMake::new();
        make.add_graph(&graph);
        let root = &make.preview()[0].content;

        assert!(root.contains(
            "include $(SRC)/source/0/Makefile.single\n$(ARTIFACT): | $(BOD)/source/0\nbuild: $(ARTIFACT)\n"
        ));
        assert!(root.contains(
            "include $(SRC)/source/1/Makefile.single\n$(ARTIFACT): | $(BOD)/source/1\nbuild: $(ARTIFACT)\n"
        ));
        assert!(root.ends_with("build:\n\t$(AT)echo \"All targets up-to-date.\"\n"));
        assert!(root.contains("$(if $(wildcard $(BOD)/.),,$(error $(BOD) directory does not exist))"));
    }

    #[test]
    fn test_fragment_has_explicit_rule_per_module() {
        let graph =
            ModuleGraph::from_import_lists(NonZeroUsize::new(4).unwrap(), &[vec![], vec![0usize]])
                .unwrap();
        let mut make = SingleMake::new();
        make.add_graph(&graph);
        let fragment = &make.preview()[1].content;

        assert!(fragment.contains(
            "ARTIFACT := \\\n\t$(BOD)/source/0/m0.artifact \\\n\t$(BOD)/source/0/m1.artifact\n"
        ));
        assert!(fragment.contains(
            "$(BOD)/source/0/m1.artifact: $(SRC)/source/0/m1.source \
             $(SRC)/interface/0/m1.interface $(SRC)/interface/0/m0.interface\n\t$(AT)touch $@"
        ));
    }

    #[test]
    fn test_empty_graph_has_no_directory_rule() {
        let make = SingleMake::new();
        let files = make.preview();

        assert_eq!(files.len(), 1);
        assert!(!files[0].content.contains("mkdir"));
    }
}
