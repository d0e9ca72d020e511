//! GNU Make backends.
//!
//! Both flavours read the output root from `BOD` and locate the source tree
//! through `SRC`, which the root Makefile derives from its own location so the
//! descriptors keep working when the tree is moved.

mod recursive;
mod single;

pub use recursive::RecursiveMake;
pub use single::SingleMake;

use bpc_codegen::{CodeBuilder, GENERATED_HEADER};

/// Assignment of `SRC` to the directory holding the root Makefile.
const SRC_FROM_MAKEFILE: &str =
    "SRC := $(patsubst %/,%,$(dir $(abspath $(lastword $(MAKEFILE_LIST)))))";

/// Recipe prefix that silences commands unless `VERBOSE` is set.
const QUIET: &str = "AT := $(if $(VERBOSE),,@)";

/// Header, output-root checks and the shared variables of a root Makefile.
pub(crate) fn root_prolog(builder: &mut CodeBuilder) {
    builder
        .push_comment("#", GENERATED_HEADER)
        .push_comment("#", "Run with BOD set to an existing directory outside the source tree.")
        .push_line(
            "$(if $(BOD),,$(error BOD must be set to the build output location; it must not be in the source tree))",
        )
        .push_line("$(if $(wildcard $(BOD)/.),,$(error $(BOD) directory does not exist))")
        .push_blank()
        .push_line(SRC_FROM_MAKEFILE)
        .push_line(QUIET)
        .push_line(".DEFAULT_GOAL := build")
        .push_blank();
}

/// `clean` target removing every artifact under the output root.
pub(crate) fn clean_rule(builder: &mut CodeBuilder) {
    builder
        .push_line("clean:")
        .push_indent()
        .push_line("rm -rf $(BOD)/source")
        .push_dedent()
        .push_blank();
}

/// One rule creating every listed output directory under `$(BOD)`.
pub(crate) fn directory_rule(builder: &mut CodeBuilder, dirs: &[String]) {
    if dirs.is_empty() {
        return;
    }
    builder
        .push_line(&format!("$(addprefix $(BOD)/,{}):", dirs.join(" ")))
        .push_indent()
        .push_line("$(AT)mkdir --parents $@$(if $(VERBOSE),; echo \"Creating build directory '$@'\")")
        .push_dedent()
        .push_blank();
}

/// Final `build` recipe.
pub(crate) fn build_done(builder: &mut CodeBuilder) {
    builder
        .push_line("build:")
        .push_indent()
        .push_line("$(AT)echo \"All targets up-to-date.\"")
        .push_dedent();
}
