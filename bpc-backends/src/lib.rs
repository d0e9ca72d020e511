//! Build-descriptor backends for the bpc build-tree generator.
//!
//! Each backend implements [`BuildDescriptor`] for one build tool. All of them
//! declare the same dependency relation: a module's artifact depends on its
//! own source, its own interface, and the interface of every import.
//!
//! ```text
//! ModuleGraph ─┬─ RecursiveMake  Makefile.recursive, source/<b>/Makefile.recursive
//!              ├─ SingleMake     Makefile.single, source/<b>/Makefile.single
//!              ├─ BashScript     build.sh, bash/*.sh
//!              ├─ SCons          SConstruct
//!              ├─ Bazel          WORKSPACE, artifact.bzl, */<b>/BUILD.bazel
//!              └─ Ninja          build.ninja, source/<b>/build.ninja
//! ```

mod bash;
mod bazel;
mod make;
mod ninja;
mod scons;

use std::path::Path;

pub use bash::{BATCH_SIZE, BashScript};
pub use bazel::Bazel;
pub use bpc_codegen::{BuildDescriptor, DescriptorFile, EmitResult};
use bpc_config::Backend;
pub use make::{RecursiveMake, SingleMake};
pub use ninja::Ninja;
pub use scons::SCons;

/// Create an empty descriptor for `backend`.
///
/// `output_root` is only consulted by backends that bake the output root into
/// their descriptors (Ninja); the others read it from the environment at
/// build time.
pub fn descriptor_for<'g>(
    backend: Backend,
    output_root: Option<&Path>,
) -> Box<dyn BuildDescriptor<'g> + 'g> {
    match backend {
        Backend::RecursiveMake => Box::new(RecursiveMake::new()),
        Backend::SingleMake => Box::new(SingleMake::new()),
        Backend::Bash => Box::new(BashScript::new()),
        Backend::Scons => Box::new(SCons::new()),
        Backend::Bazel => Box::new(Bazel::new()),
        Backend::Ninja => match output_root {
            Some(root) => Box::new(Ninja::new().with_output_root(root)),
            None => Box::new(Ninja::new()),
        },
    }
}
