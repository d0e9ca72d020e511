//! Snapshot tests for rendered descriptors.
//!
//! Run `cargo insta review` to update snapshots when making intentional changes.

use std::num::NonZeroUsize;

use bpc_backends::descriptor_for;
use bpc_config::Backend;
use bpc_graph::ModuleGraph;

/// Three modules in two buckets: m0, m1 -> m0, m2 -> m1, m0.
fn small_graph() -> ModuleGraph {
    ModuleGraph::from_import_lists(
        NonZeroUsize::new(2).unwrap(),
        &[vec![], vec![0usize], vec![1, 0]],
    )
    .expect("valid graph")
}

fn render(backend: Backend, path: &str) -> String {
    let graph = small_graph();
    let mut descriptor = descriptor_for(backend, None);
    descriptor.add_graph(&graph);
    descriptor
        .preview()
        .into_iter()
        .find(|f| f.path == path)
        .map(|f| f.content)
        .unwrap_or_else(|| panic!("{path} not emitted by {backend}"))
}

#[test]
fn test_recursive_make_root() {
    let root = render(Backend::RecursiveMake, "Makefile.recursive");
    insta::assert_snapshot!("recursive_make_root", root);
}

#[test]
fn test_single_make_fragment() {
    let fragment = render(Backend::SingleMake, "source/0/Makefile.single");
    insta::assert_snapshot!("single_make_fragment", fragment);
}

#[test]
fn test_ninja_root() {
    let root = render(Backend::Ninja, "build.ninja");
    insta::assert_snapshot!("ninja_root", root);
}

#[test]
fn test_ninja_bucket() {
    let bucket = render(Backend::Ninja, "source/1/build.ninja");
    insta::assert_snapshot!("ninja_bucket", bucket);
}

#[test]
fn test_bazel_macro() {
    let bzl = render(Backend::Bazel, "artifact.bzl");
    insta::assert_snapshot!("bazel_macro", bzl);
}
