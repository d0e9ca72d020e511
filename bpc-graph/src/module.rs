//! Module identity and path derivation.

use std::num::NonZeroUsize;

use indexmap::IndexSet;
use serde::Serialize;

/// Directory under the source root holding `.source` files. Its basename is
/// reused under the output root for artifacts.
pub const SOURCE_DIR: &str = "source";

/// Directory under the source root holding `.interface` files.
pub const INTERFACE_DIR: &str = "interface";

/// Identity of a module: its sequence number and directory bucket.
///
/// All paths are pure functions of these two numbers. Paths are POSIX-style
/// strings; source and interface paths are relative to the source root,
/// artifact paths are relative to the output root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ModuleKey {
    id: usize,
    bucket: usize,
}

impl ModuleKey {
    /// Key for module `id` when directories hold `files_per_dir` modules.
    pub fn new(id: usize, files_per_dir: NonZeroUsize) -> Self {
        Self {
            id,
            bucket: id / files_per_dir.get(),
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn bucket(&self) -> usize {
        self.bucket
    }

    /// `m<id>`
    pub fn name(&self) -> String {
        format!("m{}", self.id)
    }

    pub fn source_file_name(&self) -> String {
        format!("m{}.source", self.id)
    }

    pub fn interface_file_name(&self) -> String {
        format!("m{}.interface", self.id)
    }

    pub fn artifact_file_name(&self) -> String {
        format!("m{}.artifact", self.id)
    }

    /// `source/<bucket>`
    pub fn source_dir(&self) -> String {
        format!("{}/{}", SOURCE_DIR, self.bucket)
    }

    /// `interface/<bucket>`
    pub fn interface_dir(&self) -> String {
        format!("{}/{}", INTERFACE_DIR, self.bucket)
    }

    /// `source/<bucket>`, relative to the output root.
    pub fn artifact_dir(&self) -> String {
        self.source_dir()
    }

    /// `source/<bucket>/m<id>.source`
    pub fn source_path(&self) -> String {
        format!("{}/{}", self.source_dir(), self.source_file_name())
    }

    /// `interface/<bucket>/m<id>.interface`
    pub fn interface_path(&self) -> String {
        format!("{}/{}", self.interface_dir(), self.interface_file_name())
    }

    /// `source/<bucket>/m<id>.artifact`, relative to the output root.
    pub fn artifact_path(&self) -> String {
        format!("{}/{}", self.artifact_dir(), self.artifact_file_name())
    }
}

/// One synthetic compilation unit.
///
/// `imports` is an insertion-ordered set of strictly earlier modules. It is
/// filled while the graph is built and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Module {
    #[serde(flatten)]
    key: ModuleKey,
    imports: IndexSet<ModuleKey>,
}

impl Module {
    pub(crate) fn new(key: ModuleKey) -> Self {
        Self {
            key,
            imports: IndexSet::new(),
        }
    }

    /// Record an import. Duplicates are dropped; returns whether `other`
    /// was newly added.
    pub(crate) fn import(&mut self, other: ModuleKey) -> bool {
        debug_assert!(other.id < self.key.id, "imports must point backwards");
        self.imports.insert(other)
    }

    pub fn key(&self) -> ModuleKey {
        self.key
    }

    pub fn id(&self) -> usize {
        self.key.id
    }

    pub fn bucket(&self) -> usize {
        self.key.bucket
    }

    pub fn imports(&self) -> &IndexSet<ModuleKey> {
        &self.imports
    }

    pub fn imports_module(&self, id: usize) -> bool {
        self.imports.iter().any(|k| k.id == id)
    }

    pub fn name(&self) -> String {
        self.key.name()
    }

    pub fn source_path(&self) -> String {
        self.key.source_path()
    }

    pub fn interface_path(&self) -> String {
        self.key.interface_path()
    }

    pub fn artifact_path(&self) -> String {
        self.key.artifact_path()
    }

    /// Every input the artifact depends on: own source, own interface, then
    /// the interface of each import in import order.
    pub fn prerequisites(&self) -> Vec<String> {
        let mut prereqs = Vec::with_capacity(self.imports.len() + 2);
        prereqs.push(self.source_path());
        prereqs.push(self.interface_path());
        prereqs.extend(self.imports.iter().map(ModuleKey::interface_path));
        prereqs
    }
}
