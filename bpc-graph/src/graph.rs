use std::{collections::BTreeSet, num::NonZeroUsize};

use serde::Serialize;
use thiserror::Error;

use crate::{Module, ModuleKey};

/// Errors from assembling a graph by hand.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("module m{module} cannot import m{import}: imports must name an earlier module")]
    ForwardImport { module: usize, import: usize },
}

/// A file touched between two builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Touched {
    /// The module's private `.source` file.
    Source(usize),
    /// The module's public `.interface` file.
    Interface(usize),
}

/// Summary numbers for a generated graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GraphStats {
    pub modules: usize,
    pub buckets: usize,
    pub files_per_dir: usize,
    pub imports: usize,
    pub max_imports: usize,
}

/// The ordered module list produced by generation.
///
/// Module `i` sits at index `i`. The graph owns its modules; backends borrow
/// them read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleGraph {
    files_per_dir: NonZeroUsize,
    modules: Vec<Module>,
}

impl ModuleGraph {
    pub(crate) fn new(files_per_dir: NonZeroUsize, modules: Vec<Module>) -> Self {
        Self {
            files_per_dir,
            modules,
        }
    }

    /// Build a graph from explicit import lists, one per module in id order.
    ///
    /// Repeated imports collapse to one. Any import that does not name an
    /// earlier module is rejected.
    pub fn from_import_lists<L>(files_per_dir: NonZeroUsize, lists: &[L]) -> Result<Self, GraphError>
    where
        L: AsRef<[usize]>,
    {
        let mut modules = Vec::with_capacity(lists.len());

        for (id, list) in lists.iter().enumerate() {
            let mut module = Module::new(ModuleKey::new(id, files_per_dir));
            for &import in list.as_ref() {
                if import >= id {
                    return Err(GraphError::ForwardImport { module: id, import });
                }
                module.import(ModuleKey::new(import, files_per_dir));
            }
            modules.push(module);
        }

        Ok(Self::new(files_per_dir, modules))
    }

    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    pub fn get(&self, id: usize) -> Option<&Module> {
        self.modules.get(id)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn files_per_dir(&self) -> NonZeroUsize {
        self.files_per_dir
    }

    pub fn bucket_count(&self) -> usize {
        self.modules.last().map_or(0, |m| m.bucket() + 1)
    }

    /// Modules grouped by directory bucket, in bucket order.
    pub fn buckets(&self) -> impl Iterator<Item = &[Module]> {
        self.modules.chunk_by(|a, b| a.bucket() == b.bucket())
    }

    pub fn stats(&self) -> GraphStats {
        GraphStats {
            modules: self.modules.len(),
            buckets: self.bucket_count(),
            files_per_dir: self.files_per_dir.get(),
            imports: self.modules.iter().map(|m| m.imports().len()).sum(),
            max_imports: self
                .modules
                .iter()
                .map(|m| m.imports().len())
                .max()
                .unwrap_or(0),
        }
    }

    /// Ids of the modules whose artifacts are out of date after `touched`
    /// changes, according to the dependency relation every backend emits:
    /// an artifact depends on its own source, its own interface and the
    /// interfaces of its imports.
    ///
    /// Interfaces are inputs, never outputs, so staleness stops one import
    /// edge away from the touched interface.
    pub fn stale_after(&self, touched: Touched) -> BTreeSet<usize> {
        match touched {
            Touched::Source(id) => self.get(id).map(Module::id).into_iter().collect(),
            Touched::Interface(id) => {
                if id >= self.modules.len() {
                    return BTreeSet::new();
                }
                let mut stale: BTreeSet<usize> = self.modules[id + 1..]
                    .iter()
                    .filter(|m| m.imports_module(id))
                    .map(Module::id)
                    .collect();
                stale.insert(id);
                stale
            }
        }
    }
}
