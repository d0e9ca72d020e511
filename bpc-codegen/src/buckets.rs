//! Grouping modules by directory bucket.

use std::collections::BTreeMap;

use bpc_graph::Module;

/// Modules grouped by the bucket the generator assigned them.
///
/// Backends that shard per directory group through this type so that the
/// partition always matches the generator's.
#[derive(Debug, Default, Clone)]
pub struct Buckets<'g> {
    buckets: BTreeMap<usize, Vec<&'g Module>>,
}

impl<'g> Buckets<'g> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, module: &'g Module) {
        self.buckets.entry(module.bucket()).or_default().push(module);
    }

    /// Buckets in ascending order, each with its modules in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[&'g Module])> {
        self.buckets.iter().map(|(&bucket, modules)| (bucket, modules.as_slice()))
    }

    /// Bucket numbers in ascending order.
    pub fn numbers(&self) -> impl Iterator<Item = usize> {
        self.buckets.keys().copied()
    }

    /// All modules, bucket by bucket.
    pub fn modules(&self) -> impl Iterator<Item = &'g Module> {
        self.buckets.values().flatten().copied()
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;

    use bpc_graph::ModuleGraph;

    use super::*;

    #[test]
    fn test_groups_by_module_bucket() {
        let graph =
            ModuleGraph::from_import_lists(NonZeroUsize::new(2).unwrap(), &[[0usize; 0]; 5]).unwrap();
        let mut buckets = Buckets::new();
        for module in graph.modules() {
            buckets.add(module);
        }

        let grouped: Vec<(usize, Vec<usize>)> = buckets
            .iter()
            .map(|(b, ms)| (b, ms.iter().map(|m| m.id()).collect()))
            .collect();

        assert_eq!(grouped, vec![(0, vec![0, 1]), (1, vec![2, 3]), (2, vec![4])]);
        assert_eq!(buckets.numbers().collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(buckets.modules().count(), 5);
    }
}
