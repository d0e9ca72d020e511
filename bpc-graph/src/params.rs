use std::num::NonZeroUsize;

/// Inputs that fully determine a generated graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphParams {
    /// Number of modules to create.
    pub modules: usize,
    /// Capacity of each directory bucket.
    pub files_per_dir: NonZeroUsize,
    /// Upper bound on import draws per module.
    pub max_imports: usize,
    /// Seed for the import draws.
    pub seed: u64,
}

impl GraphParams {
    pub const DEFAULT_MODULES: usize = 100;
    pub const DEFAULT_FILES_PER_DIR: NonZeroUsize = NonZeroUsize::new(100).unwrap();
    pub const DEFAULT_MAX_IMPORTS: usize = 25;

    pub fn new(modules: usize, files_per_dir: NonZeroUsize, max_imports: usize, seed: u64) -> Self {
        Self {
            modules,
            files_per_dir,
            max_imports,
            seed,
        }
    }

    /// Number of directory buckets the graph will span.
    pub fn bucket_count(&self) -> usize {
        self.modules.div_ceil(self.files_per_dir.get())
    }
}

impl Default for GraphParams {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_MODULES,
            Self::DEFAULT_FILES_PER_DIR,
            Self::DEFAULT_MAX_IMPORTS,
            0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_count() {
        let mut params = GraphParams::default();
        assert_eq!(params.bucket_count(), 1);

        params.modules = 101;
        assert_eq!(params.bucket_count(), 2);

        params.modules = 0;
        assert_eq!(params.bucket_count(), 0);
    }
}
