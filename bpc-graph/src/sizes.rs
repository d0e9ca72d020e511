//! Padding sizes for module files.

use std::num::NonZeroU32;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Stream used for size draws, distinct from the import-draw stream so file
/// sizes never perturb the graph.
const SIZE_STREAM: u64 = 1;

/// How module files are padded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizePolicy {
    /// Every source and interface file is padded to the same size, in KiB.
    Fixed(NonZeroU32),
    /// Sizes follow a skewed distribution: most files small, a few large.
    Distributed,
}

/// Deterministic source of file sizes, in KiB.
#[derive(Debug, Clone)]
pub struct FileSizes {
    policy: SizePolicy,
    rng: ChaCha8Rng,
}

impl FileSizes {
    pub fn new(policy: SizePolicy, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        rng.set_stream(SIZE_STREAM);
        Self { policy, rng }
    }

    /// Size of the next interface file.
    pub fn interface_kib(&mut self) -> u32 {
        match self.policy {
            SizePolicy::Fixed(kib) => kib.get(),
            SizePolicy::Distributed => {
                let percent: f64 = self.rng.r#gen();
                let (lo, hi) = if percent < 0.60 {
                    (1, 10)
                } else if percent < 0.85 {
                    (10, 25)
                } else if percent < 0.97 {
                    (25, 50)
                } else if percent < 0.99 {
                    (50, 150)
                } else {
                    (150, 300)
                };
                self.rng.gen_range(lo..=hi)
            }
        }
    }

    /// Size of the next source file.
    pub fn source_kib(&mut self) -> u32 {
        match self.policy {
            SizePolicy::Fixed(kib) => kib.get(),
            SizePolicy::Distributed => {
                let percent: f64 = self.rng.r#gen();
                let (lo, hi) = if percent < 0.60 {
                    (30, 100)
                } else if percent < 0.85 {
                    (100, 250)
                } else if percent < 0.97 {
                    (250, 500)
                } else {
                    (500, 1024)
                };
                self.rng.gen_range(lo..=hi)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_sizes() {
        let mut sizes = FileSizes::new(SizePolicy::Fixed(NonZeroU32::new(30).unwrap()), 0);
        assert_eq!(sizes.interface_kib(), 30);
        assert_eq!(sizes.source_kib(), 30);
    }

    #[test]
    fn test_distributed_sizes_in_range() {
        let mut sizes = FileSizes::new(SizePolicy::Distributed, 5);
        for _ in 0..1000 {
            assert!((1..=300).contains(&sizes.interface_kib()));
            assert!((30..=1024).contains(&sizes.source_kib()));
        }
    }

    #[test]
    fn test_distributed_sizes_are_seeded() {
        let mut a = FileSizes::new(SizePolicy::Distributed, 11);
        let mut b = FileSizes::new(SizePolicy::Distributed, 11);
        for _ in 0..100 {
            assert_eq!(a.source_kib(), b.source_kib());
            assert_eq!(a.interface_kib(), b.interface_kib());
        }
    }
}
