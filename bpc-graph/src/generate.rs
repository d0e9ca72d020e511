//! Deterministic module-graph generation.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::{GraphParams, Module, ModuleGraph, ModuleKey};

/// Generate a graph from `params`, seeding a fresh ChaCha8 stream with
/// `params.seed`.
///
/// Identical parameters always produce an identical graph, on every
/// platform.
pub fn generate(params: &GraphParams) -> ModuleGraph {
    let mut rng = ChaCha8Rng::seed_from_u64(params.seed);
    generate_with(params, &mut rng)
}

/// Generate a graph drawing imports from a caller-supplied random source.
///
/// `params.seed` is ignored; the state of `rng` alone decides the imports.
pub fn generate_with<R: Rng + ?Sized>(params: &GraphParams, rng: &mut R) -> ModuleGraph {
    let mut modules: Vec<Module> = Vec::with_capacity(params.modules);

    for id in 0..params.modules {
        if id % 1000 == 0 {
            debug!(module = id, "creating source module");
        }

        let mut module = Module::new(ModuleKey::new(id, params.files_per_dir));

        // Module `id` may import any of the `id` modules before it.
        let draws = params.max_imports.min(id);
        for _ in 0..draws {
            let target = rng.gen_range(0..id);
            module.import(modules[target].key());
        }

        modules.push(module);
    }

    ModuleGraph::new(params.files_per_dir, modules)
}
