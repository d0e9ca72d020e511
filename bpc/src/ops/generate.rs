//! Generate operation - source tree and descriptors.

use std::path::Path;

use bpc_backends::descriptor_for;
use bpc_config::Config;
use bpc_graph::{ModuleGraph, SizePolicy};
use eyre::{Result, eyre};
use tracing::{info, warn};

use super::write_sources;
use crate::reports::{
    BackendSummary, GenerateReport, GenerationResult, PreviewFile, PreviewResult, WrittenResult,
};

/// Options for the generate operation.
#[derive(Debug, Default, Clone, Copy)]
pub struct GenerateOptions {
    /// Render descriptors without touching disk.
    pub dry_run: bool,
    /// Skip the module files and write descriptors only.
    pub descriptors_only: bool,
}

/// Execute the generate operation.
///
/// Builds the module graph from `config`, then writes the source tree and
/// every selected backend under the configured root. A failing backend aborts
/// the run; backends emitted before it keep their output.
pub fn generate(config: &Config, opts: GenerateOptions) -> Result<GenerateReport> {
    info!(
        modules = config.graph.modules,
        files_per_dir = config.graph.files_per_dir.get(),
        max_imports = config.graph.max_imports,
        seed = config.graph.seed,
        "generating module graph"
    );
    let graph = bpc_graph::generate(&config.graph);

    let result = if opts.dry_run {
        GenerationResult::Preview(preview(&graph, config))
    } else {
        let root = config.root.as_deref().ok_or_else(|| {
            eyre!("no source root given; pass --root or set `root` under [tree] in bpc.toml")
        })?;
        warn_if_output_root_inside(config, root);

        let sources = if opts.descriptors_only {
            None
        } else {
            Some(write_sources(
                &graph,
                root,
                size_policy(config),
                config.graph.seed,
            )?)
        };
        let backends = emit(&graph, config, root)?;

        GenerationResult::Written(WrittenResult {
            root: root.to_path_buf(),
            sources,
            backends,
        })
    };

    Ok(GenerateReport {
        stats: graph.stats(),
        seed: config.graph.seed,
        result,
    })
}

fn size_policy(config: &Config) -> SizePolicy {
    config
        .file_size
        .map_or(SizePolicy::Distributed, SizePolicy::Fixed)
}

fn warn_if_output_root_inside(config: &Config, root: &Path) {
    if let Some(output_root) = &config.output_root {
        if output_root.starts_with(root) {
            warn!(
                output_root = %output_root.display(),
                root = %root.display(),
                "output root is inside the source tree"
            );
        }
    }
}

fn emit(graph: &ModuleGraph, config: &Config, root: &Path) -> Result<Vec<BackendSummary>> {
    let mut summaries = Vec::with_capacity(config.backends.len());

    for &backend in &config.backends {
        info!(%backend, "emitting descriptors");
        let mut descriptor = descriptor_for(backend, config.output_root.as_deref());
        descriptor.add_graph(graph);
        let result = descriptor.write(root)?;

        summaries.push(BackendSummary {
            backend,
            unchanged: result.unchanged.len(),
            written: result.written,
        });
    }

    Ok(summaries)
}

fn preview(graph: &ModuleGraph, config: &Config) -> PreviewResult {
    let mut files = Vec::new();

    for &backend in &config.backends {
        let mut descriptor = descriptor_for(backend, config.output_root.as_deref());
        descriptor.add_graph(graph);
        files.extend(descriptor.preview().into_iter().map(|f| PreviewFile {
            backend,
            path: f.path,
            content: f.content,
        }));
    }

    PreviewResult { files }
}

#[cfg(test)]
mod tests {
    use std::{fs, num::NonZeroU32};

    use bpc_config::{Backend, Overrides};
    use tempfile::TempDir;

    use super::*;

    fn config(root: Option<&Path>) -> Config {
        Config::default().with_overrides(Overrides {
            root: root.map(Path::to_path_buf),
            modules: Some(12),
            files_per_dir: std::num::NonZeroUsize::new(5),
            max_imports: Some(3),
            file_size: NonZeroU32::new(1),
            seed: Some(4),
            ..Default::default()
        })
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let report = generate(&config(None), GenerateOptions {
            dry_run: true,
            ..Default::default()
        })
        .unwrap();

        let GenerationResult::Preview(preview) = report.result else {
            panic!("expected a preview");
        };
        assert!(preview.files.iter().any(|f| f.path == "build.ninja"));
        assert!(preview.files.iter().any(|f| f.backend == Backend::Bazel));
        assert_eq!(report.stats.modules, 12);
        assert_eq!(report.stats.buckets, 3);
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let err = generate(&config(None), GenerateOptions::default()).unwrap_err();
        assert!(err.to_string().contains("no source root"));
    }

    #[test]
    fn test_writes_sources_and_every_backend() {
        let temp = TempDir::new().unwrap();
        let report = generate(&config(Some(temp.path())), GenerateOptions::default()).unwrap();

        let GenerationResult::Written(written) = report.result else {
            panic!("expected files to be written");
        };
        assert_eq!(written.sources.map(|s| s.written), Some(24));
        assert_eq!(written.backends.len(), Backend::ALL.len());

        for path in [
            "source/2/m11.source",
            "interface/0/m0.interface",
            "Makefile.recursive",
            "Makefile.single",
            "build.sh",
            "SConstruct",
            "WORKSPACE",
            "build.ninja",
        ] {
            assert!(temp.path().join(path).is_file(), "{path}");
        }
    }

    #[test]
    fn test_descriptors_only_skips_sources() {
        let temp = TempDir::new().unwrap();
        let mut config = config(Some(temp.path()));
        config.backends = vec![Backend::Ninja];

        let report = generate(&config, GenerateOptions {
            descriptors_only: true,
            ..Default::default()
        })
        .unwrap();

        let GenerationResult::Written(written) = report.result else {
            panic!("expected files to be written");
        };
        assert!(written.sources.is_none());
        assert!(!temp.path().join("source/0/m0.source").exists());
        assert!(temp.path().join("source/0/build.ninja").is_file());
        assert!(!temp.path().join("SConstruct").exists());
    }

    #[test]
    fn test_regeneration_is_byte_identical() {
        let temp = TempDir::new().unwrap();
        let config = config(Some(temp.path()));

        generate(&config, GenerateOptions::default()).unwrap();
        let before = fs::read(temp.path().join("source/1/Makefile.single")).unwrap();

        let report = generate(&config, GenerateOptions::default()).unwrap();
        let GenerationResult::Written(written) = report.result else {
            panic!("expected files to be written");
        };
        assert!(written.backends.iter().all(|b| b.written.is_empty()));
        assert_eq!(written.sources.map(|s| s.written), Some(0));
        assert_eq!(fs::read(temp.path().join("source/1/Makefile.single")).unwrap(), before);
    }
}
