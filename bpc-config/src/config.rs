//! `bpc.toml` parsing and validation.

use std::{
    num::{NonZeroU32, NonZeroUsize},
    path::{Path, PathBuf},
    str::FromStr,
};

use bpc_graph::GraphParams;
use serde::Deserialize;

use crate::{Backend, Error, Result, error::SourceContext};

/// Default filename looked up by the CLI.
pub const CONFIG_FILENAME: &str = "bpc.toml";

/// Validated generation parameters.
///
/// Built once, from `bpc.toml` and command-line overrides, and passed
/// read-only through the rest of the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory the source tree and descriptors are written under.
    pub root: Option<PathBuf>,
    /// Graph shape and seed.
    pub graph: GraphParams,
    /// Fixed padding for every module file, in KiB.
    pub file_size: Option<NonZeroU32>,
    /// Output root baked into the Ninja `bod` variable.
    pub output_root: Option<PathBuf>,
    /// Backends to emit, in order.
    pub backends: Vec<Backend>,
    /// Verbose progress logging.
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: None,
            graph: GraphParams::default(),
            file_size: None,
            output_root: None,
            backends: Backend::ALL.to_vec(),
            verbose: false,
        }
    }
}

/// Command-line values that take precedence over `bpc.toml`.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub root: Option<PathBuf>,
    pub modules: Option<usize>,
    pub files_per_dir: Option<NonZeroUsize>,
    pub max_imports: Option<usize>,
    pub file_size: Option<NonZeroU32>,
    pub seed: Option<u64>,
    pub output_root: Option<PathBuf>,
    pub backends: Vec<Backend>,
    pub verbose: bool,
}

impl Config {
    /// Parse a `bpc.toml` file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        parse_config(&content, &path.display().to_string())
    }

    /// Apply command-line overrides. Flags that were not given leave the
    /// file's value in place; a non-empty backend list replaces the file's.
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if overrides.root.is_some() {
            self.root = overrides.root;
        }
        if let Some(modules) = overrides.modules {
            self.graph.modules = modules;
        }
        if let Some(files_per_dir) = overrides.files_per_dir {
            self.graph.files_per_dir = files_per_dir;
        }
        if let Some(max_imports) = overrides.max_imports {
            self.graph.max_imports = max_imports;
        }
        if overrides.file_size.is_some() {
            self.file_size = overrides.file_size;
        }
        if let Some(seed) = overrides.seed {
            self.graph.seed = seed;
        }
        if overrides.output_root.is_some() {
            self.output_root = overrides.output_root;
        }
        if !overrides.backends.is_empty() {
            self.backends.clear();
            for backend in overrides.backends {
                if !self.backends.contains(&backend) {
                    self.backends.push(backend);
                }
            }
        }
        self.verbose |= overrides.verbose;
        self
    }
}

impl FromStr for Config {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_config(s, CONFIG_FILENAME)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    tree: RawTree,
    #[serde(default)]
    emit: RawEmit,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawTree {
    root: Option<PathBuf>,
    #[serde(default = "default_modules")]
    modules: usize,
    #[serde(default = "default_files_per_dir")]
    files_per_dir: usize,
    #[serde(default = "default_max_imports")]
    max_imports: usize,
    file_size: Option<u32>,
    #[serde(default)]
    seed: u64,
    #[serde(default)]
    verbose: bool,
}

impl Default for RawTree {
    fn default() -> Self {
        Self {
            root: None,
            modules: default_modules(),
            files_per_dir: default_files_per_dir(),
            max_imports: default_max_imports(),
            file_size: None,
            seed: 0,
            verbose: false,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawEmit {
    #[serde(default = "default_backends")]
    backends: Vec<Backend>,
    output_root: Option<PathBuf>,
}

impl Default for RawEmit {
    fn default() -> Self {
        Self {
            backends: default_backends(),
            output_root: None,
        }
    }
}

fn default_modules() -> usize {
    GraphParams::DEFAULT_MODULES
}

fn default_files_per_dir() -> usize {
    GraphParams::DEFAULT_FILES_PER_DIR.get()
}

fn default_max_imports() -> usize {
    GraphParams::DEFAULT_MAX_IMPORTS
}

fn default_backends() -> Vec<Backend> {
    Backend::ALL.to_vec()
}

/// Parse a config from content with the given filename for error reporting.
fn parse_config(content: &str, filename: &str) -> Result<Config> {
    let ctx = SourceContext::new(content, filename);
    let raw: RawConfig = toml::from_str(content).map_err(|e| ctx.parse_error(e))?;
    validate(raw, &ctx)
}

fn validate(raw: RawConfig, ctx: &SourceContext) -> Result<Config> {
    let files_per_dir = NonZeroUsize::new(raw.tree.files_per_dir).ok_or_else(|| {
        ctx.validation_error("files_per_dir", "files_per_dir must be at least 1")
    })?;

    let file_size = match raw.tree.file_size {
        None => None,
        Some(kib) => Some(NonZeroU32::new(kib).ok_or_else(|| {
            ctx.validation_error("file_size", "file_size must be at least 1 KiB")
        })?),
    };

    if raw.emit.backends.is_empty() {
        return Err(ctx.validation_error("backends", "at least one backend must be listed"));
    }
    for (i, backend) in raw.emit.backends.iter().enumerate() {
        if raw.emit.backends[..i].contains(backend) {
            return Err(ctx.duplicate_backend_error(backend.as_str()));
        }
    }

    Ok(Config {
        root: raw.tree.root,
        graph: GraphParams::new(
            raw.tree.modules,
            files_per_dir,
            raw.tree.max_imports,
            raw.tree.seed,
        ),
        file_size,
        output_root: raw.emit.output_root,
        backends: raw.emit.backends,
        verbose: raw.tree.verbose,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_full_config() {
        let config = Config::from_str(
            r#"
            [tree]
            root = "/tmp/tree"
            modules = 5000
            files_per_dir = 250
            max_imports = 10
            file_size = 30
            seed = 99
            verbose = true

            [emit]
            backends = ["ninja", "recursive-make"]
            output_root = "/tmp/bod"
            "#,
        )
        .unwrap();

        assert_eq!(config.root, Some(PathBuf::from("/tmp/tree")));
        assert_eq!(config.graph.modules, 5000);
        assert_eq!(config.graph.files_per_dir.get(), 250);
        assert_eq!(config.graph.max_imports, 10);
        assert_eq!(config.graph.seed, 99);
        assert_eq!(config.file_size.map(NonZeroU32::get), Some(30));
        assert_eq!(config.backends, vec![Backend::Ninja, Backend::RecursiveMake]);
        assert_eq!(config.output_root, Some(PathBuf::from("/tmp/bod")));
        assert!(config.verbose);
    }

    #[test]
    fn test_zero_files_per_dir_is_rejected() {
        let err = Config::from_str("[tree]\nfiles_per_dir = 0\n").unwrap_err();

        match *err {
            Error::Validation { message, span, .. } => {
                assert_eq!(message, "files_per_dir must be at least 1");
                assert_eq!(span.map(|s| s.offset()), Some(7));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_zero_file_size_is_rejected() {
        let err = Config::from_str("[tree]\nfile_size = 0\n").unwrap_err();
        assert!(matches!(*err, Error::Validation { .. }));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = Config::from_str("[tree]\nmodule = 3\n").unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }

    #[test]
    fn test_unknown_backend_is_rejected() {
        let err = Config::from_str("[emit]\nbackends = [\"cmake\"]\n").unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }

    #[test]
    fn test_duplicate_backend_is_rejected() {
        let err = Config::from_str("[emit]\nbackends = [\"bash\", \"bash\"]\n").unwrap_err();

        match *err {
            Error::DuplicateBackend { backend, .. } => assert_eq!(backend, "bash"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_backend_list_is_rejected() {
        let err = Config::from_str("[emit]\nbackends = []\n").unwrap_err();
        assert!(matches!(*err, Error::Validation { .. }));
    }

    #[test]
    fn test_overrides_take_precedence() {
        let config = Config::from_str("[tree]\nmodules = 10\nseed = 1\n")
            .unwrap()
            .with_overrides(Overrides {
                modules: Some(20),
                files_per_dir: NonZeroUsize::new(4),
                backends: vec![Backend::Bazel],
                ..Default::default()
            });

        assert_eq!(config.graph.modules, 20);
        assert_eq!(config.graph.files_per_dir.get(), 4);
        assert_eq!(config.graph.seed, 1);
        assert_eq!(config.backends, vec![Backend::Bazel]);
    }

    #[test]
    fn test_missing_file() {
        let err = Config::from_file("/nonexistent/bpc.toml").unwrap_err();
        assert!(matches!(*err, Error::Io { .. }));
    }

    #[test]
    fn test_from_file_names_the_file_in_diagnostics() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bench.toml");
        std::fs::write(&path, "[tree]\nfiles_per_dir = 0\n").unwrap();

        let err = Config::from_file(&path).unwrap_err();

        match *err {
            Error::Validation { src, .. } => assert_eq!(src.name(), path.display().to_string()),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
