use std::{
    num::{NonZeroU32, NonZeroUsize},
    path::{Path, PathBuf},
};

use bpc_config::{Backend, CONFIG_FILENAME, Config, Overrides};
use clap::Args;

/// Where to read `bpc.toml` from.
#[derive(Args)]
pub struct ConfigArgs {
    /// Path to bpc.toml (defaults to ./bpc.toml when it exists)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl ConfigArgs {
    /// The file that will be read, if any.
    pub fn path(&self) -> Option<PathBuf> {
        match &self.config {
            Some(path) => Some(path.clone()),
            None => Path::new(CONFIG_FILENAME)
                .is_file()
                .then(|| PathBuf::from(CONFIG_FILENAME)),
        }
    }

    /// Load the config file, or defaults when there is none.
    pub fn load(&self) -> bpc_config::Result<Config> {
        match self.path() {
            Some(path) => Config::from_file(path),
            None => Ok(Config::default()),
        }
    }
}

/// Parameters that shape the module graph.
#[derive(Args)]
pub struct GraphArgs {
    /// Number of modules
    #[arg(short = 'n', long)]
    pub modules: Option<usize>,

    /// Maximum files per directory bucket
    #[arg(long)]
    pub files_per_dir: Option<NonZeroUsize>,

    /// Maximum imports per module
    #[arg(long)]
    pub max_imports: Option<usize>,

    /// Seed for the graph and file sizes
    #[arg(long)]
    pub seed: Option<u64>,
}

impl GraphArgs {
    pub fn overrides(&self, verbose: bool) -> Overrides {
        Overrides {
            modules: self.modules,
            files_per_dir: self.files_per_dir,
            max_imports: self.max_imports,
            seed: self.seed,
            verbose,
            ..Default::default()
        }
    }
}

/// Tree and emission parameters that override `bpc.toml`.
#[derive(Args)]
pub struct TreeArgs {
    #[command(flatten)]
    pub graph: GraphArgs,

    /// Directory to write the source tree and descriptors into
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Pad every module file to this size in KiB instead of drawing sizes
    #[arg(long, value_name = "KIB")]
    pub file_size: Option<NonZeroU32>,

    /// Build output directory written into Ninja's bod.ninja
    #[arg(long = "bod", env = "BPC_BOD", value_name = "DIR")]
    pub output_root: Option<PathBuf>,

    /// Backends to emit (repeatable or comma separated; defaults to all)
    #[arg(short, long = "backend", value_delimiter = ',')]
    pub backends: Vec<Backend>,
}

impl TreeArgs {
    pub fn overrides(&self, verbose: bool) -> Overrides {
        Overrides {
            root: self.root.clone(),
            file_size: self.file_size,
            output_root: self.output_root.clone(),
            backends: self.backends.clone(),
            ..self.graph.overrides(verbose)
        }
    }
}
