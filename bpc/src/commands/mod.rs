mod args;
mod check;
mod completions;
mod generate;
mod info;

use check::CheckCommand;
use clap::{Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::Result;
use generate::GenerateCommand;
use info::InfoCommand;

/// Extension trait for exiting on config errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for bpc_config::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "bpc")]
#[command(version)]
#[command(about = "Generate synthetic source trees and equivalent build descriptors")]
pub(crate) struct Cli {
    /// Log progress to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Generate(cmd) => cmd.run(self.verbose),
            Commands::Info(cmd) => cmd.run(self.verbose),
            Commands::Check(cmd) => cmd.run(self.verbose),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Write the source tree and build descriptors
    Generate(GenerateCommand),

    /// Show graph statistics, staleness or the module list
    Info(InfoCommand),

    /// Validate bpc.toml without generating anything
    Check(CheckCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_info_only_takes_graph_flags() {
        let cli = Cli::try_parse_from(["bpc", "info", "-n", "40", "--seed", "2"]).unwrap();
        assert!(matches!(cli.command, Commands::Info(_)));

        for flag in ["--root", "--bod", "--file-size", "--backend"] {
            let result = Cli::try_parse_from(["bpc", "info", flag, "x"]);
            assert!(result.is_err(), "{flag}");
        }
    }

    #[test]
    fn test_generate_takes_tree_flags() {
        let cli = Cli::try_parse_from([
            "bpc", "generate", "--root", "tree", "--bod", "/tmp/bod", "-b", "ninja,bash", "-n", "10",
        ])
        .unwrap();

        let Commands::Generate(cmd) = cli.command else {
            panic!("expected generate");
        };
        let overrides = cmd.tree.overrides(false);
        assert_eq!(overrides.modules, Some(10));
        assert_eq!(overrides.backends, vec![
            bpc_config::Backend::Ninja,
            bpc_config::Backend::Bash
        ]);
        assert_eq!(overrides.output_root, Some(std::path::PathBuf::from("/tmp/bod")));
    }
}
