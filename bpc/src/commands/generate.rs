use clap::Args;
use eyre::{Context, Result};

use super::{
    UnwrapOrExit,
    args::{ConfigArgs, TreeArgs},
};
use crate::{
    logging,
    ops::{self, GenerateOptions},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct GenerateCommand {
    #[command(flatten)]
    pub config: ConfigArgs,

    #[command(flatten)]
    pub tree: TreeArgs,

    /// Print the descriptors instead of writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Rewrite the descriptors but leave module files alone
    #[arg(long, conflicts_with = "dry_run")]
    pub descriptors_only: bool,
}

impl GenerateCommand {
    /// Run the generate command
    pub fn run(&self, verbose: bool) -> Result<()> {
        let config = self
            .config
            .load()
            .unwrap_or_exit()
            .with_overrides(self.tree.overrides(verbose));
        logging::init(config.verbose);

        let opts = GenerateOptions {
            dry_run: self.dry_run,
            descriptors_only: self.descriptors_only,
        };
        let report = ops::generate(&config, opts).wrap_err("Failed to generate build tree")?;
        report.render(&mut TerminalOutput::new());

        Ok(())
    }
}
