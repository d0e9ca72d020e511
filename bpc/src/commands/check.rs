use clap::Args;
use eyre::{Result, bail};

use super::{UnwrapOrExit, args::ConfigArgs};
use crate::{
    logging,
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    #[command(flatten)]
    pub config: ConfigArgs,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self, verbose: bool) -> Result<()> {
        logging::init(verbose);

        let Some(path) = self.config.path() else {
            bail!("no bpc.toml in the current directory; pass --config");
        };
        let config = bpc_config::Config::from_file(&path).unwrap_or_exit();

        let report = ops::check(&config, &path);
        report.render(&mut TerminalOutput::new());

        Ok(())
    }
}
