use bpc_graph::Touched;
use clap::Args;
use eyre::Result;

use super::{
    UnwrapOrExit,
    args::{ConfigArgs, GraphArgs},
};
use crate::{
    logging,
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct InfoCommand {
    #[command(flatten)]
    pub config: ConfigArgs,

    #[command(flatten)]
    pub graph: GraphArgs,

    /// Print the generated module list as JSON
    #[arg(long, conflicts_with_all = ["touch_source", "touch_interface"])]
    pub json: bool,

    /// List the modules that go stale when this module's source changes
    #[arg(long, value_name = "ID", conflicts_with = "touch_interface")]
    pub touch_source: Option<usize>,

    /// List the modules that go stale when this module's interface changes
    #[arg(long, value_name = "ID")]
    pub touch_interface: Option<usize>,
}

impl InfoCommand {
    pub fn run(&self, verbose: bool) -> Result<()> {
        let config = self
            .config
            .load()
            .unwrap_or_exit()
            .with_overrides(self.graph.overrides(verbose));
        logging::init(config.verbose);

        if self.json {
            println!("{}", ops::module_list_json(&config)?);
            return Ok(());
        }

        let touched = self
            .touch_source
            .map(Touched::Source)
            .or(self.touch_interface.map(Touched::Interface));

        let report = ops::info(&config, self.config.path(), touched)?;
        report.render(&mut TerminalOutput::new());

        Ok(())
    }
}
