//! Info operation - graph statistics and staleness queries.

use std::path::PathBuf;

use bpc_config::Config;
use bpc_graph::Touched;
use eyre::{Result, bail};

use crate::reports::{InfoReport, StalenessInfo};

/// Collect statistics for the graph `config` describes.
///
/// With `touched`, also lists the modules a build would redo after that
/// file changes.
pub fn info(
    config: &Config,
    config_path: Option<PathBuf>,
    touched: Option<Touched>,
) -> Result<InfoReport> {
    let graph = bpc_graph::generate(&config.graph);

    let staleness = match touched {
        Some(touched) => {
            let id = match touched {
                Touched::Source(id) | Touched::Interface(id) => id,
            };
            let Some(module) = graph.get(id) else {
                bail!(
                    "module m{id} does not exist; the graph has {} modules",
                    graph.len()
                );
            };
            let path = match touched {
                Touched::Source(_) => module.source_path(),
                Touched::Interface(_) => module.interface_path(),
            };
            let stale = graph
                .stale_after(touched)
                .into_iter()
                .filter_map(|id| graph.get(id).map(|m| m.name()))
                .collect();
            Some(StalenessInfo {
                touched: path,
                stale,
            })
        }
        None => None,
    };

    Ok(InfoReport {
        config_path,
        seed: config.graph.seed,
        stats: graph.stats(),
        file_size: config.file_size.map(|s| s.get()),
        backends: config.backends.clone(),
        output_root: config.output_root.clone(),
        staleness,
    })
}

/// The generated module list as pretty-printed JSON.
pub fn module_list_json(config: &Config) -> Result<String> {
    let graph = bpc_graph::generate(&config.graph);
    Ok(serde_json::to_string_pretty(&graph)?)
}
