//! Info command report data structures.

use std::path::PathBuf;

use bpc_config::Backend;
use bpc_graph::GraphStats;

use super::output::{Output, Report};

/// Report data from graph info.
#[derive(Debug)]
pub struct InfoReport {
    /// Config file read, if any.
    pub config_path: Option<PathBuf>,
    /// Seed the graph was drawn from.
    pub seed: u64,
    /// Graph statistics.
    pub stats: GraphStats,
    /// Fixed module file size in KiB, if set.
    pub file_size: Option<u32>,
    /// Backends that would be emitted.
    pub backends: Vec<Backend>,
    /// Output root baked into Ninja's bod.ninja, if set.
    pub output_root: Option<PathBuf>,
    /// Staleness query result.
    pub staleness: Option<StalenessInfo>,
}

/// Modules out of date after touching one file.
#[derive(Debug)]
pub struct StalenessInfo {
    /// The touched file, relative to the source root.
    pub touched: String,
    /// Names of the stale modules, in id order.
    pub stale: Vec<String>,
}

impl Report for InfoReport {
    fn render(&self, out: &mut dyn Output) {
        out.newline();

        let config = self
            .config_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(defaults)".to_string());
        out.preformatted(&format!("  Config      {}", config));
        out.preformatted(&format!("  Seed        {}", self.seed));
        out.newline();

        // Graph
        out.preformatted("  Graph");
        out.preformatted("  ─────");
        out.preformatted(&format!("  Modules     {}", self.stats.modules));
        out.preformatted(&format!(
            "  Buckets     {} ({} files per directory)",
            self.stats.buckets, self.stats.files_per_dir
        ));
        out.preformatted(&format!(
            "  Imports     {} (at most {} per module)",
            self.stats.imports, self.stats.max_imports
        ));
        let size = match self.file_size {
            Some(kib) => format!("{kib} KiB"),
            None => "distributed".to_string(),
        };
        out.preformatted(&format!("  File size   {}", size));
        out.newline();

        // Emission
        out.preformatted("  Emit");
        out.preformatted("  ────");
        let backends: Vec<&str> = self.backends.iter().map(Backend::as_str).collect();
        out.preformatted(&format!("  Backends    {}", backends.join(", ")));
        if let Some(root) = &self.output_root {
            out.preformatted(&format!("  Output root {}", root.display()));
        }
        out.newline();

        if let Some(staleness) = &self.staleness {
            let title = format!("Stale after touching {}", staleness.touched);
            out.preformatted(&format!("  {}", title));
            out.preformatted(&format!("  {}", "─".repeat(title.chars().count())));
            for name in &staleness.stale {
                out.list_item(name);
            }
            out.preformatted(&format!(
                "  {} module{}",
                staleness.stale.len(),
                if staleness.stale.len() == 1 { "" } else { "s" }
            ));
        }
    }
}
