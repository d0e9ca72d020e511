//! Generate command report data structures.

use std::path::PathBuf;

use bpc_config::Backend;
use bpc_graph::GraphStats;

use super::output::{Output, Report};
use crate::ops::SourceTreeResult;

/// Report data from a generate run.
#[derive(Debug)]
pub struct GenerateReport {
    /// Shape of the generated graph.
    pub stats: GraphStats,
    /// Seed the graph was drawn from.
    pub seed: u64,
    /// Files written, or the dry-run preview.
    pub result: GenerationResult,
}

#[derive(Debug)]
pub enum GenerationResult {
    /// Files were written to disk.
    Written(WrittenResult),
    /// Dry-run preview.
    Preview(PreviewResult),
}

#[derive(Debug)]
pub struct WrittenResult {
    /// Source root everything was written under.
    pub root: PathBuf,
    /// Module files, unless only descriptors were requested.
    pub sources: Option<SourceTreeResult>,
    /// One entry per emitted backend, in emission order.
    pub backends: Vec<BackendSummary>,
}

#[derive(Debug)]
pub struct BackendSummary {
    pub backend: Backend,
    /// Descriptor files created or rewritten, relative to the root.
    pub written: Vec<PathBuf>,
    /// Descriptor files left untouched.
    pub unchanged: usize,
}

#[derive(Debug)]
pub struct PreviewResult {
    pub files: Vec<PreviewFile>,
}

/// A descriptor in preview mode.
#[derive(Debug)]
pub struct PreviewFile {
    pub backend: Backend,
    pub path: String,
    pub content: String,
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        match &self.result {
            GenerationResult::Written(written) => self.render_written(out, written),
            GenerationResult::Preview(preview) => self.render_preview(out, preview),
        }
    }
}

impl GenerateReport {
    fn render_header(&self, out: &mut dyn Output) {
        let buckets = self.stats.buckets;
        out.preformatted(&format!(
            "{} modules in {} director{} (seed {})",
            self.stats.modules,
            buckets,
            if buckets == 1 { "y" } else { "ies" },
            self.seed
        ));
        out.key_value_indented(
            "imports",
            &format!(
                "{} (at most {} per module)",
                self.stats.imports, self.stats.max_imports
            ),
        );
    }

    fn render_written(&self, out: &mut dyn Output, written: &WrittenResult) {
        self.render_header(out);
        out.key_value_indented("root", &written.root.display().to_string());
        out.newline();

        if let Some(sources) = &written.sources {
            out.key_value(
                "Sources",
                &format!(
                    "{} written, {} unchanged ({})",
                    sources.written,
                    sources.unchanged,
                    human_size(sources.bytes)
                ),
            );
            out.newline();
        }

        out.section("Descriptors");
        for summary in &written.backends {
            out.list_item(&format!(
                "{:<15} {} written, {} unchanged",
                summary.backend.as_str(),
                summary.written.len(),
                summary.unchanged
            ));
        }
    }

    fn render_preview(&self, out: &mut dyn Output, preview: &PreviewResult) {
        for file in &preview.files {
            out.divider(&format!("{} ({})", file.path, file.backend));
            out.preformatted(&file.content);
        }

        out.divider("Summary");
        self.render_header(out);
        out.preformatted(&format!(
            "{} descriptor files would be generated",
            preview.files.len()
        ));
    }
}

fn human_size(bytes: u64) -> String {
    const KIB: f64 = 1024.0;
    let bytes = bytes as f64;
    if bytes >= KIB * KIB * KIB {
        format!("{:.1} GiB", bytes / (KIB * KIB * KIB))
    } else if bytes >= KIB * KIB {
        format!("{:.1} MiB", bytes / (KIB * KIB))
    } else {
        format!("{:.1} KiB", bytes / KIB)
    }
}
