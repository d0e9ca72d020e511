//! Check command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from config validation.
///
/// Hard errors never reach this report: they are rendered as diagnostics
/// while the config is parsed.
#[derive(Debug)]
pub struct CheckReport {
    /// Path to the config file.
    pub config_path: PathBuf,
    /// Settings that are valid but probably not what was meant.
    pub warnings: Vec<String>,
    /// One-line summary of the effective parameters.
    pub summary: String,
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for warning in &self.warnings {
            out.warning(warning);
        }

        if !self.warnings.is_empty() {
            out.newline();
        }

        out.preformatted(&format!("✓ {} is valid", self.config_path.display()));
        out.preformatted(&format!("  {}", self.summary));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::output::testing::RecordingOutput;

    #[test]
    fn test_render_with_warnings() {
        let report = CheckReport {
            config_path: PathBuf::from("bpc.toml"),
            warnings: vec!["max_imports is 0; modules will not import each other".to_string()],
            summary: "10 modules".to_string(),
        };

        let mut out = RecordingOutput::default();
        report.render(&mut out);
        assert_eq!(out.lines, vec![
            "warning: max_imports is 0; modules will not import each other".to_string(),
            String::new(),
            "✓ bpc.toml is valid".to_string(),
            "  10 modules".to_string(),
        ]);
    }
}
