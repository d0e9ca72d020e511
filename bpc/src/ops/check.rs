//! Check operation - validate config and flag suspicious settings.

use std::path::Path;

use bpc_config::{Backend, Config};

use crate::reports::CheckReport;

/// Inspect an already-parsed config for settings that are legal but
/// unlikely to produce a useful tree.
pub fn check(config: &Config, config_path: &Path) -> CheckReport {
    let graph = &config.graph;
    let mut warnings = Vec::new();

    if graph.modules == 0 {
        warnings.push("modules is 0; descriptors will describe an empty build".to_string());
    }
    if graph.max_imports == 0 {
        warnings.push("max_imports is 0; modules will not import each other".to_string());
    } else if graph.modules > 0 && graph.max_imports >= graph.modules {
        warnings.push(format!(
            "max_imports ({}) is not smaller than modules ({}); later modules import every earlier one",
            graph.max_imports, graph.modules
        ));
    }
    if let (Some(root), Some(output_root)) = (&config.root, &config.output_root) {
        if output_root.starts_with(root) {
            warnings.push(format!(
                "output_root '{}' is inside root '{}'; artifacts will land in the source tree",
                output_root.display(),
                root.display()
            ));
        }
    }
    if config.backends.contains(&Backend::Ninja) && config.output_root.is_none() {
        warnings.push(
            "ninja is selected but output_root is not set; write bod.ninja by hand before running ninja"
                .to_string(),
        );
    }

    let backends: Vec<&str> = config.backends.iter().map(Backend::as_str).collect();
    let summary = format!(
        "{} modules, {} per directory, up to {} imports, seed {}; backends: {}",
        graph.modules,
        graph.files_per_dir,
        graph.max_imports,
        graph.seed,
        backends.join(", ")
    );

    CheckReport {
        config_path: config_path.to_path_buf(),
        warnings,
        summary,
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_clean_config_has_no_warnings() {
        let config = Config::from_str(
            r#"
[tree]
root = "tree"
modules = 50
max_imports = 4

[emit]
output_root = "/tmp/bod"
"#,
        )
        .unwrap();

        let report = check(&config, Path::new("bpc.toml"));
        assert!(report.warnings.is_empty(), "{:?}", report.warnings);
        assert!(report.summary.starts_with("50 modules"));
    }

    #[test]
    fn test_ninja_without_output_root_warns() {
        let config = Config::from_str(
            r#"
[emit]
backends = ["ninja"]
"#,
        )
        .unwrap();

        let report = check(&config, Path::new("bpc.toml"));
        assert!(report.warnings.iter().any(|w| w.contains("bod.ninja")));
        assert!(report.summary.ends_with("backends: ninja"));
    }

    #[test]
    fn test_output_root_inside_root_warns() {
        let config = Config::from_str(
            r#"
[tree]
root = "tree"

[emit]
output_root = "tree/out"
"#,
        )
        .unwrap();

        let report = check(&config, Path::new("bpc.toml"));
        assert!(report.warnings.iter().any(|w| w.contains("inside root")));
    }

    #[test]
    fn test_import_bound_warnings() {
        let config = Config::from_str(
            r#"
[tree]
modules = 3
max_imports = 5

[emit]
backends = ["bash"]
"#,
        )
        .unwrap();

        let report = check(&config, Path::new("bpc.toml"));
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("not smaller than modules"));
    }
}
