//! Configuration loading
//!
//! Layers, lowest precedence first: built-in defaults, a config file in the
//! project root (or an explicit `--config` file), `PROJECT_CONTEXT_*`
//! environment variables. CLI flags are applied afterwards by
//! [`merge_cli_with_config`].

mod merge;

pub use merge::{merge_cli_with_config, CliOverrides};

use crate::domain::Config;
use crate::error::Result;
use figment::providers::{Env, Format, Serialized, Toml, Yaml};
use figment::Figment;
use std::path::Path;
use tracing::debug;

/// Config file names looked up in the project root.
pub const CONFIG_FILE_TOML: &str = "project-context.toml";
pub const CONFIG_FILE_YAML: &str = ".project-context.yml";

/// Prefix for environment overrides; nested keys use `__`
/// (e.g. `PROJECT_CONTEXT_LIMITS__MAX_FILES_PER_DIR=50`).
pub const ENV_PREFIX: &str = "PROJECT_CONTEXT_";

/// Load configuration for a project rooted at `anchor`.
pub fn load_config(anchor: &Path, explicit: Option<&Path>) -> Result<Config> {
    let mut figment = Figment::from(Serialized::defaults(Config::default()));

    match explicit {
        Some(path) => {
            if !path.is_file() {
                return Err(figment::Error::from(format!(
                    "config file not found: {}",
                    path.display()
                ))
                .into());
            }
            debug!(path = %path.display(), "loading explicit config file");
            figment = if is_yaml(path) {
                figment.merge(Yaml::file(path))
            } else {
                figment.merge(Toml::file(path))
            };
        }
        None => {
            figment = figment
                .merge(Toml::file(anchor.join(CONFIG_FILE_TOML)))
                .merge(Yaml::file(anchor.join(CONFIG_FILE_YAML)));
        }
    }

    let config: Config = figment.merge(Env::prefixed(ENV_PREFIX).split("__")).extract()?;
    Ok(config)
}

fn is_yaml(path: &Path) -> bool {
    matches!(path.extension().and_then(|e| e.to_str()), Some("yml" | "yaml"))
}

#[cfg(test)]
mod tests {
    use super::load_config;
    use crate::domain::DEFAULT_OUTPUT_FILE;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn defaults_apply_without_config_file() {
        let tmp = TempDir::new().expect("tmp");
        let config = load_config(tmp.path(), None).expect("load");
        assert_eq!(config.output, PathBuf::from(DEFAULT_OUTPUT_FILE));
        assert_eq!(config.limits.max_files_per_dir, 30);
        assert!(config.summarize_dirs.contains("data"));
    }

    #[test]
    fn root_toml_overrides_defaults() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(
            tmp.path().join("project-context.toml"),
            "output = \"context.txt\"\ninclude_git = false\nsummarize_dirs = [\"fixtures\"]\n\n[limits]\nmax_files_per_dir = 10\n",
        )
        .expect("write config");

        let config = load_config(tmp.path(), None).expect("load");
        assert_eq!(config.output, PathBuf::from("context.txt"));
        assert!(!config.include_git);
        assert!(config.summarize_dirs.contains("fixtures"));
        assert!(!config.summarize_dirs.contains("data"));
        assert_eq!(config.limits.max_files_per_dir, 10);
        assert_eq!(config.limits.max_lines_preview, 100);
    }

    #[test]
    fn explicit_yaml_file_is_used() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("custom.yaml");
        fs::write(&path, "quiet: true\nexclude_dirs:\n  - vendor\n").expect("write config");

        let config = load_config(tmp.path(), Some(&path)).expect("load");
        assert!(config.quiet);
        assert!(config.is_excluded_dir("vendor"));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let tmp = TempDir::new().expect("tmp");
        let err = load_config(tmp.path(), Some(&tmp.path().join("nope.toml")))
            .expect_err("missing file");
        assert!(err.to_string().contains("config file not found"));
    }
}
