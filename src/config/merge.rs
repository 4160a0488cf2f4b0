//! CLI argument merging with config

use crate::domain::Config;
use std::path::PathBuf;

#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub root: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub include_git: Option<bool>,
    pub respect_gitignore: Option<bool>,
    pub include_timestamp: Option<bool>,
    pub quiet: Option<bool>,
    /// Added to the configured exclusion set
    pub exclude_dirs: Vec<String>,
    /// Added to the configured summarize set
    pub summarize_dirs: Vec<String>,
}

pub fn merge_cli_with_config(mut base_config: Config, cli: CliOverrides) -> Config {
    if let Some(root) = cli.root {
        base_config.root = Some(root);
    }
    if let Some(output) = cli.output {
        base_config.output = output;
    }

    if let Some(include_git) = cli.include_git {
        base_config.include_git = include_git;
    }
    if let Some(respect_gitignore) = cli.respect_gitignore {
        base_config.respect_gitignore = respect_gitignore;
    }
    if let Some(include_timestamp) = cli.include_timestamp {
        base_config.include_timestamp = include_timestamp;
    }
    if let Some(quiet) = cli.quiet {
        base_config.quiet = quiet;
    }

    base_config.exclude_dirs.extend(cli.exclude_dirs);
    base_config.summarize_dirs.extend(cli.summarize_dirs);

    base_config
}
