//! Report generation command

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::PathBuf;
use tracing::info;

use super::progress::ConsoleProgress;
use crate::config::{load_config, merge_cli_with_config, CliOverrides};
use crate::error::ContextError;
use crate::render::{render_report, ReportProgress};
use crate::utils::{estimate_tokens, format_size, format_with_commas};

#[derive(Args)]
pub struct GenerateArgs {
    /// Output file (default: directory_info.txt)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Root directory to scan (default: current directory)
    #[arg(short, long, value_name = "DIR")]
    pub directory: Option<PathBuf>,

    /// Path to config file (project-context.toml or .project-context.yml)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Skip git information
    #[arg(long)]
    pub no_git: bool,

    /// Ignore .gitignore patterns
    #[arg(long)]
    pub no_gitignore: bool,

    /// Additional directories to exclude
    #[arg(long, value_name = "DIR", num_args = 0..)]
    pub exclude: Vec<String>,

    /// Additional directories to summarize
    #[arg(long, value_name = "DIR", num_args = 0..)]
    pub summarize: Vec<String>,

    /// Omit the generation timestamp for reproducible output
    #[arg(long)]
    pub no_timestamp: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

pub fn run(args: GenerateArgs) -> Result<()> {
    let cwd = std::env::current_dir().map_err(ContextError::from)?;
    let anchor = args.directory.clone().unwrap_or_else(|| cwd.clone());

    let file_config = load_config(&anchor, args.config.as_deref())?;
    let cli_overrides = CliOverrides {
        root: args.directory.clone(),
        output: args.output.clone(),
        include_git: if args.no_git { Some(false) } else { None },
        respect_gitignore: if args.no_gitignore { Some(false) } else { None },
        include_timestamp: if args.no_timestamp { Some(false) } else { None },
        quiet: if args.quiet { Some(true) } else { None },
        exclude_dirs: args.exclude.clone(),
        summarize_dirs: args.summarize.clone(),
    };
    let merged = merge_cli_with_config(file_config, cli_overrides);

    let requested_root = merged.root.clone().unwrap_or(cwd);
    if !requested_root.is_dir() {
        return Err(ContextError::RootNotDirectory { path: requested_root }.into());
    }
    let root = requested_root
        .canonicalize()
        .with_context(|| format!("Failed to resolve {}", requested_root.display()))?;

    if !merged.quiet {
        println!("📂 Scanning: {}", style(root.display()).bold());
    }
    info!(root = %root.display(), output = %merged.output.display(), "generating report");

    let output = merged.output.clone();
    let file = File::create(&output).map_err(|e| ContextError::output_write(&output, e))?;
    let mut writer = BufWriter::new(file);

    let mut progress: Box<dyn ReportProgress> = if merged.quiet {
        Box::new(())
    } else {
        Box::new(ConsoleProgress::new())
    };
    let summary = render_report(&mut writer, &root, &merged, progress.as_mut())
        .map_err(|e| ContextError::output_write(&output, e))?;
    drop(writer);

    if !merged.quiet {
        let output_size = fs::metadata(&output).map(|m| m.len()).unwrap_or(0);
        let content = summary.content;
        let tokens = estimate_tokens(output_size as usize, merged.limits.chars_per_token);
        println!();
        println!("{} Context generated: {}", style("✅").green(), output.display());
        println!("   Size: {}", format_size(output_size));
        println!("   Files: {} processed, {} skipped", content.processed, content.skipped);
        if content.errors > 0 {
            println!("   Errors: {}", style(content.errors).yellow());
        }
        println!(
            "   Tree: {} directories, {} files ({} summarized)",
            summary.tree.total_dirs, summary.tree.total_files, summary.tree.summarized_files
        );
        println!("   Estimated tokens: ~{}", format_with_commas(tokens as u64));
    }

    Ok(())
}
