//! Command-line interface for project-context

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod generate;
mod progress;

/// Generate an LLM-friendly context report for a project directory
#[derive(Parser)]
#[command(name = "project-context")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Examples:\n  project-context\n  project-context -o context.txt\n  project-context --no-git --exclude tests docs")]
pub struct Cli {
    #[command(flatten)]
    generate: generate::GenerateArgs,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long)]
    verbose: bool,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    generate::run(cli.generate)
}
