//! project-context: generate an LLM-friendly report of a project directory
//!
//! Walks a directory and writes a single text file containing a tree view,
//! git metadata, and the (possibly summarized) contents of every text file.

use anyhow::Result;

mod cli;
mod config;
mod domain;
mod error;
mod extract;
mod git;
mod render;
mod scan;
mod utils;

fn main() -> Result<()> {
    cli::run()
}
