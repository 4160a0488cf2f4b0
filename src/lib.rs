//! Project-Context: summarize a project directory for language models
//!
//! This library renders a directory tree, collects version-control metadata,
//! and extracts per-file content under size- and type-driven truncation
//! rules, assembling everything into a single text report.

pub mod config;
pub mod domain;
pub mod error;
pub mod extract;
pub mod git;
pub mod render;
pub mod scan;
pub mod utils;
