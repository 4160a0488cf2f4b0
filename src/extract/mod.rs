//! Per-file content extraction.
//!
//! Decides, purely from a file's name and size, how much of it ends up in the
//! report: notebooks are flattened to cells, large JSON is summarized, JSONL
//! is sampled, and other text is truncated past a size threshold.

pub mod json;
pub mod notebook;

pub use json::summarize_json;

use crate::domain::{Config, Limits};
use crate::utils::{extension_of, format_size, read_file_lossy};
use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

/// Outcome of extracting one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extracted {
    /// Text to emit; the file counts as processed.
    Content(String),
    /// A single inline error line; the file counts as processed and errored.
    Error(String),
    /// Nothing to emit; the file counts as skipped.
    Unsupported,
}

impl Extracted {
    pub(crate) fn read_error(err: &io::Error) -> Self {
        Self::Error(format!("[Error reading file: {err}]"))
    }

    /// Text to place in the report, if any.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Content(text) | Self::Error(text) => Some(text),
            Self::Unsupported => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

/// Extract the report content for a single file.
///
/// Files over `max_file_size_partial` are never read and produce a
/// `[File too large: …]` marker. Missing files and unrecognized types yield
/// [`Extracted::Unsupported`].
pub fn extract_file_content(path: &Path, file_name: &str, config: &Config) -> Extracted {
    let limits = &config.limits;
    let size = match fs::metadata(path) {
        Ok(meta) => meta.len(),
        Err(err) => {
            debug!(path = %path.display(), error = %err, "cannot stat file");
            return Extracted::Unsupported;
        }
    };
    if size > limits.max_file_size_partial {
        return Extracted::Content(format!("[File too large: {} - skipped]", format_size(size)));
    }

    let extension = extension_of(file_name);
    match extension.as_str() {
        ".ipynb" => notebook::extract_notebook(path, limits),
        ".json" => json::extract_json(path, size, limits),
        ".jsonl" => extract_jsonl(path, size, limits),
        ".yaml" | ".yml" | ".toml" => extract_text(path, size, limits, TruncationNote::LinesOmitted),
        _ if config.is_text_file(file_name, &extension) => {
            extract_text(path, size, limits, TruncationNote::TotalSize)
        }
        _ => Extracted::Unsupported,
    }
}

/// Trailer appended when a text file is cut to its first lines.
#[derive(Debug, Clone, Copy)]
enum TruncationNote {
    /// `... [N more lines]`
    LinesOmitted,
    /// `... [truncated - 42.0KB total]`
    TotalSize,
}

fn extract_text(path: &Path, size: u64, limits: &Limits, note: TruncationNote) -> Extracted {
    let content = match read_file_lossy(path) {
        Ok(content) => content,
        Err(err) => return Extracted::read_error(&err),
    };
    if size <= limits.max_file_size_full {
        return Extracted::Content(content);
    }

    let lines: Vec<&str> = content.split('\n').collect();
    let kept = lines.len().min(limits.max_lines_preview);
    let trailer = match note {
        TruncationNote::LinesOmitted => format!("[{} more lines]", lines.len() - kept),
        TruncationNote::TotalSize => format!("[truncated - {} total]", format_size(size)),
    };
    Extracted::Content(format!("{}\n\n... {trailer}", lines[..kept].join("\n")))
}

fn extract_jsonl(path: &Path, size: u64, limits: &Limits) -> Extracted {
    let content = match read_file_lossy(path) {
        Ok(content) => content,
        Err(err) => return Extracted::read_error(&err),
    };
    let head: Vec<&str> = content.split_inclusive('\n').take(limits.max_jsonl_lines).collect();
    if head.is_empty() {
        return Extracted::Content("(Empty file)".to_string());
    }
    Extracted::Content(format!(
        "[JSONL file: {}]\n# First {} lines:\n\n{}\n... (truncated)",
        format_size(size),
        head.len(),
        head.concat()
    ))
}
