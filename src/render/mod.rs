//! Report assembly.
//!
//! Section order: header, optional git block, directory tree, file contents,
//! summary footer.

use crate::domain::{Config, ContentStats, FileRecord, Limits, TreeStats};
use crate::extract::extract_file_content;
use crate::git::collect_git_info;
use crate::scan::{collect_files, load_ignore_patterns, render_tree, IgnorePatterns};
use crate::utils::{estimate_tokens, format_with_commas};
use std::io::{self, Write};
use std::path::Path;
use tracing::debug;

const RULE_WIDTH: usize = 80;
const THIN_RULE_WIDTH: usize = 40;

/// Receives progress while file contents are written.
pub trait ReportProgress {
    fn start(&mut self, _total_files: usize) {}
    fn file(&mut self, _record: &FileRecord) {}
    fn finish(&mut self) {}
}

/// Progress sink that ignores everything.
impl ReportProgress for () {}

/// Counters from both passes of one report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportSummary {
    pub content: ContentStats,
    pub tree: TreeStats,
    pub has_git_section: bool,
}

/// Render the full report for `root` into `out`.
///
/// Only write failures are returned; unreadable files and directories are
/// reported inline.
pub fn render_report<W: Write>(
    out: &mut W,
    root: &Path,
    config: &Config,
    progress: &mut dyn ReportProgress,
) -> io::Result<ReportSummary> {
    let ignore = if config.respect_gitignore {
        load_ignore_patterns(root)
    } else {
        IgnorePatterns::default()
    };

    let generated_at = config
        .include_timestamp
        .then(|| chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string());
    write_header(out, root, generated_at.as_deref())?;

    let mut summary = ReportSummary::default();
    if config.include_git {
        if let Some(git) = collect_git_info(root).and_then(|info| info.render()) {
            write_git_section(out, &git)?;
            summary.has_git_section = true;
        }
    }

    let (tree, tree_stats) = render_tree(root, config, &ignore);
    debug!(?tree_stats, "rendered directory tree");
    write_tree_section(out, &tree)?;
    summary.tree = tree_stats;

    let files = collect_files(root, config, &ignore);
    writeln!(out, "FILE CONTENTS:")?;
    summary.content = write_file_contents(out, &files, config, progress)?;
    write_summary(out, &summary.content, &config.limits)?;
    out.flush()?;
    Ok(summary)
}

pub fn write_header<W: Write>(out: &mut W, root: &Path, generated_at: Option<&str>) -> io::Result<()> {
    let rule = "=".repeat(RULE_WIDTH);
    writeln!(out, "{rule}")?;
    writeln!(out, "PROJECT CONTEXT")?;
    if let Some(timestamp) = generated_at {
        writeln!(out, "Generated: {timestamp}")?;
    }
    writeln!(out, "Root: {}", root.display())?;
    writeln!(out, "{rule}")?;
    writeln!(out)
}

pub fn write_git_section<W: Write>(out: &mut W, git_info: &str) -> io::Result<()> {
    writeln!(out, "GIT INFORMATION:")?;
    writeln!(out, "{}", "-".repeat(THIN_RULE_WIDTH))?;
    writeln!(out, "{git_info}")?;
    writeln!(out)
}

pub fn write_tree_section<W: Write>(out: &mut W, tree: &str) -> io::Result<()> {
    writeln!(out, "DIRECTORY STRUCTURE:")?;
    writeln!(out, "{}", "-".repeat(THIN_RULE_WIDTH))?;
    writeln!(out, "{tree}")?;
    writeln!(out)
}

/// Extract and write every collected file, returning the content counters.
pub fn write_file_contents<W: Write>(
    out: &mut W,
    files: &[FileRecord],
    config: &Config,
    progress: &mut dyn ReportProgress,
) -> io::Result<ContentStats> {
    let separator = format!("\n{}\n", "=".repeat(RULE_WIDTH));
    let mut stats = ContentStats::default();
    progress.start(files.len());

    for record in files {
        progress.file(record);
        let file_name = record.path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
        let extracted = extract_file_content(&record.path, &file_name, config);
        let Some(content) = extracted.text() else {
            debug!(path = %record.relative_path, "no content; skipped");
            stats.skipped += 1;
            continue;
        };
        if extracted.is_error() {
            stats.errors += 1;
        }

        write!(out, "{separator}FILE: {}\n{separator}{content}\n", record.relative_path)?;
        stats.processed += 1;
        stats.total_chars += content.chars().count();
    }

    progress.finish();
    Ok(stats)
}

pub fn write_summary<W: Write>(out: &mut W, stats: &ContentStats, limits: &Limits) -> io::Result<()> {
    let rule = "=".repeat(RULE_WIDTH);
    let tokens = estimate_tokens(stats.total_chars, limits.chars_per_token);
    writeln!(out)?;
    writeln!(out, "{rule}")?;
    writeln!(out, "SUMMARY")?;
    writeln!(out, "{rule}")?;
    writeln!(out, "Files processed: {}", stats.processed)?;
    writeln!(out, "Files skipped: {}", stats.skipped)?;
    writeln!(out, "Errors: {}", stats.errors)?;
    writeln!(out, "Estimated tokens: ~{}", format_with_commas(tokens as u64))
}
