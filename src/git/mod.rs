//! Version-control metadata for the report header.
//!
//! Everything here is best effort: a missing repository or any libgit2
//! failure simply means there is no git section.

use chrono::Utc;
use git2::{Repository, Status, StatusOptions};
use std::path::Path;
use tracing::debug;

/// Summary of the repository state at generation time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitInfo {
    pub branch: Option<String>,
    /// `<short hash> - <subject> (<relative time>)`
    pub last_commit: Option<String>,
    pub status: Option<WorkingTreeStatus>,
}

/// Counts of changed paths in the working tree and index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkingTreeStatus {
    pub modified: usize,
    pub added: usize,
    pub deleted: usize,
}

impl WorkingTreeStatus {
    pub fn is_clean(&self) -> bool {
        self.modified == 0 && self.added == 0 && self.deleted == 0
    }

    fn render(&self) -> String {
        if self.is_clean() {
            return "Clean working tree".to_string();
        }
        let mut parts = Vec::new();
        if self.modified > 0 {
            parts.push(format!("{} modified", self.modified));
        }
        if self.added > 0 {
            parts.push(format!("{} untracked/added", self.added));
        }
        if self.deleted > 0 {
            parts.push(format!("{} deleted", self.deleted));
        }
        parts.join(", ")
    }
}

impl GitInfo {
    /// Lines for the report's git section, or `None` when nothing is known.
    pub fn render(&self) -> Option<String> {
        let mut lines = Vec::new();
        if let Some(branch) = &self.branch {
            lines.push(format!("Branch: {branch}"));
        }
        if let Some(commit) = &self.last_commit {
            lines.push(format!("Last commit: {commit}"));
        }
        if let Some(status) = &self.status {
            lines.push(format!("Status: {}", status.render()));
        }
        if lines.is_empty() {
            None
        } else {
            Some(lines.join("\n"))
        }
    }
}

/// Inspect the repository containing `root`, if any.
pub fn collect_git_info(root: &Path) -> Option<GitInfo> {
    let repo = match Repository::discover(root) {
        Ok(repo) => repo,
        Err(err) => {
            debug!(root = %root.display(), error = %err, "no git repository");
            return None;
        }
    };

    Some(GitInfo {
        branch: current_branch(&repo),
        last_commit: last_commit(&repo),
        status: working_tree_status(&repo),
    })
}

/// Branch HEAD points at, including an unborn one; `None` when detached.
fn current_branch(repo: &Repository) -> Option<String> {
    let head = repo.find_reference("HEAD").ok()?;
    let target = head.symbolic_target()?;
    target.strip_prefix("refs/heads/").map(str::to_string)
}

fn last_commit(repo: &Repository) -> Option<String> {
    let commit = repo.head().ok()?.peel_to_commit().ok()?;
    let short_id = commit.as_object().short_id().ok()?;
    let short_id = short_id.as_str()?.to_string();
    let subject = commit.summary().unwrap_or_default().to_string();
    let age = Utc::now().timestamp() - commit.committer().when().seconds();
    Some(format!("{short_id} - {subject} ({})", relative_time(age)))
}

fn working_tree_status(repo: &Repository) -> Option<WorkingTreeStatus> {
    let mut options = StatusOptions::new();
    options.include_untracked(true).include_ignored(false);
    let statuses = match repo.statuses(Some(&mut options)) {
        Ok(statuses) => statuses,
        Err(err) => {
            debug!(error = %err, "git status unavailable");
            return None;
        }
    };

    let mut summary = WorkingTreeStatus::default();
    for entry in statuses.iter() {
        let status = entry.status();
        if status.intersects(Status::INDEX_NEW | Status::WT_NEW) {
            summary.added += 1;
        } else if status.intersects(Status::INDEX_DELETED | Status::WT_DELETED) {
            summary.deleted += 1;
        } else if status.intersects(Status::INDEX_MODIFIED | Status::WT_MODIFIED) {
            summary.modified += 1;
        }
    }
    Some(summary)
}

/// Age in the style of `git log --format=%cr`, e.g. `3 hours ago`.
pub fn relative_time(seconds: i64) -> String {
    let seconds = seconds.max(0);
    let count = |n: i64, unit: &str| {
        if n == 1 {
            format!("1 {unit}")
        } else {
            format!("{n} {unit}s")
        }
    };
    let plural = |n: i64, unit: &str| format!("{} ago", count(n, unit));

    if seconds < 90 {
        return plural(seconds, "second");
    }
    let minutes = (seconds + 30) / 60;
    if minutes < 90 {
        return plural(minutes, "minute");
    }
    let hours = (minutes + 30) / 60;
    if hours < 36 {
        return plural(hours, "hour");
    }
    let days = (hours + 12) / 24;
    if days < 14 {
        return plural(days, "day");
    }
    if days < 70 {
        return plural((days + 3) / 7, "week");
    }
    if days < 365 {
        return plural((days + 15) / 30, "month");
    }
    // Under five years git reports years and leftover months.
    if days < 1825 {
        let total_months = (days * 12 * 2 + 365) / (365 * 2);
        let (years, months) = (total_months / 12, total_months % 12);
        if months == 0 {
            return plural(years, "year");
        }
        return format!("{}, {} ago", count(years, "year"), count(months, "month"));
    }
    plural((days + 183) / 365, "year")
}
