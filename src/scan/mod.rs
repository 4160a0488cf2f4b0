//! Directory scanning: ignore patterns, tree rendering, file collection.

pub mod collect;
pub mod tree;

pub use collect::collect_files;
pub use tree::render_tree;

use crate::domain::IGNORE_FILE_NAME;
use crate::utils::read_file_lossy;
use std::collections::BTreeSet;
use std::path::Path;
use tracing::debug;

/// Names from the project ignore file. Matched by exact equality against a
/// single path segment; no glob or negation semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnorePatterns {
    names: BTreeSet<String>,
}

impl IgnorePatterns {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { names: names.into_iter().map(Into::into).collect() }
    }

    /// Parse ignore-file text: blank lines and `#` comments are dropped,
    /// trailing `/` is stripped.
    pub fn parse(text: &str) -> Self {
        let names = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(|line| line.trim_end_matches('/').to_string())
            .filter(|line| !line.is_empty())
            .collect();
        Self { names }
    }

    pub fn matches(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Load `<root>/.gitignore`. A missing or unreadable file yields no patterns.
pub fn load_ignore_patterns(root: &Path) -> IgnorePatterns {
    let path = root.join(IGNORE_FILE_NAME);
    if !path.is_file() {
        return IgnorePatterns::default();
    }
    match read_file_lossy(&path) {
        Ok(text) => {
            let patterns = IgnorePatterns::parse(&text);
            debug!(count = patterns.len(), "loaded ignore patterns");
            patterns
        }
        Err(err) => {
            debug!(error = %err, path = %path.display(), "ignore file unreadable");
            IgnorePatterns::default()
        }
    }
}
