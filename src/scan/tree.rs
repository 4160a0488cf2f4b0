//! Directory tree rendering.
//!
//! Produces the indented `├──`/`└──` overview of the project. Summarized
//! directories collapse to one aggregate line, binary/media files collapse to
//! a `[skipped: …]` line, and long listings are capped per directory.

use crate::domain::{Config, TreeStats};
use crate::scan::IgnorePatterns;
use crate::utils::{extension_of, format_size};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE_INDENT: &str = "│   ";
const SPACE_INDENT: &str = "    ";

/// Extensions shown in aggregate lines.
const TOP_EXTENSIONS: usize = 5;

/// Render the tree for `root`. The first line is the root's own name.
pub fn render_tree(root: &Path, config: &Config, ignore: &IgnorePatterns) -> (String, TreeStats) {
    let mut builder = TreeBuilder { config, ignore, lines: Vec::new(), stats: TreeStats::default() };
    builder.walk_root(root);
    (builder.lines.join("\n"), builder.stats)
}

struct TreeBuilder<'a> {
    config: &'a Config,
    ignore: &'a IgnorePatterns,
    lines: Vec<String>,
    stats: TreeStats,
}

/// Directory contents after exclusion and ignore filtering.
struct Listing {
    dirs: Vec<(String, PathBuf)>,
    files: Vec<(String, PathBuf)>,
}

impl TreeBuilder<'_> {
    fn walk_root(&mut self, root: &Path) {
        let name = display_name(root);
        self.lines.push(format!("{name}/"));
        self.walk_contents(root, &name, "");
    }

    fn walk_dir(&mut self, path: &Path, name: &str, prefix: &str, is_last: bool) {
        let connector = if is_last { LAST_BRANCH } else { BRANCH };
        self.lines.push(format!("{prefix}{connector}{name}/"));
        let child_prefix = format!("{prefix}{}", if is_last { SPACE_INDENT } else { PIPE_INDENT });
        self.walk_contents(path, name, &child_prefix);
    }

    fn walk_contents(&mut self, path: &Path, name: &str, prefix: &str) {
        let listing = match self.list(path) {
            Ok(listing) => listing,
            Err(err) => {
                debug!(path = %path.display(), error = %err, "cannot list directory");
                let marker = if err.kind() == io::ErrorKind::PermissionDenied {
                    "[Permission Denied]".to_string()
                } else {
                    format!("[Error listing directory: {err}]")
                };
                self.lines.push(format!("{prefix}{marker}"));
                return;
            }
        };

        if self.config.is_summarized_dir(name) {
            self.summarize(&listing.files, prefix);
            return;
        }

        let mut shown = Vec::new();
        let mut skipped: Vec<(String, usize)> = Vec::new();
        for (file_name, file_path) in &listing.files {
            let ext = extension_of(file_name);
            if self.config.is_skipped_extension(&ext) {
                bump(&mut skipped, ext);
            } else {
                shown.push((file_name, file_path));
            }
        }
        self.stats.total_files += shown.len();
        self.stats.skipped_files += skipped.iter().map(|(_, n)| n).sum::<usize>();

        let cap = self.config.limits.max_files_per_dir;
        let listed = shown.len().min(cap);
        let overflow = shown.len() - listed;

        // Every displayed entry is counted up front so that exactly the final
        // one gets the closing connector.
        let total = listed
            + usize::from(overflow > 0)
            + usize::from(!skipped.is_empty())
            + listing.dirs.len();
        let mut index = 0;
        let mut next_connector = || {
            index += 1;
            if index == total {
                LAST_BRANCH
            } else {
                BRANCH
            }
        };

        for (file_name, file_path) in shown.iter().take(cap) {
            let size = fs::metadata(file_path)
                .map(|meta| format!(" ({})", format_size(meta.len())))
                .unwrap_or_default();
            self.lines.push(format!("{prefix}{}{file_name}{size}", next_connector()));
        }
        if overflow > 0 {
            self.lines.push(format!("{prefix}{}... and {overflow} more files", next_connector()));
        }
        if !skipped.is_empty() {
            let summary = top_extensions(skipped);
            self.lines.push(format!("{prefix}{}[skipped: {summary}]", next_connector()));
        }

        let dir_count = listing.dirs.len();
        for (i, (dir_name, dir_path)) in listing.dirs.iter().enumerate() {
            self.stats.total_dirs += 1;
            self.walk_dir(dir_path, dir_name, prefix, i + 1 == dir_count);
        }
    }

    fn summarize(&mut self, files: &[(String, PathBuf)], prefix: &str) {
        self.stats.summarized_dirs += 1;
        self.stats.summarized_files += files.len();
        if files.is_empty() {
            return;
        }

        let mut counts: Vec<(String, usize)> = Vec::new();
        let mut total_size = 0u64;
        for (file_name, file_path) in files {
            let ext = extension_of(file_name);
            bump(&mut counts, if ext.is_empty() { "(no ext)".to_string() } else { ext });
            total_size += fs::metadata(file_path).map(|meta| meta.len()).unwrap_or(0);
        }
        self.lines.push(format!(
            "{prefix}📦 [{} files, {}]: {}",
            files.len(),
            format_size(total_size),
            top_extensions(counts)
        ));
    }

    fn list(&self, path: &Path) -> io::Result<Listing> {
        let mut entries: Vec<(String, PathBuf, fs::FileType)> = Vec::new();
        for entry in fs::read_dir(path)? {
            let Ok(entry) = entry else { continue };
            let Ok(file_type) = entry.file_type() else { continue };
            entries.push((entry.file_name().to_string_lossy().into_owned(), entry.path(), file_type));
        }
        entries.sort_by(|a, b| a.0.cmp(&b.0));

        let output_name = self.config.output_file_name();
        let mut listing = Listing { dirs: Vec::new(), files: Vec::new() };
        for (name, entry_path, file_type) in entries {
            if file_type.is_dir() {
                if !self.config.is_excluded_dir(&name) && !self.ignore.matches(&name) {
                    listing.dirs.push((name, entry_path));
                }
            } else if file_type.is_symlink() && entry_path.is_dir() {
                // Linked directories are never followed.
                continue;
            } else if Some(name.as_str()) != output_name && !self.ignore.matches(&name) {
                listing.files.push((name, entry_path));
            }
        }
        Ok(listing)
    }
}

fn display_name(root: &Path) -> String {
    root.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| root.display().to_string())
}

/// Count `key`, keeping first-seen order for ties.
fn bump(counts: &mut Vec<(String, usize)>, key: String) {
    match counts.iter_mut().find(|(k, _)| *k == key) {
        Some((_, n)) => *n += 1,
        None => counts.push((key, 1)),
    }
}

/// `3.png, 1.svg` for the most frequent extensions.
fn top_extensions(mut counts: Vec<(String, usize)>) -> String {
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .iter()
        .take(TOP_EXTENSIONS)
        .map(|(ext, n)| format!("{n}{ext}"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::{render_tree, top_extensions};
    use crate::domain::Config;
    use crate::scan::IgnorePatterns;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn fixture(tmp: &TempDir) -> PathBuf {
        let root = tmp.path().join("proj");
        fs::create_dir_all(root.join("src")).expect("mkdir src");
        fs::create_dir_all(root.join("data")).expect("mkdir data");
        fs::create_dir_all(root.join("node_modules")).expect("mkdir node_modules");
        fs::write(root.join("README.md"), "# Demo\n").expect("write readme");
        fs::write(root.join("logo.png"), "png").expect("write png");
        fs::write(root.join("src/main.rs"), "fn main() {}\n").expect("write main");
        fs::write(root.join("data/a.csv"), "1,2\n").expect("write a");
        fs::write(root.join("data/b.csv"), "3,4\n").expect("write b");
        fs::write(root.join("data/c.json"), "{}").expect("write c");
        fs::write(root.join("node_modules/x.js"), "x").expect("write x");
        root
    }

    fn render(root: &Path) -> String {
        render_tree(root, &Config::default(), &IgnorePatterns::default()).0
    }

    #[test]
    fn renders_connectors_summaries_and_skips() {
        let tmp = TempDir::new().expect("tmp");
        let root = fixture(&tmp);

        insta::assert_snapshot!(render(&root), @r"
        proj/
        ├── README.md (7B)
        ├── [skipped: 1.png]
        ├── data/
        │   📦 [3 files, 10B]: 2.csv, 1.json
        └── src/
            └── main.rs (13B)
        ");
    }

    #[test]
    fn rendering_is_deterministic() {
        let tmp = TempDir::new().expect("tmp");
        let root = fixture(&tmp);
        similar_asserts::assert_eq!(render(&root), render(&root));
    }

    #[test]
    fn caps_listing_and_reports_overflow() {
        let tmp = TempDir::new().expect("tmp");
        let root = tmp.path().join("many");
        fs::create_dir_all(&root).expect("mkdir");
        for i in 0..35 {
            fs::write(root.join(format!("file{i:02}.txt")), "x").expect("write");
        }

        let (tree, stats) = render_tree(&root, &Config::default(), &IgnorePatterns::default());
        let listed = tree.lines().filter(|l| l.contains("file") && l.ends_with("(1B)")).count();
        assert_eq!(listed, 30);
        assert!(tree.lines().last().expect("last line").ends_with("└── ... and 5 more files"));
        assert!(!tree.contains("file30.txt"));
        assert_eq!(stats.total_files, 35);
    }

    #[test]
    fn summarized_directory_is_one_line() {
        let tmp = TempDir::new().expect("tmp");
        let root = tmp.path().join("proj");
        fs::create_dir_all(root.join("logs/nested")).expect("mkdir");
        for i in 0..12 {
            fs::write(root.join(format!("logs/run{i}.log")), "line\n").expect("write");
        }
        fs::write(root.join("logs/nested/deep.txt"), "x").expect("write");

        let (tree, stats) = render_tree(&root, &Config::default(), &IgnorePatterns::default());
        let lines: Vec<&str> = tree.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "└── logs/");
        assert_eq!(lines[2], "    📦 [12 files, 60B]: 12.log");
        assert!(!tree.contains("run0.log"));
        assert!(!tree.contains("nested"));
        assert_eq!(stats.summarized_dirs, 1);
        assert_eq!(stats.summarized_files, 12);
    }

    #[test]
    fn empty_summarized_directory_renders_nothing() {
        let tmp = TempDir::new().expect("tmp");
        let root = tmp.path().join("proj");
        fs::create_dir_all(root.join("assets")).expect("mkdir");

        let tree = render(&root);
        assert_eq!(tree, "proj/\n└── assets/");
    }

    #[test]
    fn ignore_patterns_and_output_file_are_hidden() {
        let tmp = TempDir::new().expect("tmp");
        let root = tmp.path().join("proj");
        fs::create_dir_all(root.join("secret")).expect("mkdir");
        fs::write(root.join("keep.txt"), "k").expect("write");
        fs::write(root.join("local.env"), "k").expect("write");
        fs::write(root.join("directory_info.txt"), "old report").expect("write");

        let ignore = IgnorePatterns::new(["secret", "local.env"]);
        let (tree, _) = render_tree(&root, &Config::default(), &ignore);
        assert_eq!(tree, "proj/\n└── keep.txt (1B)");
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_directory_renders_permission_marker() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().expect("tmp");
        let root = tmp.path().join("proj");
        let locked = root.join("locked");
        fs::create_dir_all(&locked).expect("mkdir locked");
        fs::create_dir_all(root.join("open")).expect("mkdir open");
        fs::write(locked.join("hidden.txt"), "h").expect("write hidden");
        fs::write(root.join("open/a.txt"), "abc").expect("write a");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).expect("chmod");

        // Permission bits do not apply to root.
        let tree = fs::read_dir(&locked).is_err().then(|| render(&root));
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).expect("restore");
        let Some(tree) = tree else { return };

        assert_eq!(
            tree,
            "proj/\n├── locked/\n│   [Permission Denied]\n└── open/\n    └── a.txt (3B)"
        );
    }

    #[test]
    fn nested_prefixes_continue_for_non_last_siblings() {
        let tmp = TempDir::new().expect("tmp");
        let root = tmp.path().join("proj");
        fs::create_dir_all(root.join("a/inner")).expect("mkdir");
        fs::create_dir_all(root.join("b")).expect("mkdir");
        fs::write(root.join("a/inner/x.py"), "pass\n").expect("write");

        let tree = render(&root);
        assert_eq!(tree, "proj/\n├── a/\n│   └── inner/\n│       └── x.py (5B)\n└── b/");
    }

    #[test]
    fn top_extensions_keeps_five_most_frequent() {
        let counts = vec![
            (".a".to_string(), 1),
            (".b".to_string(), 3),
            (".c".to_string(), 1),
            (".d".to_string(), 2),
            (".e".to_string(), 1),
            (".f".to_string(), 1),
        ];
        assert_eq!(top_extensions(counts), "3.b, 2.d, 1.a, 1.c, 1.e");
    }
}
