//! File collection for the content pass.

use crate::domain::{priority_rank, Config, FileRecord};
use crate::scan::IgnorePatterns;
use crate::utils::{extension_of, normalize_path};
use std::path::Path;
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

/// Collect every file whose content should be rendered, sorted by
/// (priority, relative path).
///
/// Excluded, ignored and summarized directories are pruned, and files with a
/// skipped extension are left out. Unlike the tree view there is no
/// per-directory cap here.
pub fn collect_files(root: &Path, config: &Config, ignore: &IgnorePatterns) -> Vec<FileRecord> {
    let root_name = root.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    if config.is_summarized_dir(root_name) {
        debug!(root = %root.display(), "root is a summarized directory; no files collected");
        return Vec::new();
    }

    let output_name = config.output_file_name();
    let mut files = Vec::new();

    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || keep_dir(entry, config, ignore));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                debug!(error = %err, "skipping unreadable path");
                continue;
            }
        };
        if entry.file_type().is_dir() {
            continue;
        }
        if entry.path_is_symlink() && entry.path().is_dir() {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy();
        if Some(&*file_name) == output_name || ignore.matches(&file_name) {
            continue;
        }
        let extension = extension_of(&file_name);
        if config.is_skipped_extension(&extension) {
            continue;
        }

        let Ok(relative) = entry.path().strip_prefix(root) else { continue };
        files.push(FileRecord {
            priority: priority_rank(config, &file_name, &extension),
            relative_path: normalize_path(relative),
            path: entry.path().to_path_buf(),
        });
    }

    files.sort();
    debug!(count = files.len(), "collected files");
    files
}

/// Directory filter; files always pass.
fn keep_dir(entry: &DirEntry, config: &Config, ignore: &IgnorePatterns) -> bool {
    if !entry.file_type().is_dir() {
        return true;
    }
    let name = entry.file_name().to_string_lossy();
    !config.is_excluded_dir(&name) && !ignore.matches(&name) && !config.is_summarized_dir(&name)
}

#[cfg(test)]
mod tests {
    use super::collect_files;
    use crate::domain::Config;
    use crate::scan::IgnorePatterns;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn orders_by_priority_then_path_and_prunes() {
        let tmp = TempDir::new().expect("tmp");
        let root = tmp.path().join("proj");
        fs::create_dir_all(root.join("src/nested")).expect("mkdir");
        fs::create_dir_all(root.join("data")).expect("mkdir");
        fs::create_dir_all(root.join(".git")).expect("mkdir");
        fs::create_dir_all(root.join("pkg.egg-info")).expect("mkdir");
        fs::write(root.join("notes.txt"), "n").expect("write");
        fs::write(root.join("Cargo.toml"), "[package]").expect("write");
        fs::write(root.join("README_extra.md"), "r").expect("write");
        fs::write(root.join("src/lib.rs"), "").expect("write");
        fs::write(root.join("src/nested/a.rs"), "").expect("write");
        fs::write(root.join("config.yml"), "a: 1").expect("write");
        fs::write(root.join("icon.png"), "png").expect("write");
        fs::write(root.join("data/rows.csv"), "1").expect("write");
        fs::write(root.join(".git/HEAD"), "ref").expect("write");
        fs::write(root.join("pkg.egg-info/PKG-INFO"), "x").expect("write");
        fs::write(root.join("directory_info.txt"), "old").expect("write");

        let files = collect_files(&root, &Config::default(), &IgnorePatterns::default());
        let paths: Vec<&str> = files.iter().map(|f| f.relative_path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "Cargo.toml",
                "README_extra.md",
                "src/lib.rs",
                "src/nested/a.rs",
                "config.yml",
                "notes.txt",
            ]
        );
        assert_eq!(files[0].priority, 0);
        assert!(files[0].path.ends_with("Cargo.toml"));
    }

    #[test]
    fn ignore_patterns_prune_files_and_directories() {
        let tmp = TempDir::new().expect("tmp");
        let root = tmp.path().join("proj");
        fs::create_dir_all(root.join("generated")).expect("mkdir");
        fs::write(root.join("generated/out.rs"), "").expect("write");
        fs::write(root.join("secrets.txt"), "").expect("write");
        fs::write(root.join("keep.txt"), "").expect("write");

        let ignore = IgnorePatterns::new(["generated", "secrets.txt"]);
        let files = collect_files(&root, &Config::default(), &ignore);
        let paths: Vec<&str> = files.iter().map(|f| f.relative_path.as_str()).collect();
        assert_eq!(paths, vec!["keep.txt"]);
    }

    #[test]
    fn summarized_root_collects_nothing() {
        let tmp = TempDir::new().expect("tmp");
        let root = tmp.path().join("logs");
        fs::create_dir_all(&root).expect("mkdir");
        fs::write(root.join("run.log"), "x").expect("write");

        assert!(collect_files(&root, &Config::default(), &IgnorePatterns::default()).is_empty());
    }
}
