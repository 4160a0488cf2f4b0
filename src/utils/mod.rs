//! Utility functions

pub mod encoding;
pub mod tokens;

pub use encoding::{decode_lossy, read_file_lossy};
pub use tokens::estimate_tokens;

use std::path::Path;

/// Format a number with thousands separators (e.g. 1048576 → "1,048,576").
pub fn format_with_commas(n: u64) -> String {
    let s = n.to_string();
    let bytes = s.as_bytes();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, &b) in bytes.iter().enumerate() {
        if i > 0 && (s.len() - i).is_multiple_of(3) {
            result.push(',');
        }
        result.push(b as char);
    }
    result
}

/// Human-readable size: whole bytes below 1 KiB, one decimal above
/// (e.g. `512B`, `1.5KB`, `3.0MB`).
pub fn format_size(size_bytes: u64) -> String {
    if size_bytes < 1024 {
        return format!("{size_bytes}B");
    }
    let mut size = size_bytes as f64 / 1024.0;
    for unit in ["KB", "MB", "GB"] {
        if size < 1024.0 {
            return format!("{size:.1}{unit}");
        }
        size /= 1024.0;
    }
    format!("{size:.1}TB")
}

/// Lowercased extension with its leading dot, or an empty string.
///
/// Dotfiles such as `.gitignore` have no extension.
pub fn extension_of(file_name: &str) -> String {
    Path::new(file_name)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}

/// Normalize a relative path to forward slashes.
pub fn normalize_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::{extension_of, format_size, format_with_commas, normalize_path};
    use std::path::Path;

    #[test]
    fn formats_thousands() {
        assert_eq!(format_with_commas(0), "0");
        assert_eq!(format_with_commas(999), "999");
        assert_eq!(format_with_commas(1_048_576), "1,048,576");
    }

    #[test]
    fn formats_sizes_per_unit() {
        assert_eq!(format_size(0), "0B");
        assert_eq!(format_size(1023), "1023B");
        assert_eq!(format_size(1536), "1.5KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0MB");
        assert_eq!(format_size(2 * 1024 * 1024 * 1024), "2.0GB");
        assert_eq!(format_size(5 * 1024 * 1024 * 1024 * 1024), "5.0TB");
    }

    #[test]
    fn extensions_are_lowercased_and_dotted() {
        assert_eq!(extension_of("Photo.PNG"), ".png");
        assert_eq!(extension_of("archive.tar.gz"), ".gz");
        assert_eq!(extension_of(".gitignore"), "");
        assert_eq!(extension_of("Makefile"), "");
    }

    #[test]
    fn joins_components_with_forward_slashes() {
        assert_eq!(normalize_path(Path::new("src/cli/mod.rs")), "src/cli/mod.rs");
    }
}
