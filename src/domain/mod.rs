//! Core domain types and models
//!
//! Defines the report configuration, collected file records, and the
//! counters accumulated by the tree and content passes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Default name of the generated report.
pub const DEFAULT_OUTPUT_FILE: &str = "directory_info.txt";

/// Name of the ignore file read from the project root.
pub const IGNORE_FILE_NAME: &str = ".gitignore";

/// Size and count limits applied by the tree and content passes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limits {
    /// Files listed per directory in the tree view
    #[serde(default = "default_max_files_per_dir")]
    pub max_files_per_dir: usize,

    /// Files up to this size (bytes) are emitted in full
    #[serde(default = "default_max_file_size_full")]
    pub max_file_size_full: u64,

    /// Files above this size (bytes) are not read at all
    #[serde(default = "default_max_file_size_partial")]
    pub max_file_size_partial: u64,

    /// Lines kept when a file is truncated
    #[serde(default = "default_max_lines_preview")]
    pub max_lines_preview: usize,

    /// JSON files below this size (bytes) are emitted verbatim
    #[serde(default = "default_json_full_threshold")]
    pub json_full_threshold: u64,

    /// Leading records sampled from JSONL files
    #[serde(default = "default_max_jsonl_lines")]
    pub max_jsonl_lines: usize,

    /// Markdown notebook cells at or above this length are omitted
    #[serde(default = "default_max_markdown_cell_chars")]
    pub max_markdown_cell_chars: usize,

    /// Characters per token used for the token estimate
    #[serde(default = "default_chars_per_token")]
    pub chars_per_token: usize,

    /// Nesting depth rendered by the JSON summarizer
    #[serde(default = "default_json_max_depth")]
    pub json_max_depth: usize,

    /// Keys/items rendered per JSON object or array
    #[serde(default = "default_json_max_items")]
    pub json_max_items: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_files_per_dir: default_max_files_per_dir(),
            max_file_size_full: default_max_file_size_full(),
            max_file_size_partial: default_max_file_size_partial(),
            max_lines_preview: default_max_lines_preview(),
            json_full_threshold: default_json_full_threshold(),
            max_jsonl_lines: default_max_jsonl_lines(),
            max_markdown_cell_chars: default_max_markdown_cell_chars(),
            chars_per_token: default_chars_per_token(),
            json_max_depth: default_json_max_depth(),
            json_max_items: default_json_max_items(),
        }
    }
}

fn default_max_files_per_dir() -> usize {
    30
}
fn default_max_file_size_full() -> u64 {
    20_000
}
fn default_max_file_size_partial() -> u64 {
    200_000
}
fn default_max_lines_preview() -> usize {
    100
}
fn default_json_full_threshold() -> u64 {
    5_000
}
fn default_max_jsonl_lines() -> usize {
    5
}
fn default_max_markdown_cell_chars() -> usize {
    500
}
fn default_chars_per_token() -> usize {
    4
}
fn default_json_max_depth() -> usize {
    4
}
fn default_json_max_items() -> usize {
    5
}

/// Main configuration for project-context
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory to scan (defaults to the current directory)
    #[serde(default)]
    pub root: Option<PathBuf>,

    #[serde(default = "default_output")]
    pub output: PathBuf,

    #[serde(default = "default_true")]
    pub include_git: bool,

    #[serde(default = "default_true")]
    pub respect_gitignore: bool,

    #[serde(default = "default_true")]
    pub include_timestamp: bool,

    #[serde(default)]
    pub quiet: bool,

    /// Directory names (or `*suffix` patterns) never entered
    #[serde(default = "default_exclude_dirs")]
    pub exclude_dirs: BTreeSet<String>,

    /// Directory names reported only as an aggregate line
    #[serde(default = "default_summarize_dirs")]
    pub summarize_dirs: BTreeSet<String>,

    /// Binary/media extensions (with leading dot) that are never read
    #[serde(default = "default_skip_extensions")]
    pub skip_extensions: BTreeSet<String>,

    /// Extensions (with leading dot) treated as text
    #[serde(default = "default_text_extensions")]
    pub text_extensions: BTreeSet<String>,

    /// Well-known file names processed first
    #[serde(default = "default_priority_files")]
    pub priority_files: BTreeSet<String>,

    #[serde(default)]
    pub limits: Limits,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: None,
            output: default_output(),
            include_git: true,
            respect_gitignore: true,
            include_timestamp: true,
            quiet: false,
            exclude_dirs: default_exclude_dirs(),
            summarize_dirs: default_summarize_dirs(),
            skip_extensions: default_skip_extensions(),
            text_extensions: default_text_extensions(),
            priority_files: default_priority_files(),
            limits: Limits::default(),
        }
    }
}

impl Config {
    /// Name of the output file, hidden from the tree and the content pass.
    pub fn output_file_name(&self) -> Option<&str> {
        self.output.file_name().and_then(|n| n.to_str())
    }

    /// Whether a directory name matches the exclusion set.
    ///
    /// Patterns are exact names, or `*suffix` to match any name ending in
    /// `suffix` (e.g. `*.egg-info`).
    pub fn is_excluded_dir(&self, name: &str) -> bool {
        if self.exclude_dirs.contains(name) {
            return true;
        }
        self.exclude_dirs
            .iter()
            .filter_map(|pattern| pattern.strip_prefix('*'))
            .any(|suffix| name.ends_with(suffix))
    }

    pub fn is_summarized_dir(&self, name: &str) -> bool {
        self.summarize_dirs.contains(name)
    }

    /// `extension` is lowercase with a leading dot, or empty.
    pub fn is_skipped_extension(&self, extension: &str) -> bool {
        !extension.is_empty() && self.skip_extensions.contains(extension)
    }

    pub fn is_priority_file(&self, file_name: &str) -> bool {
        self.priority_files.contains(file_name)
    }

    /// Whether a file is readable as text: allow-listed extension, priority
    /// file name, or no extension at all.
    pub fn is_text_file(&self, file_name: &str, extension: &str) -> bool {
        extension.is_empty()
            || self.text_extensions.contains(extension)
            || self.is_priority_file(file_name)
    }
}

fn default_true() -> bool {
    true
}

fn default_output() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_FILE)
}

fn to_set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn default_exclude_dirs() -> BTreeSet<String> {
    to_set(&[
        ".git",
        "venv",
        "env",
        ".venv",
        "__pycache__",
        ".idea",
        ".vscode",
        "node_modules",
        ".mypy_cache",
        ".pytest_cache",
        ".tox",
        ".eggs",
        "*.egg-info",
        "dist",
        "build",
        ".cache",
        ".coverage",
        "htmlcov",
        ".ipynb_checkpoints",
        ".terraform",
        ".serverless",
    ])
}

pub fn default_summarize_dirs() -> BTreeSet<String> {
    to_set(&[
        "signals",
        "unprocessed",
        "data",
        "datasets",
        "logs",
        "outputs",
        "checkpoints",
        "models",
        "weights",
        "assets",
        "static",
        "migrations",
    ])
}

pub fn default_skip_extensions() -> BTreeSet<String> {
    to_set(&[
        // Audio
        ".flac",
        ".wav",
        ".mp3",
        ".ogg",
        ".m4a",
        ".aac",
        ".wma",
        ".aiff",
        // Video
        ".mp4",
        ".avi",
        ".mkv",
        ".mov",
        ".wmv",
        ".webm",
        ".flv",
        // Images
        ".png",
        ".jpg",
        ".jpeg",
        ".gif",
        ".bmp",
        ".tiff",
        ".ico",
        ".webp",
        ".svg",
        // Documents
        ".pdf",
        ".doc",
        ".docx",
        ".xls",
        ".xlsx",
        ".ppt",
        ".pptx",
        ".odt",
        // Archives
        ".zip",
        ".rar",
        ".7z",
        ".tar",
        ".gz",
        ".bz2",
        ".xz",
        ".zst",
        // Binaries
        ".exe",
        ".dll",
        ".so",
        ".dylib",
        ".bin",
        ".o",
        ".a",
        ".lib",
        // Data/model files
        ".pkl",
        ".pickle",
        ".npy",
        ".npz",
        ".h5",
        ".hdf5",
        ".pt",
        ".pth",
        ".ckpt",
        ".safetensors",
        ".onnx",
        ".pb",
        // Database
        ".db",
        ".sqlite",
        ".sqlite3",
        ".mdb",
        // Other
        ".pyc",
        ".pyo",
        ".class",
        ".jar",
        ".war",
        ".woff",
        ".woff2",
        ".ttf",
        ".eot",
    ])
}

pub fn default_text_extensions() -> BTreeSet<String> {
    to_set(&[
        // Code
        ".py",
        ".js",
        ".ts",
        ".jsx",
        ".tsx",
        ".java",
        ".c",
        ".cpp",
        ".h",
        ".hpp",
        ".cs",
        ".go",
        ".rs",
        ".rb",
        ".php",
        ".swift",
        ".kt",
        ".scala",
        ".r",
        ".lua",
        ".pl",
        ".pm",
        ".sh",
        ".bash",
        ".zsh",
        ".fish",
        ".ps1",
        ".bat",
        ".cmd",
        // Config
        ".json",
        ".yaml",
        ".yml",
        ".toml",
        ".ini",
        ".cfg",
        ".conf",
        ".config",
        ".env",
        ".properties",
        // Documentation
        ".md",
        ".rst",
        ".txt",
        ".adoc",
        // Web
        ".html",
        ".htm",
        ".css",
        ".scss",
        ".sass",
        ".less",
        ".vue",
        ".svelte",
        // Data
        ".xml",
        ".csv",
        ".sql",
    ])
}

pub fn default_priority_files() -> BTreeSet<String> {
    to_set(&[
        "README.md",
        "readme.md",
        "README.rst",
        "README.txt",
        "README",
        "pyproject.toml",
        "setup.py",
        "setup.cfg",
        "requirements.txt",
        "package.json",
        "Cargo.toml",
        "go.mod",
        "Gemfile",
        "pom.xml",
        "Makefile",
        "Dockerfile",
        "docker-compose.yml",
        "docker-compose.yaml",
        ".env.example",
        "config.yaml",
        "config.json",
        "settings.py",
        "main.py",
        "app.py",
        "index.js",
        "index.ts",
        "main.go",
        "main.rs",
    ])
}

/// Processing rank of a collected file; lower ranks are emitted first.
pub fn priority_rank(config: &Config, file_name: &str, extension: &str) -> u8 {
    if config.is_priority_file(file_name) {
        0
    } else if file_name.to_lowercase().starts_with("readme") {
        1
    } else if matches!(extension, ".py" | ".js" | ".ts" | ".go" | ".rs") {
        2
    } else if matches!(extension, ".json" | ".yaml" | ".yml" | ".toml") {
        3
    } else {
        4
    }
}

/// A file selected for the content pass.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct FileRecord {
    /// Processing rank (see [`priority_rank`])
    pub priority: u8,

    /// Path relative to the root, `/`-separated
    pub relative_path: String,

    /// Absolute path to the file
    pub path: PathBuf,
}

/// Counters accumulated by the content pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ContentStats {
    pub processed: usize,
    pub skipped: usize,
    pub errors: usize,
    /// Characters emitted across all rendered files
    pub total_chars: usize,
}

/// Counters accumulated by the tree pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TreeStats {
    /// Directories visited below the root
    pub total_dirs: usize,
    /// Show-able files (including those beyond the per-directory cap)
    pub total_files: usize,
    /// Files hidden because of their extension
    pub skipped_files: usize,
    pub summarized_dirs: usize,
    pub summarized_files: usize,
}
