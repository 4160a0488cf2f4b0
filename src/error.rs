//! Error types for report generation.
//!
//! Only fatal conditions live here. Per-file and per-directory failures are
//! rendered inline in the report instead of being returned.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContextError {
    /// Configuration could not be loaded or merged.
    #[error("invalid configuration: {0}")]
    Config(#[from] Box<figment::Error>),

    /// The root path does not exist or is not a directory.
    #[error("root path is not a directory: {path}")]
    RootNotDirectory { path: PathBuf },

    /// The report file could not be created or written.
    #[error("cannot write report to {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ContextError {
    pub fn output_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::OutputWrite { path: path.into(), source }
    }
}

impl From<figment::Error> for ContextError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

/// Convenience alias for results using `ContextError`.
pub type Result<T> = std::result::Result<T, ContextError>;
