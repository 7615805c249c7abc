//! Crate-level error type.

use std::path::PathBuf;

use crate::config::ConfigError;
use crate::data::LoaderError;

/// Errors that can stop a tumor-network run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("data directory not found: {}", .0.display())]
    DataDir(PathBuf),

    #[error("I/O error: {source} ({})", path.display())]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("dataset error: {0}")]
    Loader(#[from] LoaderError),

    #[error("graph serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("visualization not found at {}; run `tumor-network render` first", .0.display())]
    MissingOutput(PathBuf),
}

impl Error {
    /// Wrap an `io::Error` with the path it happened on.
    pub fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Self::Io {
            source,
            path: path.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
