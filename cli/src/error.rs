//! Error types for reading network inputs and settings.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error: {source} (path: {path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("line {line}: expected two delimited identifiers, got '{content}'")]
    MalformedEdge { line: usize, content: String },

    #[error("invalid settings file {path}: {source}")]
    Config {
        source: toml::de::Error,
        path: PathBuf,
    },
}

pub type Result<T> = std::result::Result<T, LoadError>;
