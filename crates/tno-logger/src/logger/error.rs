use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("Failed to create log directory: {source}")]
    DirectoryCreationFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to open log file: {source}")]
    FileOpenFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Invalid log level: {0} (expected: debug|info|warn|error|dpanic|panic|fatal)")]
    InvalidLogLevel(String),
}

impl LoggerError {
    /// Filesystem path involved in a sink failure, if any.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            LoggerError::DirectoryCreationFailed { path, .. }
            | LoggerError::FileOpenFailed { path, .. } => Some(path),
            LoggerError::InvalidLogLevel(_) => None,
        }
    }
}
