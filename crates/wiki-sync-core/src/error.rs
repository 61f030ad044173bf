use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while synchronizing the wiki tree.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("failed to clean {path}: {source}")]
    Clean { path: PathBuf, source: io::Error },

    #[error("failed to walk {path}: {source}")]
    Walk {
        path: PathBuf,
        source: walkdir::Error,
    },

    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("{path} is not valid UTF-8")]
    NonUtf8 { path: PathBuf },

    #[error("failed to write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

pub type SyncResult<T> = Result<T, SyncError>;
