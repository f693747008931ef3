use std::path::PathBuf;

use thiserror::Error;

/// Unified application error type. Every variant aborts the run.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Path to scan does not exist: {}", .0.display())]
    PathNotFound(PathBuf),
    #[error("Path to scan is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
    #[error("No user.name configured for the repository at {}", .0.display())]
    MissingAuthorConfig(PathBuf),
    #[error("Error from git. {0}")]
    Git(#[from] git2::Error),
    #[error("Error while walking the directory tree. {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Errored while handling a file. {0}")]
    Io(#[from] std::io::Error),
    #[error("Error serializing json. {0}")]
    SerdeJsonSer(#[from] serde_json::Error),
    #[error("Error while writing information to a string. {0}")]
    BufferWrite(#[from] std::fmt::Error),
    #[error("Error formatting a date. {0}")]
    TimeFormat(#[from] time::error::Format),
    #[error("Timestamp out of range. {0}")]
    TimeRange(#[from] time::error::ComponentRange),
    #[error("Runtime error. {0}")]
    TokioJoin(#[from] tokio::task::JoinError),
}

/// Convenience alias for results that bubble `AppError`.
pub type AppResult<T> = Result<T, AppError>;
