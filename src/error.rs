use thiserror::Error;

/// Errors raised inside the page core. None of them are fatal: callers log and
/// fall back to session-only behaviour.
#[derive(Error, Debug)]
pub enum PageError {
    #[error("Storage access failed: {0}")]
    Storage(String),
    #[error("No storage backend is available")]
    StorageUnavailable,
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("DOM element {id:?} not found")]
    MissingElement { id: String },
    #[error("No browser window")]
    NoWindow,
}

pub type PageResult<T> = Result<T, PageError>;
