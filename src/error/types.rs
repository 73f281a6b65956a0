use thiserror::Error;

/// Unified result type for the rowlay crate.
pub type Result<T> = std::result::Result<T, ComposeError>;

/// Errors surfaced by the row layout pipeline.
#[derive(Debug, Error)]
pub enum ComposeError {
    #[error("layout `{0}` is not registered")]
    UnknownLayout(String),
    #[error("layout `{0}` declares no regions")]
    EmptyLayout(String),
    #[error("renderer failure: {0}")]
    Render(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
