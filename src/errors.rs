use thiserror::Error;

/// Error type that captures common journal, storage, and export failures.
#[derive(Debug, Error)]
pub enum FluidError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Storage error: {0}")]
    StorageError(String),
    #[error("Export error: {0}")]
    ExportError(String),
}
