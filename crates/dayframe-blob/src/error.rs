use dayframe_types::ArtDate;

/// Errors from blob store operations.
#[derive(Debug, thiserror::Error)]
pub enum BlobError {
    /// No blob exists at the canonical path for this date.
    #[error("no image stored for date {0}")]
    NotFound(ArtDate),

    /// I/O error from the underlying filesystem.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for blob operations.
pub type BlobResult<T> = Result<T, BlobError>;
