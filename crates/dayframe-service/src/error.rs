use dayframe_auth::AuthError;
use dayframe_blob::BlobError;
use dayframe_catalog::CatalogError;
use dayframe_types::{ArtDate, ValidationError};

/// Errors from orchestrated item operations.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The item is seed data (`original = true`): immutable and
    /// undeletable through this path.
    #[error("item for {0} is protected seed data")]
    ProtectedRecord(ArtDate),

    /// Consistency fault: a catalog row exists but its blob is missing.
    /// Never silently served as empty content.
    #[error("item for {0} is cataloged but its image file is missing")]
    MissingBlob(ArtDate),

    #[error("auth error: {0}")]
    Auth(#[from] AuthError),

    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("blob error: {0}")]
    Blob(#[from] BlobError),

    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Result alias for orchestrated operations.
pub type ServiceResult<T> = Result<T, ServiceError>;
