use dayframe_types::ArtDate;

/// Errors from catalog storage operations.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// An item row already exists for this date (UNIQUE constraint on
    /// `item.created`).
    #[error("an item already exists for date {0}")]
    DateAlreadyExists(ArtDate),

    /// An admin already exists with this email (UNIQUE constraint on
    /// `admin.email`).
    #[error("an admin is already registered for {0}")]
    DuplicateEmail(String),

    /// No item row exists for this date.
    #[error("no item found for date {0}")]
    ItemNotFound(ArtDate),

    /// The database schema is newer than this binary supports.
    #[error("schema version {db_version} is newer than supported {latest_supported}")]
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },

    /// Error from the underlying SQLite engine.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result alias for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;
