use dayframe_catalog::CatalogError;

/// Errors from credential and token operations.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Registration with an email that is already taken.
    #[error("an admin is already registered for {0}")]
    DuplicateEmail(String),

    /// Unknown email or wrong password. Deliberately indistinguishable to
    /// the caller.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// The token is malformed, carries a bad signature, or has expired.
    #[error("invalid token: {0}")]
    InvalidToken(&'static str),

    /// The token verified but its subject no longer resolves to an admin.
    #[error("token subject no longer exists: {0}")]
    UnknownSubject(String),

    /// Password hashing internals failed.
    #[error("password hashing error: {0}")]
    Hash(String),

    /// Token payload could not be encoded.
    #[error("token encoding error: {0}")]
    TokenEncoding(String),

    /// Error from the admin store.
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

/// Result alias for auth operations.
pub type AuthResult<T> = Result<T, AuthError>;
