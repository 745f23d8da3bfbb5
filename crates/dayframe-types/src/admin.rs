use std::fmt;

use serde::Serialize;

/// An administrator account.
///
/// Owned exclusively by the credential store: admins are created by
/// registration and never updated or deleted through the mutation path.
/// `hashed_password` holds a PHC-format adaptive hash, never plaintext,
/// and is excluded from serialization and redacted in Debug output.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Admin {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing)]
    pub hashed_password: String,
}

impl fmt::Debug for Admin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Admin")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("hashed_password", &"<redacted>")
            .finish()
    }
}
