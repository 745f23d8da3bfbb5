//! Credential store and token service for Dayframe.
//!
//! Two concerns live here:
//!
//! - **Credentials** — admin registration and password verification.
//!   Passwords are stored as salted argon2id PHC strings, never plaintext.
//! - **Tokens** — stateless signed bearer tokens. A token is a compact
//!   string carrying `sub` (admin email) and `exp` (absolute expiry),
//!   HMAC-SHA256 signed with a secret injected at construction. No
//!   server-side session state exists; validity is re-checked on every
//!   call by recomputing the signature, checking expiry, and resolving
//!   the subject against the current admin set.
//!
//! There is deliberately no revocation list: a leaked token stays valid
//! until natural expiry.

pub mod error;
pub mod password;
pub mod service;
pub mod token;

pub use error::{AuthError, AuthResult};
pub use service::{CredentialService, DEFAULT_TOKEN_TTL};
pub use token::{TokenClaims, TokenSigner};
