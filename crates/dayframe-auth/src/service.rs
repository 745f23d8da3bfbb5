//! Registration, login, and token verification over the admin store.

use std::sync::Arc;
use std::time::Duration;

use dayframe_catalog::{AdminStore, CatalogError};
use dayframe_types::Admin;
use tracing::debug;

use crate::error::{AuthError, AuthResult};
use crate::password::{hash_password, verify_password};
use crate::token::TokenSigner;

/// Default token time-to-live: 30 minutes.
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(30 * 60);

/// Credential store and token service.
///
/// Holds the admin store and the token signer; every mutating request in
/// the system passes through [`CredentialService::verify_token`] before
/// touching any other store.
pub struct CredentialService {
    admins: Arc<dyn AdminStore>,
    signer: TokenSigner,
    ttl: Duration,
}

impl CredentialService {
    /// Build a service with the default 30-minute token TTL.
    pub fn new(admins: Arc<dyn AdminStore>, signer: TokenSigner) -> Self {
        Self::with_ttl(admins, signer, DEFAULT_TOKEN_TTL)
    }

    pub fn with_ttl(admins: Arc<dyn AdminStore>, signer: TokenSigner, ttl: Duration) -> Self {
        Self {
            admins,
            signer,
            ttl,
        }
    }

    /// Register a new admin. Fails [`AuthError::DuplicateEmail`] if the
    /// email is taken; the uniqueness check is the store's atomic insert.
    pub fn register(&self, email: &str, password: &str) -> AuthResult<Admin> {
        let hashed = hash_password(password)?;
        match self.admins.insert_admin(email, &hashed) {
            Ok(admin) => {
                debug!(email = %admin.email, "registered admin");
                Ok(admin)
            }
            Err(CatalogError::DuplicateEmail(email)) => Err(AuthError::DuplicateEmail(email)),
            Err(err) => Err(err.into()),
        }
    }

    /// Verify an email/password pair.
    ///
    /// Unknown email and wrong password both fail
    /// [`AuthError::AuthenticationFailed`] — the caller cannot tell which.
    pub fn authenticate(&self, email: &str, password: &str) -> AuthResult<Admin> {
        let admin = self
            .admins
            .find_by_email(email)?
            .ok_or(AuthError::AuthenticationFailed)?;
        if !verify_password(password, &admin.hashed_password) {
            return Err(AuthError::AuthenticationFailed);
        }
        Ok(admin)
    }

    /// Issue a bearer token for an admin, expiring after the configured TTL.
    pub fn issue_token(&self, admin: &Admin) -> AuthResult<String> {
        self.signer.issue(&admin.email, self.ttl)
    }

    /// Issue a token with an explicit TTL (tests, short-lived grants).
    pub fn issue_token_with_ttl(&self, admin: &Admin, ttl: Duration) -> AuthResult<String> {
        self.signer.issue(&admin.email, ttl)
    }

    /// Verify a token and resolve its subject against the current admin
    /// set.
    ///
    /// Fails [`AuthError::InvalidToken`] on signature/expiry problems and
    /// [`AuthError::UnknownSubject`] when the token is sound but its admin
    /// no longer exists.
    pub fn verify_token(&self, token: &str) -> AuthResult<Admin> {
        let claims = self.signer.verify(token)?;
        self.admins
            .find_by_email(&claims.sub)?
            .ok_or(AuthError::UnknownSubject(claims.sub))
    }

    /// List registered admins (read-only surface).
    pub fn list_admins(&self, offset: u32, limit: u32) -> AuthResult<Vec<Admin>> {
        Ok(self.admins.list_admins(offset, limit)?)
    }
}
