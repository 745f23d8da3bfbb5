//! Password hashing with argon2id.
//!
//! Hashes are stored in PHC string format, which embeds the algorithm,
//! parameters, and salt — verification needs nothing but the stored
//! string and the candidate password.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::error::{AuthError, AuthResult};

/// Hash a password with a freshly generated salt.
pub fn hash_password(password: &str) -> AuthResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::Hash(e.to_string()))?;
    Ok(hash.to_string())
}

/// Verify a candidate password against a stored PHC hash.
///
/// The argon2 comparison is constant-time. An unparseable stored hash
/// counts as a mismatch rather than an error, so a corrupt row cannot be
/// used to probe internals.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify() {
        let hash = hash_password("hunter2").unwrap();
        assert!(verify_password("hunter2", &hash));
    }

    #[test]
    fn wrong_password_fails() {
        let hash = hash_password("hunter2").unwrap();
        assert!(!verify_password("hunter3", &hash));
    }

    #[test]
    fn hash_is_salted() {
        let h1 = hash_password("same").unwrap();
        let h2 = hash_password("same").unwrap();
        assert_ne!(h1, h2);
    }

    #[test]
    fn hash_never_contains_plaintext() {
        let hash = hash_password("visible-password").unwrap();
        assert!(!hash.contains("visible-password"));
        assert!(hash.starts_with("$argon2"));
    }

    #[test]
    fn garbage_stored_hash_is_mismatch() {
        assert!(!verify_password("anything", "not a phc string"));
        assert!(!verify_password("anything", ""));
    }
}
