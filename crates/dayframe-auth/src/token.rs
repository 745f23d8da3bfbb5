//! Compact HMAC-signed bearer tokens.
//!
//! Wire format: `v1.<payload>.<sig>` where `payload` is the base64url
//! (no padding) JSON claims and `sig` is the base64url HMAC-SHA256 of the
//! encoded payload. Self-contained: verification recomputes the signature
//! and checks expiry, with no server-side state.

use std::time::Duration;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::Utc;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::error::{AuthError, AuthResult};

type HmacSha256 = Hmac<Sha256>;

const TOKEN_VERSION: &str = "v1";
const MAX_TOKEN_LEN: usize = 1024;

/// Claims carried inside a token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Admin email the token was issued to.
    pub sub: String,
    /// Absolute expiry, unix seconds. The token is valid while `now < exp`.
    pub exp: i64,
}

/// Issues and verifies signed bearer tokens.
///
/// The signing secret is injected at construction — configuration, not
/// global state — so it can be rotated or swapped in tests.
#[derive(Clone)]
pub struct TokenSigner {
    secret: Vec<u8>,
}

impl TokenSigner {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Issue a token for `subject` expiring `ttl` from now.
    pub fn issue(&self, subject: &str, ttl: Duration) -> AuthResult<String> {
        self.issue_at(subject, ttl, Utc::now().timestamp())
    }

    /// Issue a token with an explicit "now" for deterministic tests.
    pub fn issue_at(&self, subject: &str, ttl: Duration, now: i64) -> AuthResult<String> {
        let claims = TokenClaims {
            sub: subject.to_string(),
            exp: now + ttl.as_secs() as i64,
        };
        let payload_bytes =
            serde_json::to_vec(&claims).map_err(|e| AuthError::TokenEncoding(e.to_string()))?;
        let payload = URL_SAFE_NO_PAD.encode(payload_bytes);
        let sig = URL_SAFE_NO_PAD.encode(self.mac(&payload)?);
        Ok(format!("{TOKEN_VERSION}.{payload}.{sig}"))
    }

    /// Verify a token and return its claims.
    ///
    /// Fails [`AuthError::InvalidToken`] on malformed input, wrong
    /// signature, or expiry. Subject resolution is the caller's concern.
    pub fn verify(&self, token: &str) -> AuthResult<TokenClaims> {
        self.verify_at(token, Utc::now().timestamp())
    }

    /// Verify with an explicit "now" for deterministic tests.
    pub fn verify_at(&self, token: &str, now: i64) -> AuthResult<TokenClaims> {
        if token.len() > MAX_TOKEN_LEN {
            return Err(AuthError::InvalidToken("token exceeds max length"));
        }
        let mut parts = token.split('.');
        let (version, payload, sig) = match (parts.next(), parts.next(), parts.next(), parts.next())
        {
            (Some(v), Some(p), Some(s), None) => (v, p, s),
            _ => return Err(AuthError::InvalidToken("malformed token")),
        };
        if version != TOKEN_VERSION {
            return Err(AuthError::InvalidToken("unsupported token version"));
        }

        // Signature first: nothing from the payload is trusted until the
        // MAC checks out. verify_slice is constant-time.
        let expected = URL_SAFE_NO_PAD
            .decode(sig)
            .map_err(|_| AuthError::InvalidToken("malformed signature"))?;
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .map_err(|e| AuthError::TokenEncoding(e.to_string()))?;
        mac.update(payload.as_bytes());
        mac.verify_slice(&expected)
            .map_err(|_| AuthError::InvalidToken("signature mismatch"))?;

        let payload_bytes = URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|_| AuthError::InvalidToken("malformed payload"))?;
        let claims: TokenClaims = serde_json::from_slice(&payload_bytes)
            .map_err(|_| AuthError::InvalidToken("malformed claims"))?;

        if now >= claims.exp {
            return Err(AuthError::InvalidToken("token expired"));
        }
        Ok(claims)
    }

    fn mac(&self, payload: &str) -> AuthResult<Vec<u8>> {
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .map_err(|e| AuthError::TokenEncoding(e.to_string()))?;
        mac.update(payload.as_bytes());
        Ok(mac.finalize().into_bytes().to_vec())
    }
}

impl std::fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TokenSigner(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signer() -> TokenSigner {
        TokenSigner::new(b"test-secret".to_vec())
    }

    #[test]
    fn issue_and_verify() {
        let signer = signer();
        let token = signer.issue_at("a@x.com", Duration::from_secs(60), 1000).unwrap();
        let claims = signer.verify_at(&token, 1000).unwrap();
        assert_eq!(claims.sub, "a@x.com");
        assert_eq!(claims.exp, 1060);
    }

    #[test]
    fn zero_ttl_expires_immediately() {
        let signer = signer();
        let token = signer.issue_at("a@x.com", Duration::ZERO, 1000).unwrap();
        let err = signer.verify_at(&token, 1000).unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken(_)));
    }

    #[test]
    fn expired_token_rejected() {
        let signer = signer();
        let token = signer.issue_at("a@x.com", Duration::from_secs(60), 1000).unwrap();
        assert!(signer.verify_at(&token, 1059).is_ok());
        assert!(signer.verify_at(&token, 1060).is_err());
    }

    #[test]
    fn garbage_is_invalid() {
        let signer = signer();
        for bad in ["", "v1", "v1.abc", "not.a.token.at.all", "v2.x.y"] {
            assert!(
                matches!(signer.verify_at(bad, 0), Err(AuthError::InvalidToken(_))),
                "accepted: {bad}"
            );
        }
    }

    #[test]
    fn tampered_payload_rejected() {
        let signer = signer();
        let token = signer.issue_at("a@x.com", Duration::from_secs(60), 1000).unwrap();
        let mut parts: Vec<&str> = token.split('.').collect();
        let forged = URL_SAFE_NO_PAD.encode(r#"{"sub":"evil@x.com","exp":9999999999}"#);
        parts[1] = &forged;
        let tampered = parts.join(".");
        assert!(signer.verify_at(&tampered, 1000).is_err());
    }

    #[test]
    fn wrong_secret_rejected() {
        let token = signer().issue_at("a@x.com", Duration::from_secs(60), 1000).unwrap();
        let other = TokenSigner::new(b"other-secret".to_vec());
        assert!(matches!(
            other.verify_at(&token, 1000),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn debug_redacts_secret() {
        let debug = format!("{:?}", signer());
        assert!(debug.contains("redacted"));
        assert!(!debug.contains("test-secret"));
    }
}
