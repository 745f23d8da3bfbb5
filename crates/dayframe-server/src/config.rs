use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};

/// Server configuration.
///
/// The token signing secret lives here — injected configuration, not a
/// process-wide constant — so it can be rotated per deployment and swapped
/// in tests.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Directory holding the catalog database and the `photos` tree.
    pub data_dir: PathBuf,
    /// HMAC secret for bearer tokens.
    pub token_secret: String,
    /// Token time-to-live in seconds.
    pub token_ttl_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8000".parse().expect("valid default addr"),
            data_dir: PathBuf::from("."),
            // Development fallback; deployments set their own.
            token_secret: "dayframe-dev-secret".to_string(),
            token_ttl_secs: 30 * 60,
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file. Missing keys fall back to
    /// defaults.
    pub fn from_toml_file(path: impl AsRef<Path>) -> ServerResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        toml::from_str(&raw).map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Path of the catalog database inside the data directory.
    pub fn catalog_path(&self) -> PathBuf {
        self.data_dir.join("dayframe.db")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = ServerConfig::default();
        assert_eq!(c.bind_addr, "127.0.0.1:8000".parse::<SocketAddr>().unwrap());
        assert_eq!(c.token_ttl_secs, 1800);
        assert_eq!(c.catalog_path(), PathBuf::from("./dayframe.db"));
    }

    #[test]
    fn from_toml_with_partial_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dayframe.toml");
        std::fs::write(
            &path,
            "bind_addr = \"0.0.0.0:9000\"\ntoken_secret = \"s3cret\"\n",
        )
        .unwrap();
        let c = ServerConfig::from_toml_file(&path).unwrap();
        assert_eq!(c.bind_addr, "0.0.0.0:9000".parse::<SocketAddr>().unwrap());
        assert_eq!(c.token_secret, "s3cret");
        // Unset keys keep defaults.
        assert_eq!(c.token_ttl_secs, 1800);
    }

    #[test]
    fn from_toml_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dayframe.toml");
        std::fs::write(&path, "bind_addr = 12").unwrap();
        assert!(matches!(
            ServerConfig::from_toml_file(&path),
            Err(ServerError::Config(_))
        ));
    }
}
