use std::sync::Arc;

use dayframe_auth::{CredentialService, TokenSigner};
use dayframe_blob::{BlobStore, FsBlobStore};
use dayframe_catalog::{AdminStore, SqliteCatalog};
use dayframe_service::ItemService;
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::build_router;

/// Dayframe HTTP server.
pub struct DayframeServer {
    config: ServerConfig,
}

impl DayframeServer {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Wire the stores and services from the configuration.
    pub fn build_service(&self) -> ServerResult<Arc<ItemService>> {
        std::fs::create_dir_all(&self.config.data_dir)?;
        let catalog = Arc::new(SqliteCatalog::open(self.config.catalog_path())?);
        let blobs = Arc::new(FsBlobStore::new(&self.config.data_dir));
        let credentials = CredentialService::with_ttl(
            Arc::clone(&catalog) as Arc<dyn AdminStore>,
            TokenSigner::new(self.config.token_secret.as_bytes().to_vec()),
            std::time::Duration::from_secs(self.config.token_ttl_secs),
        );
        Ok(Arc::new(ItemService::new(
            catalog,
            blobs as Arc<dyn BlobStore>,
            credentials,
        )))
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> ServerResult<axum::Router> {
        Ok(build_router(self.build_service()?))
    }

    /// Start serving requests.
    pub async fn serve(self) -> ServerResult<()> {
        let app = self.router()?;
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!("dayframe listening on {}", self.config.bind_addr);
        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}
