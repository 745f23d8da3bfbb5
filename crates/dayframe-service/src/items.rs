//! Token-gated item lifecycle operations.

use std::sync::Arc;

use dayframe_auth::CredentialService;
use dayframe_blob::{BlobError, BlobStore};
use dayframe_catalog::{CatalogError, ItemStore, SqliteCatalog};
use dayframe_types::{ArtDate, Item, NewItem};
use tracing::{info, warn};

use crate::error::{ServiceError, ServiceResult};

/// User-supplied fields for a create or edit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ItemDraft {
    pub title: Option<String>,
    pub description: Option<String>,
    pub is_private: bool,
}

/// Orchestrates catalog and blob mutations for item lifecycle operations.
///
/// Every mutating method verifies the bearer token first; a token failure
/// leaves both stores untouched. Read methods bypass authentication.
pub struct ItemService {
    catalog: Arc<SqliteCatalog>,
    blobs: Arc<dyn BlobStore>,
    credentials: CredentialService,
}

impl ItemService {
    pub fn new(
        catalog: Arc<SqliteCatalog>,
        blobs: Arc<dyn BlobStore>,
        credentials: CredentialService,
    ) -> Self {
        Self {
            catalog,
            blobs,
            credentials,
        }
    }

    /// The credential service, for the registration/login surface.
    pub fn credentials(&self) -> &CredentialService {
        &self.credentials
    }

    // ---- Mutations ----

    /// Create the item for a date: write the blob first, then insert the
    /// catalog row.
    ///
    /// The early lookup gives a fast `DateAlreadyExists`, but the
    /// catalog's constrained insert is the real uniqueness guarantee: a
    /// concurrent writer who wins the race surfaces here as an insert
    /// failure for the loser, leaving exactly one row and one blob.
    pub fn create_item(
        &self,
        token: &str,
        date: ArtDate,
        draft: ItemDraft,
        payload: &[u8],
    ) -> ServiceResult<Item> {
        let admin = self.credentials.verify_token(token)?;

        if self.catalog.lookup_by_date(date)?.is_some() {
            return Err(CatalogError::DateAlreadyExists(date).into());
        }

        self.blobs.write(date, payload)?;
        let new = NewItem::user(date, draft.title, draft.description, draft.is_private);
        match self.catalog.create(&new) {
            Ok(item) => {
                info!(date = %date, id = item.id, by = %admin.email, "created item");
                Ok(item)
            }
            Err(err) => {
                // Best-effort compensation; never mask the insert error.
                // On a uniqueness loss the path belongs to the concurrent
                // winner, so the blob must stay.
                if !matches!(err, CatalogError::DateAlreadyExists(_)) {
                    if let Err(cleanup) = self.blobs.delete(date) {
                        warn!(date = %date, error = %cleanup, "failed to remove blob after insert failure");
                    }
                }
                Err(err.into())
            }
        }
    }

    /// Replace the item for a date: delete the old blob and row, then run
    /// the same write-blob-then-insert-row sequence as create. A new id
    /// is assigned.
    pub fn edit_item(
        &self,
        token: &str,
        date: ArtDate,
        draft: ItemDraft,
        payload: &[u8],
    ) -> ServiceResult<Item> {
        let admin = self.credentials.verify_token(token)?;

        let existing = self
            .catalog
            .lookup_by_date(date)?
            .ok_or(CatalogError::ItemNotFound(date))?;
        if existing.original {
            return Err(ServiceError::ProtectedRecord(date));
        }

        self.blobs.delete(date)?;
        self.catalog.delete_by_date(date)?;

        self.blobs.write(date, payload)?;
        let new = NewItem::user(date, draft.title, draft.description, draft.is_private);
        match self.catalog.create(&new) {
            Ok(item) => {
                info!(date = %date, old_id = existing.id, id = item.id, by = %admin.email, "replaced item");
                Ok(item)
            }
            Err(err) => {
                if !matches!(err, CatalogError::DateAlreadyExists(_)) {
                    if let Err(cleanup) = self.blobs.delete(date) {
                        warn!(date = %date, error = %cleanup, "failed to remove blob after insert failure");
                    }
                }
                Err(err.into())
            }
        }
    }

    /// Delete the item for a date: blob first (idempotent, so a retry
    /// after a partial prior failure is safe), then the catalog row.
    pub fn delete_item(&self, token: &str, date: ArtDate) -> ServiceResult<()> {
        let admin = self.credentials.verify_token(token)?;

        let existing = self
            .catalog
            .lookup_by_date(date)?
            .ok_or(CatalogError::ItemNotFound(date))?;
        if existing.original {
            return Err(ServiceError::ProtectedRecord(date));
        }

        self.blobs.delete(date)?;
        self.catalog.delete_by_date(date)?;
        info!(date = %date, id = existing.id, by = %admin.email, "deleted item");
        Ok(())
    }

    /// Walk the blob tree and insert a protected seed row for every date
    /// that has a canonical image file but no catalog row. Idempotent:
    /// dates that already have rows are skipped. Returns the number of
    /// rows created.
    pub fn reconcile(&self, token: &str) -> ServiceResult<usize> {
        let admin = self.credentials.verify_token(token)?;
        let created = self.run_reconciliation()?;
        info!(created, by = %admin.email, "reconciliation pass complete");
        Ok(created)
    }

    /// The reconciliation scan itself, without the token gate. For
    /// trusted local tooling with direct store access; remote callers go
    /// through [`ItemService::reconcile`].
    pub fn run_reconciliation(&self) -> ServiceResult<usize> {
        let mut created = 0;
        for date in self.blobs.dates()? {
            match self.catalog.create(&NewItem::original(date)) {
                Ok(item) => {
                    info!(date = %date, id = item.id, "reconciled seed item");
                    created += 1;
                }
                Err(CatalogError::DateAlreadyExists(_)) => {}
                Err(err) => return Err(err.into()),
            }
        }
        Ok(created)
    }

    // ---- Reads (no authentication) ----

    pub fn get_item(&self, date: ArtDate) -> ServiceResult<Item> {
        self.catalog
            .lookup_by_date(date)?
            .ok_or_else(|| CatalogError::ItemNotFound(date).into())
    }

    pub fn item_exists(&self, date: ArtDate) -> ServiceResult<bool> {
        Ok(self.catalog.lookup_by_date(date)?.is_some())
    }

    pub fn list_items(&self, offset: u32, limit: u32) -> ServiceResult<Vec<Item>> {
        Ok(self.catalog.list(offset, limit)?)
    }

    /// Read the image for a cataloged item.
    ///
    /// A row without a blob is a consistency fault, surfaced as
    /// [`ServiceError::MissingBlob`] rather than empty content.
    pub fn read_image(&self, date: ArtDate) -> ServiceResult<Vec<u8>> {
        self.get_item(date)?;
        match self.blobs.read(date) {
            Ok(bytes) => Ok(bytes),
            Err(BlobError::NotFound(_)) => Err(ServiceError::MissingBlob(date)),
            Err(err) => Err(err.into()),
        }
    }
}
