//! Mutation orchestrator for Dayframe.
//!
//! Composes the credential service, the item catalog, and the blob store
//! into token-gated create/edit/delete operations plus the bulk
//! reconciliation scan. The orchestrator owns the rules the stores
//! deliberately do not:
//!
//! - Every mutation verifies the bearer token before any store is touched.
//! - `original = true` items are immutable and undeletable here.
//! - Blob and catalog writes are ordered so the catalog row stays the
//!   single source of truth: write/replace the blob before committing the
//!   owning row, delete the blob before deleting the owning row.
//! - A failed step aborts the sequence; compensating cleanup failures are
//!   logged and never mask the original error.

pub mod error;
pub mod items;

pub use error::{ServiceError, ServiceResult};
pub use items::{ItemDraft, ItemService};
