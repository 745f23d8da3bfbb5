//! SQLite-backed catalog for Dayframe.
//!
//! Two tables: `item` (one row per calendar date) and `admin` (credential
//! accounts). The storage engine owns the uniqueness guarantees — both
//! `item.created` and `admin.email` carry UNIQUE constraints, so an insert
//! is a single atomic check-and-write. Callers never rely on a prior
//! lookup to decide whether an insert will succeed.
//!
//! # Design Rules
//!
//! 1. The catalog row is the single source of truth for item existence.
//! 2. Uniqueness is enforced by the engine, not by check-then-act code.
//! 3. The `original` protection flag is stored here but enforced by the
//!    orchestrator — protection is policy, not a storage constraint.
//! 4. Schema migrations run before any application query, tracked via
//!    `PRAGMA user_version`.

pub mod admins;
pub mod db;
pub mod error;
pub mod items;

pub use admins::AdminStore;
pub use db::SqliteCatalog;
pub use error::{CatalogError, CatalogResult};
pub use items::ItemStore;
