//! Date-addressed image storage for Dayframe.
//!
//! Every blob lives at a canonical path derived from its calendar date:
//! `<root>/photos/<YYYY>/<MM>/<DD>/image.png`, with all three components
//! zero-padded to fixed width so the tree sorts lexicographically.
//!
//! # Design Rules
//!
//! 1. A date addresses at most one blob; a write is a full overwrite.
//! 2. Directory provisioning is idempotent — "already exists" is success.
//! 3. Delete is idempotent — removing an absent blob is a no-op, so a
//!    retried delete after a partial failure cannot crash the caller.
//! 4. The store never interprets blob contents.
//! 5. I/O errors other than "absent" are propagated, never swallowed.

pub mod error;
pub mod store;

pub use error::{BlobError, BlobResult};
pub use store::{BlobStore, FsBlobStore};
