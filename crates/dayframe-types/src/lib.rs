//! Foundation types for Dayframe.
//!
//! Dayframe catalogs exactly one image per calendar date. This crate
//! provides the types shared by every other Dayframe crate.
//!
//! # Key Types
//!
//! - [`ArtDate`] — Calendar date addressing one catalog slot
//! - [`Item`] — A cataloged artwork record, paired 1:1 with a stored image
//! - [`NewItem`] — Insert payload for a catalog row
//! - [`Admin`] — An administrator account with a hashed credential
//! - [`ValidationError`] — Malformed-input failures at the system boundary

pub mod admin;
pub mod date;
pub mod error;
pub mod item;

pub use admin::Admin;
pub use date::ArtDate;
pub use error::ValidationError;
pub use item::{Item, NewItem};
