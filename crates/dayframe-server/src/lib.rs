//! HTTP server for Dayframe.
//!
//! Exposes the item catalog over HTTP: open reads (list, get, existence,
//! image bytes) and token-gated mutations (create, edit, delete,
//! reconcile) plus registration and login. Built on axum; all policy
//! lives in `dayframe-service`, so this crate is strictly translation
//! between HTTP and the service boundary.

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod server;

pub use config::ServerConfig;
pub use error::{ApiError, ServerError, ServerResult};
pub use server::DayframeServer;
