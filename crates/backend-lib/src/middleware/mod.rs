// crates/backend-lib/src/middleware/mod.rs

//! Middleware for the catalog server.

pub mod auth;

pub use auth::require_token;
