//! Admin API Module
//!
//! HTTP handlers and routing for the operator-facing cache inspection surface.
//! Cached values are never exposed; only metadata and statistics.
//!
//! # Endpoints
//! - `GET /cache/stats` - Cache statistics
//! - `GET /cache/entries` - Entry metadata, oldest first
//! - `DELETE /cache/entries/:key` - Delete one entry
//! - `DELETE /cache` - Clear the cache
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
