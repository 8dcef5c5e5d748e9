//! API Handlers
//!
//! HTTP request handlers for each admin endpoint. None of them touch the
//! cache's hit and miss counters.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::info;

use crate::cache::CacheStats;
use crate::error::{CacheError, Result};
use crate::facade::ProcessCache;
use crate::models::{
    ClearResponse, DeleteResponse, EntriesQuery, EntriesResponse, EntryResponse, HealthResponse,
};

/// Application state shared across all handlers.
///
/// Holds a handle to the process cache; clones share the same store.
#[derive(Clone, Debug)]
pub struct AppState {
    pub cache: ProcessCache,
}

impl AppState {
    /// Creates a new AppState over the given cache.
    pub fn new(cache: ProcessCache) -> Self {
        Self { cache }
    }
}

/// Handler for GET /cache/stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<CacheStats> {
    Json(state.cache.stats())
}

/// Handler for GET /cache/entries
///
/// Lists entry metadata oldest first, optionally filtered by key prefix.
pub async fn entries_handler(
    State(state): State<AppState>,
    Query(query): Query<EntriesQuery>,
) -> Result<Json<EntriesResponse>> {
    if let Some(error_msg) = query.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let entries = state
        .cache
        .entries()
        .into_iter()
        .filter(|info| query.matches(&info.key, info.expired))
        .map(EntryResponse::from)
        .collect();

    Ok(Json(EntriesResponse::new(entries)))
}

/// Handler for DELETE /cache/entries/:key
pub async fn delete_entry_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DeleteResponse>> {
    if key.trim().is_empty() {
        return Err(CacheError::InvalidRequest("Key cannot be empty".to_string()));
    }

    if !state.cache.delete(&key) {
        return Err(CacheError::NotFound(key));
    }

    info!(key = %key, "cache entry deleted by operator");
    Ok(Json(DeleteResponse::new(key)))
}

/// Handler for DELETE /cache
pub async fn clear_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    let cleared = state.cache.clear();
    info!(cleared, "cache cleared by operator");
    Json(ClearResponse { cleared })
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
