//! Feature modules implementing the metadata API
//!
//! Each feature is a vertical slice with its own queries and routes:
//!
//! - **archive**: catalog-wide metadata (file/species/study counts and lists)
//! - **studies**: per-study views, routed to species variant databases
//! - **shared**: pagination and the common query error type
//!
//! The service is read-only, so slices carry `queries/` and `routes.rs`
//! but no command side.

pub mod archive;
pub mod shared;
pub mod studies;

use std::sync::Arc;

use axum::Router;

use crate::db::router::VariantDbRouter;

/// Shared state for all feature routes
#[derive(Clone)]
pub struct FeatureState {
    /// Archive (shared metadata) database pool
    pub archive: sqlx::PgPool,
    /// Species-to-database router for variant queries
    pub variants: Arc<VariantDbRouter>,
}

/// Creates the API router with all feature routes mounted
///
/// - `/meta` - Archive catalog endpoints
/// - `/studies` - Per-study endpoints
pub fn router(state: FeatureState) -> Router<()> {
    Router::new()
        .nest("/meta", archive::archive_routes())
        .nest("/studies", studies::studies_routes())
        .with_state(state)
}
