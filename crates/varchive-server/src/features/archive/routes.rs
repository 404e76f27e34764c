//! Archive metadata routes
//!
//! Catalog-wide endpoints mounted under `/v1/meta`:
//!
//! - `GET /meta/files/count` - Browsable files in the archive
//! - `GET /meta/species/count` - Species with loaded data
//! - `GET /meta/species/list` - Species and assembly catalog
//! - `GET /meta/studies/count` - Studies in the archive
//! - `GET /meta/studies/all` - Study list with species/type filters
//! - `GET /meta/studies/list` - Browsable studies in one species database
//! - `GET /meta/studies/stats` - Per-study aggregate statistics
//!
//! Every handler stamps its own request timer so the envelope's `time`
//! field covers routing, querying, and normalization.

use std::time::Instant;

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use axum_extra::extract::Query;
use serde::Deserialize;

use super::queries;
use crate::api::response;
use crate::db::router::RouterError;
use crate::features::shared::{QueryError, QueryOptions};
use crate::features::studies::queries::browsable_studies;
use crate::features::FeatureState;

pub fn archive_routes() -> Router<FeatureState> {
    Router::new()
        .route("/files/count", get(count_files))
        .route("/species/count", get(count_species))
        .route("/species/list", get(list_species))
        .route("/studies/count", get(count_studies))
        .route("/studies/all", get(list_studies))
        .route("/studies/list", get(list_browsable_studies))
        .route("/studies/stats", get(studies_stats))
}

#[tracing::instrument(skip(state))]
async fn count_files(State(state): State<FeatureState>) -> Response {
    let started = Instant::now();
    match queries::count_files::handle(&state.archive).await {
        Ok(result) => response::envelope(started, result),
        Err(e) => e.into_response(),
    }
}

#[tracing::instrument(skip(state))]
async fn count_species(State(state): State<FeatureState>) -> Response {
    let started = Instant::now();
    match queries::count_species::handle(&state.archive).await {
        Ok(result) => response::envelope(started, result),
        Err(e) => e.into_response(),
    }
}

#[tracing::instrument(skip(state))]
async fn count_studies(State(state): State<FeatureState>) -> Response {
    let started = Instant::now();
    match queries::count_studies::handle(&state.archive).await {
        Ok(result) => response::envelope(started, result),
        Err(e) => e.into_response(),
    }
}

#[tracing::instrument(skip(state, options))]
async fn list_species(
    State(state): State<FeatureState>,
    Query(options): Query<QueryOptions>,
) -> Response {
    let started = Instant::now();
    match queries::list_species::handle(&state.archive, &options).await {
        Ok(result) => response::envelope(started, result),
        Err(e) => e.into_response(),
    }
}

#[tracing::instrument(skip(state, query), fields(species = ?query.species, types = ?query.types))]
async fn list_studies(
    State(state): State<FeatureState>,
    Query(query): Query<queries::list_studies::ListStudiesQuery>,
) -> Response {
    let started = Instant::now();
    match queries::list_studies::handle(&state.archive, query).await {
        Ok(result) => response::envelope(started, result),
        Err(e) => e.into_response(),
    }
}

#[tracing::instrument(skip(state, query), fields(species = ?query.species, types = ?query.types))]
async fn studies_stats(
    State(state): State<FeatureState>,
    Query(query): Query<queries::list_studies::ListStudiesQuery>,
) -> Response {
    let started = Instant::now();
    match queries::studies_stats::handle(&state.archive, query).await {
        Ok(result) => response::envelope(started, result),
        Err(e) => e.into_response(),
    }
}

/// Query-string parameters for `/meta/studies/list`
#[derive(Debug, Default, Deserialize)]
struct BrowsableStudiesParams {
    #[serde(default)]
    species: String,
    offset: Option<i64>,
    limit: Option<i64>,
}

/// Studies with loaded data in one species variant database
///
/// The `species` parameter is required; a missing or unroutable species
/// answers 400 with a not-found envelope, never a routing fault.
#[tracing::instrument(skip(state, params), fields(species = %params.species))]
async fn list_browsable_studies(
    State(state): State<FeatureState>,
    Query(params): Query<BrowsableStudiesParams>,
) -> Response {
    let started = Instant::now();

    let binding = match state.variants.bind(&params.species).await {
        Ok(binding) => binding,
        Err(RouterError::EmptySpecies) | Err(RouterError::UnknownSpecies(_)) => {
            return response::species_not_found(started, &params.species);
        },
        Err(e) => return QueryError::Router(e).into_response(),
    };

    let options = QueryOptions {
        offset: params.offset,
        limit: params.limit,
    };

    match browsable_studies::handle(&binding, &options).await {
        Ok(result) => response::envelope(started, result),
        Err(e) => e.into_response(),
    }
}
