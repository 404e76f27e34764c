//! Per-study routes
//!
//! Mounted under `/v1/studies`:
//!
//! - `GET /studies/:study/files` - Files loaded for the study (species-routed)
//! - `GET /studies/:study/view` - Study summary from its variant database
//! - `GET /studies/:study/summary` - Catalog summary from the archive
//!
//! `files` and `view` require a `species` query parameter because the data
//! lives in that species' variant database. `summary` reads the archive
//! catalogs directly; an unknown identifier there is an empty result, not
//! an error, because the catalog query cannot distinguish "never existed"
//! from "nothing loaded yet".

use std::time::Instant;

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use axum_extra::extract::Query;
use serde::Deserialize;

use super::queries;
use crate::api::response;
use crate::db::router::{RouterError, SpeciesBinding};
use crate::features::shared::QueryError;
use crate::features::FeatureState;

pub fn studies_routes() -> Router<FeatureState> {
    Router::new()
        .route("/:study/files", get(study_files))
        .route("/:study/view", get(study_view))
        .route("/:study/summary", get(study_summary))
}

/// Query-string parameters for species-routed study endpoints
#[derive(Debug, Default, Deserialize)]
struct SpeciesParams {
    #[serde(default)]
    species: String,
}

enum BindOutcome {
    Bound(SpeciesBinding),
    Answered(Response),
}

/// Resolve the species parameter, answering 400 directly when it fails
async fn bind_species(state: &FeatureState, started: Instant, species: &str) -> BindOutcome {
    match state.variants.bind(species).await {
        Ok(binding) => BindOutcome::Bound(binding),
        Err(RouterError::EmptySpecies) | Err(RouterError::UnknownSpecies(_)) => {
            BindOutcome::Answered(response::species_not_found(started, species))
        },
        Err(e) => BindOutcome::Answered(QueryError::Router(e).into_response()),
    }
}

#[tracing::instrument(skip(state, params), fields(study = %study, species = %params.species))]
async fn study_files(
    State(state): State<FeatureState>,
    Path(study): Path<String>,
    Query(params): Query<SpeciesParams>,
) -> Response {
    let started = Instant::now();

    let binding = match bind_species(&state, started, &params.species).await {
        BindOutcome::Bound(binding) => binding,
        BindOutcome::Answered(response) => return response,
    };

    match queries::study_files::handle(&binding, &study).await {
        Ok(result) => response::envelope(started, result),
        Err(e) => e.into_response(),
    }
}

#[tracing::instrument(skip(state, params), fields(study = %study, species = %params.species))]
async fn study_view(
    State(state): State<FeatureState>,
    Path(study): Path<String>,
    Query(params): Query<SpeciesParams>,
) -> Response {
    let started = Instant::now();

    let binding = match bind_species(&state, started, &params.species).await {
        BindOutcome::Bound(binding) => binding,
        BindOutcome::Answered(response) => return response,
    };

    match queries::study_view::handle(&binding, &study).await {
        Ok(result) => response::envelope(started, result),
        Err(e) => e.into_response(),
    }
}

#[tracing::instrument(skip(state, query), fields(study = %study, structural = query.structural))]
async fn study_summary(
    State(state): State<FeatureState>,
    Path(study): Path<String>,
    Query(query): Query<queries::study_summary::StudySummaryQuery>,
) -> Response {
    let started = Instant::now();
    match queries::study_summary::handle(&state.archive, &study, query.structural).await {
        Ok(result) => response::envelope(started, result),
        Err(e) => e.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routes_structure() {
        let router = studies_routes();
        assert!(format!("{:?}", router).contains("Router"));
    }
}
