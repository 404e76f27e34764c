//! Read operations against per-species variant databases and the
//! archive study catalogs
//!
//! Queries here that touch a variant database take the request's
//! [`SpeciesBinding`](crate::db::router::SpeciesBinding) rather than a pool,
//! making the routed selection explicit in the signature.

pub mod browsable_studies;
pub mod study_files;
pub mod study_summary;
pub mod study_view;

use serde::{Deserialize, Serialize};

/// Aggregated study entry in a species variant database
///
/// One row per distinct study across the loaded variant files.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct VariantStudySummary {
    pub study_id: String,
    pub study_name: String,
    pub files_count: i64,
}
