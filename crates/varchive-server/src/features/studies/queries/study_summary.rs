//! Study summary from the archive catalogs
//!
//! Unlike the per-species views this reads the archive database, so it
//! needs no species routing. The `structural` flag selects the structural
//! variation catalog instead of the sequence variation one. An unknown
//! identifier yields an empty result with no error message, the caller
//! can tell "no such study" apart from "study with nothing loaded" via
//! the browsable views.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::api::response::QueryResult;
use crate::features::shared::QueryError;

/// Query-string parameters for `/studies/{study}/summary`
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StudySummaryQuery {
    #[serde(default)]
    pub structural: bool,
}

/// Catalog-level study summary
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct StudySummary {
    pub study_id: String,
    pub study_name: String,
    pub description: Option<String>,
    pub study_type: Option<String>,
    pub variant_count: i64,
    pub sample_count: i64,
}

#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: &PgPool,
    study: &str,
    structural: bool,
) -> Result<QueryResult<StudySummary>, QueryError> {
    let sql = if structural {
        r#"
        SELECT study_accession AS study_id,
               title AS study_name,
               description,
               study_type,
               COALESCE(variant_count, 0) AS variant_count,
               COALESCE(sample_count, 0) AS sample_count
        FROM structural_study
        WHERE study_accession = $1 OR title = $1
        "#
    } else {
        r#"
        SELECT p.project_accession AS study_id,
               p.title AS study_name,
               p.description,
               p.study_type,
               COALESCE(ps.variant_count, 0) AS variant_count,
               COALESCE(ps.sample_count, 0) AS sample_count
        FROM project p
        LEFT JOIN project_stats ps ON ps.project_accession = p.project_accession
        WHERE p.project_accession = $1 OR p.title = $1
        "#
    };

    let row = sqlx::query_as::<_, StudySummary>(sql)
        .bind(study)
        .fetch_optional(pool)
        .await?;

    Ok(QueryResult::from_rows(row.into_iter().collect()))
}
