//! Per-study aggregate statistics, optionally filtered by species and type
//!
//! Same filter semantics as the study list: conjunctive filters, empty
//! lists unrestricted.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use super::list_studies::ListStudiesQuery;
use crate::api::response::QueryResult;
use crate::features::shared::QueryError;

/// Aggregate row for one study
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct StudyStats {
    pub study_id: String,
    pub study_type: Option<String>,
    pub variant_count: i64,
    pub sample_count: i64,
    pub files_count: i64,
}

#[tracing::instrument(skip(pool, query), fields(species = ?query.species, types = ?query.types))]
pub async fn handle(
    pool: &PgPool,
    query: ListStudiesQuery,
) -> Result<QueryResult<StudyStats>, QueryError> {
    let options = query.options();
    options.validate().map_err(QueryError::Pagination)?;

    let rows = sqlx::query_as::<_, StudyStats>(
        r#"
        SELECT p.project_accession AS study_id,
               p.study_type,
               COALESCE(ps.variant_count, 0) AS variant_count,
               COALESCE(ps.sample_count, 0) AS sample_count,
               COUNT(DISTINCT bf.file_id) FILTER (WHERE bf.loaded = true AND bf.deleted = false)
                   AS files_count
        FROM project p
        LEFT JOIN project_stats ps ON ps.project_accession = p.project_accession
        LEFT JOIN browsable_file bf ON bf.project_accession = p.project_accession
        LEFT JOIN project_taxonomy pt ON pt.project_accession = p.project_accession
        LEFT JOIN taxonomy t ON t.taxonomy_id = pt.taxonomy_id
        WHERE (cardinality($1::text[]) = 0
               OR t.taxonomy_code = ANY($1)
               OR t.scientific_name = ANY($1)
               OR t.common_name = ANY($1))
          AND (cardinality($2::text[]) = 0 OR p.study_type = ANY($2))
        GROUP BY p.project_accession, p.study_type, ps.variant_count, ps.sample_count
        ORDER BY p.project_accession
        "#,
    )
    .bind(&query.species)
    .bind(&query.types)
    .fetch_all(pool)
    .await?;

    Ok(QueryResult::sliced(rows, &options))
}
