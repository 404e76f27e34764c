//! List of species and assemblies with loaded variant data
//!
//! One row per (taxonomy, assembly) pair that has at least one loaded,
//! non-deleted browsable file. Order is stable across calls.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::api::response::QueryResult;
use crate::features::shared::{QueryError, QueryOptions};

/// Joined taxonomy + assembly row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SpeciesRow {
    pub taxonomy_id: i64,
    pub common_name: Option<String>,
    pub scientific_name: String,
    pub taxonomy_code: String,
    pub display_name: Option<String>,
    pub assembly_accession: Option<String>,
    pub assembly_chain: Option<String>,
    pub assembly_version: Option<String>,
    pub assembly_name: Option<String>,
    pub assembly_code: Option<String>,
}

#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: &PgPool,
    options: &QueryOptions,
) -> Result<QueryResult<SpeciesRow>, QueryError> {
    options.validate().map_err(QueryError::Pagination)?;

    let rows = sqlx::query_as::<_, SpeciesRow>(
        r#"
        SELECT DISTINCT
               t.taxonomy_id, t.common_name, t.scientific_name, t.taxonomy_code, t.display_name,
               a.assembly_accession, a.assembly_chain, a.assembly_version,
               a.assembly_name, a.assembly_code
        FROM assembly a
        JOIN browsable_file bf ON bf.assembly_set_id = a.assembly_set_id
        JOIN taxonomy t ON t.taxonomy_id = a.taxonomy_id
        WHERE bf.loaded = true AND bf.deleted = false
        ORDER BY t.taxonomy_id, a.assembly_code
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(QueryResult::sliced(rows, options))
}
