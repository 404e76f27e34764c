//! Count of distinct species with loaded variant data
//!
//! A species counts once it has at least one loaded, non-deleted browsable
//! file, matching the catalog used to build the variant database registry.

use sqlx::PgPool;

use super::CountRow;
use crate::api::response::QueryResult;
use crate::features::shared::QueryError;

#[tracing::instrument(skip(pool))]
pub async fn handle(pool: &PgPool) -> Result<QueryResult<CountRow>, QueryError> {
    let count: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(DISTINCT t.taxonomy_id)
        FROM taxonomy t
        JOIN assembly a ON a.taxonomy_id = t.taxonomy_id
        JOIN browsable_file bf ON bf.assembly_set_id = a.assembly_set_id
        WHERE bf.loaded = true AND bf.deleted = false
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(QueryResult::from_rows(vec![CountRow { count }]))
}
