//! Browsable studies in one species variant database
//!
//! A study is browsable when at least one of its files reached the variant
//! database, which only happens for loaded, non-deleted files.

use super::VariantStudySummary;
use crate::api::response::QueryResult;
use crate::db::router::SpeciesBinding;
use crate::features::shared::{QueryError, QueryOptions};

#[tracing::instrument(skip(binding, options), fields(database = %binding.database))]
pub async fn handle(
    binding: &SpeciesBinding,
    options: &QueryOptions,
) -> Result<QueryResult<VariantStudySummary>, QueryError> {
    options.validate().map_err(QueryError::Pagination)?;

    let rows = sqlx::query_as::<_, VariantStudySummary>(
        r#"
        SELECT study_id, study_name, COUNT(*) AS files_count
        FROM variant_file
        GROUP BY study_id, study_name
        ORDER BY study_id
        "#,
    )
    .fetch_all(&binding.pool)
    .await?;

    Ok(QueryResult::sliced(rows, options))
}
