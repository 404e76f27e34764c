//! Single study summary from a species variant database
//!
//! The identifier matches either the study id or the study name. A missing
//! study is a data condition: the envelope carries the not-found message
//! and empty rows, it is not a fault.

use super::VariantStudySummary;
use crate::api::response::{QueryResult, STUDY_NOT_FOUND_MSG};
use crate::db::router::SpeciesBinding;
use crate::features::shared::QueryError;

#[tracing::instrument(skip(binding), fields(database = %binding.database))]
pub async fn handle(
    binding: &SpeciesBinding,
    study: &str,
) -> Result<QueryResult<VariantStudySummary>, QueryError> {
    let row = sqlx::query_as::<_, VariantStudySummary>(
        r#"
        SELECT study_id, study_name, COUNT(*) AS files_count
        FROM variant_file
        WHERE study_id = $1 OR study_name = $1
        GROUP BY study_id, study_name
        ORDER BY study_id
        LIMIT 1
        "#,
    )
    .bind(study)
    .fetch_optional(&binding.pool)
    .await?;

    Ok(match row {
        Some(summary) => QueryResult::from_rows(vec![summary]),
        None => QueryResult::not_found(STUDY_NOT_FOUND_MSG),
    })
}
