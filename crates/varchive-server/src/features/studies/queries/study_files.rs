//! Files loaded for one study in a species variant database

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::response::{QueryResult, STUDY_NOT_FOUND_MSG};
use crate::db::router::SpeciesBinding;
use crate::features::shared::QueryError;

/// Variant file record as loaded into a species database
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct StudyFile {
    pub file_id: String,
    pub file_name: String,
    pub file_type: Option<String>,
    pub study_id: String,
    pub study_name: String,
    pub sample_count: i64,
    pub loaded_at: Option<DateTime<Utc>>,
}

#[tracing::instrument(skip(binding), fields(database = %binding.database))]
pub async fn handle(
    binding: &SpeciesBinding,
    study: &str,
) -> Result<QueryResult<StudyFile>, QueryError> {
    let rows = sqlx::query_as::<_, StudyFile>(
        r#"
        SELECT file_id, file_name, file_type, study_id, study_name, sample_count, loaded_at
        FROM variant_file
        WHERE study_id = $1 OR study_name = $1
        ORDER BY file_name
        "#,
    )
    .bind(study)
    .fetch_all(&binding.pool)
    .await?;

    Ok(if rows.is_empty() {
        QueryResult::not_found(STUDY_NOT_FOUND_MSG)
    } else {
        QueryResult::from_rows(rows)
    })
}
