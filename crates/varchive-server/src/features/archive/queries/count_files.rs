//! Count of loaded, non-deleted files across the whole archive

use sqlx::PgPool;

use super::CountRow;
use crate::api::response::QueryResult;
use crate::features::shared::QueryError;

#[tracing::instrument(skip(pool))]
pub async fn handle(pool: &PgPool) -> Result<QueryResult<CountRow>, QueryError> {
    let count: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*)
        FROM browsable_file
        WHERE loaded = true AND deleted = false
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(QueryResult::from_rows(vec![CountRow { count }]))
}
