//! Count of studies in the archive catalog

use sqlx::PgPool;

use super::CountRow;
use crate::api::response::QueryResult;
use crate::features::shared::QueryError;

#[tracing::instrument(skip(pool))]
pub async fn handle(pool: &PgPool) -> Result<QueryResult<CountRow>, QueryError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM project")
        .fetch_one(pool)
        .await?;

    Ok(QueryResult::from_rows(vec![CountRow { count }]))
}
