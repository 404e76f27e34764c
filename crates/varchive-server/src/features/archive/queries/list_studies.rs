//! List of archive studies, optionally filtered by species and type
//!
//! Filters are conjunctive: when both species and type are given a study
//! must match one of each. An absent or empty filter list is unrestricted.
//! Species values match the taxonomy code, scientific name, or common name.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::api::response::QueryResult;
use crate::features::shared::{QueryError, QueryOptions};

/// Query-string parameters for `/meta/studies/all`
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ListStudiesQuery {
    #[serde(default)]
    pub species: Vec<String>,
    #[serde(default, rename = "type")]
    pub types: Vec<String>,
    pub offset: Option<i64>,
    pub limit: Option<i64>,
}

impl ListStudiesQuery {
    pub fn options(&self) -> QueryOptions {
        QueryOptions {
            offset: self.offset,
            limit: self.limit,
        }
    }

    /// Whether any filter restricts the result set
    pub fn is_filtered(&self) -> bool {
        !self.species.is_empty() || !self.types.is_empty()
    }
}

/// Archive study row with aggregate counts
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveStudy {
    pub study_id: String,
    pub study_name: String,
    pub description: Option<String>,
    pub study_type: Option<String>,
    pub material: Option<String>,
    pub scope: Option<String>,
    pub species: Option<String>,
    pub variant_count: i64,
    pub sample_count: i64,
}

const FILTER_CLAUSE: &str = r#"
    WHERE (cardinality($1::text[]) = 0
           OR t.taxonomy_code = ANY($1)
           OR t.scientific_name = ANY($1)
           OR t.common_name = ANY($1))
      AND (cardinality($2::text[]) = 0 OR p.study_type = ANY($2))
"#;

#[tracing::instrument(skip(pool, query), fields(species = ?query.species, types = ?query.types))]
pub async fn handle(
    pool: &PgPool,
    query: ListStudiesQuery,
) -> Result<QueryResult<ArchiveStudy>, QueryError> {
    let options = query.options();
    options.validate().map_err(QueryError::Pagination)?;

    let total: i64 = sqlx::query_scalar(&format!(
        r#"
        SELECT COUNT(DISTINCT p.project_accession)
        FROM project p
        LEFT JOIN project_taxonomy pt ON pt.project_accession = p.project_accession
        LEFT JOIN taxonomy t ON t.taxonomy_id = pt.taxonomy_id
        {FILTER_CLAUSE}
        "#
    ))
    .bind(&query.species)
    .bind(&query.types)
    .fetch_one(pool)
    .await?;

    let rows = sqlx::query_as::<_, ArchiveStudy>(&format!(
        r#"
        SELECT p.project_accession AS study_id,
               p.title AS study_name,
               p.description,
               p.study_type,
               p.material,
               p.scope,
               string_agg(DISTINCT t.scientific_name, ', ') AS species,
               COALESCE(ps.variant_count, 0) AS variant_count,
               COALESCE(ps.sample_count, 0) AS sample_count
        FROM project p
        LEFT JOIN project_stats ps ON ps.project_accession = p.project_accession
        LEFT JOIN project_taxonomy pt ON pt.project_accession = p.project_accession
        LEFT JOIN taxonomy t ON t.taxonomy_id = pt.taxonomy_id
        {FILTER_CLAUSE}
        GROUP BY p.project_accession, p.title, p.description, p.study_type,
                 p.material, p.scope, ps.variant_count, ps.sample_count
        ORDER BY p.project_accession
        LIMIT $3 OFFSET $4
        "#
    ))
    .bind(&query.species)
    .bind(&query.types)
    .bind(options.sql_limit())
    .bind(options.offset())
    .fetch_all(pool)
    .await?;

    Ok(QueryResult::with_total(rows, total))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_filters_is_unrestricted() {
        let query = ListStudiesQuery::default();
        assert!(!query.is_filtered());
    }

    #[test]
    fn test_filters_detected() {
        let query = ListStudiesQuery {
            species: vec!["hsapiens".to_string()],
            ..Default::default()
        };
        assert!(query.is_filtered());
    }

    #[test]
    fn test_options_pass_through() {
        let query = ListStudiesQuery {
            offset: Some(10),
            limit: Some(5),
            ..Default::default()
        };
        let options = query.options();
        assert_eq!(options.offset(), 10);
        assert_eq!(options.limit(), Some(5));
    }

    #[test]
    fn test_query_string_parsing_repeated_params() {
        let query: ListStudiesQuery =
            serde_html_form::from_str("species=hsapiens&species=mmusculus&type=Control+Set")
                .unwrap();
        assert_eq!(query.species, vec!["hsapiens", "mmusculus"]);
        assert_eq!(query.types, vec!["Control Set"]);
        assert!(query.offset.is_none());
    }
}
