//! Wire envelopes for query results
//!
//! Every endpoint answers with the same two-level shape: one or more
//! [`QueryResult`] envelopes (rows + counts + nullable error message)
//! wrapped in a [`QueryResponse`] (protocol version + elapsed time).
//!
//! Domain "not found" conditions travel inside the envelope as a populated
//! `errorMsg` with empty rows; backing-store faults never do, they surface
//! as plain 5xx error bodies instead.

use std::time::Instant;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::features::shared::pagination::QueryOptions;

/// Protocol version reported in every response envelope
pub const PROTOCOL_VERSION: &str = "v1";

/// Error message for a study identifier with no rows in the bound database
pub const STUDY_NOT_FOUND_MSG: &str = "Study identifier not found";

/// Uniform container for one adaptor's output
///
/// Invariant: a populated `error_msg` implies `result` is empty. The
/// constructors uphold this; there is no mutable access to break it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult<T> {
    pub num_results: i64,
    pub num_total_results: i64,
    pub result: Vec<T>,
    pub error_msg: Option<String>,
}

impl<T> QueryResult<T> {
    /// Wrap rows that already represent the full result set
    pub fn from_rows(rows: Vec<T>) -> Self {
        let n = rows.len() as i64;
        Self {
            num_results: n,
            num_total_results: n,
            result: rows,
            error_msg: None,
        }
    }

    /// Wrap one page of rows together with the unpaginated total
    ///
    /// Used when the adaptor applied LIMIT/OFFSET in SQL and counted the
    /// full set separately.
    pub fn with_total(rows: Vec<T>, total: i64) -> Self {
        Self {
            num_results: rows.len() as i64,
            num_total_results: total,
            result: rows,
            error_msg: None,
        }
    }

    /// Wrap a full result set, slicing it per the given pagination
    ///
    /// Used when the adaptor returns everything (find-all style queries);
    /// `num_total_results` keeps the pre-slice count.
    pub fn sliced(rows: Vec<T>, options: &QueryOptions) -> Self {
        let total = rows.len() as i64;
        let rows = options.slice(rows);
        Self {
            num_results: rows.len() as i64,
            num_total_results: total,
            result: rows,
            error_msg: None,
        }
    }

    /// An empty result carrying a not-found message
    ///
    /// Distinct from `from_rows(vec![])`: that is an empty-but-valid answer,
    /// this one marks the queried identifier as missing.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self {
            num_results: 0,
            num_total_results: 0,
            result: Vec::new(),
            error_msg: Some(msg.into()),
        }
    }

    /// Whether this envelope marks a missing identifier
    pub fn is_not_found(&self) -> bool {
        self.error_msg.is_some()
    }
}

/// Final response payload: envelopes plus version and timing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResponse<T> {
    pub version: String,
    /// Wall-clock milliseconds between request receipt and response construction
    pub time: u64,
    pub response: Vec<QueryResult<T>>,
}

impl<T> QueryResponse<T> {
    /// Build a response from envelopes, stamping elapsed time since `started`
    pub fn new(started: Instant, response: Vec<QueryResult<T>>) -> Self {
        Self {
            version: PROTOCOL_VERSION.to_string(),
            time: started.elapsed().as_millis() as u64,
            response,
        }
    }

    /// Build a response wrapping a single envelope
    pub fn single(started: Instant, result: QueryResult<T>) -> Self {
        Self::new(started, vec![result])
    }
}

impl<T: Serialize> IntoResponse for QueryResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Turn an envelope into the HTTP response for its endpoint
///
/// Not-found envelopes answer 400 per the service contract; everything else
/// answers 200.
pub fn envelope<T: Serialize>(started: Instant, result: QueryResult<T>) -> Response {
    let status = if result.is_not_found() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::OK
    };
    (status, Json(QueryResponse::single(started, result))).into_response()
}

/// 400 response for a species the router cannot map to a database
pub fn species_not_found(started: Instant, species: &str) -> Response {
    let result: QueryResult<serde_json::Value> =
        QueryResult::not_found(format!("Species '{}' not found", species));
    (
        StatusCode::BAD_REQUEST,
        Json(QueryResponse::single(started, result)),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_counts() {
        let result = QueryResult::from_rows(vec![1, 2, 3]);
        assert_eq!(result.num_results, 3);
        assert_eq!(result.num_total_results, 3);
        assert!(result.error_msg.is_none());
    }

    #[test]
    fn test_with_total_keeps_page_and_total() {
        let result = QueryResult::with_total(vec!["a", "b"], 40);
        assert_eq!(result.num_results, 2);
        assert_eq!(result.num_total_results, 40);
        assert!(result.num_results <= result.num_total_results);
    }

    #[test]
    fn test_sliced_applies_offset_and_limit() {
        let options = QueryOptions {
            offset: Some(1),
            limit: Some(2),
        };
        let result = QueryResult::sliced(vec![10, 20, 30, 40], &options);
        assert_eq!(result.result, vec![20, 30]);
        assert_eq!(result.num_results, 2);
        assert_eq!(result.num_total_results, 4);
    }

    #[test]
    fn test_sliced_without_options_is_identity() {
        let result = QueryResult::sliced(vec![1, 2], &QueryOptions::default());
        assert_eq!(result.num_results, 2);
        assert_eq!(result.num_total_results, 2);
    }

    #[test]
    fn test_not_found_has_empty_rows() {
        let result: QueryResult<i32> = QueryResult::not_found(STUDY_NOT_FOUND_MSG);
        assert!(result.result.is_empty());
        assert_eq!(result.num_results, 0);
        assert_eq!(result.error_msg.as_deref(), Some(STUDY_NOT_FOUND_MSG));
        assert!(result.is_not_found());
    }

    #[test]
    fn test_empty_but_valid_is_not_an_error() {
        let result: QueryResult<i32> = QueryResult::from_rows(vec![]);
        assert!(!result.is_not_found());
        assert_eq!(result.num_total_results, 0);
    }

    #[test]
    fn test_wire_shape_camel_case_with_null_error() {
        let result = QueryResult::from_rows(vec![5]);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["numResults"], 1);
        assert_eq!(json["numTotalResults"], 1);
        assert!(json["errorMsg"].is_null());
        assert_eq!(json["result"], serde_json::json!([5]));
    }

    #[test]
    fn test_envelope_not_found_answers_bad_request() {
        let response = envelope(
            Instant::now(),
            QueryResult::<i32>::not_found(STUDY_NOT_FOUND_MSG),
        );
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_envelope_success_answers_ok() {
        let response = envelope(Instant::now(), QueryResult::from_rows(vec![1]));
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_envelope_empty_but_valid_answers_ok() {
        let response = envelope(Instant::now(), QueryResult::<i32>::from_rows(vec![]));
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_species_not_found_answers_bad_request() {
        let response = species_not_found(Instant::now(), "oaries_oarv31");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_response_carries_version_and_time() {
        let started = Instant::now();
        let response = QueryResponse::single(started, QueryResult::from_rows(vec![1]));
        assert_eq!(response.version, PROTOCOL_VERSION);
        assert_eq!(response.response.len(), 1);
        // elapsed is non-negative by construction; just check serialization
        let json = serde_json::to_value(&response).unwrap();
        assert!(json["time"].is_u64());
        assert_eq!(json["version"], "v1");
    }
}
