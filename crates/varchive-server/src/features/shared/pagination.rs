//! Shared pagination utilities
//!
//! List endpoints accept optional `offset`/`limit` query parameters. Adaptors
//! either push them into SQL (`LIMIT`/`OFFSET` plus a separate count) or hand
//! the full row set to [`QueryOptions::slice`].

use serde::{Deserialize, Serialize};

/// Maximum number of rows a single page may request
pub const MAX_LIMIT: i64 = 1000;

/// Optional pagination parameters from the query string
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct QueryOptions {
    /// Rows to skip from the start of the result set. Defaults to 0.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,

    /// Maximum rows to return. Absent means unbounded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
}

impl QueryOptions {
    /// Offset to skip, defaulting to 0
    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }

    /// Row cap, clamped to 1..=MAX_LIMIT when present
    pub fn limit(&self) -> Option<i64> {
        self.limit.map(|l| l.clamp(1, MAX_LIMIT))
    }

    /// Effective SQL LIMIT: the cap, or "all rows" when absent
    pub fn sql_limit(&self) -> i64 {
        self.limit().unwrap_or(i64::MAX)
    }

    /// Validate pagination parameters
    pub fn validate(&self) -> Result<(), &'static str> {
        if let Some(offset) = self.offset {
            if offset < 0 {
                return Err("Offset must not be negative");
            }
        }
        if let Some(limit) = self.limit {
            if limit < 1 || limit > MAX_LIMIT {
                return Err("Limit must be between 1 and 1000");
            }
        }
        Ok(())
    }

    /// Slice an in-memory result set per these options
    pub fn slice<T>(&self, rows: Vec<T>) -> Vec<T> {
        let offset = self.offset() as usize;
        let iter = rows.into_iter().skip(offset);
        match self.limit() {
            Some(limit) => iter.take(limit as usize).collect(),
            None => iter.collect(),
        }
    }
}
