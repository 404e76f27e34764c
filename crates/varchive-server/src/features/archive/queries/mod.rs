//! Read operations against the archive database

pub mod count_files;
pub mod count_species;
pub mod count_studies;
pub mod list_species;
pub mod list_studies;
pub mod studies_stats;

use serde::{Deserialize, Serialize};

/// Single-row payload for count endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountRow {
    pub count: i64,
}
