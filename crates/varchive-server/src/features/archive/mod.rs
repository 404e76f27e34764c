//! Archive metadata feature
//!
//! Read-only queries over the shared archive database: counts, the species
//! and assembly catalog, and the study list with its filters and statistics.

pub mod queries;
pub mod routes;

pub use routes::archive_routes;
