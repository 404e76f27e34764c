//! Per-study feature
//!
//! Study-scoped views: loaded files and summaries from the species variant
//! databases, plus the catalog summary from the archive.

pub mod queries;
pub mod routes;

pub use routes::studies_routes;
