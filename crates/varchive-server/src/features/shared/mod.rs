//! Utilities shared by feature slices

pub mod error;
pub mod pagination;

pub use error::QueryError;
pub use pagination::QueryOptions;
