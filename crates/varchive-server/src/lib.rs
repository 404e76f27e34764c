//! Varchive Server Library
//!
//! HTTP metadata query service for a genetic-variation archive.
//!
//! # Overview
//!
//! The server exposes a read-only REST API over two kinds of backing store:
//!
//! - **Archive database**: one relational database holding the study,
//!   taxonomy, assembly, and file catalogs shared by all species.
//! - **Variant databases**: one physical database per species, holding the
//!   loaded variant files and study summaries for that species.
//!
//! # Architecture
//!
//! Every request runs the same synchronous pipeline:
//!
//! 1. **Router** — resolve the species named by the request to a physical
//!    database and obtain a per-request [`db::router::SpeciesBinding`].
//!    The binding is an owned value threaded through the call chain, so a
//!    stale selection can never leak between requests.
//! 2. **Adaptor** — execute one domain query (a module under
//!    `features/*/queries/`) against the bound database.
//! 3. **Normalizer** — wrap the raw rows in a [`api::response::QueryResult`]
//!    envelope carrying counts, pagination, and a nullable error message.
//! 4. **Response builder** — wrap the envelopes with the protocol version
//!    and elapsed time into a [`api::response::QueryResponse`].
//!
//! ## Framework Stack
//!
//! - **Axum**: web framework and routing
//! - **SQLx**: PostgreSQL pools and row decoding
//! - **Tower**: middleware (trace, CORS, compression)

pub mod api;
pub mod config;
pub mod db;
pub mod features;
pub mod middleware;

// Re-export commonly used types
pub use api::response::{QueryResponse, QueryResult};
pub use db::router::{RouterError, SpeciesBinding, VariantDbRouter};
