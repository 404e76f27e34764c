//! Per-request variant database routing
//!
//! Each species with loaded variant data lives in its own physical database
//! (`<prefix><species>`, e.g. `eva_hsapiens_grch38`). The router owns the
//! species registry and a lazily-populated pool cache, and resolves a species
//! name from a request into a [`SpeciesBinding`].
//!
//! The binding is an owned value handed to the request handler and threaded
//! through every adaptor call it makes. Nothing request-scoped is stored in
//! the router itself, so a binding from one request can never be observed by
//! another.

use std::collections::HashMap;

use sqlx::postgres::{PgPool, PgPoolOptions};
use thiserror::Error;
use tokio::sync::RwLock;

use crate::config::VariantDbConfig;

/// Routing errors
#[derive(Error, Debug)]
pub enum RouterError {
    #[error("Species name must not be empty")]
    EmptySpecies,

    #[error("Species '{0}' has no variant database")]
    UnknownSpecies(String),

    #[error("Database query failed: {0}")]
    Sqlx(#[from] sqlx::Error),
}

/// The database selection for one request
///
/// Created by [`VariantDbRouter::bind`] at the start of a request and passed
/// to every adaptor call made on behalf of that request.
#[derive(Clone)]
pub struct SpeciesBinding {
    /// Species name as supplied by the request, e.g. `hsapiens_grch38`
    pub species: String,
    /// Physical database name the species resolved to
    pub database: String,
    /// Connection pool for that database
    pub pool: PgPool,
}

impl std::fmt::Debug for SpeciesBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeciesBinding")
            .field("species", &self.species)
            .field("database", &self.database)
            .finish()
    }
}

/// Resolves species names to per-species variant databases
///
/// The registry of routable species is fixed at construction; pools are
/// created on first use and cached per database name. Pools are shared
/// between requests for the same species, which is safe: the selection
/// itself travels in the [`SpeciesBinding`], never in shared state.
pub struct VariantDbRouter {
    base_url: String,
    max_connections: u32,
    databases: HashMap<String, String>,
    pools: RwLock<HashMap<String, PgPool>>,
}

impl VariantDbRouter {
    /// Create a router for the given species names
    pub fn new<I, S>(config: &VariantDbConfig, species: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let databases = species
            .into_iter()
            .map(|s| {
                let s = s.into();
                let database = format!("{}{}", config.database_prefix, s);
                (s, database)
            })
            .collect();

        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            max_connections: config.max_connections,
            databases,
            pools: RwLock::new(HashMap::new()),
        }
    }

    /// Build the router from the archive database's loaded-species catalog
    ///
    /// A species is routable when at least one of its browsable files is
    /// loaded and not deleted. `species_override` in the configuration
    /// bypasses the catalog, which is useful for development.
    pub async fn from_archive(
        archive: &PgPool,
        config: &VariantDbConfig,
    ) -> Result<Self, RouterError> {
        if let Some(ref species) = config.species_override {
            tracing::info!(count = species.len(), "Species registry from configuration override");
            return Ok(Self::new(config, species.iter().cloned()));
        }

        let species: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT DISTINCT t.taxonomy_code || '_' || a.assembly_code
            FROM assembly a
            JOIN browsable_file bf ON a.assembly_set_id = bf.assembly_set_id
            JOIN taxonomy t ON a.taxonomy_id = t.taxonomy_id
            WHERE bf.loaded = true AND bf.deleted = false
            ORDER BY 1
            "#,
        )
        .fetch_all(archive)
        .await?;

        tracing::info!(count = species.len(), "Species registry loaded from archive database");
        Ok(Self::new(config, species))
    }

    /// Number of routable species
    pub fn species_count(&self) -> usize {
        self.databases.len()
    }

    /// Resolve a species name to its physical database name
    pub fn database_name(&self, species: &str) -> Result<&str, RouterError> {
        if species.is_empty() {
            return Err(RouterError::EmptySpecies);
        }
        self.databases
            .get(species)
            .map(String::as_str)
            .ok_or_else(|| RouterError::UnknownSpecies(species.to_string()))
    }

    /// Resolve a species name and return the per-request binding
    ///
    /// The pool is created lazily on first use of a database and reused
    /// afterwards; creation does not open a connection, so binding is cheap
    /// and cannot block on the network.
    pub async fn bind(&self, species: &str) -> Result<SpeciesBinding, RouterError> {
        let database = self.database_name(species)?.to_string();

        if let Some(pool) = self.pools.read().await.get(&database) {
            return Ok(SpeciesBinding {
                species: species.to_string(),
                database,
                pool: pool.clone(),
            });
        }

        let mut pools = self.pools.write().await;
        // Another task may have created the pool while we waited for the lock.
        let pool = match pools.get(&database) {
            Some(pool) => pool.clone(),
            None => {
                let url = format!("{}/{}", self.base_url, database);
                let pool = PgPoolOptions::new()
                    .max_connections(self.max_connections)
                    .connect_lazy(&url)?;
                tracing::debug!(species = %species, database = %database, "Variant database pool created");
                pools.insert(database.clone(), pool.clone());
                pool
            },
        };

        Ok(SpeciesBinding {
            species: species.to_string(),
            database,
            pool,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> VariantDbConfig {
        VariantDbConfig {
            base_url: "postgresql://localhost".to_string(),
            database_prefix: "eva_".to_string(),
            max_connections: 2,
            species_override: None,
        }
    }

    fn test_router() -> VariantDbRouter {
        VariantDbRouter::new(&test_config(), ["hsapiens_grch38", "mmusculus_grcm38"])
    }

    #[test]
    fn test_database_name_known_species() {
        let router = test_router();
        assert_eq!(
            router.database_name("hsapiens_grch38").unwrap(),
            "eva_hsapiens_grch38"
        );
    }

    #[test]
    fn test_database_name_unknown_species() {
        let router = test_router();
        let err = router.database_name("ggallus_galgal5").unwrap_err();
        assert!(matches!(err, RouterError::UnknownSpecies(ref s) if s == "ggallus_galgal5"));
    }

    #[test]
    fn test_database_name_empty_species() {
        let router = test_router();
        assert!(matches!(
            router.database_name(""),
            Err(RouterError::EmptySpecies)
        ));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let mut config = test_config();
        config.base_url = "postgresql://localhost/".to_string();
        let router = VariantDbRouter::new(&config, ["hsapiens_grch38"]);
        assert_eq!(router.base_url, "postgresql://localhost");
    }

    #[test]
    fn test_species_count() {
        assert_eq!(test_router().species_count(), 2);
    }

    #[tokio::test]
    async fn test_bind_returns_matching_database() {
        let router = test_router();
        let binding = router.bind("mmusculus_grcm38").await.unwrap();
        assert_eq!(binding.species, "mmusculus_grcm38");
        assert_eq!(binding.database, "eva_mmusculus_grcm38");
    }

    #[tokio::test]
    async fn test_bind_unknown_species_fails() {
        let router = test_router();
        assert!(matches!(
            router.bind("btaurus_umd31").await,
            Err(RouterError::UnknownSpecies(_))
        ));
    }

    #[tokio::test]
    async fn test_bind_reuses_cached_pool() {
        let router = test_router();
        router.bind("hsapiens_grch38").await.unwrap();
        router.bind("hsapiens_grch38").await.unwrap();
        assert_eq!(router.pools.read().await.len(), 1);
    }
}
