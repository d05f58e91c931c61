//! Core domain logic for CallPOS.
//!
//! Owns the fractional ranking scheme behind drag-and-drop ordering and the
//! SQLite-backed menu catalog it keeps in order. Everything above this crate
//! (windows, views, printers, caller-ID) consumes these APIs.

pub mod db;
pub mod logging;
pub mod model;
pub mod rank;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::menu::{Category, CategoryId, Product, ProductId};
pub use rank::{
    even_ranks, max_key, min_key, rank_between, RankError, RankKey, RankResult, DEFAULT_KEY_LEN,
};
pub use repo::catalog_repo::{
    CatalogRepoError, CatalogRepoResult, CatalogRepository, SqliteCatalogRepository,
};
pub use service::catalog_service::{CatalogService, CatalogServiceError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
