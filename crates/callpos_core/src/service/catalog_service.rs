//! Catalog use-case service.
//!
//! # Responsibility
//! - Validate names, prices, and seed payloads above the repository layer.
//! - Expose the create/seed/list/move operations the UI handlers call.
//!
//! # Invariants
//! - Names are trimmed and never blank.
//! - Prices are never negative.
//! - Seed payloads are never empty.

use crate::model::menu::{Category, CategoryId, Product, ProductId};
use crate::rank::RankKey;
use crate::repo::catalog_repo::{CatalogRepoError, CatalogRepository};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from catalog service operations.
#[derive(Debug)]
pub enum CatalogServiceError {
    /// Name is blank after trim.
    InvalidName,
    /// Price is negative.
    InvalidPrice(i64),
    /// Seed payload contains no items.
    EmptySeed,
    /// Target category does not exist.
    CategoryNotFound(CategoryId),
    /// Target product does not exist.
    ProductNotFound(ProductId),
    /// Repository-level failure.
    Repo(CatalogRepoError),
}

impl Display for CatalogServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidName => write!(f, "name must not be blank"),
            Self::InvalidPrice(price) => write!(f, "price must not be negative: {price}"),
            Self::EmptySeed => write!(f, "seed payload must contain at least one item"),
            Self::CategoryNotFound(id) => write!(f, "category not found: {id}"),
            Self::ProductNotFound(id) => write!(f, "product not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CatalogServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<CatalogRepoError> for CatalogServiceError {
    fn from(value: CatalogRepoError) -> Self {
        match value {
            CatalogRepoError::CategoryNotFound(uuid) => Self::CategoryNotFound(uuid),
            CatalogRepoError::ProductNotFound(uuid) => Self::ProductNotFound(uuid),
            other => Self::Repo(other),
        }
    }
}

/// Catalog service facade.
pub struct CatalogService<R: CatalogRepository> {
    repo: R,
}

impl<R: CatalogRepository> CatalogService<R> {
    /// Creates the service from a repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates one category at the end of the list.
    pub fn create_category(
        &self,
        name: impl Into<String>,
    ) -> Result<Category, CatalogServiceError> {
        let name = normalize_name(name.into())?;
        self.repo.create_category(&name).map_err(Into::into)
    }

    /// Seeds a brand-new category list.
    pub fn seed_categories(
        &self,
        names: Vec<String>,
    ) -> Result<Vec<Category>, CatalogServiceError> {
        if names.is_empty() {
            return Err(CatalogServiceError::EmptySeed);
        }
        let names = names
            .into_iter()
            .map(normalize_name)
            .collect::<Result<Vec<_>, _>>()?;
        self.repo.seed_categories(&names).map_err(Into::into)
    }

    /// Lists active categories in display order.
    pub fn list_categories(&self) -> Result<Vec<Category>, CatalogServiceError> {
        self.repo.list_categories(false).map_err(Into::into)
    }

    /// Renames one category.
    pub fn rename_category(
        &self,
        uuid: CategoryId,
        name: impl Into<String>,
    ) -> Result<(), CatalogServiceError> {
        let name = normalize_name(name.into())?;
        self.repo.rename_category(uuid, &name).map_err(Into::into)
    }

    /// Moves one category to a sibling index (`None` appends).
    ///
    /// Returns the freshly assigned rank key; exactly one row was updated.
    pub fn move_category(
        &self,
        uuid: CategoryId,
        target_index: Option<usize>,
    ) -> Result<RankKey, CatalogServiceError> {
        self.repo
            .move_category(uuid, target_index)
            .map_err(Into::into)
    }

    /// Soft-deletes one category and its products.
    pub fn delete_category(&self, uuid: CategoryId) -> Result<(), CatalogServiceError> {
        self.repo.soft_delete_category(uuid).map_err(Into::into)
    }

    /// Creates one product at the end of its category's list.
    pub fn create_product(
        &self,
        category_uuid: CategoryId,
        name: impl Into<String>,
        price_cents: i64,
    ) -> Result<Product, CatalogServiceError> {
        let name = normalize_name(name.into())?;
        ensure_price(price_cents)?;
        self.repo
            .create_product(category_uuid, &name, price_cents)
            .map_err(Into::into)
    }

    /// Seeds a brand-new product list under one category.
    pub fn seed_products(
        &self,
        category_uuid: CategoryId,
        items: Vec<(String, i64)>,
    ) -> Result<Vec<Product>, CatalogServiceError> {
        if items.is_empty() {
            return Err(CatalogServiceError::EmptySeed);
        }
        let items = items
            .into_iter()
            .map(|(name, price_cents)| {
                ensure_price(price_cents)?;
                Ok((normalize_name(name)?, price_cents))
            })
            .collect::<Result<Vec<_>, CatalogServiceError>>()?;
        self.repo
            .seed_products(category_uuid, &items)
            .map_err(Into::into)
    }

    /// Lists active products of one category in display order.
    pub fn list_products(
        &self,
        category_uuid: CategoryId,
    ) -> Result<Vec<Product>, CatalogServiceError> {
        self.repo
            .list_products(category_uuid, false)
            .map_err(Into::into)
    }

    /// Updates name and price of one product.
    pub fn update_product(
        &self,
        uuid: ProductId,
        name: impl Into<String>,
        price_cents: i64,
    ) -> Result<(), CatalogServiceError> {
        let name = normalize_name(name.into())?;
        ensure_price(price_cents)?;
        self.repo
            .update_product(uuid, &name, price_cents)
            .map_err(Into::into)
    }

    /// Moves one product within its category (`None` appends).
    pub fn move_product(
        &self,
        uuid: ProductId,
        target_index: Option<usize>,
    ) -> Result<RankKey, CatalogServiceError> {
        self.repo
            .move_product(uuid, target_index)
            .map_err(Into::into)
    }

    /// Soft-deletes one product.
    pub fn delete_product(&self, uuid: ProductId) -> Result<(), CatalogServiceError> {
        self.repo.soft_delete_product(uuid).map_err(Into::into)
    }
}

fn normalize_name(value: String) -> Result<String, CatalogServiceError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CatalogServiceError::InvalidName);
    }
    Ok(trimmed.to_string())
}

fn ensure_price(price_cents: i64) -> Result<(), CatalogServiceError> {
    if price_cents < 0 {
        return Err(CatalogServiceError::InvalidPrice(price_cents));
    }
    Ok(())
}
