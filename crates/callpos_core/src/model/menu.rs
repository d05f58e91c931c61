//! Menu catalog records.
//!
//! # Responsibility
//! - Define the category and product rows the repository persists.
//! - Provide lifecycle helpers for soft-delete semantics.
//!
//! # Invariants
//! - `uuid` is stable and never reused for another row.
//! - `rank` is a valid rank key and the sole source of display order;
//!   collections sort by `rank ASC, uuid ASC`.
//! - A tombstoned row keeps its rank but is excluded from ordering reads.

use crate::rank::RankKey;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a menu category.
pub type CategoryId = Uuid;

/// Stable identifier for a product.
pub type ProductId = Uuid;

/// Top-level menu grouping reordered by drag-and-drop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Stable global ID used for linking and auditing.
    pub uuid: CategoryId,
    /// User-facing label.
    pub name: String,
    /// Opaque sort key; lexicographic order is display order.
    pub rank: RankKey,
    /// Soft delete tombstone.
    pub is_deleted: bool,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Unix epoch milliseconds.
    pub updated_at: i64,
}

/// Sellable item, ranked within its parent category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Stable global ID used for linking and auditing.
    pub uuid: ProductId,
    /// Owning category.
    pub category_uuid: CategoryId,
    /// User-facing label.
    pub name: String,
    /// Price in minor currency units; never negative.
    pub price_cents: i64,
    /// Opaque sort key; lexicographic order is display order within the
    /// owning category.
    pub rank: RankKey,
    /// Soft delete tombstone.
    pub is_deleted: bool,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Unix epoch milliseconds.
    pub updated_at: i64,
}

impl Category {
    /// Returns whether this category should be considered visible.
    pub fn is_active(&self) -> bool {
        !self.is_deleted
    }
}

impl Product {
    /// Returns whether this product should be considered visible.
    pub fn is_active(&self) -> bool {
        !self.is_deleted
    }
}

#[cfg(test)]
mod tests {
    use super::Category;
    use uuid::Uuid;

    #[test]
    fn category_serializes_rank_as_plain_text() {
        let category = Category {
            uuid: Uuid::new_v4(),
            name: "Pizza".to_string(),
            rank: "mzzzzzzz".to_string(),
            is_deleted: false,
            created_at: 0,
            updated_at: 0,
        };

        let value = serde_json::to_value(&category).unwrap();
        assert_eq!(value["rank"], "mzzzzzzz");
        assert_eq!(value["is_deleted"], false);
    }
}
