//! Catalog repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide persistence APIs for rank-ordered categories and products.
//! - Read neighbor rank keys and delegate key computation to `rank`.
//!
//! # Invariants
//! - Only active (`is_deleted=0`) rows participate in ordering by default.
//! - Listing is deterministic: `rank ASC, uuid ASC`.
//! - Relocations run inside an immediate transaction so concurrent movers
//!   never compute midpoints from stale neighbor reads.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::menu::{Category, CategoryId, Product, ProductId};
use crate::rank::{self, RankError, RankKey, DEFAULT_KEY_LEN};
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Result type used by catalog repository operations.
pub type CatalogRepoResult<T> = Result<T, CatalogRepoError>;

/// Errors from catalog repository operations.
#[derive(Debug)]
pub enum CatalogRepoError {
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// Rank key computation failed.
    Rank(RankError),
    /// Target category does not exist or is soft-deleted.
    CategoryNotFound(CategoryId),
    /// Target product does not exist or is soft-deleted.
    ProductNotFound(ProductId),
    /// Seeding was requested for a scope that already has active rows.
    SeedTargetNotEmpty(&'static str),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
    /// Required column is missing from expected table.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    /// Persisted data cannot be converted to a valid read model.
    InvalidData(String),
}

impl Display for CatalogRepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Rank(err) => write!(f, "{err}"),
            Self::CategoryNotFound(id) => write!(f, "category not found: {id}"),
            Self::ProductNotFound(id) => write!(f, "product not found: {id}"),
            Self::SeedTargetNotEmpty(table) => {
                write!(f, "cannot seed `{table}`: active rows already exist")
            }
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "catalog repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "catalog repository requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "catalog repository requires column `{column}` in table `{table}`"
            ),
            Self::InvalidData(message) => write!(f, "invalid catalog data: {message}"),
        }
    }
}

impl Error for CatalogRepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Rank(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for CatalogRepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for CatalogRepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<RankError> for CatalogRepoError {
    fn from(value: RankError) -> Self {
        Self::Rank(value)
    }
}

/// Repository interface for the ordered menu catalog.
pub trait CatalogRepository {
    /// Creates one category at the end of the list.
    fn create_category(&self, name: &str) -> CatalogRepoResult<Category>;
    /// Seeds a brand-new category list with evenly spaced ranks.
    fn seed_categories(&self, names: &[String]) -> CatalogRepoResult<Vec<Category>>;
    /// Loads one category by id.
    fn get_category(
        &self,
        uuid: CategoryId,
        include_deleted: bool,
    ) -> CatalogRepoResult<Option<Category>>;
    /// Lists categories in display order.
    fn list_categories(&self, include_deleted: bool) -> CatalogRepoResult<Vec<Category>>;
    /// Renames one category.
    fn rename_category(&self, uuid: CategoryId, name: &str) -> CatalogRepoResult<()>;
    /// Moves one category to a sibling index; returns the new rank key.
    fn move_category(
        &self,
        uuid: CategoryId,
        target_index: Option<usize>,
    ) -> CatalogRepoResult<RankKey>;
    /// Soft-deletes one category.
    fn soft_delete_category(&self, uuid: CategoryId) -> CatalogRepoResult<()>;

    /// Creates one product at the end of its category's list.
    fn create_product(
        &self,
        category_uuid: CategoryId,
        name: &str,
        price_cents: i64,
    ) -> CatalogRepoResult<Product>;
    /// Seeds a brand-new product list under one category.
    fn seed_products(
        &self,
        category_uuid: CategoryId,
        items: &[(String, i64)],
    ) -> CatalogRepoResult<Vec<Product>>;
    /// Loads one product by id.
    fn get_product(
        &self,
        uuid: ProductId,
        include_deleted: bool,
    ) -> CatalogRepoResult<Option<Product>>;
    /// Lists products of one category in display order.
    fn list_products(
        &self,
        category_uuid: CategoryId,
        include_deleted: bool,
    ) -> CatalogRepoResult<Vec<Product>>;
    /// Updates name and price of one product.
    fn update_product(&self, uuid: ProductId, name: &str, price_cents: i64)
        -> CatalogRepoResult<()>;
    /// Moves one product within its category; returns the new rank key.
    fn move_product(
        &self,
        uuid: ProductId,
        target_index: Option<usize>,
    ) -> CatalogRepoResult<RankKey>;
    /// Soft-deletes one product.
    fn soft_delete_product(&self, uuid: ProductId) -> CatalogRepoResult<()>;
}

/// SQLite-backed catalog repository.
#[derive(Debug)]
pub struct SqliteCatalogRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCatalogRepository<'conn> {
    /// Creates a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> CatalogRepoResult<Self> {
        ensure_catalog_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl CatalogRepository for SqliteCatalogRepository<'_> {
    fn create_category(&self, name: &str) -> CatalogRepoResult<Category> {
        let uuid = Uuid::new_v4();
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let rank = append_rank(&tx, "categories", None)?;
        tx.execute(
            "INSERT INTO categories (uuid, name, rank, is_deleted)
             VALUES (?1, ?2, ?3, 0);",
            params![uuid.to_string(), name, rank],
        )?;
        tx.commit()?;
        load_required_category(self.conn, uuid)
    }

    fn seed_categories(&self, names: &[String]) -> CatalogRepoResult<Vec<Category>> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let active: i64 = tx.query_row(
            "SELECT COUNT(*) FROM categories WHERE is_deleted = 0;",
            [],
            |row| row.get(0),
        )?;
        if active > 0 {
            return Err(CatalogRepoError::SeedTargetNotEmpty("categories"));
        }

        let ranks = rank::even_ranks(names.len(), DEFAULT_KEY_LEN)?;
        let mut uuids = Vec::with_capacity(names.len());
        for (name, rank) in names.iter().zip(&ranks) {
            let uuid = Uuid::new_v4();
            tx.execute(
                "INSERT INTO categories (uuid, name, rank, is_deleted)
                 VALUES (?1, ?2, ?3, 0);",
                params![uuid.to_string(), name, rank],
            )?;
            uuids.push(uuid);
        }
        tx.commit()?;

        uuids
            .into_iter()
            .map(|uuid| load_required_category(self.conn, uuid))
            .collect()
    }

    fn get_category(
        &self,
        uuid: CategoryId,
        include_deleted: bool,
    ) -> CatalogRepoResult<Option<Category>> {
        let sql = if include_deleted {
            "SELECT uuid, name, rank, is_deleted, created_at, updated_at
             FROM categories
             WHERE uuid = ?1;"
        } else {
            "SELECT uuid, name, rank, is_deleted, created_at, updated_at
             FROM categories
             WHERE uuid = ?1
               AND is_deleted = 0;"
        };
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query([uuid.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_category_row(row)?));
        }
        Ok(None)
    }

    fn list_categories(&self, include_deleted: bool) -> CatalogRepoResult<Vec<Category>> {
        let sql = if include_deleted {
            "SELECT uuid, name, rank, is_deleted, created_at, updated_at
             FROM categories
             ORDER BY rank ASC, uuid ASC;"
        } else {
            "SELECT uuid, name, rank, is_deleted, created_at, updated_at
             FROM categories
             WHERE is_deleted = 0
             ORDER BY rank ASC, uuid ASC;"
        };
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query([])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(parse_category_row(row)?);
        }
        Ok(items)
    }

    fn rename_category(&self, uuid: CategoryId, name: &str) -> CatalogRepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE categories
             SET name = ?2,
                 updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?1
               AND is_deleted = 0;",
            params![uuid.to_string(), name],
        )?;
        if changed == 0 {
            return Err(CatalogRepoError::CategoryNotFound(uuid));
        }
        Ok(())
    }

    fn move_category(
        &self,
        uuid: CategoryId,
        target_index: Option<usize>,
    ) -> CatalogRepoResult<RankKey> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let exists: i64 = tx.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM categories WHERE uuid = ?1 AND is_deleted = 0
            );",
            [uuid.to_string()],
            |row| row.get(0),
        )?;
        if exists == 0 {
            return Err(CatalogRepoError::CategoryNotFound(uuid));
        }

        let siblings = sibling_ranks(
            &tx,
            "SELECT rank FROM categories
             WHERE is_deleted = 0
               AND uuid != ?1
             ORDER BY rank ASC, uuid ASC;",
            &[&uuid.to_string()],
        )?;
        let new_rank = rank_for_index(&siblings, target_index)?;

        tx.execute(
            "UPDATE categories
             SET rank = ?2,
                 updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?1
               AND is_deleted = 0;",
            params![uuid.to_string(), new_rank],
        )?;
        tx.commit()?;
        Ok(new_rank)
    }

    fn soft_delete_category(&self, uuid: CategoryId) -> CatalogRepoResult<()> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let changed = tx.execute(
            "UPDATE categories
             SET is_deleted = 1,
                 updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?1
               AND is_deleted = 0;",
            [uuid.to_string()],
        )?;
        if changed == 0 {
            return Err(CatalogRepoError::CategoryNotFound(uuid));
        }
        // Products of a tombstoned category are tombstoned with it; their
        // ranks stay untouched and are never reassigned.
        tx.execute(
            "UPDATE products
             SET is_deleted = 1,
                 updated_at = (strftime('%s', 'now') * 1000)
             WHERE category_uuid = ?1
               AND is_deleted = 0;",
            [uuid.to_string()],
        )?;
        tx.commit()?;
        Ok(())
    }

    fn create_product(
        &self,
        category_uuid: CategoryId,
        name: &str,
        price_cents: i64,
    ) -> CatalogRepoResult<Product> {
        ensure_active_category(self.conn, category_uuid)?;
        let uuid = Uuid::new_v4();
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let rank = append_rank(&tx, "products", Some(category_uuid))?;
        tx.execute(
            "INSERT INTO products (uuid, category_uuid, name, price_cents, rank, is_deleted)
             VALUES (?1, ?2, ?3, ?4, ?5, 0);",
            params![
                uuid.to_string(),
                category_uuid.to_string(),
                name,
                price_cents,
                rank,
            ],
        )?;
        tx.commit()?;
        load_required_product(self.conn, uuid)
    }

    fn seed_products(
        &self,
        category_uuid: CategoryId,
        items: &[(String, i64)],
    ) -> CatalogRepoResult<Vec<Product>> {
        ensure_active_category(self.conn, category_uuid)?;
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let active: i64 = tx.query_row(
            "SELECT COUNT(*) FROM products WHERE category_uuid = ?1 AND is_deleted = 0;",
            [category_uuid.to_string()],
            |row| row.get(0),
        )?;
        if active > 0 {
            return Err(CatalogRepoError::SeedTargetNotEmpty("products"));
        }

        let ranks = rank::even_ranks(items.len(), DEFAULT_KEY_LEN)?;
        let mut uuids = Vec::with_capacity(items.len());
        for ((name, price_cents), rank) in items.iter().zip(&ranks) {
            let uuid = Uuid::new_v4();
            tx.execute(
                "INSERT INTO products (uuid, category_uuid, name, price_cents, rank, is_deleted)
                 VALUES (?1, ?2, ?3, ?4, ?5, 0);",
                params![
                    uuid.to_string(),
                    category_uuid.to_string(),
                    name,
                    price_cents,
                    rank,
                ],
            )?;
            uuids.push(uuid);
        }
        tx.commit()?;

        uuids
            .into_iter()
            .map(|uuid| load_required_product(self.conn, uuid))
            .collect()
    }

    fn get_product(
        &self,
        uuid: ProductId,
        include_deleted: bool,
    ) -> CatalogRepoResult<Option<Product>> {
        let sql = if include_deleted {
            "SELECT uuid, category_uuid, name, price_cents, rank, is_deleted,
                    created_at, updated_at
             FROM products
             WHERE uuid = ?1;"
        } else {
            "SELECT uuid, category_uuid, name, price_cents, rank, is_deleted,
                    created_at, updated_at
             FROM products
             WHERE uuid = ?1
               AND is_deleted = 0;"
        };
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query([uuid.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_product_row(row)?));
        }
        Ok(None)
    }

    fn list_products(
        &self,
        category_uuid: CategoryId,
        include_deleted: bool,
    ) -> CatalogRepoResult<Vec<Product>> {
        let sql = if include_deleted {
            "SELECT uuid, category_uuid, name, price_cents, rank, is_deleted,
                    created_at, updated_at
             FROM products
             WHERE category_uuid = ?1
             ORDER BY rank ASC, uuid ASC;"
        } else {
            "SELECT uuid, category_uuid, name, price_cents, rank, is_deleted,
                    created_at, updated_at
             FROM products
             WHERE category_uuid = ?1
               AND is_deleted = 0
             ORDER BY rank ASC, uuid ASC;"
        };
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query([category_uuid.to_string()])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(parse_product_row(row)?);
        }
        Ok(items)
    }

    fn update_product(
        &self,
        uuid: ProductId,
        name: &str,
        price_cents: i64,
    ) -> CatalogRepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE products
             SET name = ?2,
                 price_cents = ?3,
                 updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?1
               AND is_deleted = 0;",
            params![uuid.to_string(), name, price_cents],
        )?;
        if changed == 0 {
            return Err(CatalogRepoError::ProductNotFound(uuid));
        }
        Ok(())
    }

    fn move_product(
        &self,
        uuid: ProductId,
        target_index: Option<usize>,
    ) -> CatalogRepoResult<RankKey> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let category: Option<String> = tx
            .query_row(
                "SELECT category_uuid FROM products WHERE uuid = ?1 AND is_deleted = 0;",
                [uuid.to_string()],
                |row| row.get(0),
            )
            .optional()?;
        let category = category.ok_or(CatalogRepoError::ProductNotFound(uuid))?;

        let siblings = sibling_ranks(
            &tx,
            "SELECT rank FROM products
             WHERE category_uuid = ?1
               AND is_deleted = 0
               AND uuid != ?2
             ORDER BY rank ASC, uuid ASC;",
            &[&category, &uuid.to_string()],
        )?;
        let new_rank = rank_for_index(&siblings, target_index)?;

        tx.execute(
            "UPDATE products
             SET rank = ?2,
                 updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?1
               AND is_deleted = 0;",
            params![uuid.to_string(), new_rank],
        )?;
        tx.commit()?;
        Ok(new_rank)
    }

    fn soft_delete_product(&self, uuid: ProductId) -> CatalogRepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE products
             SET is_deleted = 1,
                 updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?1
               AND is_deleted = 0;",
            [uuid.to_string()],
        )?;
        if changed == 0 {
            return Err(CatalogRepoError::ProductNotFound(uuid));
        }
        Ok(())
    }
}

/// Computes the rank for inserting at `target_index` among the given sibling
/// ranks (the moved row excluded). `None` or an oversized index appends.
///
/// Exactly the caller contract from the drag-and-drop handlers: the previous
/// and next neighbor bound the new key, with the reserved minimum/maximum
/// sentinels standing in at the edges.
fn rank_for_index(siblings: &[RankKey], target_index: Option<usize>) -> CatalogRepoResult<RankKey> {
    let index = target_index.unwrap_or(siblings.len()).min(siblings.len());
    let lo = if index == 0 {
        rank::min_key(DEFAULT_KEY_LEN)
    } else {
        siblings[index - 1].clone()
    };
    let hi = if index == siblings.len() {
        append_bound(&lo)
    } else {
        siblings[index].clone()
    };
    Ok(rank::rank_between(&lo, &hi)?)
}

/// Computes the rank for appending after the current maximum in a scope.
fn append_rank(
    conn: &Connection,
    table: &'static str,
    category_uuid: Option<CategoryId>,
) -> CatalogRepoResult<RankKey> {
    let last: Option<RankKey> = match (table, category_uuid) {
        ("products", Some(category_uuid)) => conn
            .query_row(
                "SELECT rank FROM products
                 WHERE category_uuid = ?1
                   AND is_deleted = 0
                 ORDER BY rank DESC, uuid DESC
                 LIMIT 1;",
                [category_uuid.to_string()],
                |row| row.get(0),
            )
            .optional()?,
        _ => conn
            .query_row(
                "SELECT rank FROM categories
                 WHERE is_deleted = 0
                 ORDER BY rank DESC, uuid DESC
                 LIMIT 1;",
                [],
                |row| row.get(0),
            )
            .optional()?,
    };

    let lo = last.unwrap_or_else(|| rank::min_key(DEFAULT_KEY_LEN));
    Ok(rank::rank_between(&lo, &append_bound(&lo))?)
}

/// Upper bound used when appending after `lo`.
///
/// The reserved maximum sentinel works until some row actually reaches it
/// (an evenly seeded list puts its last row there whenever the span divides
/// the seed count). Past that point the bound widens by one character so
/// appends keep working instead of failing on `lo >= hi`.
fn append_bound(lo: &str) -> RankKey {
    let sentinel = rank::max_key(DEFAULT_KEY_LEN);
    if lo < sentinel.as_str() {
        sentinel
    } else {
        rank::max_key(lo.len() + 1)
    }
}

fn sibling_ranks(
    conn: &Connection,
    sql: &str,
    params: &[&dyn rusqlite::ToSql],
) -> CatalogRepoResult<Vec<RankKey>> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query(params)?;
    let mut ranks = Vec::new();
    while let Some(row) = rows.next()? {
        let rank: String = row.get(0)?;
        ranks.push(rank);
    }
    Ok(ranks)
}

fn ensure_active_category(conn: &Connection, uuid: CategoryId) -> CatalogRepoResult<()> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1 FROM categories WHERE uuid = ?1 AND is_deleted = 0
        );",
        [uuid.to_string()],
        |row| row.get(0),
    )?;
    if exists == 0 {
        return Err(CatalogRepoError::CategoryNotFound(uuid));
    }
    Ok(())
}

fn load_required_category(conn: &Connection, uuid: CategoryId) -> CatalogRepoResult<Category> {
    let mut stmt = conn.prepare(
        "SELECT uuid, name, rank, is_deleted, created_at, updated_at
         FROM categories
         WHERE uuid = ?1
           AND is_deleted = 0;",
    )?;
    let mut rows = stmt.query([uuid.to_string()])?;
    if let Some(row) = rows.next()? {
        return parse_category_row(row);
    }
    Err(CatalogRepoError::CategoryNotFound(uuid))
}

fn load_required_product(conn: &Connection, uuid: ProductId) -> CatalogRepoResult<Product> {
    let mut stmt = conn.prepare(
        "SELECT uuid, category_uuid, name, price_cents, rank, is_deleted,
                created_at, updated_at
         FROM products
         WHERE uuid = ?1
           AND is_deleted = 0;",
    )?;
    let mut rows = stmt.query([uuid.to_string()])?;
    if let Some(row) = rows.next()? {
        return parse_product_row(row);
    }
    Err(CatalogRepoError::ProductNotFound(uuid))
}

fn parse_category_row(row: &Row<'_>) -> CatalogRepoResult<Category> {
    let uuid_text: String = row.get("uuid")?;
    Ok(Category {
        uuid: parse_uuid(&uuid_text, "categories.uuid")?,
        name: row.get("name")?,
        rank: parse_rank(row.get("rank")?, "categories.rank")?,
        is_deleted: parse_tombstone(row.get("is_deleted")?, "categories.is_deleted")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

fn parse_product_row(row: &Row<'_>) -> CatalogRepoResult<Product> {
    let uuid_text: String = row.get("uuid")?;
    let category_text: String = row.get("category_uuid")?;
    Ok(Product {
        uuid: parse_uuid(&uuid_text, "products.uuid")?,
        category_uuid: parse_uuid(&category_text, "products.category_uuid")?,
        name: row.get("name")?,
        price_cents: row.get("price_cents")?,
        rank: parse_rank(row.get("rank")?, "products.rank")?,
        is_deleted: parse_tombstone(row.get("is_deleted")?, "products.is_deleted")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

fn parse_rank(value: String, column: &'static str) -> CatalogRepoResult<RankKey> {
    rank::validate_key(&value)
        .map_err(|err| CatalogRepoError::InvalidData(format!("{err} in {column}")))?;
    Ok(value)
}

fn parse_tombstone(value: i64, column: &'static str) -> CatalogRepoResult<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(CatalogRepoError::InvalidData(format!(
            "invalid is_deleted value `{other}` in {column}"
        ))),
    }
}

fn parse_uuid(value: &str, column: &'static str) -> CatalogRepoResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| CatalogRepoError::InvalidData(format!("invalid uuid `{value}` in {column}")))
}

fn ensure_catalog_connection_ready(conn: &Connection) -> CatalogRepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(CatalogRepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    for (table, columns) in [
        (
            "categories",
            [
                "uuid",
                "name",
                "rank",
                "is_deleted",
                "created_at",
                "updated_at",
            ]
            .as_slice(),
        ),
        (
            "products",
            [
                "uuid",
                "category_uuid",
                "name",
                "price_cents",
                "rank",
                "is_deleted",
                "created_at",
                "updated_at",
            ]
            .as_slice(),
        ),
    ] {
        if !table_exists(conn, table)? {
            return Err(CatalogRepoError::MissingRequiredTable(table));
        }
        for column in columns.iter().copied() {
            if !table_has_column(conn, table, column)? {
                return Err(CatalogRepoError::MissingRequiredColumn { table, column });
            }
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> CatalogRepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> CatalogRepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
