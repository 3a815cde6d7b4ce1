//! # Product Data Access
//!
//! Database operations for products, plus the live streams the view-model
//! layer observes.
//!
//! ## Live Streams
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    How Live Streams Work                                │
//! │                                                                         │
//! │  ProductDao::insert / update / delete                                  │
//! │       │                                                                 │
//! │       │  on success: data_version.send_modify(|v| *v += 1)             │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │  change feed (watch channel, u64)       │                           │
//! │  └───────┬──────────────────┬──────────────┘                           │
//! │          │                  │                                           │
//! │          ▼                  ▼                                           │
//! │  ProductListStream    ProductStream(id=7)                              │
//! │  re-query all rows    re-query one row                                 │
//! │          │                  │                                           │
//! │          ▼                  ▼                                           │
//! │  Vec<Product>         Option<Product>                                  │
//! │                                                                         │
//! │  A stream busy during several writes wakes once and re-queries once:   │
//! │  subscribers always converge on the latest snapshot (coalescing).      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Streams never complete during normal operation. They end with
//! [`DbError::Closed`] once the store is closed.

use sqlx::SqlitePool;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

use crate::error::{DbError, DbResult};
use tienda_core::{Product, UNASSIGNED_PRODUCT_ID};

/// Data-access object for product rows.
///
/// ## Usage
/// ```rust,ignore
/// let dao = db.products();
///
/// // One-shot reads
/// let all = dao.get_all_products().await?;
/// let one = dao.get_product(7).await?;
///
/// // Live streams
/// let mut stream = dao.observe_all();
/// let snapshot = stream.next().await?; // current list, immediately
/// ```
#[derive(Debug, Clone)]
pub struct ProductDao {
    pool: SqlitePool,
    data_version: Arc<watch::Sender<u64>>,
}

impl ProductDao {
    /// Creates a new ProductDao sharing the given pool and change feed.
    pub fn new(pool: SqlitePool, data_version: Arc<watch::Sender<u64>>) -> Self {
        ProductDao { pool, data_version }
    }

    // -------------------------------------------------------------------------
    // One-shot queries
    // -------------------------------------------------------------------------

    /// Reads all products ordered by name ascending.
    pub async fn get_all_products(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, material, price, quantity
            FROM products
            ORDER BY name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Reads a product by its id.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found (not an error)
    pub async fn get_product(&self, id: i64) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, material, price, quantity
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Counts products (for diagnostics and the seed binary).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Inserts a new product.
    ///
    /// ## Id Assignment
    /// - `product.id == 0` - the store assigns the next id
    /// - any other id - honored verbatim
    ///
    /// ## Returns
    /// * `Ok(id)` - The id of the inserted row
    /// * `Err(DbError::UniqueViolation)` - Explicit id already exists
    pub async fn insert(&self, product: &Product) -> DbResult<i64> {
        debug!(name = %product.name, "Inserting product");

        let id = if product.id == UNASSIGNED_PRODUCT_ID {
            let result = sqlx::query(
                r#"
                INSERT INTO products (name, material, price, quantity)
                VALUES (?1, ?2, ?3, ?4)
                "#,
            )
            .bind(&product.name)
            .bind(&product.material)
            .bind(product.price)
            .bind(product.quantity)
            .execute(&self.pool)
            .await?;

            result.last_insert_rowid()
        } else {
            sqlx::query(
                r#"
                INSERT INTO products (id, name, material, price, quantity)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
            )
            .bind(product.id)
            .bind(&product.name)
            .bind(&product.material)
            .bind(product.price)
            .bind(product.quantity)
            .execute(&self.pool)
            .await?;

            product.id
        };

        self.notify();
        Ok(id)
    }

    /// Updates an existing product, matched by id.
    ///
    /// ## Returns
    /// * `Ok(())` - Update successful
    /// * `Err(DbError::NotFound)` - No row with that id
    pub async fn update(&self, product: &Product) -> DbResult<()> {
        debug!(id = product.id, "Updating product");

        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = ?2,
                material = ?3,
                price = ?4,
                quantity = ?5
            WHERE id = ?1
            "#,
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(&product.material)
        .bind(product.price)
        .bind(product.quantity)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", product.id));
        }

        self.notify();
        Ok(())
    }

    /// Deletes a product, matched by id. Permanent and immediate - there is
    /// no soft delete in this schema.
    ///
    /// ## Returns
    /// * `Ok(())` - Delete successful
    /// * `Err(DbError::NotFound)` - No row with that id
    pub async fn delete(&self, product: &Product) -> DbResult<()> {
        debug!(id = product.id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(product.id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", product.id));
        }

        self.notify();
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Live streams
    // -------------------------------------------------------------------------

    /// Opens a live stream of the full product list, ordered by name.
    ///
    /// The first `next()` resolves immediately with the current list;
    /// every later `next()` waits for a mutation and re-queries.
    pub fn observe_all(&self) -> ProductListStream {
        ProductListStream {
            dao: self.clone(),
            feed: self.data_version.subscribe(),
            primed: false,
        }
    }

    /// Opens a live stream of a single product row.
    ///
    /// Emits `None` while the row is absent (including after deletion);
    /// absence is a snapshot, not an error.
    pub fn observe_by_id(&self, id: i64) -> ProductStream {
        ProductStream {
            dao: self.clone(),
            feed: self.data_version.subscribe(),
            id,
            primed: false,
        }
    }

    /// Bumps the change feed after a successful mutation.
    fn notify(&self) {
        self.data_version.send_modify(|v| *v += 1);
    }
}

// =============================================================================
// Streams
// =============================================================================

/// Live feed of the full product list.
///
/// See [`ProductDao::observe_all`].
#[derive(Debug)]
pub struct ProductListStream {
    dao: ProductDao,
    feed: watch::Receiver<u64>,
    primed: bool,
}

impl ProductListStream {
    /// Waits for the next list snapshot.
    ///
    /// ## Returns
    /// * `Ok(products)` - Fresh snapshot, ordered by name
    /// * `Err(DbError::Closed)` - The store was closed
    pub async fn next(&mut self) -> DbResult<Vec<Product>> {
        if self.primed {
            self.feed.changed().await.map_err(|_| DbError::Closed)?;
        }
        self.primed = true;

        // Clear any ticks that arrived while we weren't waiting, then
        // take one coalesced snapshot.
        self.feed.borrow_and_update();
        self.dao.get_all_products().await
    }
}

/// Live feed of a single product row.
///
/// See [`ProductDao::observe_by_id`].
#[derive(Debug)]
pub struct ProductStream {
    dao: ProductDao,
    feed: watch::Receiver<u64>,
    id: i64,
    primed: bool,
}

impl ProductStream {
    /// The id this stream is watching.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Waits for the next snapshot of the watched row.
    ///
    /// ## Returns
    /// * `Ok(Some(product))` - The row, fresh
    /// * `Ok(None)` - The row is absent (missing or deleted)
    /// * `Err(DbError::Closed)` - The store was closed
    pub async fn next(&mut self) -> DbResult<Option<Product>> {
        if self.primed {
            self.feed.changed().await.map_err(|_| DbError::Closed)?;
        }
        self.primed = true;

        self.feed.borrow_and_update();
        self.dao.get_product(self.id).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
