//! # Products Repository
//!
//! The persistence seam the rest of the app depends on.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  View-model                                                            │
//! │       │                                                                 │
//! │       │  repo.insert_product(&product)                                  │
//! │       ▼                                                                 │
//! │  dyn ProductsRepository  ← the ONLY persistence surface consumers see  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  OfflineProductsRepository ── pass-through ──► ProductDao ──► SQLite   │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • Consumers never name the storage technology                         │
//! │  • A remote-backed implementation can slot in without touching them    │
//! │  • Easy to fake in view-model tests                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The live-stream handles ([`ProductListStream`], [`ProductStream`]) are
//! concrete types owned by this crate: they encapsulate the change-feed
//! subscription, which is part of the store, the same way the mutations are.

use async_trait::async_trait;

use crate::dao::{ProductDao, ProductListStream, ProductStream};
use crate::error::DbResult;
use tienda_core::Product;

/// Repository that provides insert, update, delete, and retrieval of
/// [`Product`]s from a given data source.
#[async_trait]
pub trait ProductsRepository: Send + Sync {
    /// Retrieves a live stream of all products, ordered by name.
    fn all_products_stream(&self) -> ProductListStream;

    /// Retrieves a live stream of the product matching `id`.
    fn product_stream(&self, id: i64) -> ProductStream;

    /// Inserts a product in the data source; returns the stored id.
    async fn insert_product(&self, product: &Product) -> DbResult<i64>;

    /// Updates a product in the data source, matched by id.
    async fn update_product(&self, product: &Product) -> DbResult<()>;

    /// Deletes a product from the data source, matched by id.
    async fn delete_product(&self, product: &Product) -> DbResult<()>;
}

/// [`ProductsRepository`] backed by the local SQLite store.
///
/// Pure pass-through delegation to [`ProductDao`] - no added logic,
/// caching, or transformation.
#[derive(Debug, Clone)]
pub struct OfflineProductsRepository {
    dao: ProductDao,
}

impl OfflineProductsRepository {
    /// Creates a repository over the given DAO.
    pub fn new(dao: ProductDao) -> Self {
        OfflineProductsRepository { dao }
    }
}

#[async_trait]
impl ProductsRepository for OfflineProductsRepository {
    fn all_products_stream(&self) -> ProductListStream {
        self.dao.observe_all()
    }

    fn product_stream(&self, id: i64) -> ProductStream {
        self.dao.observe_by_id(id)
    }

    async fn insert_product(&self, product: &Product) -> DbResult<i64> {
        self.dao.insert(product).await
    }

    async fn update_product(&self, product: &Product) -> DbResult<()> {
        self.dao.update(product).await
    }

    async fn delete_product(&self, product: &Product) -> DbResult<()> {
        self.dao.delete(product).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use std::sync::Arc;

    fn camisa() -> Product {
        Product {
            id: 1,
            name: "Camisa".to_string(),
            material: "algodon".to_string(),
            price: 10.0,
            quantity: 20,
        }
    }

    #[tokio::test]
    async fn test_repository_delegates_to_dao() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        // Through the trait object, the way view-models hold it.
        let repo: Arc<dyn ProductsRepository> = Arc::new(db.repository());

        repo.insert_product(&camisa()).await.unwrap();

        let mut list = repo.all_products_stream();
        assert_eq!(list.next().await.unwrap(), vec![camisa()]);

        let mut one = repo.product_stream(1);
        assert_eq!(one.next().await.unwrap(), Some(camisa()));

        let updated = Product {
            quantity: 19,
            ..camisa()
        };
        repo.update_product(&updated).await.unwrap();
        assert_eq!(one.next().await.unwrap(), Some(updated.clone()));

        repo.delete_product(&updated).await.unwrap();
        assert_eq!(one.next().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_mutation_through_repository_wakes_dao_stream() {
        // The repository adds nothing on top of the DAO: a write through one
        // surface is observed through the other.
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.repository();

        let mut stream = db.products().observe_all();
        assert!(stream.next().await.unwrap().is_empty());

        repo.insert_product(&camisa()).await.unwrap();
        assert_eq!(stream.next().await.unwrap(), vec![camisa()]);
    }
}
