//! # Product Details View-Model
//!
//! State holder for the details screen.
//!
//! ## State Derivation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   Details Screen Data Flow                              │
//! │                                                                         │
//! │  repository.product_stream(id)                                         │
//! │       │                                                                 │
//! │       │  Some(product) ──► ProductDetailsUiState {                     │
//! │       │                       out_of_stock: quantity <= 0,             │
//! │       │                       product_details,                         │
//! │       │                    }                                            │
//! │       │  None ─────────────► filtered out (state keeps last snapshot)  │
//! │       ▼                                                                 │
//! │  SharedState (share-while-subscribed, 5s grace window)                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Details screen renders; Sell button calls reduce_quantity_by_one()   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::shared::{SharedState, StateSubscription, TIMEOUT_MILLIS};
use tienda_core::{Product, ProductDetailsUiState};
use tienda_db::{DbResult, ProductsRepository};

/// View-model to retrieve, update and delete a product from the
/// [`ProductsRepository`]'s data source.
pub struct ProductDetailsViewModel {
    repository: Arc<dyn ProductsRepository>,
    product_id: i64,

    /// The details UI state. Upstream collection runs only while someone
    /// is subscribed, plus the grace window.
    ui_state: SharedState<ProductDetailsUiState>,
}

impl ProductDetailsViewModel {
    /// Creates the view-model for one product id. No database work happens
    /// until the first subscriber arrives.
    pub fn new(repository: Arc<dyn ProductsRepository>, product_id: i64) -> Self {
        let upstream = repository.clone();
        let ui_state = SharedState::new(
            ProductDetailsUiState::default(),
            Duration::from_millis(TIMEOUT_MILLIS),
            move |tx| {
                let mut stream = upstream.product_stream(product_id);
                tokio::spawn(async move {
                    loop {
                        match stream.next().await {
                            Ok(Some(product)) => {
                                tx.send_replace(ProductDetailsUiState::from(&product));
                            }
                            // Absent row: keep showing the last snapshot.
                            Ok(None) => {}
                            Err(err) => {
                                debug!(product_id, %err, "Details stream ended");
                                break;
                            }
                        }
                    }
                })
            },
        );

        ProductDetailsViewModel {
            repository,
            product_id,
            ui_state,
        }
    }

    /// The id this view-model is bound to.
    pub fn product_id(&self) -> i64 {
        self.product_id
    }

    /// Returns the latest details UI state.
    pub fn ui_state(&self) -> ProductDetailsUiState {
        self.ui_state.current()
    }

    /// Subscribes to details UI state. The first subscriber starts the
    /// underlying product stream; the last one (plus the grace window)
    /// stops it.
    pub fn subscribe(&self) -> StateSubscription<ProductDetailsUiState> {
        self.ui_state.subscribe()
    }

    /// Deletes the product currently held in the state snapshot.
    ///
    /// The caller is responsible for navigating away afterward.
    pub async fn delete_product(&self) -> DbResult<()> {
        let product = self.ui_state().product_details.to_product();
        self.repository.delete_product(&product).await
    }

    /// Reduces the held product's quantity by one, if it is above zero.
    ///
    /// Read-then-write on the current snapshot; there is no transactional
    /// guard, so two concurrent decrements can both observe the same
    /// quantity.
    pub async fn reduce_quantity_by_one(&self) -> DbResult<()> {
        let current: Product = self.ui_state().product_details.to_product();
        if current.quantity > 0 {
            self.repository
                .update_product(&Product {
                    quantity: current.quantity - 1,
                    ..current
                })
                .await?;
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tienda_db::{Database, DbConfig};
    use tokio::time::timeout;

    fn camisa() -> Product {
        Product {
            id: 1,
            name: "Camisa".to_string(),
            material: "algodon".to_string(),
            price: 10.0,
            quantity: 20,
        }
    }

    async fn setup(product: &Product) -> (Database, ProductDetailsViewModel) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.products().insert(product).await.unwrap();
        let vm = ProductDetailsViewModel::new(Arc::new(db.repository()), product.id);
        (db, vm)
    }

    /// Awaits until the subscription sees a state matching the predicate.
    async fn wait_for(
        sub: &mut StateSubscription<ProductDetailsUiState>,
        pred: impl Fn(&ProductDetailsUiState) -> bool,
    ) -> ProductDetailsUiState {
        timeout(Duration::from_secs(5), async {
            loop {
                let state = sub.current();
                if pred(&state) {
                    return state;
                }
                sub.next().await;
            }
        })
        .await
        .expect("state never matched")
    }

    #[tokio::test]
    async fn test_maps_product_to_details_ui_state() {
        let (_db, vm) = setup(&camisa()).await;

        let mut sub = vm.subscribe();
        let state = wait_for(&mut sub, |s| s.product_details.id == 1).await;

        assert!(!state.out_of_stock);
        assert_eq!(state.product_details.name, "Camisa");
        assert_eq!(state.product_details.quantity, "20");
    }

    #[tokio::test]
    async fn test_zero_quantity_is_out_of_stock() {
        let product = Product {
            quantity: 0,
            ..camisa()
        };
        let (_db, vm) = setup(&product).await;

        let mut sub = vm.subscribe();
        let state = wait_for(&mut sub, |s| s.product_details.id == 1).await;
        assert!(state.out_of_stock);
    }

    #[tokio::test]
    async fn test_reemits_after_external_update() {
        let (db, vm) = setup(&camisa()).await;

        let mut sub = vm.subscribe();
        wait_for(&mut sub, |s| s.product_details.id == 1).await;

        db.products()
            .update(&Product {
                quantity: 0,
                ..camisa()
            })
            .await
            .unwrap();

        let state = wait_for(&mut sub, |s| s.out_of_stock).await;
        assert_eq!(state.product_details.quantity, "0");
    }

    #[tokio::test]
    async fn test_reduce_quantity_by_one() {
        let (db, vm) = setup(&camisa()).await;

        let mut sub = vm.subscribe();
        wait_for(&mut sub, |s| s.product_details.id == 1).await;

        vm.reduce_quantity_by_one().await.unwrap();

        let stored = db.products().get_product(1).await.unwrap().unwrap();
        assert_eq!(stored.quantity, 19);

        wait_for(&mut sub, |s| s.product_details.quantity == "19").await;
    }

    #[tokio::test]
    async fn test_reduce_quantity_floors_at_zero() {
        let product = Product {
            quantity: 0,
            ..camisa()
        };
        let (db, vm) = setup(&product).await;

        let mut sub = vm.subscribe();
        wait_for(&mut sub, |s| s.product_details.id == 1).await;

        vm.reduce_quantity_by_one().await.unwrap();

        let stored = db.products().get_product(1).await.unwrap().unwrap();
        assert_eq!(stored.quantity, 0);
    }

    #[tokio::test]
    async fn test_delete_product_removes_row() {
        let (db, vm) = setup(&camisa()).await;

        let mut sub = vm.subscribe();
        wait_for(&mut sub, |s| s.product_details.id == 1).await;

        vm.delete_product().await.unwrap();

        assert_eq!(db.products().get_product(1).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_state_keeps_last_snapshot_after_deletion() {
        let (db, vm) = setup(&camisa()).await;

        let mut sub = vm.subscribe();
        wait_for(&mut sub, |s| s.product_details.id == 1).await;

        db.products().delete(&camisa()).await.unwrap();

        // Absence is filtered, not surfaced: the screen still shows the
        // product it navigated in with.
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(vm.ui_state().product_details.name, "Camisa");
    }
}
