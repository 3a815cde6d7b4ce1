//! # Product Edit View-Model
//!
//! State holder for the edit screen: loads one snapshot of an existing
//! product into editable text form, revalidates on every change, and
//! writes back on request.
//!
//! ## One-Shot Load
//! Unlike the details screen, the edit screen does NOT track external
//! changes to the row: the user is editing the snapshot they opened.
//! Concurrent edits of the same record are last-write-wins.

use std::sync::Arc;

use tokio::sync::watch;

use tienda_core::{validate_input, ProductDetails, ProductUiState};
use tienda_db::{DbResult, ProductsRepository};

/// View-model to retrieve and update a product from the
/// [`ProductsRepository`]'s data source.
pub struct ProductEditViewModel {
    repository: Arc<dyn ProductsRepository>,

    /// Current edit state, replaced atomically on every change.
    ui_state: watch::Sender<ProductUiState>,
}

impl ProductEditViewModel {
    /// Loads the first available snapshot of `product_id` and starts an
    /// edit session from it, marked valid.
    ///
    /// Waits for the row to exist; resolves with an error only if the
    /// store closes first.
    pub async fn load(
        repository: Arc<dyn ProductsRepository>,
        product_id: i64,
    ) -> DbResult<Self> {
        let mut stream = repository.product_stream(product_id);
        let product = loop {
            // Absent snapshots are filtered out, same as the details flow.
            if let Some(product) = stream.next().await? {
                break product;
            }
        };

        let (ui_state, _) = watch::channel(product.to_ui_state(true));

        Ok(ProductEditViewModel {
            repository,
            ui_state,
        })
    }

    /// Returns the current edit UI state.
    pub fn ui_state(&self) -> ProductUiState {
        self.ui_state.borrow().clone()
    }

    /// Subscribes to edit UI state changes.
    pub fn subscribe(&self) -> watch::Receiver<ProductUiState> {
        self.ui_state.subscribe()
    }

    /// Replaces the in-progress details with the value provided in the
    /// argument. Also re-runs entry validation.
    pub fn update_ui_state(&self, product_details: ProductDetails) {
        let is_entry_valid = validate_input(&product_details);
        self.ui_state.send_replace(ProductUiState {
            product_details,
            is_entry_valid,
        });
    }

    /// Persists the edited product if the current state validates.
    ///
    /// Silently no-ops when invalid - the screen is expected to disable
    /// the save action off `is_entry_valid` instead.
    pub async fn update_product(&self) -> DbResult<()> {
        let state = self.ui_state();
        if validate_input(&state.product_details) {
            self.repository
                .update_product(&state.product_details.to_product())
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
    use tienda_core::Product;
    use tienda_db::{Database, DbConfig};

    fn camisa() -> Product {
        Product {
            id: 1,
            name: "Camisa".to_string(),
            material: "algodon".to_string(),
            price: 10.0,
            quantity: 20,
        }
    }

    async fn setup() -> (Database, ProductEditViewModel) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.products().insert(&camisa()).await.unwrap();
        let vm = ProductEditViewModel::load(Arc::new(db.repository()), 1)
            .await
            .unwrap();
        (db, vm)
    }

    #[tokio::test]
    async fn test_load_converts_snapshot_to_valid_text_state() {
        let (_db, vm) = setup().await;

        let state = vm.ui_state();
        assert!(state.is_entry_valid);
        assert_eq!(state.product_details.name, "Camisa");
        assert_eq!(state.product_details.price, "10");
        assert_eq!(state.product_details.quantity, "20");
    }

    #[tokio::test]
    async fn test_load_is_one_shot() {
        let (db, vm) = setup().await;

        // An external change after load is NOT reflected in the session.
        db.products()
            .update(&Product {
                quantity: 5,
                ..camisa()
            })
            .await
            .unwrap();

        assert_eq!(vm.ui_state().product_details.quantity, "20");
    }

    #[tokio::test]
    async fn test_update_ui_state_revalidates() {
        let (_db, vm) = setup().await;

        let mut details = vm.ui_state().product_details;
        details.material = "  ".to_string();
        vm.update_ui_state(details);

        assert!(!vm.ui_state().is_entry_valid);
    }

    #[tokio::test]
    async fn test_update_product_persists_edits() {
        let (db, vm) = setup().await;

        let mut details = vm.ui_state().product_details;
        details.price = "15.0".to_string();
        details.quantity = "25".to_string();
        vm.update_ui_state(details);

        vm.update_product().await.unwrap();

        let stored = db.products().get_product(1).await.unwrap().unwrap();
        assert_eq!(
            stored,
            Product {
                price: 15.0,
                quantity: 25,
                ..camisa()
            }
        );
    }

    #[tokio::test]
    async fn test_update_product_silently_ignores_invalid_state() {
        let (db, vm) = setup().await;

        let mut details = vm.ui_state().product_details;
        details.name.clear();
        vm.update_ui_state(details);

        vm.update_product().await.unwrap();

        // Untouched.
        let stored = db.products().get_product(1).await.unwrap().unwrap();
        assert_eq!(stored, camisa());
    }

    #[tokio::test]
    async fn test_load_waits_for_row_to_appear() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = Arc::new(db.repository());

        let dao = db.products();
        let pending = tokio::spawn(ProductEditViewModel::load(repo, 7));

        let mut late = camisa();
        late.id = 7;
        dao.insert(&late).await.unwrap();

        let vm = pending.await.unwrap().unwrap();
        assert_eq!(vm.ui_state().product_details.id, 7);
    }
}
