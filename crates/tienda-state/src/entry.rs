//! # Product Entry View-Model
//!
//! State holder for the add-product screen: starts from empty fields,
//! revalidates on every keystroke, inserts on save.

use std::sync::Arc;

use tokio::sync::watch;

use tienda_core::{validate_input, ProductDetails, ProductUiState};
use tienda_db::{DbResult, ProductsRepository};

/// View-model to validate and insert products in the data source.
pub struct ProductEntryViewModel {
    repository: Arc<dyn ProductsRepository>,

    /// Current entry state, replaced atomically on every change.
    /// Starts empty and invalid.
    ui_state: watch::Sender<ProductUiState>,
}

impl ProductEntryViewModel {
    /// Creates an entry session with empty fields.
    pub fn new(repository: Arc<dyn ProductsRepository>) -> Self {
        let (ui_state, _) = watch::channel(ProductUiState::default());

        ProductEntryViewModel {
            repository,
            ui_state,
        }
    }

    /// Returns the current entry UI state.
    pub fn ui_state(&self) -> ProductUiState {
        self.ui_state.borrow().clone()
    }

    /// Subscribes to entry UI state changes.
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

    /// Inserts the entered product if the current state validates.
    ///
    /// ## Returns
    /// * `Ok(Some(id))` - Inserted; id assigned by the store
    /// * `Ok(None)` - State was invalid; nothing happened
    pub async fn save_product(&self) -> DbResult<Option<i64>> {
        let state = self.ui_state();
        if !validate_input(&state.product_details) {
            return Ok(None);
        }

        let id = self
            .repository
            .insert_product(&state.product_details.to_product())
            .await?;
        Ok(Some(id))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tienda_db::{Database, DbConfig};

    fn filled() -> ProductDetails {
        ProductDetails {
            id: 0,
            name: "Camisa".to_string(),
            material: "algodon".to_string(),
            price: "10.0".to_string(),
            quantity: "20".to_string(),
        }
    }

    async fn setup() -> (Database, ProductEntryViewModel) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let vm = ProductEntryViewModel::new(Arc::new(db.repository()));
        (db, vm)
    }

    #[tokio::test]
    async fn test_starts_empty_and_invalid() {
        let (_db, vm) = setup().await;

        let state = vm.ui_state();
        assert!(!state.is_entry_valid);
        assert_eq!(state.product_details, ProductDetails::default());
    }

    #[tokio::test]
    async fn test_update_ui_state_validates() {
        let (_db, vm) = setup().await;

        vm.update_ui_state(filled());
        assert!(vm.ui_state().is_entry_valid);

        let mut details = filled();
        details.quantity.clear();
        vm.update_ui_state(details);
        assert!(!vm.ui_state().is_entry_valid);
    }

    #[tokio::test]
    async fn test_save_product_inserts_and_returns_assigned_id() {
        let (db, vm) = setup().await;

        vm.update_ui_state(filled());
        let id = vm.save_product().await.unwrap().expect("valid entry saves");

        let stored = db.products().get_product(id).await.unwrap().unwrap();
        assert_eq!(stored.name, "Camisa");
        assert_eq!(stored.quantity, 20);
    }

    #[tokio::test]
    async fn test_save_product_silently_ignores_invalid_state() {
        let (db, vm) = setup().await;

        let mut details = filled();
        details.name = " ".to_string();
        vm.update_ui_state(details);

        assert_eq!(vm.save_product().await.unwrap(), None);
        assert_eq!(db.products().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_unparseable_numbers_save_as_zero() {
        let (db, vm) = setup().await;

        let mut details = filled();
        details.price = "diez".to_string();
        details.quantity = "veinte".to_string();
        vm.update_ui_state(details);
        assert!(vm.ui_state().is_entry_valid);

        let id = vm.save_product().await.unwrap().unwrap();

        let stored = db.products().get_product(id).await.unwrap().unwrap();
        assert_eq!(stored.price, 0.0);
        assert_eq!(stored.quantity, 0);
    }

    #[tokio::test]
    async fn test_subscriber_observes_entry_changes() {
        let (_db, vm) = setup().await;
        let mut rx = vm.subscribe();

        vm.update_ui_state(filled());
        rx.changed().await.unwrap();
        assert!(rx.borrow().is_entry_valid);
    }
}
