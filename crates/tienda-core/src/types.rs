//! # Domain Types
//!
//! Core domain types used throughout Tienda Inventory.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐       ┌─────────────────────┐                     │
//! │  │    Product      │       │  ProductDetails     │                     │
//! │  │  ─────────────  │ ◄───► │  ─────────────────  │                     │
//! │  │  id (i64)       │       │  id (i64)           │                     │
//! │  │  name           │       │  name               │                     │
//! │  │  material       │       │  material           │                     │
//! │  │  price (f64)    │       │  price (String)     │  ← text while       │
//! │  │  quantity (i64) │       │  quantity (String)  │    editing          │
//! │  └─────────────────┘       └─────────────────────┘                     │
//! │        persisted                  transient                             │
//! │                                                                         │
//! │  ┌──────────────────────────┐   ┌──────────────────────────┐           │
//! │  │     ProductUiState       │   │  ProductDetailsUiState   │           │
//! │  │  ──────────────────────  │   │  ──────────────────────  │           │
//! │  │  product_details         │   │  out_of_stock            │           │
//! │  │  is_entry_valid          │   │  product_details         │           │
//! │  └──────────────────────────┘   └──────────────────────────┘           │
//! │       entry / edit screens            details screen                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Text-While-Editing Pattern
//! `ProductDetails` keeps price and quantity as strings so a half-typed
//! value ("12.", "") never has to be rejected mid-keystroke. Conversion back
//! to numeric happens once, at commit time, in [`ProductDetails::to_product`].

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Product
// =============================================================================

/// A stored inventory item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Product {
    /// Unique identifier assigned by the store.
    /// [`crate::UNASSIGNED_PRODUCT_ID`] (0) means "not persisted yet".
    pub id: i64,

    /// Display name shown on the list and details screens.
    pub name: String,

    /// What the product is made of (e.g. "algodon", "lana").
    pub material: String,

    /// Unit price. Non-negative for valid entries.
    pub price: f64,

    /// Units currently in stock. Zero means out of stock.
    pub quantity: i64,
}

impl Product {
    /// Formats the price as a currency string for display ("$10.00").
    pub fn formatted_price(&self) -> String {
        format!("${:.2}", self.price)
    }

    /// Converts to the text-based editing projection.
    pub fn to_product_details(&self) -> ProductDetails {
        ProductDetails {
            id: self.id,
            name: self.name.clone(),
            material: self.material.clone(),
            price: self.price.to_string(),
            quantity: self.quantity.to_string(),
        }
    }

    /// Converts to entry/edit UI state with the given validity flag.
    pub fn to_ui_state(&self, is_entry_valid: bool) -> ProductUiState {
        ProductUiState {
            product_details: self.to_product_details(),
            is_entry_valid,
        }
    }
}

// =============================================================================
// Product Details (transient editing projection)
// =============================================================================

/// A view-local, text-based projection of a [`Product`].
///
/// ## Design Notes
/// - Never persisted; lives only inside entry/edit UI state.
/// - `price`/`quantity` stay strings until commit so partial or invalid
///   keystrokes survive re-renders.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductDetails {
    pub id: i64,
    pub name: String,
    pub material: String,
    pub price: String,
    pub quantity: String,
}

impl ProductDetails {
    /// Converts back to a persistable [`Product`].
    ///
    /// If `price` is not a valid f64 it becomes 0.0; if `quantity` is not a
    /// valid i64 it becomes 0. Numeric parse failure is NOT a validation
    /// failure here - [`crate::validation::validate_input`] only checks for
    /// blankness.
    pub fn to_product(&self) -> Product {
        Product {
            id: self.id,
            name: self.name.clone(),
            material: self.material.clone(),
            price: self.price.parse().unwrap_or(0.0),
            quantity: self.quantity.parse().unwrap_or(0),
        }
    }
}

// =============================================================================
// UI State Objects
// =============================================================================

/// UI state for the entry and edit screens.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductUiState {
    /// The in-progress, text-based product fields.
    pub product_details: ProductDetails,

    /// Whether all entry fields are non-blank. The save/update actions
    /// silently no-op while this is false.
    pub is_entry_valid: bool,
}

/// UI state for the details screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductDetailsUiState {
    /// True when the product has zero (or negative) stock.
    /// Defaults to true until the first snapshot arrives.
    pub out_of_stock: bool,

    /// The product currently on screen.
    pub product_details: ProductDetails,
}

impl Default for ProductDetailsUiState {
    fn default() -> Self {
        ProductDetailsUiState {
            out_of_stock: true,
            product_details: ProductDetails::default(),
        }
    }
}

impl From<&Product> for ProductDetailsUiState {
    /// Derives details-screen state from a product snapshot.
    fn from(product: &Product) -> Self {
        ProductDetailsUiState {
            out_of_stock: product.quantity <= 0,
            product_details: product.to_product_details(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
