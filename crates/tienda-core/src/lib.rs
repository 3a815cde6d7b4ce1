//! # tienda-core: Pure Domain Types for Tienda Inventory
//!
//! This crate is the **heart** of Tienda Inventory. It contains the domain
//! model and entry validation as pure code with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Tienda Inventory Architecture                       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Presentation (out of scope)                    │   │
//! │  │     List screen ──► Details screen ──► Entry / Edit screens    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ observes UI state                      │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 tienda-state (view-models)                      │   │
//! │  │     ProductDetailsViewModel, ProductEditViewModel, ...          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tienda-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────────┐  ┌────────────────┐  ┌────────────────────┐  │   │
//! │  │   │   types     │  │   validation   │  │   conversions      │  │   │
//! │  │   │  Product    │  │ validate_input │  │ Product ⇄ Details  │  │   │
//! │  │   │  UI states  │  │                │  │ text ⇄ numeric     │  │   │
//! │  │   └─────────────┘  └────────────────┘  └────────────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  tienda-db (Database Layer)                     │   │
//! │  │            SQLite queries, migrations, live streams             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, ProductDetails, UI states)
//! - [`validation`] - Entry validation rule shared by the entry and edit flows
//!
//! ## Example Usage
//!
//! ```rust
//! use tienda_core::{Product, ProductDetails};
//! use tienda_core::validation::validate_input;
//!
//! let details = ProductDetails {
//!     id: 0,
//!     name: "Camisa".to_string(),
//!     material: "algodon".to_string(),
//!     price: "10.0".to_string(),
//!     quantity: "20".to_string(),
//! };
//!
//! assert!(validate_input(&details));
//!
//! let product: Product = details.to_product();
//! assert_eq!(product.quantity, 20);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use tienda_core::Product` instead of
// `use tienda_core::types::Product`

pub use types::{Product, ProductDetails, ProductDetailsUiState, ProductUiState};
pub use validation::validate_input;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Sentinel id for a product that has not been persisted yet.
///
/// ## Why a constant?
/// The entry flow builds products before the store has assigned them an id.
/// The DAO treats this value as "unassigned" and lets SQLite pick the next
/// rowid on insert; any other value is honored verbatim.
pub const UNASSIGNED_PRODUCT_ID: i64 = 0;
