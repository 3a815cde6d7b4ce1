//! # tienda-state: View-Model State Holders for Tienda Inventory
//!
//! This crate sits between the repository and the presentation layer: each
//! view-model subscribes to the repository, derives UI state, validates
//! user input, and issues mutations back through the repository.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    View-Model Layer Data Flow                           │
//! │                                                                         │
//! │  UI input                                                              │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  view-model mutation call ──► repository ──► data-access write         │
//! │                                                  │                      │
//! │            change feed notifies  ◄───────────────┘                      │
//! │                     │                                                   │
//! │                     ▼                                                   │
//! │  streams re-query ──► view-model re-derives UI state                   │
//! │                     │                                                   │
//! │                     ▼                                                   │
//! │  subscribers observe the new snapshot ──► presentation re-renders     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`shared`] - Share-while-subscribed snapshot machinery (grace-window
//!   teardown, replay-one subscriptions)
//! - [`details`] - [`ProductDetailsViewModel`]: live view of one product
//! - [`edit`] - [`ProductEditViewModel`]: one-shot load, validate, write back
//! - [`entry`] - [`ProductEntryViewModel`]: empty start, validate, insert
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tienda_state::ProductDetailsViewModel;
//!
//! let vm = ProductDetailsViewModel::new(Arc::new(db.repository()), product_id);
//! let mut sub = vm.subscribe(); // starts the underlying product stream
//! let state = sub.next().await;
//! if !state.out_of_stock {
//!     vm.reduce_quantity_by_one().await?;
//! }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod details;
pub mod edit;
pub mod entry;
pub mod shared;

// =============================================================================
// Re-exports
// =============================================================================

pub use details::ProductDetailsViewModel;
pub use edit::ProductEditViewModel;
pub use entry::ProductEntryViewModel;
pub use shared::{SharedState, StateStream, StateSubscription};
