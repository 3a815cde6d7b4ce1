//! # tienda-db: Database Layer for Tienda Inventory
//!
//! This crate provides database access for Tienda Inventory.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Tienda Inventory Data Flow                          │
//! │                                                                         │
//! │  View-model (tienda-state)                                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     tienda-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐   ┌────────────────┐   ┌──────────────┐   │   │
//! │  │   │   Database    │   │  ProductDao    │   │  Migrations  │   │   │
//! │  │   │   (pool.rs)   │   │   (dao.rs)     │   │  (embedded)  │   │   │
//! │  │   │               │   │                │   │              │   │   │
//! │  │   │ SqlitePool    │◄──│ CRUD + live    │   │ 001_init.sql │   │   │
//! │  │   │ Change feed   │   │ streams        │   │              │   │   │
//! │  │   └───────────────┘   └───────┬────────┘   └──────────────┘   │   │
//! │  │                               │                                │   │
//! │  │   ┌───────────────────────────▼────────────────────────────┐  │   │
//! │  │   │  ProductsRepository (trait) / OfflineProductsRepository│  │   │
//! │  │   │  the seam consumers depend on (repository.rs)          │  │   │
//! │  │   └────────────────────────────────────────────────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │                 one table: products (by id)                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation, configuration, change feed
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`dao`] - Product data access and live streams
//! - [`repository`] - The repository seam over the DAO
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tienda_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/tienda.db")).await?;
//!
//! // One-shot reads through the DAO
//! let products = db.products().get_all_products().await?;
//!
//! // Or through the repository seam
//! let repo = db.repository();
//! let mut stream = repo.all_products_stream();
//! let snapshot = stream.next().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod dao;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// DAO and repository re-exports for convenience
pub use dao::{ProductDao, ProductListStream, ProductStream};
pub use repository::{OfflineProductsRepository, ProductsRepository};
