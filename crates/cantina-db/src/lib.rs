//! # cantina-db: Storage Layer for Cantina POS
//!
//! This crate provides local storage for the Cantina POS system.
//! SQLite (via sqlx) backs four per-collection key-value tables.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Cantina POS Data Flow                          │
//! │                                                                     │
//! │  Ledger engine / reports / UI layer                                 │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  ┌───────────────────────────────────────────────────────────────┐  │
//! │  │                   cantina-db (THIS CRATE)                     │  │
//! │  │                                                               │  │
//! │  │   ┌─────────────┐   ┌───────────────┐   ┌────────────────┐    │  │
//! │  │   │    Store    │   │ Repositories  │   │   Migrations   │    │  │
//! │  │   │  (pool.rs)  │   │ customer.rs   │   │   (embedded)   │    │  │
//! │  │   │             │◄──│ product.rs    │   │ 001_collec….sql│    │  │
//! │  │   │ SqlitePool  │   │ sale.rs       │   └────────────────┘    │  │
//! │  │   │ Management  │   │ ledger.rs     │                         │  │
//! │  │   └─────────────┘   └───────┬───────┘                         │  │
//! │  │                             │                                 │  │
//! │  │                   ┌─────────▼─────────┐                       │  │
//! │  │                   │  Collection<T>    │  generic key-value    │  │
//! │  │                   │  (collection.rs)  │  adapter, JSON blobs  │  │
//! │  │                   └───────────────────┘                       │  │
//! │  └───────────────────────────────────────────────────────────────┘  │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  SQLite file: children / products / sales / debts tables            │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Store handle, connection pool, configuration
//! - `collection` - Generic key-value collection adapter (crate-private)
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Storage error types
//! - [`repository`] - Repository implementations per collection
//! - [`backup`] - Bulk export/restore of all collections
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cantina_db::{Store, StoreConfig};
//!
//! let store = Store::new(StoreConfig::new("./cantina.db")).await?;
//!
//! let product = store.products().create(new_product).await?;
//! store.products().adjust_stock(&product.id, -2).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod backup;
pub(crate) mod collection;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{RepoError, RepoResult, RestoreError, StoreError, StoreResult};
pub use pool::{Store, StoreConfig};

// Repository re-exports for convenience
pub use repository::customer::CustomerRepository;
pub use repository::ledger::LedgerRepository;
pub use repository::product::ProductRepository;
pub use repository::sale::SaleRepository;

// Backup re-exports
pub use backup::BackupFile;
