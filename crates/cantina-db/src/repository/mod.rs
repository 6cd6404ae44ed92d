//! # Repository Module
//!
//! Repository implementations for Cantina POS.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                     │
//! │                                                                     │
//! │  Caller (ledger engine, reports, UI layer)                          │
//! │       │                                                             │
//! │       │  store.products().adjust_stock(&id, -2)                     │
//! │       ▼                                                             │
//! │  ProductRepository                                                  │
//! │  ├── create(&self, draft)                                           │
//! │  ├── get(&self, id)                                                 │
//! │  ├── update(&self, product)                                         │
//! │  └── adjust_stock(&self, id, delta)                                 │
//! │       │                                                             │
//! │       │  Collection<Product> key-value calls                        │
//! │       ▼                                                             │
//! │  SQLite collection table                                            │
//! │                                                                     │
//! │  Benefits:                                                          │
//! │  • Input validation happens before anything touches storage         │
//! │  • Id and timestamp assignment is in one place                      │
//! │  • The JSON encoding is invisible to callers                        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`customer::CustomerRepository`] - Customer registration CRUD
//! - [`product::ProductRepository`] - Catalog CRUD and stock mutation
//! - [`sale::SaleRepository`] - Immutable sale log
//! - [`ledger::LedgerRepository`] - Per-customer credit balances

pub mod customer;
pub mod ledger;
pub mod product;
pub mod sale;
