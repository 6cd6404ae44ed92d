//! # cantina-ledger: Settlement Engine for Cantina POS
//!
//! The store-credit (fiado) ledger and sale-settlement workflow: the
//! one part of the system where several collections are mutated as a
//! single logical unit, and the invariants that come with that.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    Cantina POS Control Flow                         │
//! │                                                                     │
//! │  Point-of-sale view          Ledger view         Dashboard/Reports  │
//! │        │                         │                       │          │
//! │        ▼                         ▼                       ▼          │
//! │  ┌───────────────────────────────────────────────────────────────┐  │
//! │  │                cantina-ledger (THIS CRATE)                    │  │
//! │  │                                                               │  │
//! │  │   ┌────────────┐   ┌────────────┐   ┌──────────────────┐      │  │
//! │  │   │  engine    │   │   report   │   │    reconcile     │      │  │
//! │  │   │ finalize…  │   │ dashboard… │   │  check / repair  │      │  │
//! │  │   │ payment    │   │ period…    │   │  (maintenance)   │      │  │
//! │  │   └─────┬──────┘   └─────┬──────┘   └────────┬─────────┘      │  │
//! │  └─────────┼────────────────┼───────────────────┼────────────────┘  │
//! │            ▼                ▼                   ▼                   │
//! │                 cantina-db (injected Store handle)                  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Consistency Model
//!
//! The storage layer offers no cross-collection transaction, and there
//! is exactly one interactive session: settlement runs as a sequence of
//! independent writes in a fixed order (sale, then stock, then ledger).
//! The sale log is the durable source of truth; the [`reconcile`]
//! module replays it to repair derived state after a crash. A
//! deployment that ever needs multi-terminal access must add optimistic
//! versioning or a real transactional boundary around settlement first.
//!
//! ## Modules
//!
//! - [`engine`] - `finalize_sale` and `record_payment`
//! - [`report`] - read-side dashboard and period projections
//! - [`reconcile`] - post-crash consistency check/repair
//! - [`error`] - the engine's error surface

// =============================================================================
// Module Declarations
// =============================================================================

pub mod engine;
pub mod error;
pub mod reconcile;
pub mod report;

// =============================================================================
// Re-exports
// =============================================================================

pub use engine::LedgerEngine;
pub use error::{LedgerError, LedgerResult};
pub use reconcile::ReconcileReport;
pub use report::{DashboardSummary, PeriodSummary};
