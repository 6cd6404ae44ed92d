//! # Ledger Error Types
//!
//! The engine surfaces exactly two failure categories to callers:
//! business/validation failures from the domain layer (nothing was
//! written, safe to retry after correcting input) and storage failures
//! (partial effects of a multi-step operation may remain — see the
//! reconciliation module).

use thiserror::Error;

use cantina_core::{CoreError, ValidationError};
use cantina_db::StoreError;

/// Errors returned by the ledger engine and the read-side queries.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Business rule or validation failure. No state was mutated; the
    /// operation is safe to retry after the input is corrected.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Underlying storage failure. Partial effects of a multi-step
    /// operation are NOT rolled back.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Field-level validation failures arrive wrapped in the core error.
impl From<ValidationError> for LedgerError {
    fn from(err: ValidationError) -> Self {
        LedgerError::Core(CoreError::Validation(err))
    }
}

/// Result type for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;
