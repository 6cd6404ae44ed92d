//! # Error Types
//!
//! Domain-specific error types for cantina-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                 │
//! │                                                                     │
//! │  cantina-core errors (this file)                                    │
//! │  ├── CoreError        - Business rule violations                    │
//! │  └── ValidationError  - Input validation failures                   │
//! │                                                                     │
//! │  cantina-db errors (separate crate)                                 │
//! │  ├── StoreError       - Storage operation failures                  │
//! │  └── RestoreError     - Malformed backup input                      │
//! │                                                                     │
//! │  cantina-ledger errors (separate crate)                             │
//! │  └── LedgerError      - Core or Store, as seen by the engine        │
//! │                                                                     │
//! │  Flow: ValidationError → CoreError → LedgerError → caller/UI        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (names, ids, amounts)
//! 3. Errors are enum variants, never String
//! 4. Business rule failures leave no state mutated and are safe to
//!    retry after the input is corrected

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Business rule violations and domain logic failures.
///
/// Every variant here is recoverable: nothing has been written when one
/// of these is returned, and the operation can be retried after the
/// input is corrected.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A cart product id does not resolve to a catalog product.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// A customer reference does not resolve to a registered customer.
    #[error("Customer not found: {0}")]
    CustomerNotFound(String),

    /// Settlement was requested for an empty cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Cart has exceeded maximum allowed lines.
    #[error("Cart cannot have more than {max} lines")]
    CartTooLarge { max: usize },

    /// A credit sale was requested without a customer reference.
    #[error("A customer is required for a credit sale")]
    CustomerRequired,

    /// A credit sale was requested for a customer blocked from fiado.
    #[error("Customer {name} is blocked from credit sales")]
    CreditBlocked { customer_id: String, name: String },

    /// Requested quantity exceeds live stock.
    ///
    /// ## User Workflow
    /// ```text
    /// Settle cart (2× Coca-Cola Lata)
    ///      │
    ///      ▼
    /// Re-fetch product: stock_quantity = 1
    ///      │
    ///      ▼
    /// InsufficientStock { name: "Coca-Cola Lata", available: 1, requested: 2 }
    ///      │
    ///      ▼
    /// UI shows: "Only 1 Coca-Cola Lata in stock"
    /// ```
    #[error("Insufficient stock for {name}: available {available}, requested {requested}")]
    InsufficientStock {
        product_id: String,
        name: String,
        available: i64,
        requested: i64,
    },

    /// A payment was recorded for a customer with no ledger entry.
    #[error("No ledger entry for customer: {customer_id}")]
    NoSuchLedgerEntry { customer_id: String },

    /// Payment amount is invalid (non-positive or above the balance).
    #[error("Invalid payment amount: {reason}")]
    InvalidAmount { reason: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when user input doesn't meet field-level requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            product_id: "p1".to_string(),
            name: "Coca-Cola Lata".to_string(),
            available: 1,
            requested: 2,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for Coca-Cola Lata: available 1, requested 2"
        );

        let err = CoreError::CreditBlocked {
            customer_id: "c1".to_string(),
            name: "Bruno Costa".to_string(),
        };
        assert_eq!(err.to_string(), "Customer Bruno Costa is blocked from credit sales");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must be positive");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
