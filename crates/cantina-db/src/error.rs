//! # Storage Error Types
//!
//! Error types for storage operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                │
//! │                                                                     │
//! │  SQLite Error (sqlx::Error)                                         │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  StoreError (this module) ← Adds context and categorization         │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  LedgerError (in cantina-ledger) ← What the engine caller sees      │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  Caller surfaces a failure notification; partial effects of a       │
//! │  multi-step operation are NOT rolled back (see reconciliation)      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Storage operation errors.
///
/// These wrap sqlx errors and add collection/record context.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Record not found in its collection.
    ///
    /// ## When This Occurs
    /// - Updating or deleting an id that doesn't exist
    /// - A repository lookup that the caller required to succeed
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Insert with an id that already exists in the collection.
    #[error("Duplicate {entity}: '{id}' already exists")]
    Duplicate { entity: String, id: String },

    /// A stored record failed to decode as JSON.
    ///
    /// ## When This Occurs
    /// - The database was edited outside the application
    /// - A backup from an incompatible version was restored verbatim
    #[error("Corrupt {entity} record {id}: {message}")]
    Corrupt {
        entity: String,
        id: String,
        message: String,
    },

    /// Database connection failed.
    ///
    /// ## When This Occurs
    /// - Database file doesn't exist and can't be created
    /// - File permissions issue
    /// - Disk full
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Pool exhausted (all connections in use).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Internal storage error.
    #[error("Internal storage error: {0}")]
    Internal(String),
}

impl StoreError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Creates a Corrupt error for a record that failed to decode.
    pub fn corrupt(
        entity: impl Into<String>,
        id: impl Into<String>,
        err: &serde_json::Error,
    ) -> Self {
        StoreError::Corrupt {
            entity: entity.into(),
            id: id.into(),
            message: err.to_string(),
        }
    }
}

/// Checks whether a sqlx error is a UNIQUE constraint violation.
///
/// SQLite reports these as database errors with the message
/// `UNIQUE constraint failed: <table>.<column>`.
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.message().contains("UNIQUE constraint failed"),
        _ => false,
    }
}

/// Convert sqlx errors to StoreError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::RowNotFound    → StoreError::NotFound
/// sqlx::Error::Database       → StoreError::QueryFailed
/// sqlx::Error::PoolTimedOut   → StoreError::PoolExhausted
/// Other                       → StoreError::Internal
/// ```
/// UNIQUE violations are mapped at the call site where the entity and
/// id are known (see [`is_unique_violation`]).
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => StoreError::NotFound {
                entity: "Record".to_string(),
                id: "unknown".to_string(),
            },

            sqlx::Error::Database(db_err) => StoreError::QueryFailed(db_err.message().to_string()),

            sqlx::Error::PoolTimedOut => StoreError::PoolExhausted,

            sqlx::Error::PoolClosed => StoreError::ConnectionFailed("Pool is closed".to_string()),

            _ => StoreError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for StoreError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        StoreError::MigrationFailed(err.to_string())
    }
}

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Repository Error
// =============================================================================

/// Errors from repository write surfaces (`create`/`update`/`search`):
/// either the input failed field validation before anything touched
/// storage, or the storage operation itself failed.
///
/// Read-only and delete operations return [`StoreError`] directly —
/// there is no input to validate.
#[derive(Debug, Error)]
pub enum RepoError {
    /// Input failed validation; nothing was written.
    #[error("Validation error: {0}")]
    Validation(#[from] cantina_core::ValidationError),

    /// The underlying storage operation failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type for repository write operations.
pub type RepoResult<T> = Result<T, RepoError>;

// =============================================================================
// Restore Error
// =============================================================================

/// Errors raised while parsing a backup file.
///
/// Distinct from [`StoreError`]: a malformed file is rejected before any
/// collection is touched, whereas a storage failure mid-restore leaves
/// the collections in whatever partial state the repopulate loop
/// reached.
#[derive(Debug, Error)]
pub enum RestoreError {
    /// The backup file is not valid JSON or is missing required fields.
    #[error("Malformed backup file: {0}")]
    Malformed(#[from] serde_json::Error),
}
