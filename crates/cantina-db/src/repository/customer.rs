//! # Customer Repository
//!
//! Storage operations for customer registrations.
//!
//! ## Deletion Semantics
//! `delete` removes only the customer record. Sales and ledger entries
//! referencing the customer keep their name snapshots and stay in
//! place; an orphaned ledger entry is a known possible state, surfaced
//! by the reconciliation report rather than prevented here.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::collection::{Collection, COLLECTION_CHILDREN};
use crate::error::{RepoResult, StoreResult};
use cantina_core::validation::{
    validate_class_group, validate_customer_name, validate_search_query,
};
use cantina_core::{Customer, NewCustomer};

/// Repository for customer storage operations.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    collection: Collection<Customer>,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CustomerRepository {
            collection: Collection::new(pool, COLLECTION_CHILDREN, "Customer"),
        }
    }

    /// Registers a new customer, assigning id and timestamps.
    pub async fn create(&self, new: NewCustomer) -> RepoResult<Customer> {
        validate_customer_name(&new.name)?;
        validate_class_group(&new.class_group)?;

        let now = Utc::now();
        let customer = Customer {
            id: generate_customer_id(),
            name: new.name.trim().to_string(),
            class_group: new.class_group.trim().to_string(),
            contact: new.contact,
            photo: new.photo,
            father: new.father,
            mother: new.mother,
            notes: new.notes,
            credit_blocked: new.credit_blocked,
            created_at: now,
            updated_at: now,
        };

        debug!(id = %customer.id, name = %customer.name, "Registering customer");

        self.collection.add(&customer.id, &customer).await?;
        Ok(customer)
    }

    /// Gets a customer by id.
    pub async fn get(&self, id: &str) -> StoreResult<Option<Customer>> {
        self.collection.get(id).await
    }

    /// Gets all customers, sorted by name.
    pub async fn get_all(&self) -> StoreResult<Vec<Customer>> {
        let mut customers = self.collection.get_all().await?;
        customers.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(customers)
    }

    /// Replaces an existing customer record in full.
    ///
    /// There is no partial-field merge: the caller supplies the complete
    /// record, merging client-side first. `updated_at` is refreshed here.
    pub async fn update(&self, customer: &Customer) -> RepoResult<Customer> {
        validate_customer_name(&customer.name)?;
        validate_class_group(&customer.class_group)?;

        let mut updated = customer.clone();
        updated.updated_at = Utc::now();

        debug!(id = %updated.id, "Updating customer");

        self.collection.update(&updated.id, &updated).await?;
        Ok(updated)
    }

    /// Deletes a customer. No referential-integrity check is performed
    /// against sales or the ledger.
    pub async fn delete(&self, id: &str) -> StoreResult<()> {
        debug!(id = %id, "Deleting customer");
        self.collection.delete(id).await
    }

    /// Searches customers by name or class/group label.
    ///
    /// Case-insensitive substring match over the full collection; the
    /// dataset is one canteen's register, so a scan is fine.
    pub async fn search(&self, query: &str) -> RepoResult<Vec<Customer>> {
        let query = validate_search_query(query)?.to_lowercase();

        let mut customers = self.get_all().await?;

        if !query.is_empty() {
            customers.retain(|c| {
                c.name.to_lowercase().contains(&query)
                    || c.class_group.to_lowercase().contains(&query)
            });
        }

        Ok(customers)
    }

    /// Counts registered customers.
    pub async fn count(&self) -> StoreResult<i64> {
        self.collection.count().await
    }
}

/// Helper to generate a new customer ID.
pub fn generate_customer_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================
