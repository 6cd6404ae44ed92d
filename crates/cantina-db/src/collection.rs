//! # Collection Adapter
//!
//! Generic key-value access to one collection table.
//!
//! ## Storage Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    How a Collection Is Stored                       │
//! │                                                                     │
//! │  Collection<Product> ──► table `products`                           │
//! │                                                                     │
//! │  ┌────────────────────────────────────────────────┐                 │
//! │  │ id (TEXT PK)  │ record (TEXT, JSON)            │                 │
//! │  │───────────────│────────────────────────────────│                 │
//! │  │ 3f2a…         │ {"id":"3f2a…","name":"Pão…"}   │                 │
//! │  │ 91bc…         │ {"id":"91bc…","name":"Suco…"}  │                 │
//! │  └────────────────────────────────────────────────┘                 │
//! │                                                                     │
//! │  Every call is ONE independent short-lived statement. There is      │
//! │  deliberately no cross-collection transaction: the single-session   │
//! │  design substitutes for concurrency control, and multi-step         │
//! │  operations own their recovery story (see the ledger engine).       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No business logic lives here: a `Collection<T>` only knows how to
//! encode, decode, and shuttle records.

use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::SqlitePool;
use std::marker::PhantomData;
use tracing::debug;

use crate::error::{is_unique_violation, StoreError, StoreResult};

// =============================================================================
// Collection Names
// =============================================================================
// Table names match the backup file contract of the system.

pub(crate) const COLLECTION_CHILDREN: &str = "children";
pub(crate) const COLLECTION_PRODUCTS: &str = "products";
pub(crate) const COLLECTION_SALES: &str = "sales";
pub(crate) const COLLECTION_DEBTS: &str = "debts";

// =============================================================================
// Collection
// =============================================================================

/// Typed key-value access to one collection table.
///
/// ## Usage
/// ```rust,ignore
/// let products: Collection<Product> =
///     Collection::new(pool, COLLECTION_PRODUCTS, "Product");
///
/// products.put(&product.id, &product).await?;
/// let found = products.get(&product.id).await?;
/// ```
#[derive(Debug, Clone)]
pub(crate) struct Collection<T> {
    pool: SqlitePool,
    /// SQLite table backing this collection. Static: the collection set
    /// is fixed by the migration schema.
    table: &'static str,
    /// Human-readable entity name used in error messages.
    entity: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Collection<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Creates a collection handle over the given table.
    pub(crate) fn new(pool: SqlitePool, table: &'static str, entity: &'static str) -> Self {
        Collection {
            pool,
            table,
            entity,
            _marker: PhantomData,
        }
    }

    fn decode(&self, id: &str, raw: &str) -> StoreResult<T> {
        serde_json::from_str(raw).map_err(|e| StoreError::corrupt(self.entity, id, &e))
    }

    fn encode(&self, id: &str, value: &T) -> StoreResult<String> {
        serde_json::to_string(value).map_err(|e| StoreError::corrupt(self.entity, id, &e))
    }

    /// Gets a record by id.
    pub(crate) async fn get(&self, id: &str) -> StoreResult<Option<T>> {
        let sql = format!("SELECT record FROM {} WHERE id = ?1", self.table);

        let raw: Option<String> = sqlx::query_scalar(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match raw {
            Some(raw) => Ok(Some(self.decode(id, &raw)?)),
            None => Ok(None),
        }
    }

    /// Gets all records in the collection.
    ///
    /// Order is by id, which for UUID keys is arbitrary but stable;
    /// callers that care about presentation order sort on a domain
    /// field afterwards.
    pub(crate) async fn get_all(&self) -> StoreResult<Vec<T>> {
        let sql = format!("SELECT id, record FROM {} ORDER BY id", self.table);

        let rows: Vec<(String, String)> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;

        let mut records = Vec::with_capacity(rows.len());
        for (id, raw) in rows {
            records.push(self.decode(&id, &raw)?);
        }

        Ok(records)
    }

    /// Inserts a new record. Fails with `Duplicate` if the id exists.
    pub(crate) async fn add(&self, id: &str, value: &T) -> StoreResult<()> {
        debug!(collection = self.table, id = %id, "Adding record");

        let record = self.encode(id, value)?;
        let sql = format!("INSERT INTO {} (id, record) VALUES (?1, ?2)", self.table);

        sqlx::query(&sql)
            .bind(id)
            .bind(record)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    StoreError::Duplicate {
                        entity: self.entity.to_string(),
                        id: id.to_string(),
                    }
                } else {
                    StoreError::from(e)
                }
            })?;

        Ok(())
    }

    /// Inserts or replaces a record (upsert).
    pub(crate) async fn put(&self, id: &str, value: &T) -> StoreResult<()> {
        debug!(collection = self.table, id = %id, "Putting record");

        let record = self.encode(id, value)?;
        let sql = format!(
            "INSERT INTO {} (id, record) VALUES (?1, ?2) \
             ON CONFLICT(id) DO UPDATE SET record = excluded.record",
            self.table
        );

        sqlx::query(&sql)
            .bind(id)
            .bind(record)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Replaces an existing record. Fails with `NotFound` if the id
    /// does not exist.
    pub(crate) async fn update(&self, id: &str, value: &T) -> StoreResult<()> {
        debug!(collection = self.table, id = %id, "Updating record");

        let record = self.encode(id, value)?;
        let sql = format!("UPDATE {} SET record = ?2 WHERE id = ?1", self.table);

        let result = sqlx::query(&sql)
            .bind(id)
            .bind(record)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found(self.entity, id));
        }

        Ok(())
    }

    /// Deletes a record by id. Fails with `NotFound` if the id does not
    /// exist.
    pub(crate) async fn delete(&self, id: &str) -> StoreResult<()> {
        debug!(collection = self.table, id = %id, "Deleting record");

        let sql = format!("DELETE FROM {} WHERE id = ?1", self.table);

        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found(self.entity, id));
        }

        Ok(())
    }

    /// Removes every record in the collection.
    pub(crate) async fn clear(&self) -> StoreResult<()> {
        debug!(collection = self.table, "Clearing collection");

        let sql = format!("DELETE FROM {}", self.table);
        sqlx::query(&sql).execute(&self.pool).await?;

        Ok(())
    }

    /// Counts records in the collection.
    pub(crate) async fn count(&self) -> StoreResult<i64> {
        let sql = format!("SELECT COUNT(*) FROM {}", self.table);

        let count: i64 = sqlx::query_scalar(&sql).fetch_one(&self.pool).await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Store, StoreConfig};
    use cantina_core::{Category, Product};
    use chrono::Utc;

    fn sample_product(id: &str, name: &str) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            category: Category::Savory,
            price_cents: 350,
            stock_quantity: 50,
            low_stock_threshold: 5,
            image: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    async fn test_collection() -> Collection<Product> {
        let store = Store::new(StoreConfig::in_memory()).await.unwrap();
        Collection::new(store.pool().clone(), COLLECTION_PRODUCTS, "Product")
    }

    #[tokio::test]
    async fn test_add_get_roundtrip() {
        let collection = test_collection().await;

        let product = sample_product("p1", "Salgado de Carne");
        collection.add("p1", &product).await.unwrap();

        let found = collection.get("p1").await.unwrap().unwrap();
        assert_eq!(found.name, "Salgado de Carne");
        assert_eq!(found.price_cents, 350);

        assert!(collection.get("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_add_duplicate_fails() {
        let collection = test_collection().await;

        let product = sample_product("p1", "Brigadeiro");
        collection.add("p1", &product).await.unwrap();

        let err = collection.add("p1", &product).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate { .. }));
    }

    #[tokio::test]
    async fn test_put_upserts() {
        let collection = test_collection().await;

        let mut product = sample_product("p1", "Beijinho");
        collection.put("p1", &product).await.unwrap();

        product.stock_quantity = 10;
        collection.put("p1", &product).await.unwrap();

        let found = collection.get("p1").await.unwrap().unwrap();
        assert_eq!(found.stock_quantity, 10);
        assert_eq!(collection.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_missing_fails() {
        let collection = test_collection().await;

        let product = sample_product("p1", "Suco Natural");
        let err = collection.update("p1", &product).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_and_clear() {
        let collection = test_collection().await;

        collection
            .add("p1", &sample_product("p1", "Bolo Caseiro"))
            .await
            .unwrap();
        collection
            .add("p2", &sample_product("p2", "Água Mineral"))
            .await
            .unwrap();
        assert_eq!(collection.count().await.unwrap(), 2);

        collection.delete("p1").await.unwrap();
        assert_eq!(collection.count().await.unwrap(), 1);

        let err = collection.delete("p1").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));

        collection.clear().await.unwrap();
        assert_eq!(collection.count().await.unwrap(), 0);
        assert!(collection.get_all().await.unwrap().is_empty());
    }
}
