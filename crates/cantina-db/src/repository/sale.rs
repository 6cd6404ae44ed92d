//! # Sale Repository
//!
//! Storage operations for the sale log.
//!
//! ## Immutability
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        Sale Log Semantics                           │
//! │                                                                     │
//! │  Sales are append-only. A finalized sale is never edited or         │
//! │  deleted — it is the durable source of truth that stock levels      │
//! │  and ledger balances are derived from, and the record the           │
//! │  reconciliation pass replays after a crash.                         │
//! │                                                                     │
//! │  There is no update() here on purpose.                              │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::collection::{Collection, COLLECTION_SALES};
use crate::error::StoreResult;
use cantina_core::Sale;

/// Repository for the append-only sale log.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    collection: Collection<Sale>,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository {
            collection: Collection::new(pool, COLLECTION_SALES, "Sale"),
        }
    }

    /// Appends a finalized sale. Fails with `Duplicate` if the id was
    /// already used.
    pub async fn add(&self, sale: &Sale) -> StoreResult<()> {
        debug!(id = %sale.id, total = %sale.total(), "Recording sale");
        self.collection.add(&sale.id, sale).await
    }

    /// Gets a sale by id.
    pub async fn get(&self, id: &str) -> StoreResult<Option<Sale>> {
        self.collection.get(id).await
    }

    /// Gets the full sale log, oldest first.
    pub async fn get_all(&self) -> StoreResult<Vec<Sale>> {
        let mut sales = self.collection.get_all().await?;
        sales.sort_by_key(|s| s.timestamp);
        Ok(sales)
    }

    /// Counts recorded sales.
    pub async fn count(&self) -> StoreResult<i64> {
        self.collection.count().await
    }
}

/// Helper to generate a new sale ID.
pub fn generate_sale_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::pool::{Store, StoreConfig};
    use cantina_core::{LineItem, SettlementType};
    use chrono::Utc;

    fn sample_sale(id: &str, total_cents: i64) -> Sale {
        Sale {
            id: id.to_string(),
            customer_id: None,
            customer_name: None,
            items: vec![LineItem {
                product_id: "p1".to_string(),
                product_name: "Salgado de Queijo".to_string(),
                quantity: 1,
                unit_price_cents: total_cents,
                line_total_cents: total_cents,
            }],
            total_cents,
            settlement: SettlementType::Paid,
            note: None,
            timestamp: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_add_and_get() {
        let store = Store::new(StoreConfig::in_memory()).await.unwrap();
        let repo = store.sales();

        let sale = sample_sale("s1", 300);
        repo.add(&sale).await.unwrap();

        let found = repo.get("s1").await.unwrap().unwrap();
        assert_eq!(found.total_cents, 300);
        assert_eq!(found.items.len(), 1);
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_id_rejected() {
        let store = Store::new(StoreConfig::in_memory()).await.unwrap();
        let repo = store.sales();

        let sale = sample_sale("s1", 300);
        repo.add(&sale).await.unwrap();

        let err = repo.add(&sale).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate { .. }));
    }

    #[tokio::test]
    async fn test_get_all_is_ordered_by_time() {
        let store = Store::new(StoreConfig::in_memory()).await.unwrap();
        let repo = store.sales();

        let mut older = sample_sale("s-b", 100);
        older.timestamp = Utc::now() - chrono::Duration::hours(1);
        let newer = sample_sale("s-a", 200);

        repo.add(&newer).await.unwrap();
        repo.add(&older).await.unwrap();

        let all = repo.get_all().await.unwrap();
        assert_eq!(all[0].id, "s-b");
        assert_eq!(all[1].id, "s-a");
    }
}
