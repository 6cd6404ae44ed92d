//! # Ledger Repository
//!
//! Storage operations for per-customer credit (fiado) balances.
//!
//! ## Keying
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     One Entry Per Customer                          │
//! │                                                                     │
//! │  debts collection is keyed by CUSTOMER id, not by sale:             │
//! │                                                                     │
//! │  customer c1 ──► LedgerEntry { balance: 6.00, sale_ids: [s1] }      │
//! │  customer c2 ──► LedgerEntry { balance: 0.00, sale_ids: [s2, s3] }  │
//! │                                                                     │
//! │  A second credit sale for c1 UPDATES the same entry; it never       │
//! │  creates a second row. Paying an entry down to zero keeps the       │
//! │  row — only the open-balances view filters it out.                  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::SqlitePool;
use tracing::debug;

use crate::collection::{Collection, COLLECTION_DEBTS};
use crate::error::StoreResult;
use cantina_core::{LedgerEntry, Money};

/// Repository for ledger (debt) entries.
#[derive(Debug, Clone)]
pub struct LedgerRepository {
    collection: Collection<LedgerEntry>,
}

impl LedgerRepository {
    /// Creates a new LedgerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        LedgerRepository {
            collection: Collection::new(pool, COLLECTION_DEBTS, "LedgerEntry"),
        }
    }

    /// Gets the ledger entry for a customer, if one exists.
    pub async fn get(&self, customer_id: &str) -> StoreResult<Option<LedgerEntry>> {
        self.collection.get(customer_id).await
    }

    /// Gets all ledger entries, including paid-off (zero balance) ones.
    pub async fn get_all(&self) -> StoreResult<Vec<LedgerEntry>> {
        let mut entries = self.collection.get_all().await?;
        entries.sort_by(|a, b| a.customer_name.cmp(&b.customer_name));
        Ok(entries)
    }

    /// Gets the entries with an outstanding balance — the "open
    /// balances" view. Zero-balance entries remain stored but are
    /// filtered out here.
    pub async fn open_entries(&self) -> StoreResult<Vec<LedgerEntry>> {
        let mut entries = self.get_all().await?;
        entries.retain(|e| e.is_open());
        Ok(entries)
    }

    /// Persists an entry (upsert, keyed by customer id).
    pub async fn put(&self, entry: &LedgerEntry) -> StoreResult<()> {
        debug!(
            customer_id = %entry.customer_id,
            balance = %entry.balance(),
            "Persisting ledger entry"
        );
        self.collection.put(&entry.customer_id, entry).await
    }

    /// Applies a credit sale to a customer's entry.
    ///
    /// Creates the entry on the customer's first credit sale; otherwise
    /// increments the balance and appends the sale id.
    ///
    /// ## Idempotency Guard
    /// If the entry already lists `sale_id`, the call is a no-op and
    /// returns the entry unchanged. That makes it safe for the
    /// reconciliation pass to re-apply sales after a crash without
    /// double-charging anyone.
    pub async fn apply_credit_sale(
        &self,
        customer_id: &str,
        customer_name: &str,
        sale_id: &str,
        total: Money,
    ) -> StoreResult<LedgerEntry> {
        let entry = match self.get(customer_id).await? {
            Some(mut entry) => {
                if entry.sale_ids.iter().any(|s| s == sale_id) {
                    debug!(
                        customer_id = %customer_id,
                        sale_id = %sale_id,
                        "Credit sale already applied, skipping"
                    );
                    return Ok(entry);
                }

                entry.balance_cents += total.centavos();
                entry.sale_ids.push(sale_id.to_string());
                entry
            }
            None => LedgerEntry {
                customer_id: customer_id.to_string(),
                customer_name: customer_name.to_string(),
                balance_cents: total.centavos(),
                sale_ids: vec![sale_id.to_string()],
            },
        };

        self.put(&entry).await?;
        Ok(entry)
    }

    /// Counts ledger entries (open and paid-off).
    pub async fn count(&self) -> StoreResult<i64> {
        self.collection.count().await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Store, StoreConfig};

    async fn test_repo() -> LedgerRepository {
        let store = Store::new(StoreConfig::in_memory()).await.unwrap();
        store.ledger()
    }

    #[tokio::test]
    async fn test_first_credit_sale_creates_entry() {
        let repo = test_repo().await;

        let entry = repo
            .apply_credit_sale("c1", "Ana Silva", "s1", Money::from_centavos(600))
            .await
            .unwrap();

        assert_eq!(entry.balance_cents, 600);
        assert_eq!(entry.sale_ids, vec!["s1".to_string()]);
        assert_eq!(entry.customer_name, "Ana Silva");
    }

    #[tokio::test]
    async fn test_second_credit_sale_increments_same_entry() {
        let repo = test_repo().await;

        repo.apply_credit_sale("c1", "Ana Silva", "s1", Money::from_centavos(600))
            .await
            .unwrap();
        let entry = repo
            .apply_credit_sale("c1", "Ana Silva", "s2", Money::from_centavos(250))
            .await
            .unwrap();

        assert_eq!(entry.balance_cents, 850);
        assert_eq!(entry.sale_ids.len(), 2);
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_apply_is_idempotent_per_sale_id() {
        let repo = test_repo().await;

        repo.apply_credit_sale("c1", "Ana Silva", "s1", Money::from_centavos(600))
            .await
            .unwrap();
        let entry = repo
            .apply_credit_sale("c1", "Ana Silva", "s1", Money::from_centavos(600))
            .await
            .unwrap();

        assert_eq!(entry.balance_cents, 600);
        assert_eq!(entry.sale_ids.len(), 1);
    }

    #[tokio::test]
    async fn test_open_entries_filters_paid_off() {
        let repo = test_repo().await;

        repo.apply_credit_sale("c1", "Ana Silva", "s1", Money::from_centavos(600))
            .await
            .unwrap();
        repo.apply_credit_sale("c2", "Bruno Costa", "s2", Money::from_centavos(300))
            .await
            .unwrap();

        // Pay Bruno off completely
        let mut bruno = repo.get("c2").await.unwrap().unwrap();
        bruno.balance_cents = 0;
        repo.put(&bruno).await.unwrap();

        let open = repo.open_entries().await.unwrap();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].customer_id, "c1");

        // Paid-off entry stays addressable
        assert!(repo.get("c2").await.unwrap().is_some());
        assert_eq!(repo.count().await.unwrap(), 2);
    }
}
