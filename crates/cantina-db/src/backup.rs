//! # Backup and Restore
//!
//! Bulk export/import of all four collections as a single JSON file.
//!
//! ## File Format
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  backup_2026-08-08.json                                             │
//! │                                                                     │
//! │  {                                                                  │
//! │    "children": [ ...customer records... ],                          │
//! │    "products": [ ...product records... ],                           │
//! │    "sales":    [ ...sale records... ],                              │
//! │    "debts":    [ ...ledger entries... ],                            │
//! │    "date":     "2026-08-08T14:03:22Z"                               │
//! │  }                                                                  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Restore Semantics
//! Restore clears all four collections and repopulates them verbatim —
//! no referential-integrity validation is performed between the arrays.
//! There is no pre-restore snapshot: a storage failure mid-loop leaves
//! the collections in whatever partial state the clear/repopulate pass
//! reached. The caller is expected to confirm with the user before
//! starting a restore.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::collection::{
    Collection, COLLECTION_CHILDREN, COLLECTION_DEBTS, COLLECTION_PRODUCTS, COLLECTION_SALES,
};
use crate::error::{RestoreError, StoreResult};
use crate::pool::Store;
use cantina_core::{Customer, LedgerEntry, Product, Sale};

/// A full backup of the four persisted collections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupFile {
    pub children: Vec<Customer>,
    pub products: Vec<Product>,
    pub sales: Vec<Sale>,
    pub debts: Vec<LedgerEntry>,
    /// When the backup was taken.
    pub date: DateTime<Utc>,
}

impl BackupFile {
    /// Parses a backup file from JSON.
    pub fn from_json(raw: &str) -> Result<BackupFile, RestoreError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Serializes the backup to pretty-printed JSON, ready to be
    /// written to a file by the caller.
    pub fn to_json(&self) -> Result<String, RestoreError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn children(store: &Store) -> Collection<Customer> {
    Collection::new(store.pool().clone(), COLLECTION_CHILDREN, "Customer")
}

fn products(store: &Store) -> Collection<Product> {
    Collection::new(store.pool().clone(), COLLECTION_PRODUCTS, "Product")
}

fn sales(store: &Store) -> Collection<Sale> {
    Collection::new(store.pool().clone(), COLLECTION_SALES, "Sale")
}

fn debts(store: &Store) -> Collection<LedgerEntry> {
    Collection::new(store.pool().clone(), COLLECTION_DEBTS, "LedgerEntry")
}

/// Exports all four collections into a [`BackupFile`].
pub async fn export(store: &Store) -> StoreResult<BackupFile> {
    let backup = BackupFile {
        children: children(store).get_all().await?,
        products: products(store).get_all().await?,
        sales: sales(store).get_all().await?,
        debts: debts(store).get_all().await?,
        date: Utc::now(),
    };

    info!(
        children = backup.children.len(),
        products = backup.products.len(),
        sales = backup.sales.len(),
        debts = backup.debts.len(),
        "Backup exported"
    );

    Ok(backup)
}

/// Clears all four collections and repopulates them from the backup,
/// verbatim.
///
/// No referential integrity between the arrays is checked; a debt
/// entry pointing at a customer missing from `children` is restored
/// as-is. On a storage failure mid-loop, already-written records stay
/// written.
pub async fn restore(store: &Store, backup: &BackupFile) -> StoreResult<()> {
    info!(
        children = backup.children.len(),
        products = backup.products.len(),
        sales = backup.sales.len(),
        debts = backup.debts.len(),
        "Restoring backup"
    );

    let children = children(store);
    let products = products(store);
    let sales = sales(store);
    let debts = debts(store);

    children.clear().await?;
    products.clear().await?;
    sales.clear().await?;
    debts.clear().await?;

    for customer in &backup.children {
        children.add(&customer.id, customer).await?;
    }
    for product in &backup.products {
        products.add(&product.id, product).await?;
    }
    for sale in &backup.sales {
        sales.add(&sale.id, sale).await?;
    }
    for entry in &backup.debts {
        debts.add(&entry.customer_id, entry).await?;
    }

    info!("Restore complete");
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Store, StoreConfig};
    use cantina_core::{Category, Money, NewCustomer, NewProduct};

    async fn test_store() -> Store {
        Store::new(StoreConfig::in_memory()).await.unwrap()
    }

    async fn populate(store: &Store) {
        let customer = store
            .customers()
            .create(NewCustomer {
                name: "Ana Silva".to_string(),
                class_group: "3º Ano A".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();

        store
            .products()
            .create(NewProduct {
                name: "Brigadeiro".to_string(),
                category: Category::Sweet,
                price_cents: 200,
                stock_quantity: 40,
                low_stock_threshold: 5,
                image: None,
            })
            .await
            .unwrap();

        store
            .ledger()
            .apply_credit_sale(&customer.id, &customer.name, "s1", Money::from_centavos(600))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_restore_replaces_existing_data() {
        let source = test_store().await;
        populate(&source).await;
        let backup = export(&source).await.unwrap();

        // Target has unrelated data that must disappear on restore
        let target = test_store().await;
        target
            .products()
            .create(NewProduct {
                name: "Bolo Caseiro".to_string(),
                category: Category::Sweet,
                price_cents: 450,
                stock_quantity: 15,
                low_stock_threshold: 5,
                image: None,
            })
            .await
            .unwrap();

        restore(&target, &backup).await.unwrap();

        let products = target.products().get_all().await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "Brigadeiro");

        let customers = target.customers().get_all().await.unwrap();
        assert_eq!(customers.len(), 1);

        let entry = target.ledger().get(&customers[0].id).await.unwrap().unwrap();
        assert_eq!(entry.balance_cents, 600);
        assert_eq!(entry.sale_ids, vec!["s1".to_string()]);
    }

    #[tokio::test]
    async fn test_restore_keeps_orphaned_debts_verbatim() {
        let source = test_store().await;
        populate(&source).await;

        let mut backup = export(&source).await.unwrap();
        // Simulate a backup taken after the customer was deleted but the
        // debt kept — restore must not reject or repair it
        backup.children.clear();

        let target = test_store().await;
        restore(&target, &backup).await.unwrap();

        assert_eq!(target.customers().count().await.unwrap(), 0);
        assert_eq!(target.ledger().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_json_roundtrip_and_malformed_input() {
        let source = test_store().await;
        populate(&source).await;

        let backup = export(&source).await.unwrap();
        let json = backup.to_json().unwrap();

        let parsed = BackupFile::from_json(&json).unwrap();
        assert_eq!(parsed.children.len(), 1);
        assert_eq!(parsed.debts.len(), 1);

        let err = BackupFile::from_json("{ not json").unwrap_err();
        assert!(matches!(err, RestoreError::Malformed(_)));
    }
}
