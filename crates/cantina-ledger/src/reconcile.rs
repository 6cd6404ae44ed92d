//! # Reconciliation
//!
//! Post-crash consistency check over the sale log.
//!
//! ## Why This Exists
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  finalize_sale writes sale → stock → ledger with no transaction.    │
//! │  If the process dies between the sale write and the ledger upsert,  │
//! │  a CREDIT sale exists that was never charged to its customer.       │
//! │                                                                     │
//! │  The sale log is the durable source of truth, and sale_ids on a     │
//! │  ledger entry record exactly which sales were applied. Replaying    │
//! │  the log therefore finds the gap:                                   │
//! │                                                                     │
//! │    CREDIT sale s7 for customer c2                                   │
//! │    entry(c2).sale_ids = [s3, s5]      ← s7 missing → un-applied     │
//! │                                                                     │
//! │  repair() re-applies it through the same idempotent upsert the      │
//! │  engine uses, so running it twice cannot double-charge.             │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What Is NOT Reconciled
//! - **Stock**: restocks are plain catalog edits, not journaled events,
//!   so the sale log alone cannot reconstruct an expected stock level.
//! - **Balances vs payments**: payments only decrement the balance and
//!   leave no record, so an exact expected balance cannot be recomputed.
//!   What CAN be checked is the ceiling: a balance can never exceed the
//!   sum of its linked credit-sale totals.
//! - **Orphaned entries**: a ledger entry whose customer was deleted is
//!   reported, never removed — whether that history should be kept is a
//!   product decision, not a repair.

use std::collections::{HashMap, HashSet};

use tracing::{info, warn};

use crate::error::LedgerResult;
use cantina_core::SettlementType;
use cantina_db::Store;

/// Findings of a reconciliation pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReconcileReport {
    /// Number of sales scanned.
    pub checked_sales: usize,
    /// CREDIT sales found missing from their customer's entry and
    /// re-applied (repair mode only).
    pub repaired_sale_ids: Vec<String>,
    /// CREDIT sales found missing from their customer's entry and left
    /// alone (check mode only).
    pub unapplied_sale_ids: Vec<String>,
    /// (customer_id, sale_id) pairs where a ledger entry references a
    /// sale that is not in the log.
    pub dangling_sale_refs: Vec<(String, String)>,
    /// Customers whose balance exceeds the sum of their linked
    /// credit-sale totals — impossible under normal operation.
    pub over_balance_customers: Vec<String>,
    /// Ledger entries whose customer no longer exists.
    pub orphaned_entries: Vec<String>,
}

impl ReconcileReport {
    /// True when nothing suspicious was found (repairs count as
    /// findings: the store was not clean when the pass started).
    pub fn is_clean(&self) -> bool {
        self.repaired_sale_ids.is_empty()
            && self.unapplied_sale_ids.is_empty()
            && self.dangling_sale_refs.is_empty()
            && self.over_balance_customers.is_empty()
            && self.orphaned_entries.is_empty()
    }
}

/// Scans the store and reports inconsistencies without writing.
pub async fn check(store: &Store) -> LedgerResult<ReconcileReport> {
    run(store, false).await
}

/// Scans the store, re-applies un-applied credit sales to the ledger,
/// and reports everything found.
pub async fn repair(store: &Store) -> LedgerResult<ReconcileReport> {
    run(store, true).await
}

async fn run(store: &Store, repair: bool) -> LedgerResult<ReconcileReport> {
    let sales = store.sales().get_all().await?;
    let entries = store.ledger().get_all().await?;
    let customers = store.customers().get_all().await?;

    let customer_ids: HashSet<&str> = customers.iter().map(|c| c.id.as_str()).collect();
    let applied: HashMap<&str, &Vec<String>> = entries
        .iter()
        .map(|e| (e.customer_id.as_str(), &e.sale_ids))
        .collect();

    let mut report = ReconcileReport {
        checked_sales: sales.len(),
        ..Default::default()
    };

    // Pass 1: every CREDIT sale must be reflected in its entry
    for sale in &sales {
        if sale.settlement != SettlementType::Credit {
            continue;
        }
        let Some(customer_id) = sale.customer_id.as_deref() else {
            continue;
        };

        let is_applied = applied
            .get(customer_id)
            .is_some_and(|ids| ids.iter().any(|s| *s == sale.id));
        if is_applied {
            continue;
        }

        warn!(
            sale_id = %sale.id,
            customer_id = %customer_id,
            "Credit sale not reflected in ledger"
        );

        if repair {
            let name = sale.customer_name.as_deref().unwrap_or("");
            store
                .ledger()
                .apply_credit_sale(customer_id, name, &sale.id, sale.total())
                .await?;
            report.repaired_sale_ids.push(sale.id.clone());
        } else {
            report.unapplied_sale_ids.push(sale.id.clone());
        }
    }

    // Pass 2: entry-side checks, against post-repair state
    let entries = if repair && !report.repaired_sale_ids.is_empty() {
        store.ledger().get_all().await?
    } else {
        entries
    };
    let sale_totals: HashMap<&str, i64> = sales
        .iter()
        .filter(|s| s.settlement == SettlementType::Credit)
        .map(|s| (s.id.as_str(), s.total_cents))
        .collect();

    for entry in &entries {
        if !customer_ids.contains(entry.customer_id.as_str()) {
            report.orphaned_entries.push(entry.customer_id.clone());
        }

        let mut linked_total = 0;
        for sale_id in &entry.sale_ids {
            match sale_totals.get(sale_id.as_str()) {
                Some(total) => linked_total += total,
                None => report
                    .dangling_sale_refs
                    .push((entry.customer_id.clone(), sale_id.clone())),
            }
        }

        // Payments only ever lower the balance, so the linked credit
        // total is a hard ceiling
        if entry.balance_cents > linked_total {
            report.over_balance_customers.push(entry.customer_id.clone());
        }
    }

    info!(
        checked = report.checked_sales,
        repaired = report.repaired_sale_ids.len(),
        unapplied = report.unapplied_sale_ids.len(),
        dangling = report.dangling_sale_refs.len(),
        orphaned = report.orphaned_entries.len(),
        clean = report.is_clean(),
        "Reconciliation pass finished"
    );

    Ok(report)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::LedgerEngine;
    use cantina_core::{
        CartLine, Category, Customer, LedgerEntry, Money, NewCustomer, NewProduct, Product,
    };
    use cantina_db::StoreConfig;

    async fn test_store() -> Store {
        Store::new(StoreConfig::in_memory()).await.unwrap()
    }

    async fn add_product(store: &Store, name: &str, price_cents: i64, stock: i64) -> Product {
        store
            .products()
            .create(NewProduct {
                name: name.to_string(),
                category: Category::Savory,
                price_cents,
                stock_quantity: stock,
                low_stock_threshold: 5,
                image: None,
            })
            .await
            .unwrap()
    }

    async fn add_customer(store: &Store, name: &str) -> Customer {
        store
            .customers()
            .create(NewCustomer {
                name: name.to_string(),
                class_group: "3º Ano A".to_string(),
                ..Default::default()
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_consistent_store_is_clean() {
        let store = test_store().await;
        let engine = LedgerEngine::new(store.clone());
        let product = add_product(&store, "Salgado de Carne", 350, 50).await;
        let customer = add_customer(&store, "Ana Silva").await;

        engine
            .finalize_sale(
                &[CartLine {
                    product_id: product.id.clone(),
                    quantity: 2,
                }],
                Some(&customer.id),
                SettlementType::Credit,
                None,
            )
            .await
            .unwrap();
        engine
            .record_payment(&customer.id, Money::from_centavos(300))
            .await
            .unwrap();

        let report = check(&store).await.unwrap();
        assert!(report.is_clean());
        assert_eq!(report.checked_sales, 1);
    }

    /// A credit sale written to the log but never applied to the ledger
    /// (the crash-between-steps shape) is found and repaired.
    #[tokio::test]
    async fn test_repair_replays_unapplied_credit_sale() {
        let store = test_store().await;
        let engine = LedgerEngine::new(store.clone());
        let product = add_product(&store, "Pão de Queijo", 250, 60).await;
        let customer = add_customer(&store, "Carla Souza").await;

        // A normally-settled sale...
        let settled = engine
            .finalize_sale(
                &[CartLine {
                    product_id: product.id.clone(),
                    quantity: 1,
                }],
                Some(&customer.id),
                SettlementType::Credit,
                None,
            )
            .await
            .unwrap();

        // ...and one written straight to the log with no ledger upsert,
        // as if the process died between the two writes
        let mut crashed = settled.clone();
        crashed.id = "crashed-sale".to_string();
        crashed.total_cents = 500;
        store.sales().add(&crashed).await.unwrap();

        let found = check(&store).await.unwrap();
        assert_eq!(found.unapplied_sale_ids, vec!["crashed-sale".to_string()]);
        assert!(!found.is_clean());

        // check() must not have written anything
        let entry = store.ledger().get(&customer.id).await.unwrap().unwrap();
        assert_eq!(entry.balance_cents, 250);

        let repaired = repair(&store).await.unwrap();
        assert_eq!(repaired.repaired_sale_ids, vec!["crashed-sale".to_string()]);

        let entry = store.ledger().get(&customer.id).await.unwrap().unwrap();
        assert_eq!(entry.balance_cents, 750);
        assert!(entry.sale_ids.contains(&"crashed-sale".to_string()));

        // Replaying again is a no-op
        let again = repair(&store).await.unwrap();
        assert!(again.is_clean());
        let entry = store.ledger().get(&customer.id).await.unwrap().unwrap();
        assert_eq!(entry.balance_cents, 750);
    }

    #[tokio::test]
    async fn test_orphaned_entry_reported_not_removed() {
        let store = test_store().await;
        let engine = LedgerEngine::new(store.clone());
        let product = add_product(&store, "Brigadeiro", 200, 40).await;
        let customer = add_customer(&store, "Daniel Lima").await;

        engine
            .finalize_sale(
                &[CartLine {
                    product_id: product.id.clone(),
                    quantity: 1,
                }],
                Some(&customer.id),
                SettlementType::Credit,
                None,
            )
            .await
            .unwrap();

        store.customers().delete(&customer.id).await.unwrap();

        let report = check(&store).await.unwrap();
        assert_eq!(report.orphaned_entries, vec![customer.id.clone()]);

        // Reported, never deleted
        assert!(store.ledger().get(&customer.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_dangling_ref_and_over_balance_reported() {
        let store = test_store().await;
        let customer = add_customer(&store, "Elena Martins").await;

        // Hand-crafted entry pointing at a sale that isn't in the log,
        // with a balance no credit sale can explain
        store
            .ledger()
            .put(&LedgerEntry {
                customer_id: customer.id.clone(),
                customer_name: customer.name.clone(),
                balance_cents: 900,
                sale_ids: vec!["ghost-sale".to_string()],
            })
            .await
            .unwrap();

        let report = check(&store).await.unwrap();
        assert_eq!(
            report.dangling_sale_refs,
            vec![(customer.id.clone(), "ghost-sale".to_string())]
        );
        assert_eq!(report.over_balance_customers, vec![customer.id.clone()]);
    }
}
