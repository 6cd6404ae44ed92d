//! # Reporting / Query Layer
//!
//! Read-side projections over the four collections. Nothing here
//! mutates; every call re-scans the full collection. That is fine on
//! purpose: the dataset is one canteen's register, stored locally, and
//! re-deriving beats keeping a cache coherent with the settlement path.
//!
//! ## Projections
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  dashboard_summary                                                  │
//! │    sales ──► count, total, PAID/CREDIT split                        │
//! │    debts ──► open balance total, open entry count                   │
//! │    products ──► low-stock list (stock ≤ threshold)                  │
//! │                                                                     │
//! │  period_summary(start, end)                                         │
//! │    sales in [start 00:00, end 23:59:59] local                       │
//! │      ──► count, total, PAID/CREDIT split                            │
//! │    (handed to the spreadsheet exporter as-is)                       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::Serialize;
use tracing::debug;

use crate::error::LedgerResult;
use cantina_core::{Money, Product, Sale, SettlementType};
use cantina_db::Store;

// =============================================================================
// Dashboard Summary
// =============================================================================

/// The figures behind the dashboard page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    /// Total number of recorded sales.
    pub sale_count: usize,
    /// Sum of all sale totals, in centavos.
    pub total_cents: i64,
    /// Sum of PAID sale totals.
    pub paid_total_cents: i64,
    /// Sum of CREDIT sale totals.
    pub credit_total_cents: i64,
    /// Sum of all open ledger balances.
    pub open_balance_cents: i64,
    /// Number of ledger entries with an outstanding balance.
    pub open_entry_count: usize,
    /// Products at or below their low-stock threshold.
    pub low_stock: Vec<Product>,
}

impl DashboardSummary {
    /// Total sold, as Money.
    pub fn total(&self) -> Money {
        Money::from_centavos(self.total_cents)
    }

    /// Outstanding fiado total, as Money.
    pub fn open_balance(&self) -> Money {
        Money::from_centavos(self.open_balance_cents)
    }
}

/// Derives the dashboard figures from the current collections.
pub async fn dashboard_summary(store: &Store) -> LedgerResult<DashboardSummary> {
    let sales = store.sales().get_all().await?;
    let entries = store.ledger().open_entries().await?;
    let products = store.products().get_all().await?;

    let (paid_total, credit_total) = split_totals(&sales);

    let summary = DashboardSummary {
        sale_count: sales.len(),
        total_cents: paid_total + credit_total,
        paid_total_cents: paid_total,
        credit_total_cents: credit_total,
        open_balance_cents: entries.iter().map(|e| e.balance_cents).sum(),
        open_entry_count: entries.len(),
        low_stock: products.into_iter().filter(|p| p.is_low_stock()).collect(),
    };

    debug!(
        sales = summary.sale_count,
        open = summary.open_entry_count,
        low_stock = summary.low_stock.len(),
        "Dashboard summary derived"
    );

    Ok(summary)
}

// =============================================================================
// Period Summary
// =============================================================================

/// Sales figures for an inclusive local-date range. This structure is
/// the contract with the external spreadsheet exporter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodSummary {
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub sale_count: usize,
    pub total_cents: i64,
    pub paid_total_cents: i64,
    pub credit_total_cents: i64,
}

impl PeriodSummary {
    /// Total sold in the period, as Money.
    pub fn total(&self) -> Money {
        Money::from_centavos(self.total_cents)
    }
}

/// Derives sales figures for the inclusive range `[start, end]`.
///
/// `end` is treated as end-of-day (23:59:59 local): a sale rung up late
/// on the end date is in the period, one the next morning is not.
pub async fn period_summary(
    store: &Store,
    start: NaiveDate,
    end: NaiveDate,
) -> LedgerResult<PeriodSummary> {
    let from = local_day_start(start);
    // Inclusive end-of-day == exclusive start of the following day
    let to = end
        .succ_opt()
        .map(local_day_start)
        .unwrap_or(DateTime::<Utc>::MAX_UTC);

    let mut sales = store.sales().get_all().await?;
    sales.retain(|s| s.timestamp >= from && s.timestamp < to);

    let (paid_total, credit_total) = split_totals(&sales);

    debug!(
        start = %start,
        end = %end,
        matched = sales.len(),
        "Period summary derived"
    );

    Ok(PeriodSummary {
        period_start: start,
        period_end: end,
        sale_count: sales.len(),
        total_cents: paid_total + credit_total,
        paid_total_cents: paid_total,
        credit_total_cents: credit_total,
    })
}

/// Sums sale totals split by settlement type: (paid, credit).
fn split_totals(sales: &[Sale]) -> (i64, i64) {
    let mut paid = 0;
    let mut credit = 0;
    for sale in sales {
        match sale.settlement {
            SettlementType::Paid => paid += sale.total_cents,
            SettlementType::Credit => credit += sale.total_cents,
        }
    }
    (paid, credit)
}

/// Start of the given calendar date in the local timezone, as UTC.
///
/// A date whose midnight does not exist locally (DST gap) falls back to
/// the UTC reading of the same wall-clock time.
fn local_day_start(date: NaiveDate) -> DateTime<Utc> {
    let naive = date.and_time(NaiveTime::MIN);
    match Local.from_local_datetime(&naive).earliest() {
        Some(local) => local.with_timezone(&Utc),
        None => Utc.from_utc_datetime(&naive),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::LedgerEngine;
    use cantina_core::{CartLine, Category, NewCustomer, NewProduct};
    use cantina_db::StoreConfig;
    use chrono::Duration;

    async fn seeded_store() -> Store {
        let store = Store::new(StoreConfig::in_memory()).await.unwrap();
        let engine = LedgerEngine::new(store.clone());

        let salgado = store
            .products()
            .create(NewProduct {
                name: "Salgado de Carne".to_string(),
                category: Category::Savory,
                price_cents: 350,
                stock_quantity: 10,
                low_stock_threshold: 5,
                image: None,
            })
            .await
            .unwrap();
        let bolo = store
            .products()
            .create(NewProduct {
                name: "Bolo Caseiro".to_string(),
                category: Category::Sweet,
                price_cents: 450,
                stock_quantity: 4,
                low_stock_threshold: 5,
                image: None,
            })
            .await
            .unwrap();

        let ana = store
            .customers()
            .create(NewCustomer {
                name: "Ana Silva".to_string(),
                class_group: "3º Ano A".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();

        // One PAID sale (R$ 7.00) and one CREDIT sale (R$ 4.50)
        engine
            .finalize_sale(
                &[CartLine {
                    product_id: salgado.id.clone(),
                    quantity: 2,
                }],
                None,
                SettlementType::Paid,
                None,
            )
            .await
            .unwrap();
        engine
            .finalize_sale(
                &[CartLine {
                    product_id: bolo.id.clone(),
                    quantity: 1,
                }],
                Some(&ana.id),
                SettlementType::Credit,
                None,
            )
            .await
            .unwrap();

        store
    }

    #[tokio::test]
    async fn test_dashboard_summary_figures() {
        let store = seeded_store().await;

        let summary = dashboard_summary(&store).await.unwrap();

        assert_eq!(summary.sale_count, 2);
        assert_eq!(summary.paid_total_cents, 700);
        assert_eq!(summary.credit_total_cents, 450);
        assert_eq!(summary.total_cents, 1150);
        assert_eq!(summary.open_balance_cents, 450);
        assert_eq!(summary.open_entry_count, 1);

        // Bolo Caseiro sold down to 3 (≤ 5); Salgado at 8 is fine
        assert_eq!(summary.low_stock.len(), 1);
        assert_eq!(summary.low_stock[0].name, "Bolo Caseiro");
    }

    #[tokio::test]
    async fn test_dashboard_excludes_paid_off_entries() {
        let store = seeded_store().await;
        let engine = LedgerEngine::new(store.clone());

        let customers = store.customers().get_all().await.unwrap();
        let ana = &customers[0];
        engine
            .record_payment(&ana.id, Money::from_centavos(450))
            .await
            .unwrap();

        let summary = dashboard_summary(&store).await.unwrap();
        assert_eq!(summary.open_balance_cents, 0);
        assert_eq!(summary.open_entry_count, 0);
        // The entry itself is still stored
        assert_eq!(store.ledger().count().await.unwrap(), 1);
    }

    /// Reads are idempotent: two scans with no writes in between agree.
    #[tokio::test]
    async fn test_summary_reads_are_idempotent() {
        let store = seeded_store().await;

        let first = dashboard_summary(&store).await.unwrap();
        let second = dashboard_summary(&store).await.unwrap();
        assert_eq!(first, second);

        let today = Local::now().date_naive();
        let a = period_summary(&store, today - Duration::days(1), today)
            .await
            .unwrap();
        let b = period_summary(&store, today - Duration::days(1), today)
            .await
            .unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_period_summary_includes_today() {
        let store = seeded_store().await;
        let today = Local::now().date_naive();

        let summary = period_summary(&store, today - Duration::days(30), today)
            .await
            .unwrap();

        assert_eq!(summary.sale_count, 2);
        assert_eq!(summary.total_cents, 1150);
        assert_eq!(summary.paid_total_cents, 700);
        assert_eq!(summary.credit_total_cents, 450);
    }

    #[tokio::test]
    async fn test_period_summary_excludes_out_of_range() {
        let store = seeded_store().await;
        let today = Local::now().date_naive();

        // A window that ended yesterday sees nothing
        let past = period_summary(
            &store,
            today - Duration::days(30),
            today - Duration::days(1),
        )
        .await
        .unwrap();
        assert_eq!(past.sale_count, 0);
        assert_eq!(past.total_cents, 0);

        // A window starting tomorrow sees nothing either
        let future = period_summary(
            &store,
            today + Duration::days(1),
            today + Duration::days(30),
        )
        .await
        .unwrap();
        assert_eq!(future.sale_count, 0);
    }
}
