//! # Ledger Engine
//!
//! Sale settlement and payment recording — the one place in the system
//! where multiple collections are mutated as a single logical unit.
//!
//! ## Settlement Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      finalize_sale                                  │
//! │                                                                     │
//! │  Cart + settlement type                                             │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  VALIDATE (nothing written yet)                                     │
//! │  ├── cart non-empty, quantities sane                                │
//! │  ├── CREDIT ⇒ customer present and not blocked                      │
//! │  └── every line re-fetched: live stock ≥ requested                  │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  1. write Sale (name/price snapshots frozen)  ← source of truth     │
//! │  2. per line: stock -= quantity                ← derived            │
//! │  3. CREDIT: ledger balance += total            ← derived            │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  Sale returned to caller                                            │
//! │                                                                     │
//! │  Steps 1-3 are independent writes: there is no storage              │
//! │  transaction and no rollback. A crash mid-flight leaves derived     │
//! │  state behind the sale log; reconcile::repair replays it. The      │
//! │  ledger upsert is idempotent per sale id so replays are safe.       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine owns no presentation concerns: it returns a record or a
//! typed failure, and the caller decides what to show.

use std::collections::HashMap;

use chrono::Utc;
use tracing::{debug, info};

use crate::error::LedgerResult;
use cantina_core::validation::{
    validate_cart_size, validate_note, validate_payment_amount, validate_quantity,
};
use cantina_core::{
    CartLine, CoreError, Customer, LedgerEntry, LineItem, Money, Sale, SettlementType,
};
use cantina_db::repository::sale::generate_sale_id;
use cantina_db::Store;

/// The settlement and payment engine.
///
/// Holds an injected storage handle; construct one per store.
///
/// ## Usage
/// ```rust,ignore
/// let engine = LedgerEngine::new(store);
///
/// let sale = engine
///     .finalize_sale(&cart, Some(&customer.id), SettlementType::Credit, None)
///     .await?;
/// ```
#[derive(Debug, Clone)]
pub struct LedgerEngine {
    store: Store,
}

impl LedgerEngine {
    /// Creates an engine over the given store.
    pub fn new(store: Store) -> Self {
        LedgerEngine { store }
    }

    /// Settles a cart into a finalized [`Sale`].
    ///
    /// ## Failure Conditions (checked before anything is written)
    /// - `EmptyCart` — the cart has no lines
    /// - `CustomerRequired` — CREDIT settlement without a customer
    /// - `CustomerNotFound` — a customer reference that doesn't resolve
    /// - `CreditBlocked` — CREDIT settlement for a blocked customer
    /// - `ProductNotFound` — a cart line naming an unknown product
    /// - `InsufficientStock` — requested quantity above live stock,
    ///   re-fetched immediately before commit (cumulative across lines
    ///   naming the same product)
    ///
    /// ## Effect
    /// Persists the sale with frozen name/price snapshots, decrements
    /// stock per line, and for CREDIT sales applies the total to the
    /// customer's ledger entry (creating it on first use).
    pub async fn finalize_sale(
        &self,
        cart: &[CartLine],
        customer_id: Option<&str>,
        settlement: SettlementType,
        note: Option<String>,
    ) -> LedgerResult<Sale> {
        debug!(
            lines = cart.len(),
            settlement = ?settlement,
            customer = ?customer_id,
            "finalize_sale"
        );

        // ---- Validation phase: nothing is written past an error ----

        if cart.is_empty() {
            return Err(CoreError::EmptyCart.into());
        }
        validate_cart_size(cart.len())?;
        for line in cart {
            validate_quantity(line.quantity)?;
        }
        if let Some(note) = note.as_deref() {
            validate_note(note)?;
        }

        let customer = self.resolve_customer(customer_id).await?;

        if settlement == SettlementType::Credit {
            let customer = customer.as_ref().ok_or(CoreError::CustomerRequired)?;
            if customer.credit_blocked {
                return Err(CoreError::CreditBlocked {
                    customer_id: customer.id.clone(),
                    name: customer.name.clone(),
                }
                .into());
            }
        }

        // Re-fetch every product now, snapshot name/price, and check the
        // request against live stock. Quantities are accumulated per
        // product so two lines naming the same product can't slip past
        // the per-line check together.
        let products = self.store.products();
        let mut requested_so_far: HashMap<String, i64> = HashMap::new();
        let mut items = Vec::with_capacity(cart.len());
        let mut total = Money::zero();

        for line in cart {
            let product = products
                .get(&line.product_id)
                .await?
                .ok_or_else(|| CoreError::ProductNotFound(line.product_id.clone()))?;

            let cumulative = requested_so_far
                .entry(product.id.clone())
                .and_modify(|q| *q += line.quantity)
                .or_insert(line.quantity);

            if !product.can_sell(*cumulative) {
                return Err(CoreError::InsufficientStock {
                    product_id: product.id.clone(),
                    name: product.name.clone(),
                    available: product.stock_quantity,
                    requested: *cumulative,
                }
                .into());
            }

            let line_total = product.price().multiply_quantity(line.quantity);
            items.push(LineItem {
                product_id: product.id.clone(),
                product_name: product.name.clone(),
                quantity: line.quantity,
                unit_price_cents: product.price_cents,
                line_total_cents: line_total.centavos(),
            });
            total += line_total;
        }

        // ---- Effect phase: fixed order, independent writes ----

        let sale = Sale {
            id: generate_sale_id(),
            customer_id: customer.as_ref().map(|c| c.id.clone()),
            customer_name: customer.as_ref().map(|c| c.name.clone()),
            items,
            total_cents: total.centavos(),
            settlement,
            note,
            timestamp: Utc::now(),
        };

        // 1. The sale record is the durable source of truth
        self.store.sales().add(&sale).await?;

        // 2. Derived: stock decrements, one write per line
        for item in &sale.items {
            products.adjust_stock(&item.product_id, -item.quantity).await?;
        }

        // 3. Derived: the credit charge, idempotent per sale id
        if sale.settlement == SettlementType::Credit {
            if let (Some(customer_id), Some(customer_name)) =
                (sale.customer_id.as_deref(), sale.customer_name.as_deref())
            {
                self.store
                    .ledger()
                    .apply_credit_sale(customer_id, customer_name, &sale.id, sale.total())
                    .await?;
            }
        }

        info!(
            sale_id = %sale.id,
            total = %sale.total(),
            settlement = ?sale.settlement,
            lines = sale.items.len(),
            "Sale finalized"
        );

        Ok(sale)
    }

    /// Records a payment against a customer's ledger balance.
    ///
    /// ## Failure Conditions
    /// - `NoSuchLedgerEntry` — the customer has no ledger entry
    /// - `InvalidAmount` — amount ≤ 0 or amount > current balance
    ///
    /// ## Effect
    /// Decrements the balance and persists the entry. An entry paid
    /// down to zero is kept (and drops out of the open-balances view).
    pub async fn record_payment(
        &self,
        customer_id: &str,
        amount: Money,
    ) -> LedgerResult<LedgerEntry> {
        debug!(customer_id = %customer_id, amount = %amount, "record_payment");

        if let Err(err) = validate_payment_amount(amount.centavos()) {
            return Err(CoreError::InvalidAmount {
                reason: err.to_string(),
            }
            .into());
        }

        let ledger = self.store.ledger();

        let mut entry = ledger
            .get(customer_id)
            .await?
            .ok_or_else(|| CoreError::NoSuchLedgerEntry {
                customer_id: customer_id.to_string(),
            })?;

        if amount > entry.balance() {
            return Err(CoreError::InvalidAmount {
                reason: format!(
                    "payment {} exceeds balance {}",
                    amount,
                    entry.balance()
                ),
            }
            .into());
        }

        entry.balance_cents -= amount.centavos();
        ledger.put(&entry).await?;

        info!(
            customer_id = %customer_id,
            paid = %amount,
            balance = %entry.balance(),
            "Payment recorded"
        );

        Ok(entry)
    }

    /// Resolves an optional customer reference, failing if a reference
    /// is given but doesn't exist.
    async fn resolve_customer(
        &self,
        customer_id: Option<&str>,
    ) -> LedgerResult<Option<Customer>> {
        match customer_id {
            Some(id) => {
                let customer = self
                    .store
                    .customers()
                    .get(id)
                    .await?
                    .ok_or_else(|| CoreError::CustomerNotFound(id.to_string()))?;
                Ok(Some(customer))
            }
            None => Ok(None),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
