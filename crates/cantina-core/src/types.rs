//! # Domain Types
//!
//! Core domain types used throughout Cantina POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                │
//! │                                                                     │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌──────────────────┐   │
//! │  │    Customer     │   │     Product     │   │      Sale        │   │
//! │  │  ─────────────  │   │  ─────────────  │   │  ──────────────  │   │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)       │   │
//! │  │  name           │   │  name           │   │  customer_*      │   │
//! │  │  class_group    │   │  category       │   │  items (frozen)  │   │
//! │  │  credit_blocked │   │  price_cents    │   │  total_cents     │   │
//! │  │  guardians      │   │  stock_quantity │   │  settlement      │   │
//! │  └─────────────────┘   └─────────────────┘   └──────────────────┘   │
//! │                                                                     │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌──────────────────┐   │
//! │  │   LedgerEntry   │   │ SettlementType  │   │    Category      │   │
//! │  │  ─────────────  │   │  ─────────────  │   │  ──────────────  │   │
//! │  │  customer_id    │   │  Paid           │   │  Sweet, Savory   │   │
//! │  │  balance_cents  │   │  Credit         │   │  Drink, Snack    │   │
//! │  │  sale_ids       │   └─────────────────┘   │  Other           │   │
//! │  └─────────────────┘                         └──────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! `Sale` and `LedgerEntry` carry denormalized name/price snapshots taken
//! at creation time. This is intentional: sale history must survive later
//! catalog edits and even customer deletion.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Customer
// =============================================================================

/// A guardian (responsible adult) attached to a customer record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guardian {
    pub name: String,
    pub contact: String,
}

/// A registered customer (a child buying at the canteen counter).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Full name.
    pub name: String,

    /// Class/group label (e.g. "3º Ano A").
    pub class_group: String,

    /// Contact phone, free-form.
    pub contact: String,

    /// Optional photo as a data URL; resized by the presentation layer
    /// before it reaches this crate.
    pub photo: Option<String>,

    /// Father's record, if registered.
    pub father: Option<Guardian>,

    /// Mother's record, if registered.
    pub mother: Option<Guardian>,

    /// Free-text notes (allergies, pickup arrangements, ...).
    pub notes: String,

    /// When true, credit (fiado) sales are refused for this customer.
    pub credit_blocked: bool,

    /// When the customer was registered.
    pub created_at: DateTime<Utc>,

    /// When the record was last edited.
    pub updated_at: DateTime<Utc>,
}

/// Input for registering a new customer. The repository assigns the id
/// and timestamps.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewCustomer {
    pub name: String,
    pub class_group: String,
    pub contact: String,
    pub photo: Option<String>,
    pub father: Option<Guardian>,
    pub mother: Option<Guardian>,
    pub notes: String,
    pub credit_blocked: bool,
}

// =============================================================================
// Product
// =============================================================================

/// Product category, used for catalog grouping and tile colors in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Sweet,
    Savory,
    Drink,
    Snack,
    Other,
}

impl Default for Category {
    fn default() -> Self {
        Category::Other
    }
}

/// A product available for sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name shown on the sale grid.
    pub name: String,

    /// Catalog category.
    pub category: Category,

    /// Unit price in centavos.
    pub price_cents: i64,

    /// Current stock level. Never negative.
    pub stock_quantity: i64,

    /// Stock level at or below which the product is flagged low.
    pub low_stock_threshold: i64,

    /// Optional product image as a data URL.
    pub image: Option<String>,

    /// When the product was created.
    pub created_at: DateTime<Utc>,

    /// When the product was last updated (catalog edit or stock change).
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the unit price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_centavos(self.price_cents)
    }

    /// Checks whether stock has fallen to or below the alert threshold.
    #[inline]
    pub fn is_low_stock(&self) -> bool {
        self.stock_quantity <= self.low_stock_threshold
    }

    /// Checks whether the requested quantity can be sold from current stock.
    #[inline]
    pub fn can_sell(&self, quantity: i64) -> bool {
        quantity <= self.stock_quantity
    }
}

/// Input for creating a new catalog product. The repository assigns the
/// id and timestamps.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub category: Category,
    pub price_cents: i64,
    pub stock_quantity: i64,
    pub low_stock_threshold: i64,
    pub image: Option<String>,
}

// =============================================================================
// Sale
// =============================================================================

/// How a sale was settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SettlementType {
    /// Paid in full at the counter.
    Paid,
    /// Charged to the customer's running store-credit balance.
    Credit,
}

/// One requested line of a cart, as submitted to settlement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: String,
    pub quantity: i64,
}

/// A line item in a finalized sale.
/// Uses the snapshot pattern to freeze product data at time of sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    pub product_id: String,
    /// Product name at time of sale (frozen).
    pub product_name: String,
    /// Quantity sold.
    pub quantity: i64,
    /// Unit price in centavos at time of sale (frozen).
    pub unit_price_cents: i64,
    /// quantity × unit_price_cents.
    pub line_total_cents: i64,
}

impl LineItem {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_centavos(self.unit_price_cents)
    }

    /// Returns the line total as Money.
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_centavos(self.line_total_cents)
    }
}

/// A finalized sale transaction. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sale {
    pub id: String,
    /// Customer reference, if one was attached at the counter.
    /// Optional for PAID sales; required for CREDIT sales.
    pub customer_id: Option<String>,
    /// Customer name at time of sale (frozen; survives deletion).
    pub customer_name: Option<String>,
    /// Ordered line items.
    pub items: Vec<LineItem>,
    /// Sum of line totals, in centavos.
    pub total_cents: i64,
    pub settlement: SettlementType,
    /// Free-text note from the cashier.
    pub note: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl Sale {
    /// Returns the sale total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_centavos(self.total_cents)
    }
}

// =============================================================================
// Ledger Entry
// =============================================================================

/// A customer's running store-credit (fiado) balance.
///
/// Keyed by customer id: at most one entry exists per customer. Created
/// on the first credit sale, incremented by later credit sales, and
/// decremented by payments. Entries are never deleted automatically —
/// a paid-off entry stays addressable with a zero balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub customer_id: String,
    /// Customer name at the time the entry was created (frozen).
    pub customer_name: String,
    /// Outstanding balance in centavos. Never negative.
    pub balance_cents: i64,
    /// Ids of the credit sales that built up the current balance,
    /// in application order. Payments do not remove entries here.
    pub sale_ids: Vec<String>,
}

impl LedgerEntry {
    /// Returns the outstanding balance as Money.
    #[inline]
    pub fn balance(&self) -> Money {
        Money::from_centavos(self.balance_cents)
    }

    /// Checks whether the entry still has an outstanding balance.
    #[inline]
    pub fn is_open(&self) -> bool {
        self.balance_cents > 0
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
