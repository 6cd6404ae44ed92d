//! # Product Repository
//!
//! Storage operations for the product catalog, including the stock
//! mutation used by sale settlement.
//!
//! ## Stock Mutation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    Stock Update Strategy                            │
//! │                                                                     │
//! │  adjust_stock(id, -2)                                               │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  get(id)            ← read the live record                          │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  stock = max(0, stock + delta)                                      │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  put(id, record)    ← one independent write                         │
//! │                                                                     │
//! │  The clamp at zero is a floor, not a normal path: the settlement    │
//! │  engine pre-checks live stock and never asks for a negative         │
//! │  result. Positive deltas restock.                                   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::collection::{Collection, COLLECTION_PRODUCTS};
use crate::error::{RepoResult, StoreError, StoreResult};
use cantina_core::validation::{
    validate_low_stock_threshold, validate_price_cents, validate_product_name,
    validate_search_query, validate_stock_quantity,
};
use cantina_core::{NewProduct, Product};

/// Repository for product catalog operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = store.products();
///
/// let product = repo.create(new_product).await?;
/// repo.adjust_stock(&product.id, -2).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    collection: Collection<Product>,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository {
            collection: Collection::new(pool, COLLECTION_PRODUCTS, "Product"),
        }
    }

    /// Adds a new product to the catalog, assigning id and timestamps.
    pub async fn create(&self, new: NewProduct) -> RepoResult<Product> {
        validate_product_name(&new.name)?;
        validate_price_cents(new.price_cents)?;
        validate_stock_quantity(new.stock_quantity)?;
        validate_low_stock_threshold(new.low_stock_threshold)?;

        let now = Utc::now();
        let product = Product {
            id: generate_product_id(),
            name: new.name.trim().to_string(),
            category: new.category,
            price_cents: new.price_cents,
            stock_quantity: new.stock_quantity,
            low_stock_threshold: new.low_stock_threshold,
            image: new.image,
            created_at: now,
            updated_at: now,
        };

        debug!(id = %product.id, name = %product.name, "Creating product");

        self.collection.add(&product.id, &product).await?;
        Ok(product)
    }

    /// Gets a product by id.
    pub async fn get(&self, id: &str) -> StoreResult<Option<Product>> {
        self.collection.get(id).await
    }

    /// Gets a product by id, failing if it does not exist.
    pub async fn get_required(&self, id: &str) -> StoreResult<Product> {
        self.get(id)
            .await?
            .ok_or_else(|| StoreError::not_found("Product", id))
    }

    /// Gets all products, sorted by name.
    pub async fn get_all(&self) -> StoreResult<Vec<Product>> {
        let mut products = self.collection.get_all().await?;
        products.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(products)
    }

    /// Replaces an existing product record in full.
    ///
    /// Catalog edits only: stock changes from settlement go through
    /// [`adjust_stock`](Self::adjust_stock). `updated_at` is refreshed.
    pub async fn update(&self, product: &Product) -> RepoResult<Product> {
        validate_product_name(&product.name)?;
        validate_price_cents(product.price_cents)?;
        validate_stock_quantity(product.stock_quantity)?;
        validate_low_stock_threshold(product.low_stock_threshold)?;

        let mut updated = product.clone();
        updated.updated_at = Utc::now();

        debug!(id = %updated.id, "Updating product");

        self.collection.update(&updated.id, &updated).await?;
        Ok(updated)
    }

    /// Deletes a product. Historical sales keep their name/price
    /// snapshots; no referential check is performed.
    pub async fn delete(&self, id: &str) -> StoreResult<()> {
        debug!(id = %id, "Deleting product");
        self.collection.delete(id).await
    }

    /// Applies a stock delta (negative for sales, positive for
    /// restocking), clamped at zero.
    ///
    /// ## Contract
    /// A delta that would go below zero is a caller error — the
    /// settlement engine pre-checks live stock. The clamp only keeps a
    /// contract violation from persisting a negative quantity.
    pub async fn adjust_stock(&self, id: &str, delta: i64) -> StoreResult<Product> {
        debug!(id = %id, delta = %delta, "Adjusting stock");

        let mut product = self.get_required(id).await?;

        product.stock_quantity = (product.stock_quantity + delta).max(0);
        product.updated_at = Utc::now();

        self.collection.put(id, &product).await?;

        Ok(product)
    }

    /// Searches products by name (case-insensitive substring).
    pub async fn search(&self, query: &str) -> RepoResult<Vec<Product>> {
        let query = validate_search_query(query)?.to_lowercase();

        let mut products = self.get_all().await?;

        if !query.is_empty() {
            products.retain(|p| p.name.to_lowercase().contains(&query));
        }

        Ok(products)
    }

    /// Counts catalog products.
    pub async fn count(&self) -> StoreResult<i64> {
        self.collection.count().await
    }
}

/// Helper to generate a new product ID.
pub fn generate_product_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RepoError;
    use crate::pool::{Store, StoreConfig};
    use cantina_core::Category;

    fn draft(name: &str, price_cents: i64, stock: i64) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            category: Category::Savory,
            price_cents,
            stock_quantity: stock,
            low_stock_threshold: 5,
            image: None,
        }
    }

    async fn test_store() -> Store {
        Store::new(StoreConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let store = test_store().await;
        let repo = store.products();

        let product = repo.create(draft("Salgado de Carne", 350, 50)).await.unwrap();

        let found = repo.get_required(&product.id).await.unwrap();
        assert_eq!(found.name, "Salgado de Carne");
        assert_eq!(found.price_cents, 350);
        assert_eq!(found.stock_quantity, 50);
    }

    #[tokio::test]
    async fn test_create_rejects_negative_price() {
        let store = test_store().await;
        let repo = store.products();

        let err = repo.create(draft("Brigadeiro", -200, 40)).await.unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_adjust_stock_applies_delta() {
        let store = test_store().await;
        let repo = store.products();

        let product = repo.create(draft("Pão de Queijo", 250, 60)).await.unwrap();

        let after_sale = repo.adjust_stock(&product.id, -3).await.unwrap();
        assert_eq!(after_sale.stock_quantity, 57);

        let after_restock = repo.adjust_stock(&product.id, 10).await.unwrap();
        assert_eq!(after_restock.stock_quantity, 67);
    }

    #[tokio::test]
    async fn test_adjust_stock_clamps_at_zero() {
        let store = test_store().await;
        let repo = store.products();

        let product = repo.create(draft("Beijinho", 200, 2)).await.unwrap();

        let clamped = repo.adjust_stock(&product.id, -5).await.unwrap();
        assert_eq!(clamped.stock_quantity, 0);
    }

    #[tokio::test]
    async fn test_adjust_stock_missing_product() {
        let store = test_store().await;
        let repo = store.products();

        let err = repo.adjust_stock("missing", -1).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_search_by_name() {
        let store = test_store().await;
        let repo = store.products();

        repo.create(draft("Coca-Cola Lata", 500, 30)).await.unwrap();
        repo.create(draft("Suco Natural", 400, 25)).await.unwrap();

        let hits = repo.search("cola").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Coca-Cola Lata");
    }
}
