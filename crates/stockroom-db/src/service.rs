//! # Inventory Service
//!
//! The request/response surface the front-end calls.
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  find_by_id / find_by_name                                             │
//! │      └── read the current product snapshot, never the database         │
//! │                                                                         │
//! │  add_stock / register_product                                          │
//! │      1. validate            ── fail → Validation, store untouched     │
//! │      2. one transaction     ── fail → Persistence, rolled back,        │
//! │                                       snapshot untouched               │
//! │      3. refresh(Products)   ── only after commit; a failed reload     │
//! │                                   still returns Ok, refreshed = false  │
//! │                                                                         │
//! │  Writes take `&mut self`, so no lookup can observe the product         │
//! │  snapshot while a write on produtos is in flight.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Error Taxonomy
//! | Variant         | Meaning                                | Recoverable |
//! |-----------------|----------------------------------------|-------------|
//! | `Configuration` | missing/invalid `DB_*`                 | no          |
//! | `Connection`    | database unreachable at startup        | no          |
//! | `Validation`    | bad input, nothing sent to the store   | re-prompt   |
//! | `Query`         | snapshot read failed                   | retry/stale |
//! | `Persistence`   | write failed, rolled back              | report      |
//!
//! Nothing is retried automatically.

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::cache::SnapshotCache;
use crate::config::{ConfigError, DbConfig};
use crate::error::DbError;
use crate::pool::Database;
use crate::store::InventoryStore;
use stockroom_core::{query, NewProduct, Product, StockAddition, Table, TableName, ValidationError};

// =============================================================================
// Errors
// =============================================================================

/// Failures surfaced to the front-end.
#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("Configuration error")]
    Configuration(#[from] ConfigError),

    #[error("Could not connect to the database")]
    Connection(#[source] DbError),

    #[error("Invalid input")]
    Validation(#[from] ValidationError),

    #[error("Failed to load {table}")]
    Query {
        table: TableName,
        #[source]
        source: DbError,
    },

    #[error("{operation} failed for {target}")]
    Persistence {
        operation: &'static str,
        target: String,
        #[source]
        source: DbError,
    },
}

/// Result type for service operations.
pub type InventoryResult<T> = Result<T, InventoryError>;

// =============================================================================
// Results
// =============================================================================

/// Outcome of a committed stock addition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StockAdded {
    pub product_id: i64,
    pub quantity: i64,
    /// Stock level from the refreshed snapshot, if the product is in it.
    pub current_stock: Option<i64>,
    /// False when the write committed but the product snapshot could not be
    /// reloaded. The snapshot is then stale.
    pub refreshed: bool,
}

/// Outcome of a committed registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductRegistered {
    /// Generated by the database; informational only.
    pub id: u64,
    pub name: String,
    /// See [`StockAdded::refreshed`].
    pub refreshed: bool,
}

// =============================================================================
// Inventory
// =============================================================================

/// Owns the store handle and the snapshot cache.
#[derive(Debug)]
pub struct Inventory<S = Database> {
    store: S,
    snapshots: SnapshotCache,
}

impl Inventory<Database> {
    /// Reads `DB_*` (and `.env`), connects and loads all three snapshots.
    pub async fn from_env() -> InventoryResult<Self> {
        let config = DbConfig::from_env()?;
        Inventory::connect(&config).await
    }

    /// Connects with `config` and loads all three snapshots.
    pub async fn connect(config: &DbConfig) -> InventoryResult<Self> {
        let db = Database::connect(config)
            .await
            .map_err(InventoryError::Connection)?;
        Inventory::open(db).await
    }
}

impl<S: InventoryStore> Inventory<S> {
    /// Wraps `store` with an empty cache. Nothing is loaded.
    pub fn new(store: S) -> Self {
        Inventory {
            store,
            snapshots: SnapshotCache::new(),
        }
    }

    /// Wraps `store` and loads every table.
    ///
    /// Fails on the first table that can't be read. Callers that prefer to
    /// start with empty snapshots use [`Inventory::new`] and
    /// [`Inventory::refresh`] instead.
    pub async fn open(store: S) -> InventoryResult<Self> {
        let mut inventory = Inventory::new(store);
        inventory.refresh_all().await?;
        Ok(inventory)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn snapshots(&self) -> &SnapshotCache {
        &self.snapshots
    }

    /// Current snapshot of `table`.
    pub fn snapshot(&self, table: TableName) -> &Table {
        self.snapshots.get(table)
    }

    /// Reads `table` straight from the store without touching the cache.
    pub async fn load_snapshot(&self, table: TableName) -> InventoryResult<Table> {
        self.store
            .load_snapshot(table)
            .await
            .map_err(|source| InventoryError::Query { table, source })
    }

    /// Reloads one table into the cache.
    pub async fn refresh(&mut self, table: TableName) -> InventoryResult<()> {
        self.snapshots
            .refresh(&self.store, table)
            .await
            .map_err(|source| InventoryError::Query { table, source })
    }

    /// Reloads every table, stopping at the first failure.
    pub async fn refresh_all(&mut self) -> InventoryResult<()> {
        for table in TableName::ALL {
            self.refresh(table).await?;
        }
        info!(
            products = self.snapshots.products().len(),
            suppliers = self.snapshots.suppliers().len(),
            movements = self.snapshots.movements().len(),
            "Snapshots loaded"
        );
        Ok(())
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Exact lookup by `id_produto` in the current snapshot.
    pub fn find_by_id(&self, id: i64) -> Option<Product> {
        query::find_by_id(self.snapshots.products(), id)
    }

    /// Case-insensitive partial name match in the current snapshot.
    pub fn find_by_name(&self, term: &str) -> InventoryResult<Vec<Product>> {
        Ok(query::find_by_name(self.snapshots.products(), term)?)
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Adds units to an existing product's stock.
    ///
    /// The product's existence is checked by the UPDATE itself, not by a
    /// prior lookup.
    pub async fn add_stock(&mut self, addition: StockAddition) -> InventoryResult<StockAdded> {
        addition.validate()?;

        self.store
            .add_stock(&addition)
            .await
            .map_err(|source| {
                warn!(id = addition.product_id, error = %source, "Stock addition rolled back");
                InventoryError::Persistence {
                    operation: "add stock",
                    target: format!("product {}", addition.product_id),
                    source,
                }
            })?;

        info!(
            id = addition.product_id,
            quantity = addition.quantity,
            "Stock added"
        );

        let refreshed = self.refresh_after_commit("add stock").await;
        let current_stock = if refreshed {
            self.find_by_id(addition.product_id).map(|p| p.quantity)
        } else {
            None
        };

        Ok(StockAdded {
            product_id: addition.product_id,
            quantity: addition.quantity,
            current_stock,
            refreshed,
        })
    }

    /// Registers a new product.
    pub async fn register_product(
        &mut self,
        product: NewProduct,
    ) -> InventoryResult<ProductRegistered> {
        product.validate()?;

        let id = self
            .store
            .insert_product(&product)
            .await
            .map_err(|source| {
                warn!(name = %product.name, error = %source, "Registration rolled back");
                InventoryError::Persistence {
                    operation: "register product",
                    target: format!("'{}'", product.name.trim()),
                    source,
                }
            })?;

        info!(id, name = %product.name, "Product registered");

        let refreshed = self.refresh_after_commit("register product").await;

        Ok(ProductRegistered {
            id,
            name: product.name.trim().to_string(),
            refreshed,
        })
    }

    /// Reloads the product snapshot after a committed write.
    ///
    /// The write can't be undone at this point, so a failed reload is not an
    /// error: the caller gets `false` and the previous snapshot stays.
    async fn refresh_after_commit(&mut self, operation: &'static str) -> bool {
        match self.refresh(TableName::Products).await {
            Ok(()) => true,
            Err(e) => {
                warn!(operation, error = %e, "Write committed but product snapshot is stale");
                false
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;
    use rust_decimal::Decimal;
    use stockroom_core::ProductForm;

    async fn inventory_with(store: MemoryStore) -> Inventory<MemoryStore> {
        Inventory::open(store).await.unwrap()
    }

    fn widget() -> NewProduct {
        NewProduct {
            name: "Widget".to_string(),
            category: "Tools".to_string(),
            quantity: 5,
            price: Decimal::from(10),
            supplier_id: 1,
        }
    }

    #[tokio::test]
    async fn test_open_loads_all_tables() {
        let inv = inventory_with(MemoryStore::new().with_product(Some("Hammer"), 2)).await;

        assert_eq!(inv.snapshot(TableName::Products).len(), 1);
        assert_eq!(inv.snapshot(TableName::Suppliers).len(), 1);
        assert_eq!(inv.store().reads(), 3);
    }

    #[tokio::test]
    async fn test_open_fails_with_query_error() {
        let store = MemoryStore::new();
        store.set_fail_reads(true);

        let err = Inventory::open(store).await.unwrap_err();
        assert!(matches!(
            err,
            InventoryError::Query {
                table: TableName::Products,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_add_stock_increments_only_quantity() {
        let mut inv = inventory_with(MemoryStore::new().with_product(Some("Hammer"), 10)).await;
        let before = inv.find_by_id(1).unwrap();

        let added = inv.add_stock(StockAddition::new(1, 4).unwrap()).await.unwrap();

        assert_eq!(added.current_stock, Some(14));
        let after = inv.find_by_id(1).unwrap();
        assert_eq!(after.quantity, 14);
        assert_eq!(after.name, before.name);
        assert_eq!(after.category, before.category);
        assert_eq!(after.price, before.price);
        assert_eq!(after.supplier_id, before.supplier_id);
    }

    #[tokio::test]
    async fn test_add_stock_rejects_non_positive_without_store_call() {
        let mut inv = inventory_with(MemoryStore::new().with_product(Some("Hammer"), 10)).await;
        let calls = inv.store().calls();
        let snapshot = inv.snapshot(TableName::Products).clone();

        for quantity in [0, -1, -100] {
            let err = inv
                .add_stock(StockAddition {
                    product_id: 1,
                    quantity,
                })
                .await
                .unwrap_err();
            assert!(matches!(err, InventoryError::Validation(_)));
        }

        assert_eq!(inv.store().calls(), calls);
        assert_eq!(inv.snapshot(TableName::Products), &snapshot);
    }

    #[tokio::test]
    async fn test_non_numeric_input_never_reaches_store() {
        let inv = inventory_with(MemoryStore::new().with_product(Some("Hammer"), 10)).await;
        let calls = inv.store().calls();

        assert!(StockAddition::parse("one", "3").is_err());
        assert!(StockAddition::parse("1", "three").is_err());

        assert_eq!(inv.store().calls(), calls);
    }

    #[tokio::test]
    async fn test_add_stock_unknown_product_is_persistence_error() {
        let mut inv = inventory_with(MemoryStore::new().with_product(Some("Hammer"), 10)).await;
        let snapshot = inv.snapshot(TableName::Products).clone();

        let err = inv
            .add_stock(StockAddition::new(99, 1).unwrap())
            .await
            .unwrap_err();

        match err {
            InventoryError::Persistence { target, source, .. } => {
                assert_eq!(target, "product 99");
                assert!(matches!(source, DbError::NotFound { .. }));
            }
            other => panic!("expected persistence error, got {other:?}"),
        }
        assert_eq!(inv.snapshot(TableName::Products), &snapshot);
    }

    #[tokio::test]
    async fn test_sequential_increments_accumulate() {
        let mut inv = inventory_with(MemoryStore::new().with_product(Some("Hammer"), 20)).await;

        inv.add_stock(StockAddition::new(1, 3).unwrap()).await.unwrap();
        inv.add_stock(StockAddition::new(1, 7).unwrap()).await.unwrap();

        assert_eq!(inv.store().stored_quantity(1), Some(30));
        assert_eq!(inv.find_by_id(1).unwrap().quantity, 30);
    }

    #[tokio::test]
    async fn test_register_then_search_round_trip() {
        let mut inv = inventory_with(MemoryStore::new()).await;

        let registered = inv.register_product(widget()).await.unwrap();
        assert_eq!(registered.name, "Widget");
        assert_eq!(inv.store().product_count(), 1);

        let found = inv.find_by_name("Widget").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].quantity, 5);
        assert_eq!(found[0].price, Decimal::from(10));
        assert_eq!(found[0].category.as_deref(), Some("Tools"));
    }

    #[tokio::test]
    async fn test_register_rejects_negative_values_and_creates_nothing() {
        let mut inv = inventory_with(MemoryStore::new()).await;
        let calls = inv.store().calls();

        let mut negative_price = widget();
        negative_price.price = Decimal::from(-1);
        let mut negative_quantity = widget();
        negative_quantity.quantity = -5;

        for product in [negative_price, negative_quantity] {
            let err = inv.register_product(product).await.unwrap_err();
            assert!(matches!(err, InventoryError::Validation(_)));
        }

        assert_eq!(inv.store().product_count(), 0);
        assert_eq!(inv.store().calls(), calls);
    }

    #[tokio::test]
    async fn test_register_from_form() {
        let mut inv = inventory_with(MemoryStore::new()).await;
        let form = ProductForm {
            name: " Widget ".to_string(),
            category: "Tools".to_string(),
            quantity: "5".to_string(),
            price: "10".to_string(),
            supplier_id: "1".to_string(),
        };

        let registered = inv.register_product(form.parse().unwrap()).await.unwrap();
        assert_eq!(registered.name, "Widget");
    }

    #[tokio::test]
    async fn test_register_unknown_supplier_rolls_back() {
        let mut inv = inventory_with(MemoryStore::new()).await;
        let mut product = widget();
        product.supplier_id = 42;

        let err = inv.register_product(product).await.unwrap_err();

        assert!(matches!(
            err,
            InventoryError::Persistence {
                source: DbError::ForeignKeyViolation { .. },
                ..
            }
        ));
        assert_eq!(inv.store().product_count(), 0);
        assert!(inv.snapshot(TableName::Products).is_empty());
    }

    #[tokio::test]
    async fn test_queries_do_not_touch_store() {
        let inv = inventory_with(
            MemoryStore::new()
                .with_product(Some("Claw Hammer"), 1)
                .with_product(None, 1),
        )
        .await;
        let reads = inv.store().reads();

        assert_eq!(inv.find_by_name("hammer").unwrap().len(), 1);
        assert!(inv.find_by_id(404).is_none());
        assert!(matches!(
            inv.find_by_name(" "),
            Err(InventoryError::Validation(_))
        ));

        assert_eq!(inv.store().reads(), reads);
    }

    #[tokio::test]
    async fn test_load_snapshot_bypasses_cache() {
        let mut inv = Inventory::new(MemoryStore::new().with_product(Some("Hammer"), 1));

        let table = inv.load_snapshot(TableName::Products).await.unwrap();
        assert_eq!(table.len(), 1);
        assert!(inv.snapshot(TableName::Products).is_empty());

        inv.refresh(TableName::Products).await.unwrap();
        assert_eq!(inv.snapshot(TableName::Products).len(), 1);
    }

    #[tokio::test]
    async fn test_refresh_failure_after_commit_still_reports_success() {
        let mut inv = inventory_with(MemoryStore::new().with_product(Some("Hammer"), 10)).await;
        inv.store().set_fail_reads(true);

        let added = inv.add_stock(StockAddition::new(1, 5).unwrap()).await.unwrap();

        assert!(!added.refreshed);
        assert_eq!(added.current_stock, None);
        assert_eq!(inv.store().stored_quantity(1), Some(15));
        // previous snapshot is kept until the next successful reload
        assert_eq!(inv.find_by_id(1).unwrap().quantity, 10);

        inv.store().set_fail_reads(false);
        inv.refresh(TableName::Products).await.unwrap();
        assert_eq!(inv.find_by_id(1).unwrap().quantity, 15);
        assert_eq!(inv.store().stored_quantity(1), Some(15));
    }

    #[tokio::test]
    async fn test_register_with_stale_snapshot_is_committed() {
        let mut inv = inventory_with(MemoryStore::new()).await;
        inv.store().set_fail_reads(true);

        let registered = inv.register_product(widget()).await.unwrap();

        assert!(!registered.refreshed);
        assert_eq!(inv.store().product_count(), 1);
        assert!(inv.snapshot(TableName::Products).is_empty());
    }

    #[tokio::test]
    async fn test_successful_writes_are_refreshed() {
        let mut inv = inventory_with(MemoryStore::new().with_product(Some("Hammer"), 1)).await;

        assert!(inv.add_stock(StockAddition::new(1, 1).unwrap()).await.unwrap().refreshed);
        assert!(inv.register_product(widget()).await.unwrap().refreshed);
    }

    #[test]
    fn test_messages_do_not_repeat_their_cause() {
        let err = InventoryError::Query {
            table: TableName::Products,
            source: DbError::QueryFailed("server has gone away".to_string()),
        };
        assert_eq!(err.to_string(), "Failed to load produtos");

        let cause = std::error::Error::source(&err).unwrap();
        assert_eq!(cause.to_string(), "Query failed: server has gone away");

        let err = InventoryError::Validation(ValidationError::Required {
            field: "name".to_string(),
        });
        assert_eq!(err.to_string(), "Invalid input");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_config_error_converts() {
        let err: InventoryError = ConfigError::MissingRequired("DB_HOST".to_string()).into();
        assert!(matches!(err, InventoryError::Configuration(_)));
    }
}
