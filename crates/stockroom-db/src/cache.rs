//! # Snapshot Cache
//!
//! The in-memory copies of `produtos`, `Fornecedores` and `Movimentacao`.
//!
//! ## Refresh Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  startup ──► refresh(Products) ─► refresh(Suppliers) ─► refresh(Mov.)  │
//! │                                                                         │
//! │  write committed on produtos ──► refresh(Products)                     │
//! │                                                                         │
//! │  refresh = full reload, replace the table wholesale.                   │
//! │  A failed reload leaves the previous snapshot in place.                │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cache is a plain owned value. Whoever owns it decides when to
//! refresh; there is no global state and no background reload.

use std::time::Instant;
use tracing::{debug, warn};

use crate::error::DbResult;
use crate::store::InventoryStore;
use stockroom_core::{Table, TableName};

/// Point-in-time copies of the three tables.
#[derive(Debug, Clone)]
pub struct SnapshotCache {
    products: Table,
    suppliers: Table,
    movements: Table,
}

impl Default for SnapshotCache {
    fn default() -> Self {
        SnapshotCache::new()
    }
}

impl SnapshotCache {
    /// An empty cache. Every table has no columns and no rows until its
    /// first refresh.
    pub fn new() -> Self {
        SnapshotCache {
            products: Table::empty(TableName::Products.as_str()),
            suppliers: Table::empty(TableName::Suppliers.as_str()),
            movements: Table::empty(TableName::Movements.as_str()),
        }
    }

    /// Current snapshot of `table`.
    pub fn get(&self, table: TableName) -> &Table {
        match table {
            TableName::Products => &self.products,
            TableName::Suppliers => &self.suppliers,
            TableName::Movements => &self.movements,
        }
    }

    pub fn products(&self) -> &Table {
        &self.products
    }

    pub fn suppliers(&self) -> &Table {
        &self.suppliers
    }

    pub fn movements(&self) -> &Table {
        &self.movements
    }

    /// Replaces the snapshot of `table`.
    pub fn replace(&mut self, table: TableName, snapshot: Table) {
        match table {
            TableName::Products => self.products = snapshot,
            TableName::Suppliers => self.suppliers = snapshot,
            TableName::Movements => self.movements = snapshot,
        }
    }

    /// Reloads `table` from `store`.
    ///
    /// On error the previous snapshot is kept.
    pub async fn refresh<S>(&mut self, store: &S, table: TableName) -> DbResult<()>
    where
        S: InventoryStore + ?Sized,
    {
        let started = Instant::now();

        match store.load_snapshot(table).await {
            Ok(snapshot) => {
                debug!(
                    table = %table,
                    rows = snapshot.len(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Snapshot refreshed"
                );
                self.replace(table, snapshot);
                Ok(())
            }
            Err(e) => {
                warn!(table = %table, error = %e, "Snapshot refresh failed, keeping previous copy");
                Err(e)
            }
        }
    }
}
