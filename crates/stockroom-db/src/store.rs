//! The store seam between the inventory service and the database.
//!
//! [`Inventory`](crate::service::Inventory) only ever talks to an
//! [`InventoryStore`]. [`Database`] is the production implementation; tests
//! swap in an in-memory store that counts calls.

use async_trait::async_trait;

use crate::error::DbResult;
use crate::pool::Database;
use stockroom_core::{NewProduct, StockAddition, Table, TableName};

/// Everything the inventory service needs from persistence.
#[async_trait]
pub trait InventoryStore: Send + Sync {
    /// Unconditional full read of one table.
    async fn load_snapshot(&self, table: TableName) -> DbResult<Table>;

    /// Relative stock increment in its own transaction.
    async fn add_stock(&self, addition: &StockAddition) -> DbResult<()>;

    /// Single-row insert in its own transaction. Returns the generated id.
    async fn insert_product(&self, product: &NewProduct) -> DbResult<u64>;
}

#[async_trait]
impl InventoryStore for Database {
    async fn load_snapshot(&self, table: TableName) -> DbResult<Table> {
        self.snapshots().load(table).await
    }

    async fn add_stock(&self, addition: &StockAddition) -> DbResult<()> {
        self.products().add_stock(addition).await
    }

    async fn insert_product(&self, product: &NewProduct) -> DbResult<u64> {
        self.products().insert(product).await
    }
}

/// In-memory store used by the service and cache tests.
#[cfg(test)]
pub(crate) mod memory {
    use super::*;
    use crate::error::DbError;
    use rust_decimal::Decimal;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use stockroom_core::{columns, Value};

    #[derive(Debug, Clone)]
    struct ProductRow {
        id: i64,
        name: Option<String>,
        category: String,
        quantity: i64,
        price: Decimal,
        supplier_id: i64,
    }

    #[derive(Debug, Default)]
    struct State {
        products: Vec<ProductRow>,
        suppliers: Vec<(i64, String)>,
        next_id: i64,
    }

    /// Behaves like the `produtos`/`Fornecedores` pair: increments are
    /// relative, inserts check the supplier foreign key.
    #[derive(Debug, Default)]
    pub(crate) struct MemoryStore {
        state: Mutex<State>,
        reads: AtomicUsize,
        writes: AtomicUsize,
        fail_reads: Mutex<bool>,
    }

    impl MemoryStore {
        pub(crate) fn new() -> Self {
            let store = MemoryStore::default();
            {
                let mut state = store.state.lock().unwrap();
                state.suppliers.push((1, "Acme Ferragens".to_string()));
                state.next_id = 1;
            }
            store
        }

        pub(crate) fn with_product(self, name: Option<&str>, quantity: i64) -> Self {
            {
                let mut state = self.state.lock().unwrap();
                let id = state.next_id;
                state.next_id += 1;
                state.products.push(ProductRow {
                    id,
                    name: name.map(str::to_string),
                    category: "Tools".to_string(),
                    quantity,
                    price: Decimal::new(250, 2),
                    supplier_id: 1,
                });
            }
            self
        }

        pub(crate) fn set_fail_reads(&self, fail: bool) {
            *self.fail_reads.lock().unwrap() = fail;
        }

        pub(crate) fn reads(&self) -> usize {
            self.reads.load(Ordering::SeqCst)
        }

        pub(crate) fn writes(&self) -> usize {
            self.writes.load(Ordering::SeqCst)
        }

        pub(crate) fn calls(&self) -> usize {
            self.reads() + self.writes()
        }

        pub(crate) fn product_count(&self) -> usize {
            self.state.lock().unwrap().products.len()
        }

        pub(crate) fn stored_quantity(&self, id: i64) -> Option<i64> {
            let state = self.state.lock().unwrap();
            state.products.iter().find(|p| p.id == id).map(|p| p.quantity)
        }

        fn products_table(state: &State) -> Table {
            let mut table = Table::new(
                TableName::Products.as_str(),
                [
                    columns::ID,
                    columns::NAME,
                    columns::CATEGORY,
                    columns::QUANTITY,
                    columns::PRICE,
                    columns::SUPPLIER_ID,
                ]
                .iter()
                .map(|c| c.to_string())
                .collect(),
            );
            for p in &state.products {
                table.push_row(vec![
                    Value::Integer(p.id),
                    Value::from(p.name.clone()),
                    Value::from(p.category.clone()),
                    Value::Integer(p.quantity),
                    Value::Decimal(p.price),
                    Value::Integer(p.supplier_id),
                ]);
            }
            table
        }
    }

    #[async_trait]
    impl InventoryStore for MemoryStore {
        async fn load_snapshot(&self, table: TableName) -> DbResult<Table> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            if *self.fail_reads.lock().unwrap() {
                return Err(DbError::QueryFailed("server has gone away".to_string()));
            }

            let state = self.state.lock().unwrap();
            Ok(match table {
                TableName::Products => Self::products_table(&state),
                TableName::Suppliers => {
                    let mut t = Table::new(
                        table.as_str(),
                        vec!["id_Fornecedor".to_string(), "nome".to_string()],
                    );
                    for (id, name) in &state.suppliers {
                        t.push_row(vec![Value::Integer(*id), Value::from(name.as_str())]);
                    }
                    t
                }
                TableName::Movements => Table::new(
                    table.as_str(),
                    vec!["id_movimentacao".to_string(), "id_produto".to_string()],
                ),
            })
        }

        async fn add_stock(&self, addition: &StockAddition) -> DbResult<()> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            let mut state = self.state.lock().unwrap();
            match state
                .products
                .iter_mut()
                .find(|p| p.id == addition.product_id)
            {
                Some(p) => {
                    p.quantity += addition.quantity;
                    Ok(())
                }
                None => Err(DbError::not_found(
                    "Product",
                    addition.product_id.to_string(),
                )),
            }
        }

        async fn insert_product(&self, product: &NewProduct) -> DbResult<u64> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            let mut state = self.state.lock().unwrap();
            if !state.suppliers.iter().any(|(id, _)| *id == product.supplier_id) {
                return Err(DbError::ForeignKeyViolation {
                    message: "a foreign key constraint fails (id_Fornecedor)".to_string(),
                });
            }

            let id = state.next_id;
            state.next_id += 1;
            state.products.push(ProductRow {
                id,
                name: Some(product.name.clone()),
                category: product.category.clone(),
                quantity: product.quantity,
                price: product.price,
                supplier_id: product.supplier_id,
            });
            Ok(id as u64)
        }
    }
}
