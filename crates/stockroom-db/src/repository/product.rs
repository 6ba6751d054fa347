//! # Product Repository
//!
//! Transactional writes against `produtos`.
//!
//! ## Stock Update Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    Stock Update Strategy                            │
//! │                                                                     │
//! │  ❌ WRONG: Absolute update (read, add, write back)                 │
//! │     SELECT quantidade_estoque_atual ... → 10                        │
//! │     UPDATE produtos SET quantidade_estoque_atual = 13               │
//! │                                                                     │
//! │  ✅ CORRECT: Relative update                                        │
//! │     UPDATE produtos                                                 │
//! │     SET quantidade_estoque_atual = quantidade_estoque_atual + ?     │
//! │                                                                     │
//! │  Another process receiving 5 units at the same moment:             │
//! │  +3 and +5 both land, 10 → 18. No lost update.                     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every statement is parameterized and runs inside its own transaction.
//! A `Transaction` dropped without `commit` rolls back, so every early
//! return below leaves the table untouched.

use sqlx::MySqlPool;
use tracing::{debug, warn};

use crate::error::{DbError, DbResult};
use stockroom_core::{NewProduct, StockAddition};

/// Relative stock increment. Binds: delta, id.
pub const ADD_STOCK_SQL: &str = "UPDATE produtos \
     SET quantidade_estoque_atual = quantidade_estoque_atual + ? \
     WHERE id_produto = ?";

/// New product row. The id is generated by the database.
/// Binds: name, category, quantity, price, supplier id.
pub const INSERT_PRODUCT_SQL: &str = "INSERT INTO produtos \
     (nome, categoria, quantidade_estoque_atual, preco_unitario, id_Fornecedor) \
     VALUES (?, ?, ?, ?, ?)";

/// Repository for product writes.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: MySqlPool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: MySqlPool) -> Self {
        ProductRepository { pool }
    }

    /// Adds `addition.quantity` units to a product's stock.
    ///
    /// ## Returns
    /// * `Ok(())` - Committed
    /// * `Err(DbError::NotFound)` - No product with that id; rolled back
    pub async fn add_stock(&self, addition: &StockAddition) -> DbResult<()> {
        debug!(
            id = addition.product_id,
            delta = addition.quantity,
            "Adding stock"
        );

        let mut tx = self.pool.begin().await.map_err(DbError::transaction)?;

        let result = sqlx::query(ADD_STOCK_SQL)
            .bind(addition.quantity)
            .bind(addition.product_id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await.map_err(DbError::transaction)?;
            warn!(id = addition.product_id, "Stock update matched no product");
            return Err(DbError::not_found(
                "Product",
                addition.product_id.to_string(),
            ));
        }

        tx.commit().await.map_err(DbError::transaction)?;
        Ok(())
    }

    /// Inserts a new product.
    ///
    /// ## Returns
    /// * `Ok(id)` - Committed; the id generated by the database
    /// * `Err(DbError::ForeignKeyViolation)` - Supplier doesn't exist
    pub async fn insert(&self, product: &NewProduct) -> DbResult<u64> {
        debug!(name = %product.name, supplier = product.supplier_id, "Inserting product");

        let mut tx = self.pool.begin().await.map_err(DbError::transaction)?;

        let result = sqlx::query(INSERT_PRODUCT_SQL)
            .bind(product.name.trim())
            .bind(product.category.trim())
            .bind(product.quantity)
            .bind(product.price)
            .bind(product.supplier_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await.map_err(DbError::transaction)?;
        Ok(result.last_insert_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_core::columns;

    #[test]
    fn test_add_stock_is_relative() {
        let assignment = format!("{0} = {0} + ?", columns::QUANTITY);
        assert!(ADD_STOCK_SQL.contains(&assignment));
        assert!(ADD_STOCK_SQL.contains(&format!("WHERE {} = ?", columns::ID)));
    }

    #[test]
    fn test_statements_are_parameterized() {
        assert_eq!(ADD_STOCK_SQL.matches('?').count(), 2);
        assert_eq!(INSERT_PRODUCT_SQL.matches('?').count(), 5);
        for column in [
            columns::NAME,
            columns::CATEGORY,
            columns::QUANTITY,
            columns::PRICE,
            columns::SUPPLIER_ID,
        ] {
            assert!(INSERT_PRODUCT_SQL.contains(column));
        }
    }
}
