//! # Domain Types
//!
//! Core domain types used throughout Stockroom.
//!
//! ## Tables
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Persistent Store                                │
//! │                                                                         │
//! │  ┌──────────────────────┐   ┌─────────────────┐   ┌─────────────────┐  │
//! │  │      produtos        │   │  Fornecedores   │   │  Movimentacao   │  │
//! │  │  ──────────────────  │   │  ─────────────  │   │  ─────────────  │  │
//! │  │  id_produto (PK)     │◄──┤  (read-only)    │   │  (read-only,    │  │
//! │  │  nome                │   │                 │   │   external      │  │
//! │  │  categoria           │   └─────────────────┘   │   writers)      │  │
//! │  │  quantidade_estoque_ │                         └─────────────────┘  │
//! │  │  preco_unitario      │                                               │
//! │  │  id_Fornecedor (FK)  │                                               │
//! │  └──────────────────────┘                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Only `produtos` is ever written by this system.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::snapshot::Row;

/// Column names of the `produtos` table.
pub mod columns {
    pub const ID: &str = "id_produto";
    pub const NAME: &str = "nome";
    pub const CATEGORY: &str = "categoria";
    pub const QUANTITY: &str = "quantidade_estoque_atual";
    pub const PRICE: &str = "preco_unitario";
    pub const SUPPLIER_ID: &str = "id_Fornecedor";
}

// =============================================================================
// Table Name
// =============================================================================

/// The three tables Stockroom knows about.
///
/// SQL identifiers can't be bound as parameters, so every statement that
/// names a table takes it from this closed set instead of from user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableName {
    Products,
    Suppliers,
    Movements,
}

impl TableName {
    /// All tables, in startup load order.
    pub const ALL: [TableName; 3] = [
        TableName::Products,
        TableName::Suppliers,
        TableName::Movements,
    ];

    /// Exact table name in the database.
    pub const fn as_str(&self) -> &'static str {
        match self {
            TableName::Products => "produtos",
            TableName::Suppliers => "Fornecedores",
            TableName::Movements => "Movimentacao",
        }
    }

    /// Base file name used when the table is exported.
    pub const fn export_name(&self) -> &'static str {
        match self {
            TableName::Products => "produtos",
            TableName::Suppliers => "fornecedores",
            TableName::Movements => "movimentacoes",
        }
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts the database name, the export name, or the English name,
/// case-insensitively.
impl FromStr for TableName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "produtos" | "products" => Ok(TableName::Products),
            "fornecedores" | "suppliers" => Ok(TableName::Suppliers),
            "movimentacao" | "movimentacoes" | "movements" => Ok(TableName::Movements),
            other => Err(format!("unknown table: {other}")),
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product as read from the `produtos` snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    /// `id_produto`
    pub id: i64,

    /// `nome`. May be NULL in the store.
    pub name: Option<String>,

    /// `categoria`
    pub category: Option<String>,

    /// `quantidade_estoque_atual`. NULL reads as zero.
    pub quantity: i64,

    /// `preco_unitario`. NULL reads as zero.
    pub price: Decimal,

    /// `id_Fornecedor`
    pub supplier_id: Option<i64>,
}

impl Product {
    /// Builds a product from a snapshot row.
    ///
    /// Returns `None` when the row has no integer `id_produto`; such a row
    /// can't be addressed by any operation.
    pub fn from_row(row: &Row<'_>) -> Option<Product> {
        let id = row.get(columns::ID)?.as_i64()?;

        let text = |column: &str| {
            row.get(column)
                .and_then(|v| v.as_str())
                .map(str::to_string)
        };

        Some(Product {
            id,
            name: text(columns::NAME),
            category: text(columns::CATEGORY),
            quantity: row
                .get(columns::QUANTITY)
                .and_then(|v| v.as_i64())
                .unwrap_or(0),
            price: row
                .get(columns::PRICE)
                .and_then(|v| v.as_decimal())
                .unwrap_or(Decimal::ZERO),
            supplier_id: row.get(columns::SUPPLIER_ID).and_then(|v| v.as_i64()),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{Table, Value};

    fn products_table() -> Table {
        Table::new(
            "produtos",
            vec![
                columns::ID.to_string(),
                columns::NAME.to_string(),
                columns::CATEGORY.to_string(),
                columns::QUANTITY.to_string(),
                columns::PRICE.to_string(),
                columns::SUPPLIER_ID.to_string(),
            ],
        )
    }

    #[test]
    fn test_table_name_round_trip() {
        for table in TableName::ALL {
            assert_eq!(table.as_str().parse::<TableName>().unwrap(), table);
            assert_eq!(table.export_name().parse::<TableName>().unwrap(), table);
        }
        assert!("clientes".parse::<TableName>().is_err());
    }

    #[test]
    fn test_product_from_row() {
        let mut table = products_table();
        table.push_row(vec![
            Value::Integer(4),
            Value::from("Drill"),
            Value::from("Tools"),
            Value::Integer(9),
            Value::Decimal(Decimal::new(1999, 2)),
            Value::Integer(2),
        ]);

        let product = Product::from_row(&table.rows().next().unwrap()).unwrap();
        assert_eq!(product.id, 4);
        assert_eq!(product.name.as_deref(), Some("Drill"));
        assert_eq!(product.quantity, 9);
        assert_eq!(product.price, Decimal::new(1999, 2));
        assert_eq!(product.supplier_id, Some(2));
    }

    #[test]
    fn test_product_from_row_without_id() {
        let mut table = products_table();
        table.push_row(vec![Value::Null, Value::from("Ghost")]);

        assert!(Product::from_row(&table.rows().next().unwrap()).is_none());
    }

    #[test]
    fn test_null_stock_reads_as_zero() {
        let mut table = products_table();
        table.push_row(vec![Value::Integer(1), Value::Null]);

        let product = Product::from_row(&table.rows().next().unwrap()).unwrap();
        assert_eq!(product.quantity, 0);
        assert_eq!(product.price, Decimal::ZERO);
        assert!(product.name.is_none());
    }
}
