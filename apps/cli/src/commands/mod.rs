//! # Commands Module
//!
//! Every subcommand the `stockroom` binary accepts.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (Command enum + dispatch)
//! ├── stock.rs    ◄─── stock, suppliers, movements
//! ├── product.rs  ◄─── search, add-stock, register
//! └── export.rs   ◄─── export <table> <format>
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  $ stockroom add-stock 7 3                                              │
//! │         │                                                               │
//! │         │ (clap)                                                        │
//! │         ▼                                                               │
//! │  Command::AddStock { id: "7", quantity: "3" }                          │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  product::add_stock(&mut inventory, "7", "3", json)                     │
//! │      StockAddition::parse ──► Inventory::add_stock ──► render           │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  String printed to stdout                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Raw numeric arguments stay strings until the core parses them, so a
//! typo becomes a validation error rather than a clap usage error.

pub mod export;
pub mod product;
pub mod stock;

use std::path::PathBuf;

use clap::Subcommand;
use stockroom_core::{ProductForm, TableName};
use stockroom_db::{Inventory, InventoryStore};

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the current product stock
    Stock,

    /// Show supplier information
    Suppliers,

    /// Show stock movements
    Movements,

    /// Search products by name (partial, case-insensitive) or exact id
    #[command(group = clap::ArgGroup::new("by").required(true))]
    Search {
        #[arg(long, group = "by")]
        name: Option<String>,

        #[arg(long, group = "by")]
        id: Option<String>,
    },

    /// Add units to an existing product's stock
    AddStock {
        /// Product id
        id: String,

        /// Units to add (greater than zero)
        quantity: String,
    },

    /// Register a new product
    Register {
        #[arg(long)]
        name: String,

        #[arg(long)]
        category: String,

        /// Initial stock
        #[arg(long)]
        quantity: String,

        /// Unit price, e.g. 10.50 or 10,50
        #[arg(long)]
        price: String,

        /// Supplier id (must exist in Fornecedores)
        #[arg(long)]
        supplier: String,
    },

    /// Export a table to csv or xlsx
    Export {
        /// produtos, movimentacoes or fornecedores
        table: String,

        /// csv or xlsx
        format: String,

        /// Output directory
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
}

/// Runs `command` and returns the text to print.
pub async fn execute<S: InventoryStore>(
    inventory: &mut Inventory<S>,
    command: Command,
    json: bool,
) -> anyhow::Result<String> {
    match command {
        Command::Stock => stock::show(inventory, TableName::Products, json),
        Command::Suppliers => stock::show(inventory, TableName::Suppliers, json),
        Command::Movements => stock::show(inventory, TableName::Movements, json),
        Command::Search { name, id } => product::search(inventory, name, id, json),
        Command::AddStock { id, quantity } => {
            product::add_stock(inventory, &id, &quantity, json).await
        }
        Command::Register {
            name,
            category,
            quantity,
            price,
            supplier,
        } => {
            let form = ProductForm {
                name,
                category,
                quantity,
                price,
                supplier_id: supplier,
            };
            product::register(inventory, form, json).await
        }
        Command::Export { table, format, dir } => {
            export::export(inventory, &table, &format, &dir)
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::FixedStore;
    use super::*;

    #[tokio::test]
    async fn test_dispatch_stock_and_register() {
        let mut inventory = Inventory::open(FixedStore::new(&[(1, "Hammer", 3)]))
            .await
            .unwrap();

        let out = execute(&mut inventory, Command::Stock, false).await.unwrap();
        assert!(out.contains("Hammer"));

        let out = execute(
            &mut inventory,
            Command::Register {
                name: "Widget".into(),
                category: "Tools".into(),
                quantity: "5".into(),
                price: "10".into(),
                supplier: "1".into(),
            },
            false,
        )
        .await
        .unwrap();
        assert!(out.contains("Widget"));

        let out = execute(
            &mut inventory,
            Command::Search {
                name: Some("widget".into()),
                id: None,
            },
            false,
        )
        .await
        .unwrap();
        assert!(out.contains("Widget"));
    }

    #[tokio::test]
    async fn test_empty_movements_message() {
        let mut inventory = Inventory::open(FixedStore::new(&[])).await.unwrap();

        let out = execute(&mut inventory, Command::Movements, false)
            .await
            .unwrap();
        assert_eq!(out, crate::render::NO_DATA);
    }
}
