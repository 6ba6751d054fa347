//! # stockroom-core: Pure Inventory Logic for Stockroom
//!
//! Everything in this crate is deterministic and free of I/O: the snapshot
//! table model, product lookups over a snapshot, and validation of user input
//! before it is allowed anywhere near the database.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stockroom Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Front-end (apps/cli)                         │   │
//! │  │     stock ─► search ─► add-stock ─► register ─► export          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               stockroom-db: Inventory service                   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ stockroom-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  snapshot │  │   types   │  │   query   │  │ validation│  │   │
//! │  │   │   Table   │  │  Product  │  │ find_by_* │  │  forms    │  │   │
//! │  │   │   Value   │  │ TableName │  │           │  │  ranges   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`snapshot`] - In-memory table copies (`Table`, `Row`, `Value`)
//! - [`types`] - Domain types (`Product`, `TableName`)
//! - [`query`] - Lookups over the product snapshot
//! - [`validation`] - Form parsing and field rules
//! - [`error`] - `ValidationError`
//!
//! ## Example Usage
//!
//! ```rust
//! use stockroom_core::{query, Table, Value};
//!
//! let mut products = Table::new(
//!     "produtos",
//!     vec!["id_produto".into(), "nome".into()],
//! );
//! products.push_row(vec![Value::Integer(1), Value::from("Claw Hammer")]);
//!
//! let hits = query::find_by_name(&products, "hammer").unwrap();
//! assert_eq!(hits[0].id, 1);
//! ```

pub mod error;
pub mod query;
pub mod snapshot;
pub mod types;
pub mod validation;

pub use error::ValidationError;
pub use snapshot::{Row, Table, Value};
pub use types::{columns, Product, TableName};
pub use validation::{NewProduct, ProductForm, StockAddition, ValidationResult};
