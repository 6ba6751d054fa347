//! # stockroom-db: Database Layer for Stockroom
//!
//! MySQL access, snapshot caching and the inventory service the front-end
//! calls.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stockroom Data Flow                              │
//! │                                                                         │
//! │  CLI command (add-stock 7 3)                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   stockroom-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Inventory   │    │ SnapshotCache │    │   Database   │  │   │
//! │  │   │ (service.rs)  │───►│  (cache.rs)   │    │  (pool.rs)   │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ validate      │    │ produtos      │    │ MySqlPool    │  │   │
//! │  │   │ write         │───────────────────────►│ Repositories │  │   │
//! │  │   │ refresh       │    │ Movimentacao  │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     MySQL (DB_HOST:DB_PORT/DB_NAME)             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`config`] - `DB_*` environment configuration
//! - [`pool`] - Connection pool creation
//! - [`repository`] - Snapshot reads and product writes
//! - [`store`] - The persistence seam the service talks to
//! - [`cache`] - In-memory table snapshots
//! - [`service`] - Validated queries and writes
//! - [`error`] - Database error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stockroom_db::{DbConfig, Inventory};
//! use stockroom_core::StockAddition;
//!
//! let config = DbConfig::from_env()?;
//! let mut inventory = Inventory::connect(&config).await?;
//!
//! let hits = inventory.find_by_name("hammer")?;
//! inventory.add_stock(StockAddition::parse("7", "3")?).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cache;
pub mod config;
pub mod error;
pub mod pool;
pub mod repository;
pub mod service;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use cache::SnapshotCache;
pub use config::{ConfigError, DbConfig};
pub use error::{DbError, DbResult};
pub use pool::Database;
pub use service::{Inventory, InventoryError, InventoryResult, ProductRegistered, StockAdded};
pub use store::InventoryStore;

// Repository re-exports for convenience
pub use repository::product::ProductRepository;
pub use repository::snapshot::SnapshotRepository;
