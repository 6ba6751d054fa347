//! # Repository Module
//!
//! Database repository implementations for Stockroom.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  Inventory service                                                     │
//! │       │                                                                 │
//! │       ├── db.snapshots().load(TableName::Products)                     │
//! │       │       SnapshotRepository                                       │
//! │       │       └── load(&self, table)          SELECT * FROM `...`     │
//! │       │                                                                 │
//! │       └── db.products().add_stock(&addition)                           │
//! │               ProductRepository                                        │
//! │               ├── add_stock(&self, addition)   UPDATE ... + ?          │
//! │               └── insert(&self, product)       INSERT ... VALUES (?..) │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  MySQL                                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`SnapshotRepository`](snapshot::SnapshotRepository) - Full-table reads
//! - [`ProductRepository`](product::ProductRepository) - Stock additions and registrations

pub mod product;
pub mod snapshot;
