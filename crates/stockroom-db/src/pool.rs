//! # Database Pool Management
//!
//! Connection pool creation for MySQL.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Database Connection Pool                           │
//! │                                                                         │
//! │  Startup                                                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbConfig::from_env() ← DB_USER / DB_PASSWORD / DB_HOST / ...          │
//! │       │                  (missing value = ConfigError, no connection)  │
//! │       ▼                                                                 │
//! │  Database::connect(&config).await ← Opens the pool eagerly             │
//! │       │                              (unreachable = ConnectionFailed)  │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │             MySqlPool                    │  held for the whole      │
//! │  │  ┌─────┐ ┌─────┐ ┌─────┐ ┌─────┐       │  process lifetime         │
//! │  │  │Conn1│ │Conn2│ │Conn3│ │Conn4│       │                           │
//! │  │  └─────┘ └─────┘ └─────┘ └─────┘       │                           │
//! │  └─────────────────────────────────────────┘                           │
//! │       │                                                                 │
//! │       ├──► SnapshotRepository  (SELECT * FROM ...)                     │
//! │       └──► ProductRepository   (BEGIN; UPDATE/INSERT; COMMIT)          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::mysql::MySqlPoolOptions;
use sqlx::MySqlPool;
use tracing::{debug, info};

use crate::config::DbConfig;
use crate::error::{DbError, DbResult};
use crate::repository::product::ProductRepository;
use crate::repository::snapshot::SnapshotRepository;

/// Main database handle providing repository access.
///
/// Cloning is cheap: clones share the same pool.
#[derive(Debug, Clone)]
pub struct Database {
    /// The MySQL connection pool.
    pool: MySqlPool,
}

impl Database {
    /// Opens the connection pool.
    ///
    /// ## What This Does
    /// 1. Builds driver options from the individual config fields
    /// 2. Creates the pool and opens the first connection right away, so a
    ///    bad host or bad credentials fail here rather than on first use
    ///
    /// ## Returns
    /// * `Ok(Database)` - Ready-to-use database handle
    /// * `Err(DbError::ConnectionFailed)` - Database unreachable or refused login
    pub async fn connect(config: &DbConfig) -> DbResult<Self> {
        info!(
            host = %config.host,
            port = config.port,
            database = %config.database,
            "Connecting to inventory database"
        );

        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.connect_timeout)
            .connect_with(config.connect_options())
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        info!(
            max_connections = config.max_connections,
            "Database pool created"
        );

        Ok(Database { pool })
    }

    /// Wraps an existing pool.
    pub fn from_pool(pool: MySqlPool) -> Self {
        Database { pool }
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    /// Returns the snapshot (full-table read) repository.
    pub fn snapshots(&self) -> SnapshotRepository {
        SnapshotRepository::new(self.pool.clone())
    }

    /// Returns the product write repository.
    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.pool.clone())
    }

    /// Closes the database connection pool.
    ///
    /// After calling close, all repository operations will fail.
    pub async fn close(&self) {
        info!("Closing database connection pool");
        self.pool.close().await;
    }

    /// Checks if the database is healthy (can execute queries).
    pub async fn health_check(&self) -> bool {
        let ok = sqlx::query("SELECT 1").execute(&self.pool).await.is_ok();
        debug!(ok, "Health check");
        ok
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_unreachable_database_fails_to_connect() {
        // Port 1 on loopback is never a MySQL server.
        let config = DbConfig::new("127.0.0.1", 1, "user", "pass", "estoque")
            .connect_timeout(Duration::from_millis(500));

        let result = Database::connect(&config).await;
        assert!(matches!(result, Err(DbError::ConnectionFailed(_))));
    }

    #[tokio::test]
    async fn test_lazy_pool_health_check_fails_without_server() {
        let config = DbConfig::new("127.0.0.1", 1, "user", "pass", "estoque");
        let pool = MySqlPoolOptions::new()
            .acquire_timeout(Duration::from_millis(500))
            .connect_lazy_with(config.connect_options());

        let db = Database::from_pool(pool);
        assert!(!db.health_check().await);
    }
}
