//! Database layer for Newsroom
//!
//! Provides:
//! - SeaORM entity models and API views
//! - The `ArticleStore` query layer with SQL and in-memory backends
//! - Connection pool management
//! - Category aggregate flattening

pub mod aggregate;
mod memory;
pub mod models;
pub mod query;
mod repository;
mod store;

pub use memory::MemoryArticleStore;
pub use repository::SqlArticleStore;
pub use store::ArticleStore;

use crate::config::DatabaseConfig;
use crate::errors::{AppError, Result};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbBackend};
use tracing::info;

/// Database connection pool wrapper.
///
/// Built once at startup and handed to whoever needs it; nothing in the
/// crate reaches for a global pool.
#[derive(Clone)]
pub struct DbPool {
    conn: DatabaseConnection,
}

impl DbPool {
    /// Create a new database pool from configuration
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        info!(
            max_connections = config.max_connections,
            min_connections = config.min_connections,
            "Connecting to database..."
        );

        let mut opts = ConnectOptions::new(&config.url);
        opts
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .sqlx_logging(true);

        let conn = Database::connect(opts)
            .await
            .map_err(|e| AppError::DatabaseConnection {
                message: format!("Failed to connect: {}", e),
            })?;

        info!(backend = ?conn.get_database_backend(), "Database connection established");

        Ok(Self { conn })
    }

    /// Wrap an already opened connection
    pub fn from_connection(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Shared pooled connection
    pub fn connection(&self) -> &DatabaseConnection {
        &self.conn
    }

    /// Engine behind the pool
    pub fn backend(&self) -> DbBackend {
        self.conn.get_database_backend()
    }

    /// Ping the database to check connectivity
    pub async fn ping(&self) -> Result<()> {
        self.conn
            .execute_unprepared("SELECT 1")
            .await
            .map_err(|e| AppError::DatabaseConnection {
                message: format!("Ping failed: {}", e),
            })?;

        Ok(())
    }
}
