use std::time::Duration;

use configs::DatabaseConfig;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::errors::ModelError;

/// Open a pooled connection using the pool settings from `cfg`.
pub async fn connect_with_config(cfg: &DatabaseConfig) -> Result<DatabaseConnection, ModelError> {
    let mut opts = ConnectOptions::new(cfg.connection_url());
    opts.max_connections(cfg.max_connections)
        .min_connections(cfg.min_connections)
        .connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
        .acquire_timeout(Duration::from_secs(cfg.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(cfg.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(cfg.max_lifetime_secs))
        .sqlx_logging(cfg.sqlx_logging);

    Database::connect(opts).await.map_err(|e| ModelError::Connection {
        target: cfg.redacted_target(),
        message: e.to_string(),
    })
}

/// Lazily established, process-wide database handle.
///
/// The first `get_connection` call connects; later calls share the same pool.
/// A failed attempt memoizes nothing, so the next call tries again, and
/// `reset` discards a handle that has been seen failing.
pub struct ConnectionManager {
    config: DatabaseConfig,
    conn: Mutex<Option<DatabaseConnection>>,
}

impl ConnectionManager {
    pub fn new(config: DatabaseConfig) -> Self {
        Self { config, conn: Mutex::new(None) }
    }

    /// Connection target without credentials.
    pub fn target(&self) -> String {
        self.config.redacted_target()
    }

    pub async fn get_connection(&self) -> Result<DatabaseConnection, ModelError> {
        let mut guard = self.conn.lock().await;
        if let Some(db) = guard.as_ref() {
            return Ok(db.clone());
        }

        let db_target = self.target();
        match connect_with_config(&self.config).await {
            Ok(db) => {
                info!(db = %db_target, "database connection established");
                *guard = Some(db.clone());
                Ok(db)
            }
            Err(e) => {
                warn!(db = %db_target, error = %e, "database connection failed; will retry on next use");
                Err(e)
            }
        }
    }

    /// Drop the memoized handle so the next `get_connection` reconnects.
    pub async fn reset(&self) {
        if self.conn.lock().await.take().is_some() {
            warn!(db = %self.target(), "discarding database connection");
        }
    }

    pub async fn is_connected(&self) -> bool {
        self.conn.lock().await.is_some()
    }
}
