use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use migration::MigratorTrait;
use models::{db::ConnectionManager, errors::ModelError, section};
use sea_orm::DatabaseConnection;
use serde_json::Value;
use tokio::sync::OnceCell;
use tracing::info;

use super::backend::{SectionBackend, SectionRecord};
use crate::errors::ServiceError;

/// SeaORM-backed section storage (PostgreSQL in production, SQLite in tests).
///
/// The schema is migrated on the first successful connection; a failed
/// migration is retried on the next call.
pub struct SeaOrmSectionBackend {
    connections: Arc<ConnectionManager>,
    schema: OnceCell<()>,
}

impl SeaOrmSectionBackend {
    pub fn new(connections: Arc<ConnectionManager>) -> Self {
        Self { connections, schema: OnceCell::new() }
    }

    async fn db(&self) -> Result<DatabaseConnection, ServiceError> {
        let db = self.observe(self.connections.get_connection().await).await?;
        let conn = &db;
        self.schema
            .get_or_try_init(|| async move {
                migration::Migrator::up(conn, None)
                    .await
                    .map_err(|e| ServiceError::Db(format!("section schema migration failed: {e}")))?;
                info!(db = %self.connections.target(), "section schema ready");
                Ok::<(), ServiceError>(())
            })
            .await?;
        Ok(db)
    }

    /// Reset the shared connection when an operation shows it is broken.
    async fn observe<T>(&self, res: Result<T, ModelError>) -> Result<T, ServiceError> {
        if let Err(e) = &res {
            if e.is_connection_failure() {
                self.connections.reset().await;
            }
        }
        res.map_err(ServiceError::from)
    }
}

fn to_record(m: section::Model) -> SectionRecord {
    SectionRecord { name: m.name, value: m.value, updated_at: Some(m.updated_at.with_timezone(&Utc)) }
}

#[async_trait]
impl SectionBackend for SeaOrmSectionBackend {
    async fn find(&self, name: &str) -> Result<Option<SectionRecord>, ServiceError> {
        let db = self.db().await?;
        let found = self.observe(section::find_by_name(&db, name).await).await?;
        Ok(found.map(to_record))
    }

    async fn upsert(&self, name: &str, value: &Value) -> Result<(), ServiceError> {
        let db = self.db().await?;
        self.observe(section::upsert(&db, name, value).await).await
    }

    async fn list(&self) -> Result<Vec<SectionRecord>, ServiceError> {
        let db = self.db().await?;
        let all = self.observe(section::list(&db).await).await?;
        Ok(all.into_iter().map(to_record).collect())
    }
}
