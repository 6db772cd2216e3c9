use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::errors::ServiceError;

/// One stored section document as the backend sees it.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionRecord {
    pub name: String,
    /// `None` when a document exists but carries no value.
    pub value: Option<Value>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Persistence for section documents, keyed by unique name.
/// Implementations can be SQL-backed, file-backed, or in-memory.
#[async_trait]
pub trait SectionBackend: Send + Sync {
    async fn find(&self, name: &str) -> Result<Option<SectionRecord>, ServiceError>;
    /// Create the document for `name` or replace its value wholesale.
    async fn upsert(&self, name: &str, value: &Value) -> Result<(), ServiceError>;
    async fn list(&self) -> Result<Vec<SectionRecord>, ServiceError>;
}
