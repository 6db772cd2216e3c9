use std::{path::PathBuf, sync::Arc};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::backend::{SectionBackend, SectionRecord};
use crate::{errors::ServiceError, storage::json_map_store::JsonMapStore};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredSection {
    #[serde(default)]
    value: Option<Value>,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
}

/// Section storage in a single JSON file, for running without a database.
pub struct JsonFileSectionBackend {
    store: Arc<JsonMapStore<String, StoredSection>>,
}

impl JsonFileSectionBackend {
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Self, ServiceError> {
        let store = JsonMapStore::open(path).await?;
        Ok(Self { store })
    }

    pub fn path(&self) -> &std::path::Path {
        self.store.path()
    }
}

fn to_record(name: String, stored: StoredSection) -> SectionRecord {
    SectionRecord { name, value: stored.value, updated_at: stored.updated_at }
}

#[async_trait]
impl SectionBackend for JsonFileSectionBackend {
    async fn find(&self, name: &str) -> Result<Option<SectionRecord>, ServiceError> {
        Ok(self.store.get(&name.to_string()).await.map(|s| to_record(name.to_string(), s)))
    }

    async fn upsert(&self, name: &str, value: &Value) -> Result<(), ServiceError> {
        models::section::validate_name(name)?;
        let stored = StoredSection { value: Some(value.clone()), updated_at: Some(Utc::now()) };
        self.store.insert(name.to_string(), stored).await
    }

    async fn list(&self) -> Result<Vec<SectionRecord>, ServiceError> {
        Ok(self.store.list().await.into_iter().map(|(n, s)| to_record(n, s)).collect())
    }
}
