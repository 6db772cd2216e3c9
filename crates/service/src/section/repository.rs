use std::{sync::Arc, time::Duration};

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, info, instrument, warn};

use super::{
    backend::{SectionBackend, SectionRecord},
    schema::SectionDocument,
};
use crate::{cache::TtlCache, errors::ServiceError};

/// How a read may use the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadOptions {
    /// Skip the cached value and query the backend (the result is still cached).
    pub force_refresh: bool,
    /// Consult and populate the cache at all.
    pub use_cache: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self { force_refresh: false, use_cache: true }
    }
}

impl ReadOptions {
    pub fn fresh() -> Self {
        Self { force_refresh: true, use_cache: true }
    }

    pub fn uncached() -> Self {
        Self { force_refresh: false, use_cache: false }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionSummary {
    pub name: String,
    pub has_value: bool,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Cache-then-fetch access to section documents.
///
/// Constructed once at startup and shared by handlers. Writes replace the
/// whole document; with no locking between requests the last writer wins.
pub struct SectionRepository {
    backend: Arc<dyn SectionBackend>,
    cache: TtlCache<Value>,
}

impl SectionRepository {
    pub fn new(backend: Arc<dyn SectionBackend>, ttl: Duration) -> Self {
        Self { backend, cache: TtlCache::new(ttl) }
    }

    #[instrument(skip(self), fields(section = %name))]
    pub async fn read(&self, name: &str, opts: ReadOptions) -> Result<Option<Value>, ServiceError> {
        if opts.use_cache && !opts.force_refresh {
            if let Some(v) = self.cache.get(name) {
                debug!("section cache hit");
                return Ok(Some(v));
            }
            debug!("section cache miss");
        }

        // taken before the backend read so a write landing meanwhile wins
        let seen = self.cache.generation(name);
        let record = self.backend.find(name).await.map_err(|e| {
            error!(op = "read", error = %e, "section read failed");
            e
        })?;

        match record {
            None => Ok(None),
            Some(SectionRecord { value: None, .. }) => {
                warn!("section document has no value; treating as absent");
                Ok(None)
            }
            Some(SectionRecord { value: Some(v), .. }) => {
                if opts.use_cache && !self.cache.set_if_current(name, v.clone(), seen) {
                    debug!("section changed during read; result not cached");
                }
                Ok(Some(v))
            }
        }
    }

    /// Create or fully replace the document for `name`.
    ///
    /// Returns `false` when the backend write fails; the cause is logged.
    pub async fn upsert(&self, name: &str, value: Value) -> bool {
        match self.write(name, value).await {
            Ok(()) => true,
            Err(e) => {
                error!(section = %name, op = "upsert", error = %e, "section write failed");
                false
            }
        }
    }

    /// Existing document for `name`, or `fallback` after persisting it.
    #[instrument(skip(self, fallback), fields(section = %name))]
    pub async fn read_or_create(&self, name: &str, fallback: Value) -> Result<Value, ServiceError> {
        if let Some(v) = self.read(name, ReadOptions::default()).await? {
            return Ok(v);
        }
        info!("section missing; persisting fallback document");
        self.write(name, fallback.clone()).await.map_err(|e| {
            error!(op = "read_or_create", error = %e, "persisting fallback failed");
            e
        })?;
        Ok(fallback)
    }

    pub async fn list(&self) -> Result<Vec<SectionSummary>, ServiceError> {
        let records = self.backend.list().await.map_err(|e| {
            error!(op = "list", error = %e, "section list failed");
            e
        })?;
        Ok(records
            .into_iter()
            .map(|r| SectionSummary { has_value: r.value.is_some(), name: r.name, updated_at: r.updated_at })
            .collect())
    }

    /// Drop one cached section, or all of them.
    pub fn invalidate(&self, name: Option<&str>) {
        self.cache.invalidate(name);
    }

    /// Typed read of the section bound to `T`.
    pub async fn load<T: SectionDocument>(&self) -> Result<Option<T>, ServiceError> {
        self.read(T::NAME.as_str(), ReadOptions::default())
            .await?
            .map(|v| serde_json::from_value(v).map_err(ServiceError::from))
            .transpose()
    }

    /// Typed write of the section bound to `T`.
    pub async fn save<T: SectionDocument>(&self, doc: &T) -> bool {
        match serde_json::to_value(doc) {
            Ok(v) => self.upsert(T::NAME.as_str(), v).await,
            Err(e) => {
                let name = T::NAME;
                error!(section = %name, op = "save", error = %e, "section serialization failed");
                false
            }
        }
    }

    async fn write(&self, name: &str, value: Value) -> Result<(), ServiceError> {
        match self.backend.upsert(name, &value).await {
            Ok(()) => {
                self.cache.set_default(name, value);
                Ok(())
            }
            Err(e) => {
                // the stored value is now unknown
                self.cache.invalidate(Some(name));
                Err(e)
            }
        }
    }
}
