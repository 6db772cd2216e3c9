#![cfg(test)]
use std::{
    collections::BTreeMap,
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Mutex,
    },
};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Notify;

use crate::errors::ServiceError;
use crate::section::backend::{SectionBackend, SectionRecord};

/// In-memory backend that counts calls, for cache behaviour tests.
#[derive(Default)]
pub struct MemoryBackend {
    docs: Mutex<BTreeMap<String, Option<Value>>>,
    finds: AtomicUsize,
    upserts: AtomicUsize,
}

impl MemoryBackend {
    /// Store a document directly, bypassing the counters.
    pub fn seed(&self, name: &str, value: Option<Value>) {
        self.docs.lock().unwrap().insert(name.to_string(), value);
    }

    pub fn stored(&self, name: &str) -> Option<Value> {
        self.docs.lock().unwrap().get(name).cloned().flatten()
    }

    pub fn finds(&self) -> usize {
        self.finds.load(Ordering::SeqCst)
    }

    pub fn upserts(&self) -> usize {
        self.upserts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SectionBackend for MemoryBackend {
    async fn find(&self, name: &str) -> Result<Option<SectionRecord>, ServiceError> {
        self.finds.fetch_add(1, Ordering::SeqCst);
        let docs = self.docs.lock().unwrap();
        Ok(docs.get(name).map(|v| SectionRecord { name: name.to_string(), value: v.clone(), updated_at: None }))
    }

    async fn upsert(&self, name: &str, value: &Value) -> Result<(), ServiceError> {
        self.upserts.fetch_add(1, Ordering::SeqCst);
        self.docs.lock().unwrap().insert(name.to_string(), Some(value.clone()));
        Ok(())
    }

    async fn list(&self) -> Result<Vec<SectionRecord>, ServiceError> {
        let docs = self.docs.lock().unwrap();
        Ok(docs
            .iter()
            .map(|(n, v)| SectionRecord { name: n.clone(), value: v.clone(), updated_at: None })
            .collect())
    }
}

/// Backend whose reads and writes can be switched to fail.
pub struct FailingBackend {
    value: Option<Value>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl FailingBackend {
    pub fn new(value: Option<Value>) -> Self {
        Self { value, fail_reads: AtomicBool::new(false), fail_writes: AtomicBool::new(false) }
    }

    pub fn fail_reads(&self) {
        self.fail_reads.store(true, Ordering::SeqCst);
    }

    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl SectionBackend for FailingBackend {
    async fn find(&self, name: &str) -> Result<Option<SectionRecord>, ServiceError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(ServiceError::Db("read refused".into()));
        }
        Ok(self.value.clone().map(|v| SectionRecord { name: name.to_string(), value: Some(v), updated_at: None }))
    }

    async fn upsert(&self, _name: &str, _value: &Value) -> Result<(), ServiceError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(ServiceError::Db("write refused".into()));
        }
        Ok(())
    }

    async fn list(&self) -> Result<Vec<SectionRecord>, ServiceError> {
        Err(ServiceError::Db("list refused".into()))
    }
}

/// Backend whose first `find` snapshots the document and then waits on `release`,
/// so a test can run a write while that read is in flight.
pub struct GatedBackend {
    value: Mutex<Value>,
    gated: AtomicBool,
    /// Signalled once the gated read holds its snapshot.
    pub entered: Notify,
    pub release: Notify,
}

impl GatedBackend {
    pub fn new(value: Value) -> Self {
        Self { value: Mutex::new(value), gated: AtomicBool::new(true), entered: Notify::new(), release: Notify::new() }
    }

    pub fn stored(&self) -> Value {
        self.value.lock().unwrap().clone()
    }
}

#[async_trait]
impl SectionBackend for GatedBackend {
    async fn find(&self, name: &str) -> Result<Option<SectionRecord>, ServiceError> {
        let snapshot = self.stored();
        if self.gated.swap(false, Ordering::SeqCst) {
            self.entered.notify_one();
            self.release.notified().await;
        }
        Ok(Some(SectionRecord { name: name.to_string(), value: Some(snapshot), updated_at: None }))
    }

    async fn upsert(&self, _name: &str, value: &Value) -> Result<(), ServiceError> {
        *self.value.lock().unwrap() = value.clone();
        Ok(())
    }

    async fn list(&self) -> Result<Vec<SectionRecord>, ServiceError> {
        Ok(Vec::new())
    }
}
