//! In-memory Document Store with failure injection.

use crate::error::StorageError;
use crate::store::{sort_recent, Document, DocumentStore};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

/// In-memory implementation of DocumentStore.
///
/// Reads and writes can be made to fail, and reads can be delayed, so callers can
/// exercise degraded paths without a real outage.
#[derive(Default)]
pub struct MemoryDocumentStore {
    collections: Mutex<BTreeMap<String, BTreeMap<String, Document>>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    read_delay: Mutex<Option<Duration>>,
    writes: AtomicUsize,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Every read sleeps for `delay` before answering.
    pub fn set_read_delay(&self, delay: Option<Duration>) {
        *self.read_delay.lock() = delay;
    }

    /// Number of successful `put_document` calls.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Ids present in a collection, in key order.
    pub fn ids(&self, collection: &str) -> Vec<String> {
        self.collections
            .lock()
            .get(collection)
            .map(|docs| docs.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn before_read(&self) -> Result<(), StorageError> {
        let delay = *self.read_delay.lock();
        if let Some(delay) = delay {
            std::thread::sleep(delay);
        }
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("read failure injected".to_string()));
        }
        Ok(())
    }
}

impl DocumentStore for MemoryDocumentStore {
    fn get_document(&self, collection: &str, id: &str) -> Result<Option<Document>, StorageError> {
        self.before_read()?;
        Ok(self
            .collections
            .lock()
            .get(collection)
            .and_then(|docs| docs.get(id))
            .cloned())
    }

    fn put_document(
        &self,
        collection: &str,
        id: &str,
        document: &Document,
    ) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("write failure injected".to_string()));
        }
        self.collections
            .lock()
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), document.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn query_recent(
        &self,
        collection: &str,
        order_field: &str,
        limit: usize,
    ) -> Result<Vec<(String, Document)>, StorageError> {
        self.before_read()?;
        let mut docs: Vec<(String, Document)> = self
            .collections
            .lock()
            .get(collection)
            .map(|docs| docs.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
            .unwrap_or_default();
        sort_recent(&mut docs, order_field);
        docs.truncate(limit);
        Ok(docs)
    }
}
