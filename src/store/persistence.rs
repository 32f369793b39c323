//! Persistence layer for the Document Store

use crate::error::StorageError;
use crate::store::{sort_recent, Document, DocumentStore};
use sled;
use std::path::Path;

/// Sled-based implementation of DocumentStore
///
/// Each collection maps to its own sled tree; document ids are the keys and
/// values are JSON-encoded documents.
pub struct SledDocumentStore {
    db: sled::Db,
}

impl SledDocumentStore {
    /// Create a new SledDocumentStore at the given path
    ///
    /// The path can be a directory (sled will create a database there) or
    /// a file path (sled will use it as the database file).
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let db = sled::open(path).map_err(|e| {
            StorageError::Unavailable(format!("Failed to open sled database: {}", e))
        })?;
        Ok(Self { db })
    }

    /// Wrap an already-open database.
    pub fn from_db(db: sled::Db) -> Self {
        Self { db }
    }

    /// Get the underlying sled database (for advanced operations)
    pub fn db(&self) -> &sled::Db {
        &self.db
    }

    fn tree(&self, collection: &str) -> Result<sled::Tree, StorageError> {
        self.db.open_tree(collection).map_err(|e| {
            StorageError::Unavailable(format!("Failed to open collection '{}': {}", collection, e))
        })
    }

    /// Number of documents in a collection.
    pub fn count(&self, collection: &str) -> Result<usize, StorageError> {
        Ok(self.tree(collection)?.len())
    }
}

impl DocumentStore for SledDocumentStore {
    fn get_document(&self, collection: &str, id: &str) -> Result<Option<Document>, StorageError> {
        let tree = self.tree(collection)?;
        match tree.get(id.as_bytes()).map_err(|e| {
            StorageError::Unavailable(format!("Failed to get document {}/{}: {}", collection, id, e))
        })? {
            Some(value) => {
                let document: Document = serde_json::from_slice(&value).map_err(|e| {
                    StorageError::Codec(format!(
                        "Failed to decode document {}/{}: {}",
                        collection, id, e
                    ))
                })?;
                Ok(Some(document))
            }
            None => Ok(None),
        }
    }

    fn put_document(
        &self,
        collection: &str,
        id: &str,
        document: &Document,
    ) -> Result<(), StorageError> {
        let tree = self.tree(collection)?;
        let value = serde_json::to_vec(document)?;
        tree.insert(id.as_bytes(), value).map_err(|e| {
            StorageError::Unavailable(format!("Failed to put document {}/{}: {}", collection, id, e))
        })?;
        Ok(())
    }

    fn query_recent(
        &self,
        collection: &str,
        order_field: &str,
        limit: usize,
    ) -> Result<Vec<(String, Document)>, StorageError> {
        let tree = self.tree(collection)?;
        let mut docs = Vec::new();
        for item in tree.iter() {
            let (key, value) = item.map_err(|e| {
                StorageError::Unavailable(format!("Failed to iterate collection '{}': {}", collection, e))
            })?;
            let id = String::from_utf8_lossy(&key).into_owned();
            let document: Document = serde_json::from_slice(&value).map_err(|e| {
                StorageError::Codec(format!("Failed to decode document {}/{}: {}", collection, id, e))
            })?;
            docs.push((id, document));
        }
        sort_recent(&mut docs, order_field);
        docs.truncate(limit);
        Ok(docs)
    }

    /// Flush all pending writes to disk
    fn flush(&self) -> Result<(), StorageError> {
        self.db.flush().map_err(|e| {
            StorageError::Unavailable(format!("Failed to flush database: {}", e))
        })?;
        Ok(())
    }
}
