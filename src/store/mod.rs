//! Document Store
//!
//! Storage port for persisted configuration documents. Documents are JSON objects
//! addressed by `(collection, id)`; the core never owns persistence, it only reads
//! and writes through this interface.

pub mod memory;
pub mod persistence;

pub use memory::MemoryDocumentStore;
pub use persistence::SledDocumentStore;

use crate::error::StorageError;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::cmp::Ordering;

/// A stored document: a JSON object.
pub type Document = serde_json::Map<String, Value>;

/// Document Store interface
pub trait DocumentStore: Send + Sync {
    fn get_document(&self, collection: &str, id: &str) -> Result<Option<Document>, StorageError>;

    /// Create or overwrite the document at `(collection, id)`.
    fn put_document(&self, collection: &str, id: &str, document: &Document)
        -> Result<(), StorageError>;

    /// Documents in `collection` ordered by `order_field` descending, at most `limit`.
    ///
    /// Documents without `order_field` sort after every document that has it.
    fn query_recent(
        &self,
        collection: &str,
        order_field: &str,
        limit: usize,
    ) -> Result<Vec<(String, Document)>, StorageError>;

    /// Make preceding writes durable. No-op for stores without buffering.
    fn flush(&self) -> Result<(), StorageError> {
        Ok(())
    }
}

/// Serialize a record into a document. Fails if the record is not a JSON object.
pub fn to_document<T: Serialize>(record: &T) -> Result<Document, StorageError> {
    match serde_json::to_value(record)? {
        Value::Object(map) => Ok(map),
        other => Err(StorageError::Codec(format!(
            "Expected a JSON object, got {}",
            other
        ))),
    }
}

/// Deserialize a document into a typed record.
pub fn from_document<T: DeserializeOwned>(document: Document) -> Result<T, StorageError> {
    Ok(serde_json::from_value(Value::Object(document))?)
}

/// Sort key for `query_recent`: timestamps compare chronologically, numbers numerically,
/// anything else by its string form.
#[derive(Debug, PartialEq)]
enum OrderKey {
    Time(DateTime<Utc>),
    Number(f64),
    Text(String),
}

impl OrderKey {
    fn of(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(
                DateTime::parse_from_rfc3339(s)
                    .map(|t| OrderKey::Time(t.with_timezone(&Utc)))
                    .unwrap_or_else(|_| OrderKey::Text(s.clone())),
            ),
            Value::Number(n) => n.as_f64().map(OrderKey::Number),
            Value::Null => None,
            other => Some(OrderKey::Text(other.to_string())),
        }
    }

    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (OrderKey::Time(a), OrderKey::Time(b)) => a.cmp(b),
            (OrderKey::Number(a), OrderKey::Number(b)) => {
                a.partial_cmp(b).unwrap_or(Ordering::Equal)
            }
            (OrderKey::Text(a), OrderKey::Text(b)) => a.cmp(b),
            (a, b) => a.rank().cmp(&b.rank()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            OrderKey::Text(_) => 0,
            OrderKey::Number(_) => 1,
            OrderKey::Time(_) => 2,
        }
    }
}

/// Shared ordering used by every store implementation.
pub(crate) fn sort_recent(docs: &mut [(String, Document)], order_field: &str) {
    docs.sort_by(|(id_a, a), (id_b, b)| {
        let key_a = a.get(order_field).and_then(OrderKey::of);
        let key_b = b.get(order_field).and_then(OrderKey::of);
        let by_key = match (key_a, key_b) {
            (Some(ka), Some(kb)) => kb.compare(&ka),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        by_key.then_with(|| id_b.cmp(id_a))
    });
}
