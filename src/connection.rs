//! Connection configuration: credentials needed to reach the backing store.
//!
//! The active record is loaded from the document store, falling back to
//! environment-sourced defaults; admin saves are validated, stamped, and
//! snapshotted into a per-day history entry.

pub mod fallback;
pub mod handle;
pub mod model;
pub mod service;
pub mod validate;

pub use fallback::{env_var_name, DEFAULT_ENV_PREFIX, SYSTEM_ACTOR};
pub use handle::{ConnectionHandle, HandleState};
pub use model::{ConnectionConfiguration, ConnectionFields, PublicConnectionConfig};
pub use service::ConnectionConfigService;
pub use validate::{validate, validate_all};

/// Collection holding the active record and its history snapshots.
pub const CONNECTION_COLLECTION: &str = "firebase_configs";

/// Id of the active record.
pub const ACTIVE_CONFIG_DOC: &str = "active";

/// Default number of history entries returned.
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// History snapshot id for a calendar date: `active_YYYY-MM-DD`.
pub fn history_doc_id(date: chrono::NaiveDate) -> String {
    format!("{}_{}", ACTIVE_CONFIG_DOC, date.format("%Y-%m-%d"))
}
