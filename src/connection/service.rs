//! Connection configuration service: load with fallback, validated save, history.

use crate::clock::Clock;
use crate::connection::fallback::{self, DEFAULT_ENV_PREFIX};
use crate::connection::model::{ConnectionConfiguration, ConnectionFields};
use crate::connection::validate::validate;
use crate::connection::{history_doc_id, ACTIVE_CONFIG_DOC, CONNECTION_COLLECTION};
use crate::env::EnvSource;
use crate::error::{ApiError, StorageError};
use crate::store::{from_document, to_document, Document, DocumentStore};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

const ORDER_FIELD: &str = "updatedAt";

#[derive(Clone)]
pub struct ConnectionConfigService {
    store: Arc<dyn DocumentStore>,
    env: Arc<dyn EnvSource>,
    clock: Arc<dyn Clock>,
    env_prefix: String,
}

impl ConnectionConfigService {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        env: Arc<dyn EnvSource>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            env,
            clock,
            env_prefix: DEFAULT_ENV_PREFIX.to_string(),
        }
    }

    /// Use a different prefix for the fallback environment variables.
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    pub fn env_prefix(&self) -> &str {
        &self.env_prefix
    }

    /// Record synthesized from the environment, stamped now and attributed to `system`.
    pub fn default_from_env(&self) -> ConnectionConfiguration {
        fallback::from_env(self.env.as_ref(), &self.env_prefix, self.clock.now())
    }

    /// The active record, or the environment default when it is absent or unreadable.
    ///
    /// A stored record is returned as stored, even when it lacks connection fields.
    pub fn load_active(&self) -> ConnectionConfiguration {
        let stored = self.stored(self.fetch_active());
        stored.unwrap_or_else(|| self.default_from_env())
    }

    /// The record a client should connect with: the active record when it is usable,
    /// otherwise the environment default.
    pub fn load_usable(&self) -> ConnectionConfiguration {
        let stored = self.stored(self.fetch_active());
        self.usable_or_env(stored)
    }

    /// `load_usable`, erroring with `NoCredentials` when even the environment has no apiKey.
    pub fn load_active_strict(&self) -> Result<ConnectionConfiguration, ApiError> {
        require_credentials(self.load_usable())
    }

    /// `load_active` with the persistence fetch bounded by `timeout`.
    ///
    /// A fetch that does not finish in time is treated as a failed fetch.
    pub async fn load_active_within(&self, timeout: Duration) -> ConnectionConfiguration {
        let stored = self.stored(self.fetch_active_within(timeout).await);
        stored.unwrap_or_else(|| self.default_from_env())
    }

    /// `load_usable` with the persistence fetch bounded by `timeout`.
    pub async fn load_usable_within(&self, timeout: Duration) -> ConnectionConfiguration {
        let stored = self.stored(self.fetch_active_within(timeout).await);
        self.usable_or_env(stored)
    }

    fn fetch_active(&self) -> Result<Option<Document>, StorageError> {
        self.store.get_document(CONNECTION_COLLECTION, ACTIVE_CONFIG_DOC)
    }

    async fn fetch_active_within(
        &self,
        timeout: Duration,
    ) -> Result<Option<Document>, StorageError> {
        let store = Arc::clone(&self.store);
        let fetch = tokio::task::spawn_blocking(move || {
            store.get_document(CONNECTION_COLLECTION, ACTIVE_CONFIG_DOC)
        });

        match tokio::time::timeout(timeout, fetch).await {
            Ok(Ok(result)) => result,
            Ok(Err(join_error)) => Err(StorageError::Unavailable(format!(
                "Fetch task failed: {}",
                join_error
            ))),
            Err(_) => Err(StorageError::Unavailable(format!(
                "Fetch timed out after {:?}",
                timeout
            ))),
        }
    }

    /// Decoded active record; absent, unreadable, and undecodable all yield `None`.
    fn stored(
        &self,
        fetched: Result<Option<Document>, StorageError>,
    ) -> Option<ConnectionConfiguration> {
        match fetched.and_then(|doc| doc.map(from_document::<ConnectionConfiguration>).transpose()) {
            Ok(Some(config)) => {
                debug!("Loaded active connection configuration");
                Some(config)
            }
            Ok(None) => {
                debug!("No active connection configuration, using environment defaults");
                None
            }
            Err(e) => {
                warn!(error = %e, "Failed to load active connection configuration, using environment defaults");
                None
            }
        }
    }

    fn usable_or_env(&self, stored: Option<ConnectionConfiguration>) -> ConnectionConfiguration {
        match stored {
            Some(config) if config.fields.is_usable() => config,
            Some(config) => {
                warn!(
                    updated_by = %config.updated_by,
                    "Active connection configuration lacks apiKey, authDomain, or projectId, using environment defaults"
                );
                self.default_from_env()
            }
            None => self.default_from_env(),
        }
    }

    /// Validate, stamp, and persist `candidate` as the active record and as today's
    /// history snapshot.
    ///
    /// A failed check writes nothing. A second save on the same calendar date
    /// overwrites that date's snapshot.
    pub fn save(
        &self,
        candidate: ConnectionFields,
        actor: &str,
    ) -> Result<ConnectionConfiguration, ApiError> {
        validate(&candidate)?;

        let now = self.clock.now();
        let config = ConnectionConfiguration {
            fields: candidate,
            updated_at: now,
            updated_by: actor.to_string(),
        };
        let document = to_document(&config)?;

        self.store
            .put_document(CONNECTION_COLLECTION, ACTIVE_CONFIG_DOC, &document)?;
        let history_id = history_doc_id(now.date_naive());
        self.store
            .put_document(CONNECTION_COLLECTION, &history_id, &document)?;
        self.store.flush()?;

        info!(actor = %actor, history_id = %history_id, "Connection configuration saved");
        Ok(config)
    }

    /// History snapshots, most recently updated first, never including the active
    /// record, at most `limit` entries.
    ///
    /// Undecodable snapshots are skipped and do not count toward `limit`.
    pub fn history(&self, limit: usize) -> Result<Vec<ConnectionConfiguration>, ApiError> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        // One snapshot per save day keeps the collection small; decode until `limit` is met
        let rows = self
            .store
            .query_recent(CONNECTION_COLLECTION, ORDER_FIELD, usize::MAX)?;

        let mut history = Vec::new();
        for (id, document) in rows {
            if id == ACTIVE_CONFIG_DOC {
                continue;
            }
            match from_document::<ConnectionConfiguration>(document) {
                Ok(config) => history.push(config),
                Err(e) => warn!(id = %id, error = %e, "Skipping undecodable history snapshot"),
            }
            if history.len() == limit {
                break;
            }
        }
        Ok(history)
    }
}

/// Reject a configuration with no apiKey: there is nothing usable to hand out.
pub(crate) fn require_credentials(
    config: ConnectionConfiguration,
) -> Result<ConnectionConfiguration, ApiError> {
    if config.fields.api_key.is_empty() {
        return Err(ApiError::NoCredentials);
    }
    Ok(config)
}
