//! Owned, injectable cache of the resolved connection configuration.
//!
//! The handle loads lazily on first access and keeps the result until
//! `reinitialize` discards it. Hosts share one handle (behind an `Arc`) with
//! whatever needs the connection instead of reaching for global state.

use crate::connection::model::ConnectionConfiguration;
use crate::connection::service::{require_credentials, ConnectionConfigService};
use crate::error::ApiError;
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Lifecycle of the cached configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleState {
    Uninitialized,
    Loading,
    Ready,
}

struct Slot {
    state: HandleState,
    config: Option<Arc<ConnectionConfiguration>>,
    /// Bumped by `reinitialize`; a load started under an older generation is not cached.
    generation: u64,
}

pub struct ConnectionHandle {
    service: ConnectionConfigService,
    slot: RwLock<Slot>,
}

impl ConnectionHandle {
    pub fn new(service: ConnectionConfigService) -> Self {
        Self {
            service,
            slot: RwLock::new(Slot {
                state: HandleState::Uninitialized,
                config: None,
                generation: 0,
            }),
        }
    }

    pub fn state(&self) -> HandleState {
        self.slot.read().state
    }

    pub fn service(&self) -> &ConnectionConfigService {
        &self.service
    }

    /// The cached configuration, loading it if needed.
    ///
    /// A stored record missing apiKey, authDomain, or projectId is passed over for
    /// the environment default. Errors with `NoCredentials` when that default has
    /// no apiKey either; the handle then stays uninitialized.
    pub fn get(&self) -> Result<Arc<ConnectionConfiguration>, ApiError> {
        if let Some(config) = self.cached() {
            return Ok(config);
        }
        let generation = self.begin_load();
        let loaded = self.service.load_usable();
        self.finish_load(generation, loaded)
    }

    /// `get` with the persistence fetch bounded by `timeout`.
    pub async fn get_within(
        &self,
        timeout: Duration,
    ) -> Result<Arc<ConnectionConfiguration>, ApiError> {
        if let Some(config) = self.cached() {
            return Ok(config);
        }
        let generation = self.begin_load();
        let loaded = self.service.load_usable_within(timeout).await;
        self.finish_load(generation, loaded)
    }

    /// Discard the cached configuration; the next access reloads it.
    pub fn reinitialize(&self) {
        let mut slot = self.slot.write();
        slot.config = None;
        slot.state = HandleState::Uninitialized;
        slot.generation += 1;
        debug!(generation = slot.generation, "Connection handle reinitialized");
    }

    fn cached(&self) -> Option<Arc<ConnectionConfiguration>> {
        self.slot.read().config.clone()
    }

    fn begin_load(&self) -> u64 {
        let mut slot = self.slot.write();
        slot.state = HandleState::Loading;
        slot.generation
    }

    fn finish_load(
        &self,
        generation: u64,
        loaded: ConnectionConfiguration,
    ) -> Result<Arc<ConnectionConfiguration>, ApiError> {
        let mut slot = self.slot.write();
        let current = slot.generation == generation;

        let config = match require_credentials(loaded) {
            Ok(config) => Arc::new(config),
            Err(e) => {
                // A concurrent load of the same generation may already have succeeded
                if current && slot.config.is_none() {
                    slot.state = HandleState::Uninitialized;
                }
                return Err(e);
            }
        };

        if current {
            slot.config = Some(Arc::clone(&config));
            slot.state = HandleState::Ready;
            debug!(updated_by = %config.updated_by, "Connection handle ready");
        }
        Ok(config)
    }
}
