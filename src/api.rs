//! Caller-facing surface.
//!
//! Public reads never fail to a visitor. Admin operations are gated on a role
//! flag supplied by the external authentication provider and fail loudly.

use crate::connection::{
    ConnectionConfigService, ConnectionConfiguration, ConnectionFields, ConnectionHandle,
    PublicConnectionConfig, DEFAULT_HISTORY_LIMIT,
};
use crate::site::{PartialSiteConfiguration, SiteConfigService, SiteConfiguration};
use crate::error::ApiError;
use std::sync::Arc;
use tracing::{debug, warn};

/// Role asserted by the authentication provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Member,
    Anonymous,
}

/// Identity of the caller, as handed over by the authentication provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub id: Option<String>,
    pub email: Option<String>,
    pub role: Role,
}

impl Caller {
    pub fn anonymous() -> Self {
        Self {
            id: None,
            email: None,
            role: Role::Anonymous,
        }
    }

    pub fn admin(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            email: None,
            role: Role::Admin,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Identity recorded as `updatedBy`: id, else email, else `unknown`.
    pub fn actor(&self) -> String {
        self.id
            .clone()
            .or_else(|| self.email.clone())
            .unwrap_or_else(|| "unknown".to_string())
    }
}

pub struct SiteApi {
    site: SiteConfigService,
    handle: Arc<ConnectionHandle>,
    history_limit: usize,
}

impl SiteApi {
    pub fn new(site: SiteConfigService, handle: Arc<ConnectionHandle>) -> Self {
        Self {
            site,
            handle,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    pub fn history_limit(&self) -> usize {
        self.history_limit
    }

    /// Shared connection handle, for consumers that need the live configuration.
    pub fn connection_handle(&self) -> Arc<ConnectionHandle> {
        Arc::clone(&self.handle)
    }

    fn connection(&self) -> &ConnectionConfigService {
        self.handle.service()
    }

    fn require_admin(caller: &Caller) -> Result<(), ApiError> {
        if caller.is_admin() {
            Ok(())
        } else {
            warn!(role = ?caller.role, "Rejected non-admin caller");
            Err(ApiError::Unauthorized("administrator role required".to_string()))
        }
    }

    /// Fully resolved site configuration. Public.
    pub fn site_config(&self) -> SiteConfiguration {
        self.site.get_site_config()
    }

    /// Persist a partial site configuration verbatim. Admin only.
    pub fn update_site_config(
        &self,
        caller: &Caller,
        partial: &PartialSiteConfiguration,
    ) -> Result<(), ApiError> {
        Self::require_admin(caller)?;
        self.site.update_site_config(partial)
    }

    /// Active connection configuration including metadata, or the environment default. Admin only.
    pub fn connection_config(&self, caller: &Caller) -> Result<ConnectionConfiguration, ApiError> {
        Self::require_admin(caller)?;
        Ok(self.connection().load_active())
    }

    /// Identity fields of the configuration clients connect with, served from the
    /// shared handle. Public; with no credentials anywhere the view is empty.
    pub fn public_connection_config(&self) -> PublicConnectionConfig {
        match self.handle.get() {
            Ok(config) => config.public_view(),
            Err(e) => {
                debug!(error = %e, "No usable connection configuration for public view");
                self.connection().default_from_env().public_view()
            }
        }
    }

    /// Validate and save a connection configuration, then drop the cached handle so
    /// consumers pick up the new credentials. Admin only.
    pub fn save_connection_config(
        &self,
        caller: &Caller,
        candidate: ConnectionFields,
    ) -> Result<ConnectionConfiguration, ApiError> {
        Self::require_admin(caller)?;
        let saved = self.connection().save(candidate, &caller.actor())?;
        self.handle.reinitialize();
        Ok(saved)
    }

    /// Recent history snapshots. Admin only. `None` uses the configured limit.
    pub fn connection_history(
        &self,
        caller: &Caller,
        limit: Option<usize>,
    ) -> Result<Vec<ConnectionConfiguration>, ApiError> {
        Self::require_admin(caller)?;
        self.connection().history(limit.unwrap_or(self.history_limit))
    }
}
