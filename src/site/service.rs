//! Site configuration service: merge on read, verbatim on write.

use crate::clock::Clock;
use crate::error::ApiError;
use crate::site::model::{PartialSiteConfiguration, SiteConfiguration};
use crate::site::resolve::resolve;
use crate::site::{default_site_config, SITE_CONFIG_COLLECTION, SITE_CONFIG_DOC};
use crate::store::{from_document, to_document, DocumentStore};
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Clone)]
pub struct SiteConfigService {
    store: Arc<dyn DocumentStore>,
    clock: Arc<dyn Clock>,
    defaults: SiteConfiguration,
}

impl SiteConfigService {
    pub fn new(store: Arc<dyn DocumentStore>, clock: Arc<dyn Clock>) -> Self {
        Self::with_defaults(store, clock, default_site_config())
    }

    pub fn with_defaults(
        store: Arc<dyn DocumentStore>,
        clock: Arc<dyn Clock>,
        defaults: SiteConfiguration,
    ) -> Self {
        Self {
            store,
            clock,
            defaults,
        }
    }

    pub fn default_site_config(&self) -> &SiteConfiguration {
        &self.defaults
    }

    /// The persisted partial record, if one exists.
    pub fn stored_site_config(&self) -> Result<Option<PartialSiteConfiguration>, ApiError> {
        match self.store.get_document(SITE_CONFIG_COLLECTION, SITE_CONFIG_DOC)? {
            Some(document) => Ok(Some(from_document(document)?)),
            None => Ok(None),
        }
    }

    /// The render-ready configuration. Never fails: an absent, undecodable, or
    /// unreachable record resolves to the defaults.
    pub fn get_site_config(&self) -> SiteConfiguration {
        match self.stored_site_config() {
            Ok(Some(partial)) => resolve(Some(&partial), &self.defaults),
            Ok(None) => {
                debug!("No stored site configuration, using defaults");
                self.defaults.clone()
            }
            Err(e) => {
                warn!(error = %e, "Failed to read site configuration, using defaults");
                self.defaults.clone()
            }
        }
    }

    /// Persist the partial record as given, stamping `updatedAt`.
    ///
    /// No merge happens here; defaults are applied on read.
    pub fn update_site_config(&self, partial: &PartialSiteConfiguration) -> Result<(), ApiError> {
        let mut record = partial.clone();
        record.updated_at = Some(self.clock.now());
        let document = to_document(&record)?;
        self.store
            .put_document(SITE_CONFIG_COLLECTION, SITE_CONFIG_DOC, &document)?;
        self.store.flush()?;
        info!("Site configuration updated");
        Ok(())
    }
}
