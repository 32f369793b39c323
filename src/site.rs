//! Site configuration: the render-ready settings for the public pages.
//!
//! The persisted record may be partial; every read merges it over compiled-in
//! defaults so consumers always see a complete configuration.

pub mod defaults;
pub mod model;
pub mod resolve;
pub mod service;

pub use defaults::default_site_config;
pub use model::{ContactInfo, PartialContactInfo, PartialSiteConfiguration, SiteConfiguration};
pub use resolve::resolve;
pub use service::SiteConfigService;

/// Collection holding the site configuration document.
pub const SITE_CONFIG_COLLECTION: &str = "site_config";

/// Id of the single site configuration document.
pub const SITE_CONFIG_DOC: &str = "main";
