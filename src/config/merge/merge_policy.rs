//! Merge rules: defaults, override order, conflict handling.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("storage.store_path", ".siteconf/store")?
        .set_default("connection.env_prefix", crate::connection::DEFAULT_ENV_PREFIX)?
        .set_default(
            "connection.history_limit",
            crate::connection::DEFAULT_HISTORY_LIMIT as i64,
        )?
        .set_default("connection.fetch_timeout_ms", 5_000_i64)
}
