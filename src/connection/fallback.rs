//! Environment-sourced connection defaults.

use crate::connection::model::{ConnectionConfiguration, ConnectionFields};
use crate::env::EnvSource;
use chrono::{DateTime, Utc};

/// Prefix of the fallback environment variables.
pub const DEFAULT_ENV_PREFIX: &str = "NEXT_PUBLIC_FIREBASE_";

/// `updatedBy` of a record synthesized from the environment.
pub const SYSTEM_ACTOR: &str = "system";

const SUFFIXES: [&str; 7] = [
    "API_KEY",
    "AUTH_DOMAIN",
    "PROJECT_ID",
    "STORAGE_BUCKET",
    "MESSAGING_SENDER_ID",
    "APP_ID",
    "MEASUREMENT_ID",
];

/// Variable name for the `index`-th field (declaration order of `ConnectionFields`).
pub fn env_var_name(prefix: &str, index: usize) -> Option<String> {
    SUFFIXES.get(index).map(|suffix| format!("{}{}", prefix, suffix))
}

/// Build a record from the environment. Missing variables become empty strings.
pub fn from_env(env: &dyn EnvSource, prefix: &str, now: DateTime<Utc>) -> ConnectionConfiguration {
    let var = |suffix: &str| env.get_var(&format!("{}{}", prefix, suffix)).unwrap_or_default();

    ConnectionConfiguration {
        fields: ConnectionFields {
            api_key: var(SUFFIXES[0]),
            auth_domain: var(SUFFIXES[1]),
            project_id: var(SUFFIXES[2]),
            storage_bucket: var(SUFFIXES[3]),
            messaging_sender_id: var(SUFFIXES[4]),
            app_id: var(SUFFIXES[5]),
            measurement_id: var(SUFFIXES[6]),
        },
        updated_at: now,
        updated_by: SYSTEM_ACTOR.to_string(),
    }
}
