//! Connection configuration records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The seven identity/location fields.
///
/// Missing fields decode as empty strings; this is also the public view handed
/// to unauthenticated consumers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConnectionFields {
    pub api_key: String,
    pub auth_domain: String,
    pub project_id: String,
    pub storage_bucket: String,
    pub messaging_sender_id: String,
    pub app_id: String,
    pub measurement_id: String,
}

/// Public view of a connection configuration: identity fields only.
pub type PublicConnectionConfig = ConnectionFields;

impl ConnectionFields {
    /// Minimum a consumer needs to open a connection.
    pub fn is_usable(&self) -> bool {
        !self.api_key.is_empty() && !self.auth_domain.is_empty() && !self.project_id.is_empty()
    }

    /// `(wire name, value)` pairs in declaration order.
    pub fn entries(&self) -> [(&'static str, &str); 7] {
        [
            ("apiKey", self.api_key.as_str()),
            ("authDomain", self.auth_domain.as_str()),
            ("projectId", self.project_id.as_str()),
            ("storageBucket", self.storage_bucket.as_str()),
            ("messagingSenderId", self.messaging_sender_id.as_str()),
            ("appId", self.app_id.as_str()),
            ("measurementId", self.measurement_id.as_str()),
        ]
    }
}

/// A stored connection configuration: fields plus write metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionConfiguration {
    #[serde(flatten)]
    pub fields: ConnectionFields,
    pub updated_at: DateTime<Utc>,
    pub updated_by: String,
}

impl ConnectionConfiguration {
    pub fn public_view(&self) -> PublicConnectionConfig {
        self.fields.clone()
    }
}
