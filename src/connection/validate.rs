//! Save-time format checks for connection configurations.

use crate::connection::model::ConnectionFields;
use crate::error::ValidationError;

pub const API_KEY_PREFIX: &str = "AIzaSy";
pub const AUTH_DOMAIN_SUFFIX: &str = ".firebaseapp.com";
pub const LEGACY_BUCKET_SUFFIX: &str = ".appspot.com";
pub const BUCKET_SUFFIX: &str = ".firebasestorage.app";
pub const MEASUREMENT_ID_PREFIX: &str = "G-";

/// Validate a candidate, stopping at the first failing check.
///
/// Required fields are checked before formats.
pub fn validate(candidate: &ConnectionFields) -> Result<(), ValidationError> {
    match checks(candidate).next() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Every failing check, in evaluation order.
pub fn validate_all(candidate: &ConnectionFields) -> Vec<ValidationError> {
    checks(candidate).collect()
}

fn checks(c: &ConnectionFields) -> impl Iterator<Item = ValidationError> + '_ {
    let required = [
        ("apiKey", &c.api_key),
        ("authDomain", &c.auth_domain),
        ("projectId", &c.project_id),
        ("storageBucket", &c.storage_bucket),
        ("messagingSenderId", &c.messaging_sender_id),
        ("appId", &c.app_id),
    ];
    let missing = required
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(field, _)| ValidationError::MissingField(field));

    // Format checks only apply to fields that are present
    let formats = [
        (!c.api_key.is_empty() && !c.api_key.starts_with(API_KEY_PREFIX))
            .then_some(ValidationError::InvalidApiKey),
        (!c.auth_domain.is_empty() && !c.auth_domain.contains(AUTH_DOMAIN_SUFFIX))
            .then_some(ValidationError::InvalidAuthDomain),
        (!c.storage_bucket.is_empty()
            && !c.storage_bucket.contains(LEGACY_BUCKET_SUFFIX)
            && !c.storage_bucket.contains(BUCKET_SUFFIX))
        .then_some(ValidationError::InvalidStorageBucket),
        (!c.measurement_id.is_empty() && !c.measurement_id.starts_with(MEASUREMENT_ID_PREFIX))
            .then_some(ValidationError::InvalidMeasurementId),
    ];

    missing.chain(formats.into_iter().flatten())
}
