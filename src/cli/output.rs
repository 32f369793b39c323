//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::ApiError;

/// Map domain/service errors to a string for CLI output.
pub fn map_error(e: &ApiError) -> String {
    match e {
        ApiError::Unauthorized(_) => format!("{}\nRe-run with --admin.", e),
        ApiError::NoCredentials => format!(
            "{}\nSave one with `siteconf connection save <FILE> --admin` or set the fallback environment variables.",
            e
        ),
        _ if e.is_retryable() => format!("{}\nThe store may be temporarily unavailable; retry.", e),
        _ => e.to_string(),
    }
}
