//! Presentation: text and JSON formatting for command results.

mod connection;
mod site;

pub use connection::{
    format_connection_json, format_connection_text, format_history_json, format_history_text,
    format_validation_report,
};
pub use site::{format_site_json, format_site_text};
