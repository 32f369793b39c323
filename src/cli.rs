//! CLI domain: parse, route, output, and presentation only.
//! No domain orchestration; single route table dispatches to the API surface.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::map_error;
pub use parse::{Cli, Commands, ConnectionCommands, SiteCommands};
pub use presentation::{
    format_connection_json, format_connection_text, format_history_json, format_history_text,
    format_site_json, format_site_text, format_validation_report,
};
pub use route::{read_input, RunContext};
