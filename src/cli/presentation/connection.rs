//! Connection configuration presentation: show, history, validation report.

use crate::connection::{env_var_name, ConnectionConfiguration, ConnectionFields, SYSTEM_ACTOR};
use crate::error::ValidationError;
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde_json::json;

/// Text view. Environment-sourced records also name the variable behind each field.
pub fn format_connection_text(config: &ConnectionConfiguration, env_prefix: &str) -> String {
    let from_env = config.updated_by == SYSTEM_ACTOR;
    let mut output = format!("{}\n", "Connection Configuration".bold().underline());
    for (index, (name, value)) in config.fields.entries().into_iter().enumerate() {
        let shown = if value.is_empty() {
            format!("{}", "(empty)".dimmed())
        } else {
            value.to_string()
        };
        output.push_str(&format!("  {:<18} {}", name, shown));
        if from_env {
            if let Some(var) = env_var_name(env_prefix, index) {
                output.push_str(&format!("  [{}]", var));
            }
        }
        output.push('\n');
    }
    let source = if from_env { "environment" } else { "store" };
    output.push_str(&format!(
        "\nSource: {}\nUpdated by: {}\nUpdated at: {}",
        source,
        config.updated_by,
        config.updated_at.to_rfc3339()
    ));
    if !config.fields.is_usable() {
        output.push_str(&format!(
            "\n{}",
            "Warning: apiKey, authDomain, and projectId are required to connect".red()
        ));
    }
    output
}

pub fn format_connection_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

pub fn format_history_text(history: &[ConnectionConfiguration]) -> String {
    if history.is_empty() {
        return "No history snapshots found.".to_string();
    }
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Updated At", "Updated By", "Project", "Auth Domain", "API Key"]);
    for entry in history {
        table.add_row(vec![
            entry.updated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            entry.updated_by.clone(),
            entry.fields.project_id.clone(),
            entry.fields.auth_domain.clone(),
            mask(&entry.fields.api_key),
        ]);
    }
    format!("{}\n\nTotal: {} snapshot(s)", table, history.len())
}

pub fn format_history_json(history: &[ConnectionConfiguration]) -> String {
    let out = json!({ "history": history, "total": history.len() });
    serde_json::to_string_pretty(&out).unwrap_or_else(|_| "{}".to_string())
}

pub fn format_validation_report(candidate: &ConnectionFields, errors: &[ValidationError]) -> String {
    if errors.is_empty() {
        return format!(
            "{} configuration for project '{}' passes all checks",
            "OK:".green(),
            candidate.project_id
        );
    }
    let mut output = format!("{} {} problem(s)\n", "Invalid:".red(), errors.len());
    for err in errors {
        output.push_str(&format!("  {:<18} {}\n", err.field(), err));
    }
    output
}

fn mask(value: &str) -> String {
    let visible: String = value.chars().take(8).collect();
    if visible.len() == value.len() {
        visible
    } else {
        format!("{}…", visible)
    }
}
