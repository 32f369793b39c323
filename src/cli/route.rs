//! CLI route: single route table and run context. Dispatches to the API surface and presentation.

use crate::api::{Caller, Role, SiteApi};
use crate::clock::SystemClock;
use crate::config::{AppConfig, ConfigLoader};
use crate::connection::{validate_all, ConnectionConfigService, ConnectionFields, ConnectionHandle};
use crate::env::ProcessEnv;
use crate::error::ApiError;
use crate::site::{PartialSiteConfiguration, SiteConfigService};
use crate::store::SledDocumentStore;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::cli::parse::{Cli, Commands, ConnectionCommands, SiteCommands};
use crate::cli::presentation::{
    format_connection_json, format_connection_text, format_history_json, format_history_text,
    format_site_json, format_site_text, format_validation_report,
};

/// Runtime context for CLI execution: the API surface, the acting caller, and settings.
pub struct RunContext {
    api: SiteApi,
    caller: Caller,
    env_prefix: String,
    fetch_timeout: Duration,
}

impl RunContext {
    /// Build from CLI arguments: load config, open the sled store, wire the services.
    pub fn new(cli: &Cli) -> Result<Self, ApiError> {
        let config = match cli.config {
            Some(ref cfg_path) => ConfigLoader::load_from_file(cfg_path)?,
            None => ConfigLoader::load(&cli.workspace)?,
        }
        .validated()?;

        let store_path = cli
            .store
            .clone()
            .unwrap_or_else(|| config.storage.resolve_path(&cli.workspace));
        std::fs::create_dir_all(&store_path)
            .map_err(|e| ApiError::StorageError(crate::error::StorageError::IoError(e)))?;
        let store = Arc::new(SledDocumentStore::new(&store_path)?);
        info!(store = %store_path.display(), "Document store opened");

        let clock = Arc::new(SystemClock);
        let connection = ConnectionConfigService::new(store.clone(), Arc::new(ProcessEnv), clock.clone())
            .with_env_prefix(config.connection.env_prefix.clone());
        let site = SiteConfigService::new(store, clock);
        let api = SiteApi::new(site, Arc::new(ConnectionHandle::new(connection)))
            .with_history_limit(config.connection.history_limit);

        Ok(Self::with_api(api, caller_from_cli(cli), &config))
    }

    /// Build around an existing API surface.
    pub fn with_api(api: SiteApi, caller: Caller, config: &AppConfig) -> Self {
        Self {
            api,
            caller,
            env_prefix: config.connection.env_prefix.clone(),
            fetch_timeout: Duration::from_millis(config.connection.fetch_timeout_ms),
        }
    }

    pub fn api(&self) -> &SiteApi {
        &self.api
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Site { command } => self.execute_site(command),
            Commands::Connection { command } => self.execute_connection(command),
        }
    }

    fn execute_site(&self, command: &SiteCommands) -> Result<String, ApiError> {
        match command {
            SiteCommands::Show { format } => {
                let config = self.api.site_config();
                Ok(render(format, || format_site_text(&config), || format_site_json(&config)))
            }
            SiteCommands::Set { file } => {
                let partial: PartialSiteConfiguration = read_input(file)?;
                self.api.update_site_config(&self.caller, &partial)?;
                Ok("Site configuration saved".to_string())
            }
            SiteCommands::Defaults { format } => {
                let defaults = crate::site::default_site_config();
                Ok(render(
                    format,
                    || format_site_text(&defaults),
                    || format_site_json(&defaults),
                ))
            }
        }
    }

    fn execute_connection(&self, command: &ConnectionCommands) -> Result<String, ApiError> {
        match command {
            ConnectionCommands::Show { format } => {
                let config = self.api.connection_config(&self.caller)?;
                Ok(render(
                    format,
                    || format_connection_text(&config, &self.env_prefix),
                    || format_connection_json(&config),
                ))
            }
            ConnectionCommands::Public { format } => {
                let public = self.api.public_connection_config();
                Ok(render(
                    format,
                    || {
                        public
                            .entries()
                            .iter()
                            .map(|(name, value)| format!("{:<18} {}", name, value))
                            .collect::<Vec<_>>()
                            .join("\n")
                    },
                    || format_connection_json(&public),
                ))
            }
            ConnectionCommands::Save { file, yes } => self.handle_save(file, *yes),
            ConnectionCommands::History { limit, format } => {
                let history = self.api.connection_history(&self.caller, *limit)?;
                Ok(render(
                    format,
                    || format_history_text(&history),
                    || format_history_json(&history),
                ))
            }
            ConnectionCommands::Validate { file } => {
                let candidate: ConnectionFields = read_input(file)?;
                let errors = validate_all(&candidate);
                Ok(format_validation_report(&candidate, &errors))
            }
            ConnectionCommands::Check { timeout_ms } => self.handle_check(*timeout_ms),
        }
    }

    fn handle_save(&self, file: &Path, yes: bool) -> Result<String, ApiError> {
        let candidate: ConnectionFields = read_input(file)?;

        if !yes {
            use dialoguer::Confirm;
            let confirmed = Confirm::new()
                .with_prompt(format!(
                    "Replace the active connection configuration with project '{}'?",
                    candidate.project_id
                ))
                .interact()
                .map_err(|e| ApiError::ConfigError(format!("Failed to get user input: {}", e)))?;

            if !confirmed {
                return Ok("Save cancelled".to_string());
            }
        }

        let saved = self.api.save_connection_config(&self.caller, candidate)?;
        Ok(format!(
            "Connection configuration saved\nProject: {}\nUpdated by: {}\nHistory entry: {}",
            saved.fields.project_id,
            saved.updated_by,
            crate::connection::history_doc_id(saved.updated_at.date_naive())
        ))
    }

    fn handle_check(&self, timeout_ms: Option<u64>) -> Result<String, ApiError> {
        let timeout = timeout_ms
            .map(Duration::from_millis)
            .unwrap_or(self.fetch_timeout);
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .map_err(|e| ApiError::ConfigError(format!("Failed to start runtime: {}", e)))?;

        let handle = self.api.connection_handle();
        let config = runtime.block_on(handle.get_within(timeout))?;
        let status = if config.fields.is_usable() {
            "ready"
        } else {
            "incomplete"
        };
        Ok(format!(
            "Connection {}: project '{}' (updated by {} at {})",
            status,
            config.fields.project_id,
            config.updated_by,
            config.updated_at.to_rfc3339()
        ))
    }
}

fn caller_from_cli(cli: &Cli) -> Caller {
    Caller {
        id: cli.actor.clone(),
        email: cli.email.clone(),
        role: if cli.admin { Role::Admin } else { Role::Anonymous },
    }
}

fn render(format: &str, text: impl FnOnce() -> String, json: impl FnOnce() -> String) -> String {
    if format == "json" {
        json()
    } else {
        text()
    }
}

/// Read a JSON or TOML input file (by extension; JSON otherwise).
pub fn read_input<T: DeserializeOwned>(path: &Path) -> Result<T, ApiError> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        ApiError::ConfigError(format!("Failed to read {}: {}", path.display(), e))
    })?;
    let parse_error = |e: String| {
        ApiError::ConfigError(format!("Failed to parse {}: {}", path.display(), e))
    };
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => toml::from_str(&contents).map_err(|e| parse_error(e.to_string())),
        _ => serde_json::from_str(&contents).map_err(|e| parse_error(e.to_string())),
    }
}
