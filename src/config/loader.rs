//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::{StateBackend, SyncConfig};
use super::secret::secret_string;
use crate::domain::errors::SyncError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into SyncConfig
/// 4. Applies environment variable overrides (ORDERSYNC_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if the file cannot be read, a referenced environment
/// variable is missing, TOML parsing fails, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use ordersync::config::loader::load_config;
///
/// let config = load_config("ordersync.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<SyncConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(SyncError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        SyncError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let config = parse_config(&contents)?;

    tracing::debug!(path = %path.display(), "Configuration loaded");

    Ok(config)
}

/// Parses configuration text (substitution, overrides and validation included)
///
/// # Errors
///
/// Same as [`load_config`], minus file access.
pub fn parse_config(contents: &str) -> Result<SyncConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: SyncConfig = toml::from_str(&contents)
        .map_err(|e| SyncError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        SyncError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| SyncError::Other(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let processed = re.replace_all(line, |caps: &regex::Captures| {
            let var_name = &caps[1];
            match std::env::var(var_name) {
                Ok(value) => value,
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                    caps[0].to_string()
                }
            }
        });
        result.push_str(&processed);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(SyncError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using ORDERSYNC_* prefix
///
/// Environment variables follow the pattern: ORDERSYNC_<SECTION>_<KEY>
/// For example: ORDERSYNC_PROVIDER_TOKEN, ORDERSYNC_SYNC_DRY_RUN
fn apply_env_overrides(config: &mut SyncConfig) {
    // Application overrides
    if let Ok(val) = std::env::var("ORDERSYNC_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Provider overrides
    if let Ok(val) = std::env::var("ORDERSYNC_PROVIDER_BASE_URL") {
        config.provider.base_url = val;
    }
    if let Ok(val) = std::env::var("ORDERSYNC_PROVIDER_TOKEN") {
        config.provider.token = secret_string(val);
    }
    if let Ok(val) = std::env::var("ORDERSYNC_PROVIDER_MAX_RETRIES") {
        if let Ok(retries) = val.parse() {
            config.provider.retry.max_retries = retries;
        }
    }
    if let Ok(val) = std::env::var("ORDERSYNC_PROVIDER_MIN_INTERVAL_MS") {
        if let Ok(interval) = val.parse() {
            config.provider.rate_limit.min_interval_ms = interval;
        }
    }

    // Sync overrides
    if let Ok(val) = std::env::var("ORDERSYNC_SYNC_DRY_RUN") {
        config.sync.dry_run = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("ORDERSYNC_SYNC_MAX_PAGES") {
        if let Ok(pages) = val.parse() {
            config.sync.max_pages = Some(pages);
        }
    }

    // State overrides
    if let Ok(val) = std::env::var("ORDERSYNC_STATE_BACKEND") {
        match val.to_lowercase().as_str() {
            "file" => config.state.backend = StateBackend::File,
            "postgresql" => config.state.backend = StateBackend::PostgreSQL,
            other => tracing::warn!(value = %other, "Ignoring unknown ORDERSYNC_STATE_BACKEND"),
        }
    }
    if let Ok(val) = std::env::var("ORDERSYNC_STATE_CHECKPOINT_PATH") {
        config.state.checkpoint_path = val;
    }

    // Destination overrides
    if let Ok(val) = std::env::var("ORDERSYNC_DESTINATION_SCHEMA") {
        config.destination.schema = val;
    }
    if let Ok(val) = std::env::var("ORDERSYNC_DESTINATION_TABLE_PREFIX") {
        config.destination.table_prefix = val;
    }
    if let Ok(val) = std::env::var("ORDERSYNC_DESTINATION_CONNECTION_STRING") {
        config.destination.postgresql.connection_string = secret_string(val);
    }

    // Logging overrides
    if let Ok(val) = std::env::var("ORDERSYNC_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("ORDERSYNC_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}
