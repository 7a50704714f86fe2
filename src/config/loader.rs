//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::DepotConfig;
use super::secret::secret_string;
use crate::domain::errors::DepotError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into DepotConfig
/// 4. Applies environment variable overrides (DEPOT_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns [`DepotError::Configuration`] if the file is missing or
/// unreadable, a referenced environment variable is unset, the TOML does
/// not parse, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use depot::config::loader::load_config;
///
/// let config = load_config("depot.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<DepotConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(DepotError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        DepotError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: DepotConfig = toml::from_str(&contents)
        .map_err(|e| DepotError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        DepotError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    tracing::debug!(
        path = %path.display(),
        base_url = %config.service.base_url,
        header_count = config.service.headers.len(),
        "Configuration loaded"
    );

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched. All missing variables are reported in
/// a single error.
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();
    let mut result = String::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    processed_line = processed_line.replace(&format!("${{{var_name}}}"), &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(DepotError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the DEPOT_* prefix
///
/// Environment variables follow the pattern DEPOT_<SECTION>_<KEY>, for
/// example DEPOT_SERVICE_BASE_URL or DEPOT_POLLING_TIMEOUT_SECS.
/// Unparseable numeric values are ignored.
fn apply_env_overrides(config: &mut DepotConfig) {
    // Application overrides
    if let Ok(val) = std::env::var("DEPOT_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Ok(val) = std::env::var("DEPOT_APPLICATION_WORK_DIR") {
        config.application.work_dir = Some(val.into());
    }

    // Service overrides
    if let Ok(val) = std::env::var("DEPOT_SERVICE_BASE_URL") {
        config.service.base_url = val;
    }
    if let Ok(val) = std::env::var("DEPOT_SERVICE_RESOURCE") {
        config.service.resource = val;
    }
    if let Ok(val) = std::env::var("DEPOT_SERVICE_TLS_VERIFY") {
        config.service.tls_verify = val.parse().unwrap_or(true);
    }
    if let Ok(val) = std::env::var("DEPOT_SERVICE_TIMEOUT_SECONDS") {
        if let Ok(timeout) = val.parse() {
            config.service.timeout_seconds = timeout;
        }
    }
    if let Ok(val) = std::env::var("DEPOT_SERVICE_ADMIN_TOKEN") {
        config
            .service
            .headers
            .insert("Admin-Token".to_string(), secret_string(val));
    }

    // Polling overrides
    if let Ok(val) = std::env::var("DEPOT_POLLING_MAX_INTERVAL_SECS") {
        if let Ok(max) = val.parse() {
            config.polling.max_interval_secs = max;
        }
    }
    if let Ok(val) = std::env::var("DEPOT_POLLING_TIMEOUT_SECS") {
        if let Ok(timeout) = val.parse() {
            config.polling.timeout_secs = Some(timeout);
        }
    }

    // Logging overrides
    if let Ok(val) = std::env::var("DEPOT_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("DEPOT_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}
