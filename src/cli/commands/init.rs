//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "depot.toml")]
    pub output: String,

    /// Include example values and comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Depot configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Set service.base_url in {}", self.output);
                println!("  2. Put the service token in .env as DEPOT_ADMIN_TOKEN");
                println!("  3. Validate configuration: depot validate-config");
                println!("  4. Export a dataset, e.g.: depot gene-list --help");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5)
            }
        }
    }

    fn generate_minimal_config() -> String {
        r#"# Depot Configuration File

[application]
log_level = "info"

[service]
base_url = "http://localhost:8080"
resource = "vdi-datasets"

[service.headers]
Admin-Token = "${DEPOT_ADMIN_TOKEN}"

[polling]
initial_interval_secs = 1.0
backoff_factor = 1.5
max_interval_secs = 60.0

[logging]
local_enabled = false
"#
        .to_string()
    }

    fn generate_config_with_examples() -> String {
        r#"# Depot Configuration File
#
# Values of the form ${VAR} are read from the environment (or .env).
# Any setting can also be overridden with DEPOT_<SECTION>_<KEY>,
# for example DEPOT_SERVICE_BASE_URL.

# ============================================================================
# Application Settings
# ============================================================================
[application]
# trace | debug | info | warn | error
log_level = "info"

# Parent directory for per-export working directories
# (defaults to the system temp directory)
# work_dir = "/var/tmp/depot"

# ============================================================================
# Import Service
# ============================================================================
[service]
# Base URL including any path prefix
base_url = "https://example.org/service"

# Collection datasets are posted to; job status lives at <resource>/<job id>
resource = "vdi-datasets"

# Verify TLS certificates
tls_verify = true

# Per-request timeout in seconds
timeout_seconds = 300

# Header carrying the exporting user's id (omit if the service does not need it)
# user_id_header = "User-ID"

# Headers sent with every request. Values are never logged.
[service.headers]
Admin-Token = "${DEPOT_ADMIN_TOKEN}"
# Cookie = "auth_tkt=${DEPOT_AUTH_TICKET}"

# ============================================================================
# Status Polling
# ============================================================================
[polling]
# Wait before the second query; each later wait is multiplied by backoff_factor
initial_interval_secs = 1.0
backoff_factor = 1.5

# Waits never exceed this
max_interval_secs = 60.0

# Give up after this many seconds (defaults to 10 x max_interval_secs)
# timeout_secs = 600.0

# ============================================================================
# Logging
# ============================================================================
[logging]
# Also write JSON logs to rolling files
local_enabled = false
local_path = "logs"
# daily | hourly | never
local_rotation = "daily"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DepotConfig;

    #[test]
    fn test_init_args_defaults() {
        let args = InitArgs {
            output: "depot.toml".to_string(),
            with_examples: false,
            force: false,
        };

        assert_eq!(args.output, "depot.toml");
        assert!(!args.with_examples);
        assert!(!args.force);
    }

    #[test]
    fn test_generated_configs_parse() {
        for content in [
            InitArgs::generate_minimal_config(),
            InitArgs::generate_config_with_examples(),
        ] {
            let config: DepotConfig = toml::from_str(&content).unwrap();
            assert!(config.validate().is_ok());
            assert!(config.service.headers.contains_key("Admin-Token"));
        }
    }

    #[tokio::test]
    async fn test_init_refuses_to_overwrite() {
        let dir = tempfile::TempDir::new().unwrap();
        let output = dir.path().join("depot.toml");
        std::fs::write(&output, "keep me").unwrap();

        let args = InitArgs {
            output: output.to_string_lossy().into_owned(),
            with_examples: false,
            force: false,
        };

        assert_eq!(args.execute().await.unwrap(), 2);
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "keep me");
    }
}
