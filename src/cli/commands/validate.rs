//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Depot configuration file.

use crate::config::{load_config, DepotConfig};
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates before returning
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(e.exit_code());
            }
        };

        println!("✅ Configuration is valid");
        println!();
        print_summary(&config);
        Ok(0)
    }
}

fn print_summary(config: &DepotConfig) {
    let service = &config.service;
    let polling = &config.polling;

    println!("Configuration Summary:");
    println!("  Log Level: {}", config.application.log_level);
    println!("  Work Directory: {}", config.application.work_dir().display());
    println!("  Service: {}", service.collection_url());
    println!("  TLS Verify: {}", service.tls_verify);
    println!("  Request Timeout: {}s", service.timeout_seconds);

    // Header values are secrets
    let headers: Vec<&str> = service.headers.keys().map(String::as_str).collect();
    if headers.is_empty() {
        println!("  Headers: (none)");
    } else {
        println!("  Headers: {}", headers.join(", "));
    }
    if let Some(header) = &service.user_id_header {
        println!("  User Id Header: {header}");
    }

    println!(
        "  Polling: {:.1}s initial, x{}, {:.1}s max, {:.0}s timeout",
        polling.initial_interval_secs,
        polling.backoff_factor,
        polling.max_interval_secs,
        polling.timeout().as_secs_f64()
    );
    if config.logging.local_enabled {
        println!(
            "  Log Files: {} ({})",
            config.logging.local_path, config.logging.local_rotation
        );
    }
    println!();
}
