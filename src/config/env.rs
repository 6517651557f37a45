//! Environment variable handling and .env file management

use crate::error::{AppError, Result};
use std::path::Path;

/// Environment variable configuration manager
pub struct EnvManager;

impl EnvManager {
    /// Load .env from the current directory if it exists
    pub fn load_env_file(debug: bool) -> Result<()> {
        Self::load_env_file_from(Path::new(".env"), debug)
    }

    /// Load an env file if it exists; variables already set in the process win
    pub fn load_env_file_from(path: &Path, debug: bool) -> Result<()> {
        if path.exists() {
            dotenv::from_filename(path)
                .map_err(|e| AppError::config(format!("Failed to load {} file: {}", path.display(), e)))?;

            if debug {
                eprintln!("Loaded configuration from {}", path.display());
            }
        } else if debug {
            eprintln!("No {} file found, using defaults and CLI arguments", path.display());
        }

        Ok(())
    }

    /// Validate environment variable format before parsing
    pub fn validate_env_var(key: &str, value: &str) -> Result<()> {
        match key {
            "DNSBENCH_SERVERS_FILE" | "DNSBENCH_DOMAINS_FILE" | "DNSBENCH_OUTPUT_DIR" => {
                if value.trim().is_empty() {
                    return Err(AppError::config(format!("{} cannot be empty", key)));
                }
            }
            "DNSBENCH_RUNS" => {
                Self::check_range(key, value, 1, u64::from(crate::defaults::MAX_RUNS))?;
            }
            "DNSBENCH_TIMEOUT_MS" => {
                Self::check_range(key, value, 1, crate::defaults::MAX_TIMEOUT_MS)?;
            }
            "DNSBENCH_MAX_TIMEOUTS" => {
                Self::check_range(key, value, 1, u64::from(u32::MAX))?;
            }
            "DNSBENCH_TOP" => {
                Self::check_range(key, value, 1, u64::from(u32::MAX))?;
            }
            "DNSBENCH_RUN_PAUSE_MS" => {
                value.trim().parse::<u64>()
                    .map_err(|e| AppError::config(format!("Invalid {} value '{}': {}", key, value, e)))?;
            }
            "ENABLE_COLOR" => {
                value.trim().parse::<bool>()
                    .map_err(|e| AppError::config(format!("Invalid ENABLE_COLOR value '{}': {}", value, e)))?;
            }
            _ => {}
        }

        Ok(())
    }

    fn check_range(key: &str, value: &str, min: u64, max: u64) -> Result<()> {
        let parsed: u64 = value.trim().parse()
            .map_err(|e| AppError::config(format!("Invalid {} value '{}': {}", key, value, e)))?;
        if parsed < min || parsed > max {
            return Err(AppError::config(format!("{} must be between {} and {}, got: {}", key, min, max, parsed)));
        }
        Ok(())
    }

    /// Get list of all supported environment variables with descriptions
    pub fn get_supported_env_vars() -> Vec<(&'static str, &'static str, &'static str)> {
        vec![
            ("DNSBENCH_SERVERS_FILE", "JSON file listing the servers", "servers.json"),
            ("DNSBENCH_DOMAINS_FILE", "Text file listing the domains", "domains.txt"),
            ("DNSBENCH_OUTPUT_DIR", "Directory for result files", "results"),
            ("DNSBENCH_RUNS", "Passes over the domain list per server (1-1000)", "10"),
            ("DNSBENCH_TIMEOUT_MS", "Per-query timeout in ms (1-60000)", "800"),
            ("DNSBENCH_MAX_TIMEOUTS", "Timeouts before a server is abandoned", "1"),
            ("DNSBENCH_RUN_PAUSE_MS", "Pause between runs in ms", "100"),
            ("DNSBENCH_TOP", "Size of the top performers table", "5"),
            ("ENABLE_COLOR", "Enable colored output", "true"),
        ]
    }

    /// Display environment variable help
    pub fn display_env_help() -> String {
        let mut help = String::new();
        help.push_str("Supported Environment Variables:\n\n");

        for (var, description, example) in Self::get_supported_env_vars() {
            help.push_str(&format!("  {:<22} {}\n", var, description));
            help.push_str(&format!("  {:<22} Example: {}\n\n", "", example));
        }

        help.push_str("Configuration Priority (highest to lowest):\n");
        help.push_str("  1. Command-line arguments\n");
        help.push_str("  2. Environment variables\n");
        help.push_str("  3. .env file values\n");
        help.push_str("  4. Default values\n");

        help
    }

    /// Validate all currently set environment variables
    pub fn validate_current_env() -> Vec<String> {
        let mut warnings = Vec::new();

        for (var_name, _, _) in Self::get_supported_env_vars() {
            if let Ok(value) = std::env::var(var_name) {
                if let Err(e) = Self::validate_env_var(var_name, &value) {
                    warnings.push(format!("Warning: {}", e));
                }
            }
        }

        warnings
    }
}
