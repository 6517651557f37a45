//! Configuration parsing from CLI arguments and environment variables

use crate::{
    cli::Cli,
    models::Config,
    error::Result,
    config::env::EnvManager,
};

/// Configuration parser that combines CLI arguments with environment variables
pub struct ConfigParser {
    cli: Cli,
}

impl ConfigParser {
    /// Create a new configuration parser with CLI arguments
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Parse and build the complete configuration
    pub fn parse(&self) -> Result<Config> {
        let mut config = Config::default();

        EnvManager::load_env_file(self.cli.debug)?;

        config.merge_from_env()?;

        self.apply_cli_overrides(&mut config);

        config.validate()?;

        Ok(config)
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(&self, config: &mut Config) {
        if let Some(ref path) = self.cli.servers {
            config.servers_file = path.clone();
        }

        if let Some(ref path) = self.cli.domains {
            config.domains_file = path.clone();
        }

        if let Some(ref dir) = self.cli.output_dir {
            config.output_dir = dir.clone();
        }

        if let Some(runs) = self.cli.runs {
            config.runs = runs;
        }

        if let Some(timeout_ms) = self.cli.timeout_ms {
            config.timeout_ms = timeout_ms;
        }

        if let Some(max_timeouts) = self.cli.max_timeouts {
            config.max_timeouts = max_timeouts;
        }

        if let Some(pause_ms) = self.cli.pause_ms {
            config.run_pause_ms = pause_ms;
        }

        if let Some(top) = self.cli.top {
            config.top_n = top;
        }

        if self.cli.no_save {
            config.write_results = false;
        }

        match self.cli.color_override() {
            Some(enabled) => config.enable_color = enabled,
            None => config.enable_color = config.enable_color && crate::cli::supports_color(),
        }

        // CLI-only
        config.verbose = self.cli.verbose;
        config.debug = self.cli.debug;
    }
}

/// Convenience function to load complete configuration from CLI arguments
pub fn load_config(cli: Cli) -> Result<Config> {
    let parser = ConfigParser::new(cli);
    parser.parse()
}

/// Display configuration summary for debug purposes
pub fn display_config_summary(config: &Config) -> String {
    let mut summary = Vec::new();

    summary.push(format!("Servers file: {}", config.servers_file.display()));
    summary.push(format!("Domains file: {}", config.domains_file.display()));
    summary.push(format!("Runs: {}", config.runs));
    summary.push(format!("Timeout: {}ms", config.timeout_ms));
    summary.push(format!("Max timeouts: {}", config.max_timeouts));
    summary.push(format!("Run pause: {}ms", config.run_pause_ms));
    summary.push(format!("Top performers: {}", config.top_n));
    if config.write_results {
        summary.push(format!("Output directory: {}", config.output_dir.display()));
    } else {
        summary.push("Output directory: (not saving)".to_string());
    }
    summary.push(format!("Color Output: {}", config.enable_color));
    summary.push(format!("Verbose: {}", config.verbose));
    summary.push(format!("Debug: {}", config.debug));

    summary.join("\n")
}
