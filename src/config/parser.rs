//! Configuration parsing from CLI arguments and environment variables

use crate::{cli::Cli, config::env::EnvManager, error::Result, models::Config};

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
        // Start with default configuration
        let mut config = Config::default();

        // Load from environment file if it exists
        self.load_env_file()?;

        // Merge environment variables into config
        config.merge_from_env()?;

        // Override with CLI arguments
        self.apply_cli_overrides(&mut config)?;

        // Validate the final configuration
        config.validate()?;

        Ok(config)
    }

    /// Load .env file if it exists
    fn load_env_file(&self) -> Result<()> {
        EnvManager::load_env_file(self.cli.debug)
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(&self, config: &mut Config) -> Result<()> {
        if let Some(ref catalog) = self.cli.catalog {
            config.catalog_path = catalog.clone();
        }

        if !self.cli.urls.is_empty() {
            config.extra_urls = self.cli.urls.clone();
        }

        if let Some(count) = self.cli.count {
            config.attempt_count = count;
        }

        if let Some(delay) = self.cli.attempt_delay {
            config.attempt_delay_ms = delay;
        }

        if let Some(timeout) = self.cli.timeout {
            config.timeout_seconds = timeout;
        }

        if let Some(batch_size) = self.cli.batch_size {
            config.batch_size = batch_size;
        }

        if let Some(delay) = self.cli.batch_delay {
            config.batch_delay_ms = delay;
        }

        if self.cli.fast {
            config.fast = true;
        }

        if self.cli.no_dns {
            config.resolve_dns = false;
        }

        if let Some(ref output) = self.cli.output {
            config.output_path = Some(output.clone());
        }

        // Override color setting if --no-color is specified
        if self.cli.no_color {
            config.enable_color = false;
        } else if self.cli.color {
            config.enable_color = true;
        }

        // Set verbose and debug flags (these are CLI-only)
        config.verbose = self.cli.verbose;
        config.debug = self.cli.debug;

        if config.debug {
            println!("Applied CLI overrides to configuration");
            println!(
                "Final config: attempts={}, timeout={}s, batch_size={}, fast={}",
                config.attempt_count, config.timeout_seconds, config.batch_size, config.fast
            );
        }

        Ok(())
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

    summary.push(format!("Catalog: {}", config.catalog_path));
    if !config.extra_urls.is_empty() {
        summary.push(format!("Extra URLs: {}", config.extra_urls.join(", ")));
    }
    summary.push(format!("Attempts: {}", config.attempt_count));
    summary.push(format!("Attempt Delay: {}ms", config.attempt_delay_ms));
    summary.push(format!("Timeout: {}s", config.timeout_seconds));
    summary.push(format!("Batch Size: {}", config.batch_size));
    summary.push(format!("Batch Delay: {}ms", config.batch_delay_ms));
    summary.push(format!("Fast Mode: {}", config.fast));
    summary.push(format!("Resolve DNS: {}", config.resolve_dns));
    summary.push(format!("Color Output: {}", config.enable_color));
    summary.push(format!("Verbose: {}", config.verbose));
    summary.push(format!("Debug: {}", config.debug));

    summary.join("\n")
}
