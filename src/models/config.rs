//! Configuration data model and validation

use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the endpoint catalog JSON file
    #[serde(default = "default_catalog_path")]
    pub catalog_path: String,

    /// Ad-hoc endpoint URLs appended to the catalog
    #[serde(default)]
    pub extra_urls: Vec<String>,

    /// Number of probe attempts per endpoint
    #[serde(default = "default_attempt_count")]
    pub attempt_count: u32,

    /// Delay between attempts against the same endpoint (milliseconds)
    #[serde(default = "default_attempt_delay_ms")]
    pub attempt_delay_ms: u64,

    /// Per-attempt timeout duration (seconds)
    #[serde(default = "default_timeout_secs")]
    pub timeout_seconds: u64,

    /// Number of endpoints probed concurrently per batch
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Delay between batches (milliseconds)
    #[serde(default = "default_batch_delay_ms")]
    pub batch_delay_ms: u64,

    /// Fast mode: one attempt per endpoint, a single batch covering
    /// every endpoint, no delays, DNS inspection off
    #[serde(default)]
    pub fast: bool,

    /// Resolve each endpoint's hostname for reporting
    #[serde(default = "default_resolve_dns")]
    pub resolve_dns: bool,

    /// Optional path for the JSON result artifact
    #[serde(default)]
    pub output_path: Option<String>,

    /// Enable colored terminal output
    #[serde(default = "default_enable_color")]
    pub enable_color: bool,

    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,

    /// Enable debug output
    #[serde(default)]
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: default_catalog_path(),
            extra_urls: Vec::new(),
            attempt_count: default_attempt_count(),
            attempt_delay_ms: default_attempt_delay_ms(),
            timeout_seconds: default_timeout_secs(),
            batch_size: default_batch_size(),
            batch_delay_ms: default_batch_delay_ms(),
            fast: false,
            resolve_dns: default_resolve_dns(),
            output_path: None,
            enable_color: default_enable_color(),
            verbose: false,
            debug: false,
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the per-attempt timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Get the inter-attempt delay as a Duration
    pub fn attempt_delay(&self) -> Duration {
        Duration::from_millis(self.attempt_delay_ms)
    }

    /// Get the inter-batch delay as a Duration
    pub fn batch_delay(&self) -> Duration {
        Duration::from_millis(self.batch_delay_ms)
    }

    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Result<()> {
        if self.catalog_path.trim().is_empty() {
            return Err(AppError::config("Catalog path cannot be empty"));
        }

        for url in &self.extra_urls {
            if url.is_empty() {
                return Err(AppError::config("Extra URL cannot be empty"));
            }

            if let Err(e) = url::Url::parse(url) {
                return Err(AppError::config(format!("Invalid extra URL '{}': {}", url, e)));
            }
        }

        if self.attempt_count == 0 {
            return Err(AppError::config("Attempt count must be greater than 0"));
        }

        if self.attempt_count > 20 {
            return Err(AppError::config("Attempt count cannot exceed 20"));
        }

        if self.timeout_seconds == 0 {
            return Err(AppError::config("Timeout must be greater than 0"));
        }

        if self.timeout_seconds > 300 {
            return Err(AppError::config("Timeout cannot exceed 300 seconds"));
        }

        if self.batch_size == 0 {
            return Err(AppError::config("Batch size must be greater than 0"));
        }

        if self.attempt_delay_ms > 10_000 {
            return Err(AppError::config("Attempt delay cannot exceed 10000 ms"));
        }

        if self.batch_delay_ms > 60_000 {
            return Err(AppError::config("Batch delay cannot exceed 60000 ms"));
        }

        Ok(())
    }

    /// Merge environment variables into this configuration
    pub fn merge_from_env(&mut self) -> Result<()> {
        if let Ok(catalog_path) = std::env::var("CATALOG_PATH") {
            if !catalog_path.trim().is_empty() {
                self.catalog_path = catalog_path.trim().to_string();
            }
        }

        if let Ok(extra_urls) = std::env::var("EXTRA_URLS") {
            self.extra_urls = extra_urls
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        if let Ok(attempt_count) = std::env::var("ATTEMPT_COUNT") {
            self.attempt_count = attempt_count.parse().map_err(|e| {
                AppError::config(format!("Invalid ATTEMPT_COUNT value '{}': {}", attempt_count, e))
            })?;
        }

        if let Ok(delay) = std::env::var("ATTEMPT_DELAY_MS") {
            self.attempt_delay_ms = delay.parse().map_err(|e| {
                AppError::config(format!("Invalid ATTEMPT_DELAY_MS value '{}': {}", delay, e))
            })?;
        }

        if let Ok(timeout) = std::env::var("TIMEOUT_SECONDS") {
            self.timeout_seconds = timeout.parse().map_err(|e| {
                AppError::config(format!("Invalid TIMEOUT_SECONDS value '{}': {}", timeout, e))
            })?;
        }

        if let Ok(batch_size) = std::env::var("BATCH_SIZE") {
            self.batch_size = batch_size.parse().map_err(|e| {
                AppError::config(format!("Invalid BATCH_SIZE value '{}': {}", batch_size, e))
            })?;
        }

        if let Ok(delay) = std::env::var("BATCH_DELAY_MS") {
            self.batch_delay_ms = delay.parse().map_err(|e| {
                AppError::config(format!("Invalid BATCH_DELAY_MS value '{}': {}", delay, e))
            })?;
        }

        if let Ok(resolve_dns) = std::env::var("RESOLVE_DNS") {
            self.resolve_dns = resolve_dns.parse().map_err(|e| {
                AppError::config(format!("Invalid RESOLVE_DNS value '{}': {}", resolve_dns, e))
            })?;
        }

        if let Ok(enable_color) = std::env::var("ENABLE_COLOR") {
            self.enable_color = enable_color.parse().map_err(|e| {
                AppError::config(format!("Invalid ENABLE_COLOR value '{}': {}", enable_color, e))
            })?;
        }

        if let Ok(output_path) = std::env::var("OUTPUT_PATH") {
            if !output_path.trim().is_empty() {
                self.output_path = Some(output_path.trim().to_string());
            }
        }

        Ok(())
    }
}

// Default value functions for serde
fn default_catalog_path() -> String {
    crate::defaults::DEFAULT_CATALOG_PATH.to_string()
}

fn default_attempt_count() -> u32 {
    crate::defaults::DEFAULT_ATTEMPT_COUNT
}

fn default_attempt_delay_ms() -> u64 {
    crate::defaults::DEFAULT_ATTEMPT_DELAY.as_millis() as u64
}

fn default_timeout_secs() -> u64 {
    crate::defaults::DEFAULT_TIMEOUT.as_secs()
}

fn default_batch_size() -> usize {
    crate::defaults::default_batch_size()
}

fn default_batch_delay_ms() -> u64 {
    crate::defaults::DEFAULT_BATCH_DELAY.as_millis() as u64
}

fn default_resolve_dns() -> bool {
    true
}

fn default_enable_color() -> bool {
    crate::defaults::DEFAULT_ENABLE_COLOR
}
