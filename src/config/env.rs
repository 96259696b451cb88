//! Environment variable handling and .env file management

use crate::error::{AppError, Result};
use std::path::Path;

/// Environment variable configuration manager
pub struct EnvManager;

impl EnvManager {
    /// Load .env file if it exists
    pub fn load_env_file(debug: bool) -> Result<()> {
        // Try to load .env from current directory
        if Path::new(".env").exists() {
            dotenv::from_filename(".env")
                .map_err(|e| AppError::config(format!("Failed to load .env file: {}", e)))?;

            if debug {
                println!("Loaded configuration from .env file");
            }
        } else if debug {
            println!("No .env file found, using defaults and CLI arguments");
        }

        Ok(())
    }

    /// Create example .env file content
    pub fn create_example_env_content() -> String {
        r#"# Endpoint Connectivity Tester Configuration
#
# This file contains environment variables that can be used to configure
# the connectivity tester. Values specified here will be used as defaults,
# but can be overridden by command-line arguments.

# Path to the endpoint catalog JSON file
# CATALOG_PATH=data/endpoints.json

# Extra endpoint URLs to probe alongside the catalog (comma-separated)
# EXTRA_URLS=http://ftp.example.net,http://media.example.net

# Number of probe attempts per endpoint
# ATTEMPT_COUNT=5

# Delay between attempts against the same endpoint (milliseconds)
# ATTEMPT_DELAY_MS=500

# Per-attempt timeout in seconds
# TIMEOUT_SECONDS=5

# Number of endpoints probed concurrently per batch
# BATCH_SIZE=10

# Delay between batches (milliseconds)
# BATCH_DELAY_MS=1000

# Resolve endpoint hostnames for reporting (true/false)
# RESOLVE_DNS=true

# Enable colored output (true/false)
# ENABLE_COLOR=true

# Path for the JSON result artifact
# OUTPUT_PATH=results.json
"#
        .to_string()
    }

    /// Save example .env file to disk
    pub fn save_example_env_file(path: &Path) -> Result<()> {
        use std::fs;

        let content = Self::create_example_env_content();
        fs::write(path, content)
            .map_err(|e| AppError::config(format!("Failed to write example .env file: {}", e)))?;

        Ok(())
    }

    /// Validate environment variable format before parsing
    pub fn validate_env_var(key: &str, value: &str) -> Result<()> {
        match key {
            "CATALOG_PATH" => {
                if value.trim().is_empty() {
                    return Err(AppError::config("CATALOG_PATH cannot be empty"));
                }
            }
            "EXTRA_URLS" => {
                for url in value.split(',') {
                    let url = url.trim();
                    if !url.is_empty() {
                        url::Url::parse(url).map_err(|e| {
                            AppError::config(format!("Invalid EXTRA_URLS entry '{}': {}", url, e))
                        })?;
                    }
                }
            }
            "ATTEMPT_COUNT" => {
                let count: u32 = value.parse().map_err(|e| {
                    AppError::config(format!("Invalid ATTEMPT_COUNT value '{}': {}", value, e))
                })?;
                if count == 0 || count > 20 {
                    return Err(AppError::config(format!(
                        "ATTEMPT_COUNT must be between 1 and 20, got: {}",
                        count
                    )));
                }
            }
            "ATTEMPT_DELAY_MS" => {
                let delay: u64 = value.parse().map_err(|e| {
                    AppError::config(format!("Invalid ATTEMPT_DELAY_MS value '{}': {}", value, e))
                })?;
                if delay > 10_000 {
                    return Err(AppError::config(format!(
                        "ATTEMPT_DELAY_MS cannot exceed 10000, got: {}",
                        delay
                    )));
                }
            }
            "TIMEOUT_SECONDS" => {
                let timeout: u64 = value.parse().map_err(|e| {
                    AppError::config(format!("Invalid TIMEOUT_SECONDS value '{}': {}", value, e))
                })?;
                if timeout == 0 || timeout > 300 {
                    return Err(AppError::config(format!(
                        "TIMEOUT_SECONDS must be between 1 and 300, got: {}",
                        timeout
                    )));
                }
            }
            "BATCH_SIZE" => {
                let size: usize = value.parse().map_err(|e| {
                    AppError::config(format!("Invalid BATCH_SIZE value '{}': {}", value, e))
                })?;
                if size == 0 {
                    return Err(AppError::config("BATCH_SIZE must be greater than 0"));
                }
            }
            "BATCH_DELAY_MS" => {
                value.parse::<u64>().map_err(|e| {
                    AppError::config(format!("Invalid BATCH_DELAY_MS value '{}': {}", value, e))
                })?;
            }
            "RESOLVE_DNS" | "ENABLE_COLOR" => {
                value.parse::<bool>().map_err(|e| {
                    AppError::config(format!("Invalid {} value '{}': {}", key, value, e))
                })?;
            }
            _ => {
                // Unknown environment variable, ignore
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_var_validation() {
        assert!(EnvManager::validate_env_var("CATALOG_PATH", "data/endpoints.json").is_ok());
        assert!(EnvManager::validate_env_var(
            "EXTRA_URLS",
            "http://a.example,https://b.example"
        )
        .is_ok());
        assert!(EnvManager::validate_env_var("ATTEMPT_COUNT", "5").is_ok());
        assert!(EnvManager::validate_env_var("TIMEOUT_SECONDS", "10").is_ok());
        assert!(EnvManager::validate_env_var("BATCH_SIZE", "10").is_ok());
        assert!(EnvManager::validate_env_var("ENABLE_COLOR", "true").is_ok());
        assert!(EnvManager::validate_env_var("RESOLVE_DNS", "false").is_ok());

        // Test invalid cases
        assert!(EnvManager::validate_env_var("CATALOG_PATH", "  ").is_err());
        assert!(EnvManager::validate_env_var("EXTRA_URLS", "not-a-url").is_err());
        assert!(EnvManager::validate_env_var("ATTEMPT_COUNT", "0").is_err());
        assert!(EnvManager::validate_env_var("ATTEMPT_COUNT", "21").is_err());
        assert!(EnvManager::validate_env_var("TIMEOUT_SECONDS", "0").is_err());
        assert!(EnvManager::validate_env_var("TIMEOUT_SECONDS", "301").is_err());
        assert!(EnvManager::validate_env_var("BATCH_SIZE", "0").is_err());
        assert!(EnvManager::validate_env_var("ENABLE_COLOR", "maybe").is_err());
    }

    #[test]
    fn test_unknown_vars_are_ignored() {
        assert!(EnvManager::validate_env_var("SOMETHING_ELSE", "whatever").is_ok());
    }

    #[test]
    fn test_example_env_content() {
        let content = EnvManager::create_example_env_content();

        assert!(content.contains("CATALOG_PATH="));
        assert!(content.contains("ATTEMPT_COUNT="));
        assert!(content.contains("TIMEOUT_SECONDS="));
        assert!(content.contains("BATCH_SIZE="));
        assert!(content.contains("ENABLE_COLOR="));
    }

    #[test]
    fn test_save_example_env_file() {
        let temp_file = tempfile::NamedTempFile::new().unwrap();
        let result = EnvManager::save_example_env_file(temp_file.path());

        assert!(result.is_ok());

        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        assert!(content.contains("Endpoint Connectivity Tester Configuration"));
    }
}
