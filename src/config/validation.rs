//! Configuration validation with non-fatal warnings

use crate::error::Result;
use crate::models::Config;
use std::path::Path;

/// A non-fatal configuration warning shown before the run starts
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigWarning {
    pub message: String,
}

impl ConfigWarning {
    fn new<S: Into<String>>(message: S) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Format the warning for console display
    pub fn format(&self, use_color: bool) -> String {
        if use_color {
            use colored::Colorize;
            format!("{} {}", "warning:".yellow().bold(), self.message)
        } else {
            format!("warning: {}", self.message)
        }
    }
}

/// Validates a configuration beyond the hard limits, producing warnings
/// for settings that are legal but likely unintended
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration and collect warnings. Hard errors come
    /// from `Config::validate`; this only surfaces suspicious settings.
    pub fn validate(config: &Config) -> Result<Vec<ConfigWarning>> {
        config.validate()?;

        let mut warnings = Vec::new();

        if !Path::new(&config.catalog_path).exists() && config.extra_urls.is_empty() {
            warnings.push(ConfigWarning::new(format!(
                "catalog file '{}' does not exist and no --url endpoints were given; the run will fail at load time",
                config.catalog_path
            )));
        }

        if config.batch_size > 100 {
            warnings.push(ConfigWarning::new(format!(
                "batch size {} is very large; concurrent probes may overwhelm the local network",
                config.batch_size
            )));
        }

        if config.timeout_seconds > 30 {
            warnings.push(ConfigWarning::new(format!(
                "timeout of {}s is long; unreachable endpoints will hold their batch open for that duration",
                config.timeout_seconds
            )));
        }

        if config.fast && config.attempt_count != crate::defaults::DEFAULT_ATTEMPT_COUNT {
            warnings.push(ConfigWarning::new(
                "fast mode always probes each endpoint once; --count is ignored",
            ));
        }

        if config.fast && config.resolve_dns {
            warnings.push(ConfigWarning::new(
                "fast mode skips DNS inspection; resolved addresses will not be reported",
            ));
        }

        Ok(warnings)
    }
}

/// Convenience function matching the parser's free-function style
pub fn validate_config(config: &Config) -> Result<Vec<ConfigWarning>> {
    ConfigValidator::validate(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_existing_catalog() -> Config {
        // Point at a file that always exists so the catalog warning
        // does not leak into unrelated assertions
        Config {
            catalog_path: "Cargo.toml".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_catalog_without_adhoc_urls_warns() {
        let config = Config {
            catalog_path: "/nonexistent/endpoints.json".to_string(),
            ..Default::default()
        };
        let warnings = validate_config(&config).unwrap();

        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("does not exist"));
    }

    #[test]
    fn test_missing_catalog_with_adhoc_urls_is_fine() {
        let config = Config {
            catalog_path: "/nonexistent/endpoints.json".to_string(),
            extra_urls: vec!["http://adhoc.example".to_string()],
            ..Default::default()
        };
        let warnings = validate_config(&config).unwrap();
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_clean_config_has_no_warnings() {
        let config = config_with_existing_catalog();
        let warnings = validate_config(&config).unwrap();
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_large_batch_size_warns() {
        let mut config = config_with_existing_catalog();
        config.batch_size = 200;

        let warnings = validate_config(&config).unwrap();
        assert!(warnings.iter().any(|w| w.message.contains("very large")));
    }

    #[test]
    fn test_long_timeout_warns() {
        let mut config = config_with_existing_catalog();
        config.timeout_seconds = 60;

        let warnings = validate_config(&config).unwrap();
        assert!(warnings.iter().any(|w| w.message.contains("is long")));
    }

    #[test]
    fn test_fast_mode_count_conflict_warns() {
        let mut config = config_with_existing_catalog();
        config.fast = true;
        config.attempt_count = 3;

        let warnings = validate_config(&config).unwrap();
        assert!(warnings.iter().any(|w| w.message.contains("--count is ignored")));
    }

    #[test]
    fn test_invalid_config_is_a_hard_error() {
        let mut config = Config::default();
        config.attempt_count = 0;

        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_warning_formatting() {
        let warning = ConfigWarning::new("something looks off");

        let plain = warning.format(false);
        assert!(plain.starts_with("warning:"));

        let colored_output = warning.format(true);
        assert!(colored_output.contains("something looks off"));
    }
}
