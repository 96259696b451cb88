//! Command-line interface

use clap::{ArgAction, Parser};

/// Endpoint Connectivity Tester - probes a static endpoint catalog for
/// reachability and latency
#[derive(Parser, Debug, Clone)]
#[command(name = "ect")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the endpoint catalog JSON file
    #[arg(long, value_name = "PATH")]
    pub catalog: Option<String>,

    /// Extra endpoint URL to probe (can be used multiple times)
    #[arg(long = "url", action = ArgAction::Append, value_name = "URL")]
    pub urls: Vec<String>,

    /// Number of probe attempts per endpoint
    #[arg(short, long, value_parser = parse_attempt_count)]
    pub count: Option<u32>,

    /// Delay between attempts against the same endpoint (milliseconds)
    #[arg(long, value_name = "MS")]
    pub attempt_delay: Option<u64>,

    /// Per-attempt timeout in seconds
    #[arg(short, long, value_parser = parse_timeout)]
    pub timeout: Option<u64>,

    /// Number of endpoints probed concurrently per batch
    #[arg(short, long)]
    pub batch_size: Option<usize>,

    /// Delay between batches (milliseconds)
    #[arg(long, value_name = "MS")]
    pub batch_delay: Option<u64>,

    /// Fast mode: one attempt per endpoint, one batch covering everything
    #[arg(long)]
    pub fast: bool,

    /// Skip the DNS inspection step
    #[arg(long)]
    pub no_dns: bool,

    /// Write the JSON result artifact to this path
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<String>,

    /// Force colored output
    #[arg(long)]
    pub color: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Validate CLI arguments for conflicts and requirements
    pub fn validate(&self) -> Result<(), String> {
        // Check for conflicting color flags
        if self.color && self.no_color {
            return Err("Cannot specify both --color and --no-color".to_string());
        }

        if self.fast && self.count.is_some() {
            return Err("Cannot combine --fast with --count; fast mode always probes once".to_string());
        }

        Ok(())
    }

    /// Check if colors should be enabled
    pub fn use_colors(&self) -> bool {
        if self.color {
            true // Force color output when --color is specified
        } else if self.no_color {
            false // Disable color output when --no-color is specified
        } else {
            supports_color() // Use automatic detection
        }
    }

    /// Get configuration summary for display
    pub fn get_config_summary(&self) -> String {
        let mut summary = String::new();

        summary.push_str("Configuration Summary:\n");
        if let Some(ref catalog) = self.catalog {
            summary.push_str(&format!("  Catalog: {}\n", catalog));
        }
        if let Some(count) = self.count {
            summary.push_str(&format!("  Attempt count: {}\n", count));
        }
        if let Some(timeout) = self.timeout {
            summary.push_str(&format!("  Timeout: {}s\n", timeout));
        }
        if let Some(batch_size) = self.batch_size {
            summary.push_str(&format!("  Batch size: {}\n", batch_size));
        }
        summary.push_str(&format!("  Fast mode: {}\n", self.fast));
        summary.push_str(&format!("  Colored output: {}\n", self.use_colors()));
        summary.push_str(&format!("  Verbose mode: {}\n", self.verbose));
        summary.push_str(&format!("  Debug mode: {}\n", self.debug));

        if !self.urls.is_empty() {
            summary.push_str(&format!("  Extra URLs: {}\n", self.urls.join(", ")));
        }

        summary
    }
}

/// Parse attempt count with range validation
fn parse_attempt_count(s: &str) -> Result<u32, String> {
    s.parse::<u32>()
        .map_err(|_| format!("Invalid attempt count: {}", s))
        .and_then(|count| {
            if count == 0 {
                Err("Attempt count must be greater than 0".to_string())
            } else if count > 20 {
                Err("Attempt count cannot exceed 20".to_string())
            } else {
                Ok(count)
            }
        })
}

/// Parse timeout from seconds string
fn parse_timeout(s: &str) -> Result<u64, String> {
    // Reject strings with leading + sign or other invalid formats
    if s.starts_with('+') || s.starts_with("0x") || s.starts_with("0X") {
        return Err(format!("Invalid timeout: {}", s));
    }

    s.parse::<u64>()
        .map_err(|_| format!("Invalid timeout: {}", s))
        .and_then(|secs| {
            if secs == 0 {
                Err("Timeout must be greater than 0".to_string())
            } else if secs > 300 {
                Err("Timeout cannot exceed 300 seconds".to_string())
            } else {
                Ok(secs)
            }
        })
}

/// Detect whether the terminal supports colored output
fn supports_color() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    if let Ok(term) = std::env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_invocation_parses() {
        let cli = Cli::parse_from(["ect"]);
        assert!(cli.validate().is_ok());
        assert!(cli.catalog.is_none());
        assert!(cli.urls.is_empty());
        assert!(!cli.fast);
    }

    #[test]
    fn test_repeated_url_flag_accumulates() {
        let cli = Cli::parse_from([
            "ect",
            "--url",
            "http://a.example",
            "--url",
            "http://b.example",
        ]);
        assert_eq!(cli.urls.len(), 2);
    }

    #[test]
    fn test_color_conflict_rejected() {
        let cli = Cli::parse_from(["ect", "--color", "--no-color"]);
        assert!(cli.validate().is_err());
    }

    #[test]
    fn test_fast_count_conflict_rejected() {
        let cli = Cli::parse_from(["ect", "--fast", "--count", "3"]);
        assert!(cli.validate().is_err());
    }

    #[test]
    fn test_attempt_count_range() {
        assert!(parse_attempt_count("5").is_ok());
        assert!(parse_attempt_count("0").is_err());
        assert!(parse_attempt_count("21").is_err());
        assert!(parse_attempt_count("abc").is_err());
    }

    #[test]
    fn test_timeout_range() {
        assert!(parse_timeout("5").is_ok());
        assert!(parse_timeout("0").is_err());
        assert!(parse_timeout("301").is_err());
        assert!(parse_timeout("+5").is_err());
        assert!(parse_timeout("0x5").is_err());
    }

    #[test]
    fn test_use_colors_honors_flags() {
        let forced = Cli::parse_from(["ect", "--color"]);
        assert!(forced.use_colors());

        let disabled = Cli::parse_from(["ect", "--no-color"]);
        assert!(!disabled.use_colors());
    }

    #[test]
    fn test_config_summary_content() {
        let cli = Cli::parse_from(["ect", "--count", "3", "--url", "http://x.example"]);
        let summary = cli.get_config_summary();

        assert!(summary.contains("Attempt count: 3"));
        assert!(summary.contains("http://x.example"));
    }
}
