//! Structured logging for the connectivity tester
//!
//! Provides leveled console logging with an optional JSON format, a per-run
//! correlation ID, and a small probe-event logger used by the dispatcher.

use crate::models::Config;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::{self, Write};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Log level enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    /// Debug level - detailed information for debugging
    Debug = 0,
    /// Info level - general application information
    Info = 1,
    /// Warning level - potentially harmful situations
    Warn = 2,
    /// Error level - error events but application can continue
    Error = 3,
}

impl LogLevel {
    /// Get log level name as string
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }

    /// Get ANSI color code for console output
    pub fn color_code(&self) -> &'static str {
        match self {
            LogLevel::Debug => "\x1b[36m", // Cyan
            LogLevel::Info => "\x1b[32m",  // Green
            LogLevel::Warn => "\x1b[33m",  // Yellow
            LogLevel::Error => "\x1b[31m", // Red
        }
    }

    /// Reset ANSI color code
    pub fn reset_code() -> &'static str {
        "\x1b[0m"
    }
}

/// Log entry structure for structured logging
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    /// Timestamp when log entry was created
    pub timestamp: DateTime<Utc>,
    /// Log level
    pub level: LogLevel,
    /// Log message
    pub message: String,
    /// Logger name/component
    pub logger: String,
    /// Run correlation ID
    pub run_id: Option<String>,
    /// Additional structured fields
    pub fields: HashMap<String, serde_json::Value>,
}

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LogFormat {
    /// Human-readable console format
    Console,
    /// JSON format for structured logging
    Json,
}

/// Shared logging context for run correlation
#[derive(Debug, Default)]
struct LogContext {
    /// Correlation ID for the whole run
    run_id: Option<String>,
    /// Additional context fields attached to every entry
    context_fields: HashMap<String, serde_json::Value>,
}

/// Logger implementation with console and JSON output
pub struct Logger {
    /// Minimum log level to output
    min_level: LogLevel,
    /// Whether to use colored output
    use_color: bool,
    /// Output format
    format: LogFormat,
    /// Logger name
    name: String,
    /// Shared context storage
    context: Arc<RwLock<LogContext>>,
}

impl Logger {
    /// Create a new logger
    pub fn new(name: String) -> Self {
        Self {
            min_level: LogLevel::Info,
            use_color: true,
            format: LogFormat::Console,
            name,
            context: Arc::new(RwLock::new(LogContext::default())),
        }
    }

    /// Create a logger configured from the application config
    pub fn with_config(name: String, config: &Config) -> Self {
        let min_level = if config.debug {
            LogLevel::Debug
        } else if config.verbose {
            LogLevel::Info
        } else {
            LogLevel::Warn
        };

        Self {
            min_level,
            use_color: config.enable_color,
            format: if config.debug {
                LogFormat::Json
            } else {
                LogFormat::Console
            },
            name,
            context: Arc::new(RwLock::new(LogContext::default())),
        }
    }

    /// Set minimum log level
    pub fn set_level(&mut self, level: LogLevel) {
        self.min_level = level;
    }

    /// Set output format
    pub fn set_format(&mut self, format: LogFormat) {
        self.format = format;
    }

    /// Generate and attach a run correlation ID, returning it
    pub async fn start_run(&self) -> String {
        let run_id = Uuid::new_v4().to_string();
        let mut context = self.context.write().await;
        context.run_id = Some(run_id.clone());
        run_id
    }

    /// Add context field for all subsequent log entries
    pub async fn add_context_field<T: Serialize>(&self, key: String, value: T) {
        if let Ok(json_value) = serde_json::to_value(value) {
            let mut context = self.context.write().await;
            context.context_fields.insert(key, json_value);
        }
    }

    /// Create a log entry builder
    pub fn log(&self, level: LogLevel, message: &str) -> LogEntryBuilder {
        LogEntryBuilder::new(self, level, message.to_string())
    }

    /// Convenience methods for different log levels
    pub fn debug(&self, message: &str) -> LogEntryBuilder {
        self.log(LogLevel::Debug, message)
    }

    pub fn info(&self, message: &str) -> LogEntryBuilder {
        self.log(LogLevel::Info, message)
    }

    pub fn warn(&self, message: &str) -> LogEntryBuilder {
        self.log(LogLevel::Warn, message)
    }

    pub fn error(&self, message: &str) -> LogEntryBuilder {
        self.log(LogLevel::Error, message)
    }

    /// Check if a log level would be output
    pub fn would_log(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    /// Write log entry to output
    async fn write_entry(&self, mut entry: LogEntry) {
        if entry.level < self.min_level {
            return;
        }

        // Add context fields
        let context = self.context.read().await;
        if let Some(run_id) = &context.run_id {
            entry.run_id = Some(run_id.clone());
        }
        for (key, value) in &context.context_fields {
            entry.fields.insert(key.clone(), value.clone());
        }
        drop(context);

        let output = match self.format {
            LogFormat::Console => self.format_console(&entry),
            LogFormat::Json => self.format_json(&entry),
        };

        // Write to stderr for errors/warnings, stdout for others
        if entry.level >= LogLevel::Warn {
            let _ = writeln!(io::stderr(), "{}", output);
        } else {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }

    /// Format log entry for console output
    fn format_console(&self, entry: &LogEntry) -> String {
        let timestamp = entry.timestamp.format("%Y-%m-%d %H:%M:%S%.3f");
        let level_str = entry.level.as_str();

        let formatted_level = if self.use_color {
            format!(
                "{}{:>5}{}",
                entry.level.color_code(),
                level_str,
                LogLevel::reset_code()
            )
        } else {
            format!("{:>5}", level_str)
        };

        let mut output = format!(
            "{} {} [{}] {}",
            timestamp, formatted_level, entry.logger, entry.message
        );

        // Show the first 8 chars of the run ID when attached
        if let Some(run_id) = &entry.run_id {
            if run_id.len() >= 8 {
                output.push_str(&format!(" [{}]", &run_id[..8]));
            }
        }

        if !entry.fields.is_empty() {
            let mut fields: Vec<String> = entry
                .fields
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect();
            fields.sort();
            output.push_str(&format!(" {{{}}}", fields.join(", ")));
        }

        output
    }

    /// Format log entry as JSON
    fn format_json(&self, entry: &LogEntry) -> String {
        match serde_json::to_string(entry) {
            Ok(json) => json,
            Err(_) => format!(
                "{{\"error\": \"Failed to serialize log entry\", \"message\": \"{}\"}}",
                entry.message
            ),
        }
    }
}

/// Builder pattern for creating log entries
pub struct LogEntryBuilder<'a> {
    logger: &'a Logger,
    entry: LogEntry,
}

impl<'a> LogEntryBuilder<'a> {
    fn new(logger: &'a Logger, level: LogLevel, message: String) -> Self {
        Self {
            logger,
            entry: LogEntry {
                timestamp: Utc::now(),
                level,
                message,
                logger: logger.name.clone(),
                run_id: None,
                fields: HashMap::new(),
            },
        }
    }

    /// Add a structured field
    pub fn field<T: Serialize>(mut self, key: &str, value: T) -> Self {
        if let Ok(json_value) = serde_json::to_value(value) {
            self.entry.fields.insert(key.to_string(), json_value);
        }
        self
    }

    /// Emit the entry
    pub async fn log(self) {
        self.logger.write_entry(self.entry).await;
    }
}

/// Specialized logger for probe events
pub struct ProbeLogger {
    logger: Logger,
}

impl ProbeLogger {
    /// Create a probe logger from the application config
    pub fn with_config(config: &Config) -> Self {
        Self {
            logger: Logger::with_config("probe".to_string(), config),
        }
    }

    /// Access the underlying logger
    pub fn inner(&self) -> &Logger {
        &self.logger
    }

    /// Log the start of a batch
    pub async fn batch_started(&self, index: usize, total: usize, size: usize) {
        self.logger
            .debug(&format!("Dispatching batch {}/{}", index + 1, total))
            .field("batch_size", size)
            .log()
            .await;
    }

    /// Log a completed attempt
    pub async fn attempt_finished(&self, address: &str, success: bool, elapsed_ms: f64) {
        self.logger
            .debug(&format!("Probe attempt finished for {}", address))
            .field("success", success)
            .field("elapsed_ms", elapsed_ms)
            .log()
            .await;
    }

    /// Log a classified endpoint
    pub async fn endpoint_classified(&self, address: &str, status: &str, loss_pct: f64) {
        self.logger
            .info(&format!("Endpoint {} classified as {}", address, status))
            .field("loss_pct", loss_pct)
            .log()
            .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_ordering() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Error);
    }

    #[test]
    fn test_log_level_names() {
        assert_eq!(LogLevel::Debug.as_str(), "DEBUG");
        assert_eq!(LogLevel::Info.as_str(), "INFO");
        assert_eq!(LogLevel::Warn.as_str(), "WARN");
        assert_eq!(LogLevel::Error.as_str(), "ERROR");
    }

    #[test]
    fn test_logger_level_filtering() {
        let mut logger = Logger::new("test".to_string());
        logger.set_level(LogLevel::Warn);

        assert!(!logger.would_log(LogLevel::Debug));
        assert!(!logger.would_log(LogLevel::Info));
        assert!(logger.would_log(LogLevel::Warn));
        assert!(logger.would_log(LogLevel::Error));
    }

    #[tokio::test]
    async fn test_run_id_attached() {
        let logger = Logger::new("test".to_string());
        let run_id = logger.start_run().await;
        assert_eq!(run_id.len(), 36); // UUID v4 string

        let context = logger.context.read().await;
        assert_eq!(context.run_id.as_deref(), Some(run_id.as_str()));
    }

    #[test]
    fn test_console_format_contains_fields() {
        let logger = Logger::new("probe".to_string());
        let mut fields = HashMap::new();
        fields.insert(
            "elapsed_ms".to_string(),
            serde_json::Value::from(12.5_f64),
        );

        let entry = LogEntry {
            timestamp: Utc::now(),
            level: LogLevel::Info,
            message: "probe finished".to_string(),
            logger: "probe".to_string(),
            run_id: None,
            fields,
        };

        let output = logger.format_console(&entry);
        assert!(output.contains("probe finished"));
        assert!(output.contains("elapsed_ms"));
    }

    #[test]
    fn test_json_format_is_valid_json() {
        let logger = Logger::new("probe".to_string());
        let entry = LogEntry {
            timestamp: Utc::now(),
            level: LogLevel::Error,
            message: "boom".to_string(),
            logger: "probe".to_string(),
            run_id: Some(Uuid::new_v4().to_string()),
            fields: HashMap::new(),
        };

        let output = logger.format_json(&entry);
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["message"], "boom");
    }
}
