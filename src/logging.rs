//! Structured logging for the DNS latency benchmark
//!
//! This module provides:
//! - Leveled logging with console, JSON and compact output formats
//! - A builder API for attaching structured fields to an entry
//! - Session IDs so all entries of one invocation can be correlated
//! - [`BenchLogger`], which knows how to describe benchmark events

use crate::error::{AppError, Result};
use crate::models::{BenchmarkResult, Config, ExceededEvent, Server};
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
    /// Trace level - most detailed
    Trace = 0,
    /// Debug level - per-query detail
    Debug = 1,
    /// Info level - per-server progress
    Info = 2,
    /// Warning level - servers abandoned or dropped
    Warn = 3,
    /// Error level - error events but application can continue
    Error = 4,
    /// Fatal level - the run cannot continue
    Fatal = 5,
}

impl LogLevel {
    /// Get log level name as string
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Fatal => "FATAL",
        }
    }

    /// Get ANSI color code for console output
    pub fn color_code(&self) -> &'static str {
        match self {
            LogLevel::Trace => "\x1b[37m",    // White
            LogLevel::Debug => "\x1b[36m",    // Cyan
            LogLevel::Info => "\x1b[32m",     // Green
            LogLevel::Warn => "\x1b[33m",     // Yellow
            LogLevel::Error => "\x1b[31m",    // Red
            LogLevel::Fatal => "\x1b[35m",    // Magenta
        }
    }

    /// Reset ANSI color code
    pub fn reset_code() -> &'static str {
        "\x1b[0m"
    }
}

impl std::str::FromStr for LogLevel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "TRACE" => Ok(LogLevel::Trace),
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARN" | "WARNING" => Ok(LogLevel::Warn),
            "ERROR" => Ok(LogLevel::Error),
            "FATAL" => Ok(LogLevel::Fatal),
            _ => Err(AppError::parse(format!("Invalid log level: {}", s))),
        }
    }
}

/// Log entry structure for structured logging
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub message: String,
    /// Logger name/component
    pub logger: String,
    /// Additional structured fields
    pub fields: HashMap<String, serde_json::Value>,
    pub location: Option<LogLocation>,
}

/// Source code location information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogLocation {
    pub file: String,
    pub line: u32,
    pub module: Option<String>,
}

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LogFormat {
    /// Human-readable console format
    Console,
    /// JSON format for structured logging
    Json,
    /// Compact single-line format
    Compact,
}

/// Shared logging context
#[derive(Debug, Default)]
struct LogContext {
    session_id: Option<String>,
    /// Fields attached to every entry
    context_fields: HashMap<String, serde_json::Value>,
}

/// Logger implementation with multiple output formats
#[derive(Clone)]
pub struct Logger {
    min_level: LogLevel,
    use_color: bool,
    include_location: bool,
    format: LogFormat,
    name: String,
    context: Arc<RwLock<LogContext>>,
}

impl Logger {
    /// Create a new logger
    pub fn new(name: String) -> Self {
        Self {
            min_level: LogLevel::Info,
            use_color: true,
            include_location: false,
            format: LogFormat::Console,
            name,
            context: Arc::new(RwLock::new(LogContext::default())),
        }
    }

    /// Create a logger whose verbosity follows the configuration
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
            include_location: config.debug,
            format: if config.debug { LogFormat::Json } else { LogFormat::Console },
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

    /// Enable or disable colored output
    pub fn set_color(&mut self, use_color: bool) {
        self.use_color = use_color;
    }

    pub async fn set_session_id(&self, session_id: String) {
        let mut context = self.context.write().await;
        context.session_id = Some(session_id);
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

    pub fn trace(&self, message: &str) -> LogEntryBuilder {
        self.log(LogLevel::Trace, message)
    }

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

    pub fn fatal(&self, message: &str) -> LogEntryBuilder {
        self.log(LogLevel::Fatal, message)
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

        let context = self.context.read().await;
        if let Some(session_id) = &context.session_id {
            entry.fields.insert("session_id".to_string(), serde_json::Value::String(session_id.clone()));
        }

        for (key, value) in &context.context_fields {
            entry.fields.insert(key.clone(), value.clone());
        }
        drop(context);

        let output = match self.format {
            LogFormat::Console => self.format_console(&entry),
            LogFormat::Json => self.format_json(&entry),
            LogFormat::Compact => self.format_compact(&entry),
        };

        // Warnings and above go to stderr so they never interleave with result tables
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
            format!("{}{:>5}{}", entry.level.color_code(), level_str, LogLevel::reset_code())
        } else {
            format!("{:>5}", level_str)
        };

        let mut output = format!("{} {} [{}] {}",
            timestamp,
            formatted_level,
            entry.logger,
            entry.message
        );

        if !entry.fields.is_empty() {
            let mut fields: Vec<String> = entry.fields.iter()
                .filter(|(k, _)| k.as_str() != "session_id")
                .map(|(k, v)| format!("{}={}", k, v))
                .collect();
            fields.sort();
            if !fields.is_empty() {
                output.push_str(&format!(" {{{}}}", fields.join(", ")));
            }
        }

        if self.include_location {
            if let Some(location) = &entry.location {
                output.push_str(&format!(" @ {}:{}", location.file, location.line));
            }
        }

        output
    }

    /// Format log entry as JSON
    fn format_json(&self, entry: &LogEntry) -> String {
        match serde_json::to_string(entry) {
            Ok(json) => json,
            Err(_) => format!("{{\"error\": \"Failed to serialize log entry\", \"message\": \"{}\"}}", entry.message),
        }
    }

    /// Format log entry in compact format
    fn format_compact(&self, entry: &LogEntry) -> String {
        let timestamp = entry.timestamp.format("%H:%M:%S");
        format!("{} {} {}: {}",
            timestamp,
            entry.level.as_str().chars().next().unwrap_or('?'),
            entry.logger,
            entry.message
        )
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
                fields: HashMap::new(),
                location: None,
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

    /// Add location information
    pub fn location(mut self, file: &str, line: u32, module: Option<&str>) -> Self {
        self.entry.location = Some(LogLocation {
            file: file.to_string(),
            line,
            module: module.map(String::from),
        });
        self
    }

    /// Add error information
    pub fn error_info(self, error: &AppError) -> Self {
        self.field("error_category", error.category())
            .field("error_exit_code", error.exit_code())
    }

    /// Finalize and write the log entry
    pub async fn log(self) {
        self.logger.write_entry(self.entry).await;
    }
}

/// Logger for benchmark events
#[derive(Clone)]
pub struct BenchLogger {
    logger: Logger,
}

impl BenchLogger {
    pub fn new(config: &Config) -> Self {
        Self {
            logger: Logger::with_config("BENCH".to_string(), config),
        }
    }

    /// Wrap an already configured logger
    pub fn from_logger(logger: Logger) -> Self {
        Self { logger }
    }

    /// A logger that only emits fatal entries, for tests and library callers
    pub fn quiet() -> Self {
        let mut logger = Logger::new("BENCH".to_string());
        logger.set_level(LogLevel::Fatal);
        Self { logger }
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    /// Log a successful query
    pub async fn log_query(&self, server: &str, domain: &str, latency_ms: f64) {
        if !self.logger.would_log(LogLevel::Debug) {
            return;
        }
        self.logger.debug(&format!("{} resolved {} in {:.2}ms", server, domain, latency_ms))
            .field("server", server)
            .field("domain", domain)
            .field("latency_ms", latency_ms)
            .log()
            .await;
    }

    /// Log a timed-out or failed query
    pub async fn log_query_failure(&self, server: &str, domain: &str, reason: &str) {
        if !self.logger.would_log(LogLevel::Debug) {
            return;
        }
        self.logger.debug(&format!("{} failed to resolve {}: {}", server, domain, reason))
            .field("server", server)
            .field("domain", domain)
            .field("reason", reason)
            .log()
            .await;
    }

    /// Log a server being abandoned after exhausting its timeout budget
    pub async fn log_exceeded(&self, event: &ExceededEvent, timeouts: u32) {
        self.logger.warn(&format!("{} ({}) abandoned at run {} on {}: {}",
            event.name, event.server, event.run, event.domain, event.reason))
            .field("server", &event.server)
            .field("domain", &event.domain)
            .field("run", event.run)
            .field("threshold_ms", event.threshold_ms)
            .field("timeouts", timeouts)
            .log()
            .await;
    }

    /// Log a server that produced a result
    pub async fn log_server_complete(&self, result: &BenchmarkResult, attempted: usize) {
        self.logger.info(&format!("{} ({}) finished: {} samples, avg {:.2}ms",
            result.name, result.server, result.samples, result.avg_ms))
            .field("server", &result.server)
            .field("samples", result.samples)
            .field("attempted", attempted)
            .field("avg_ms", result.avg_ms)
            .log()
            .await;
    }

    /// Log a server dropped from the ranking because it produced no samples
    pub async fn log_server_dropped(&self, server: &Server, attempted: usize) {
        self.logger.info(&format!("{} ({}) produced no samples and is omitted from the ranking",
            server.name, server.address))
            .field("server", &server.address)
            .field("attempted", attempted)
            .log()
            .await;
    }
}

/// Creates loggers sharing one session ID
pub struct LoggerFactory {
    config: Config,
    session_id: String,
}

impl LoggerFactory {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            session_id: Uuid::new_v4().to_string(),
        }
    }

    /// Create a logger with a specific name
    pub async fn create_logger(&self, name: &str) -> Logger {
        let logger = Logger::with_config(name.to_string(), &self.config);
        logger.set_session_id(self.session_id.clone()).await;
        logger
    }

    /// Create the benchmark event logger, tagged with the run parameters
    pub async fn create_bench_logger(&self) -> BenchLogger {
        let logger = self.create_logger("BENCH").await;
        logger.add_context_field("runs".to_string(), self.config.runs).await;
        logger.add_context_field("timeout_ms".to_string(), self.config.timeout_ms).await;
        BenchLogger::from_logger(logger)
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }
}

/// Convenience macros for logging with location information
#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $($arg:tt)*) => {
        $logger.debug(&format!($($arg)*))
            .location(file!(), line!(), Some(module_path!()))
            .log()
            .await
    };
}

#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($arg:tt)*) => {
        $logger.info(&format!($($arg)*))
            .location(file!(), line!(), Some(module_path!()))
            .log()
            .await
    };
}

#[macro_export]
macro_rules! log_warn {
    ($logger:expr, $($arg:tt)*) => {
        $logger.warn(&format!($($arg)*))
            .location(file!(), line!(), Some(module_path!()))
            .log()
            .await
    };
}
