//! Error handling for the DNS latency benchmark

use thiserror::Error;

/// Error types surfaced by the benchmark
///
/// Per-query resolution failures are not errors: they are recorded as
/// [`QueryOutcome::Timeout`](crate::models::QueryOutcome) and never reach this type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid server or domain input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Resolver construction errors
    #[error("DNS resolution error: {0}")]
    DnsResolution(String),

    /// I/O errors (file operations, etc.)
    #[error("I/O error: {0}")]
    Io(String),

    /// Parsing errors (JSON, numbers, addresses)
    #[error("Parsing error: {0}")]
    Parse(String),

    /// Statistics calculation errors
    #[error("Statistics error: {0}")]
    Statistics(String),

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    /// Create a new DNS resolution error
    pub fn dns_resolution<S: Into<String>>(message: S) -> Self {
        Self::DnsResolution(message.into())
    }

    /// Create a new I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io(message.into())
    }

    /// Create a new parsing error
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse(message.into())
    }

    /// Create a new statistics error
    pub fn statistics<S: Into<String>>(message: S) -> Self {
        Self::Statistics(message.into())
    }

    /// Create a new internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// Get error category for logging and reporting
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG",
            Self::Validation(_) => "VALIDATION",
            Self::DnsResolution(_) => "DNS",
            Self::Io(_) => "IO",
            Self::Parse(_) => "PARSE",
            Self::Statistics(_) => "STATS",
            Self::Internal(_) => "INTERNAL",
        }
    }

    /// Get user-friendly error message with suggestions
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::Config(msg) => {
                format!("Configuration problem: {}\n\nSuggestion: Check your .env file or command line arguments.", msg)
            }
            Self::Validation(msg) => {
                format!("Invalid input: {}\n\nSuggestion: Every server needs a Name and an Address, and the domain list must contain at least one entry.", msg)
            }
            Self::DnsResolution(msg) => {
                format!("DNS resolver setup failed: {}\n\nSuggestion: Check the server address format (ip or ip:port).", msg)
            }
            Self::Io(msg) => {
                format!("File operation failed: {}\n\nSuggestion: Check the file paths, permissions and disk space.", msg)
            }
            Self::Parse(msg) => {
                format!("Failed to parse data: {}\n\nSuggestion: Check the format of your input files.", msg)
            }
            Self::Statistics(msg) => {
                format!("Statistics calculation failed: {}\n\nSuggestion: This may indicate insufficient test data.", msg)
            }
            Self::Internal(msg) => {
                format!("Internal error: {}\n\nThis is likely a bug. Please report this issue with the error details.", msg)
            }
        }
    }

    /// Get exit code for this error type
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Validation(_) | Self::Parse(_) => 1,
            Self::DnsResolution(_) => 2,
            Self::Io(_) => 5,
            Self::Statistics(_) => 6,
            Self::Internal(_) => 99,
        }
    }

    /// Format error for console display with color coding
    pub fn format_for_console(&self, use_color: bool) -> String {
        let category = self.category();
        let message = self.to_string();

        if use_color {
            use colored::Colorize;
            match self {
                Self::Config(_) | Self::Validation(_) | Self::Parse(_) => {
                    format!("[{}] {}", category.red().bold(), message.red())
                }
                Self::DnsResolution(_) => {
                    format!("[{}] {}", category.yellow().bold(), message.yellow())
                }
                Self::Io(_) | Self::Statistics(_) => {
                    format!("[{}] {}", category.cyan().bold(), message.cyan())
                }
                Self::Internal(_) => {
                    format!("[{}] {}", category.bright_red().bold(), message.bright_red())
                }
            }
        } else {
            format!("[{}] {}", category, message)
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::io(error.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::parse(format!("JSON parse error: {}", error))
    }
}

impl From<trust_dns_resolver::error::ResolveError> for AppError {
    fn from(error: trust_dns_resolver::error::ResolveError) -> Self {
        Self::dns_resolution(error.to_string())
    }
}

impl From<dotenv::Error> for AppError {
    fn from(error: dotenv::Error) -> Self {
        Self::config(format!("Environment file error: {}", error))
    }
}

impl From<std::num::ParseIntError> for AppError {
    fn from(error: std::num::ParseIntError) -> Self {
        Self::parse(format!("Integer parse error: {}", error))
    }
}

impl From<std::str::ParseBoolError> for AppError {
    fn from(error: std::str::ParseBoolError) -> Self {
        Self::parse(format!("Boolean parse error: {}", error))
    }
}

impl From<std::net::AddrParseError> for AppError {
    fn from(error: std::net::AddrParseError) -> Self {
        Self::parse(format!("IP address parse error: {}", error))
    }
}

/// Custom Result type for the application
pub type Result<T> = std::result::Result<T, AppError>;

/// Error context trait for adding context to errors
pub trait ErrorContext<T> {
    /// Add context to an error, keeping its category
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;

    /// Add static context to an error
    fn context(self, message: &'static str) -> Result<T>;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: Into<AppError>,
{
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let context = f();
            match e.into() {
                AppError::Config(msg) => AppError::Config(format!("{}: {}", context, msg)),
                AppError::Validation(msg) => AppError::Validation(format!("{}: {}", context, msg)),
                AppError::DnsResolution(msg) => AppError::DnsResolution(format!("{}: {}", context, msg)),
                AppError::Io(msg) => AppError::Io(format!("{}: {}", context, msg)),
                AppError::Parse(msg) => AppError::Parse(format!("{}: {}", context, msg)),
                AppError::Statistics(msg) => AppError::Statistics(format!("{}: {}", context, msg)),
                AppError::Internal(msg) => AppError::Internal(format!("{}: {}", context, msg)),
            }
        })
    }

    fn context(self, message: &'static str) -> Result<T> {
        self.with_context(|| message.to_string())
    }
}

/// Error reporter for user feedback on stderr
pub struct ErrorReporter {
    pub use_color: bool,
    pub verbose: bool,
}

impl ErrorReporter {
    /// Create a new error reporter
    pub fn new(use_color: bool, verbose: bool) -> Self {
        Self { use_color, verbose }
    }

    /// Report an error to the user
    pub fn report_error(&self, error: &AppError) {
        eprintln!("{}", error.format_for_console(self.use_color));

        if self.verbose {
            eprintln!();
            eprintln!("{}", error.user_friendly_message());
        }
    }
}

impl Default for ErrorReporter {
    fn default() -> Self {
        Self::new(true, false)
    }
}
