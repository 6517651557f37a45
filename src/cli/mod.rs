//! Command-line interface

use clap::Parser;
use std::path::PathBuf;

/// DNS Latency Benchmark - measures how fast a list of DNS servers resolves a list of domains
///
/// Every server is queried for every domain, once per run. Servers that time out too
/// often are abandoned; the rest are ranked by average latency.
#[derive(Parser, Debug, Clone)]
#[command(name = "dnsbench")]
#[command(version, long_version = crate::LONG_VERSION, about, long_about)]
pub struct Cli {
    /// JSON file with the servers to benchmark ([{"Name": ..., "Address": ...}])
    #[arg(long, value_name = "FILE")]
    pub servers: Option<PathBuf>,

    /// Text file with the domains to resolve, one per line
    #[arg(long, value_name = "FILE")]
    pub domains: Option<PathBuf>,

    /// Directory for the result files
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Passes over the domain list per server
    #[arg(short, long, value_parser = parse_runs)]
    pub runs: Option<u32>,

    /// Per-query timeout in milliseconds
    #[arg(short, long, value_name = "MS", value_parser = parse_timeout_ms)]
    pub timeout_ms: Option<u64>,

    /// Timeouts after which a server is abandoned
    #[arg(short, long, value_parser = parse_positive_u32)]
    pub max_timeouts: Option<u32>,

    /// Pause between runs against the same server, in milliseconds (0 disables)
    #[arg(long = "pause-ms", value_name = "MS")]
    pub pause_ms: Option<u64>,

    /// Number of servers in the top performers table
    #[arg(long, value_name = "N", value_parser = parse_top)]
    pub top: Option<usize>,

    /// Do not write result files
    #[arg(long)]
    pub no_save: bool,

    /// Force colored output
    #[arg(long, conflicts_with = "no_color")]
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
    /// Explicit color choice, if one was made on the command line
    pub fn color_override(&self) -> Option<bool> {
        if self.color {
            Some(true)
        } else if self.no_color {
            Some(false)
        } else {
            None
        }
    }

    /// Check if colors should be enabled
    pub fn use_colors(&self) -> bool {
        self.color_override().unwrap_or_else(supports_color)
    }
}

fn parse_runs(s: &str) -> Result<u32, String> {
    let runs = parse_positive_u32(s)?;
    if runs > crate::defaults::MAX_RUNS {
        return Err(format!("Runs cannot exceed {}", crate::defaults::MAX_RUNS));
    }
    Ok(runs)
}

fn parse_timeout_ms(s: &str) -> Result<u64, String> {
    if s.starts_with('+') {
        return Err(format!("Invalid timeout: {}", s));
    }

    s.parse::<u64>()
        .map_err(|_| format!("Invalid timeout: {}", s))
        .and_then(|ms| {
            if ms == 0 {
                Err("Timeout must be greater than 0".to_string())
            } else if ms > crate::defaults::MAX_TIMEOUT_MS {
                Err(format!("Timeout cannot exceed {} ms", crate::defaults::MAX_TIMEOUT_MS))
            } else {
                Ok(ms)
            }
        })
}

fn parse_positive_u32(s: &str) -> Result<u32, String> {
    match s.parse::<u32>() {
        Ok(0) => Err("Value must be greater than 0".to_string()),
        Ok(n) if !s.starts_with('+') => Ok(n),
        _ => Err(format!("Invalid number: {}", s)),
    }
}

fn parse_top(s: &str) -> Result<usize, String> {
    parse_positive_u32(s).map(|n| n as usize)
}

/// Check if the terminal supports color output
pub(crate) fn supports_color() -> bool {
    if let Ok(term) = std::env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    #[cfg(target_os = "windows")]
    {
        if std::env::var("ANSICON").is_ok() || std::env::var("ConEmuANSI").is_ok() {
            return true;
        }
    }

    #[cfg(unix)]
    {
        true
    }
    #[cfg(not(unix))]
    {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_parsing_defaults() {
        let cli = Cli::parse_from(["dnsbench"]);
        assert!(cli.servers.is_none());
        assert!(cli.runs.is_none());
        assert!(cli.timeout_ms.is_none());
        assert!(!cli.no_save);
        assert!(!cli.verbose);
        assert!(!cli.debug);
        assert_eq!(cli.color_override(), None);
    }

    #[test]
    fn test_cli_parsing_all_options() {
        let cli = Cli::parse_from([
            "dnsbench",
            "--servers", "my-servers.json",
            "--domains", "my-domains.txt",
            "--output-dir", "out",
            "-r", "3",
            "-t", "500",
            "-m", "2",
            "--pause-ms", "0",
            "--top", "10",
            "--no-save",
            "--no-color",
            "--verbose",
            "--debug",
        ]);

        assert_eq!(cli.servers, Some(PathBuf::from("my-servers.json")));
        assert_eq!(cli.domains, Some(PathBuf::from("my-domains.txt")));
        assert_eq!(cli.output_dir, Some(PathBuf::from("out")));
        assert_eq!(cli.runs, Some(3));
        assert_eq!(cli.timeout_ms, Some(500));
        assert_eq!(cli.max_timeouts, Some(2));
        assert_eq!(cli.pause_ms, Some(0));
        assert_eq!(cli.top, Some(10));
        assert!(cli.no_save);
        assert!(cli.verbose);
        assert!(cli.debug);
        assert!(!cli.use_colors());
    }

    #[test]
    fn test_long_flag_names() {
        let cli = Cli::parse_from(["dnsbench", "--runs", "4", "--timeout-ms", "250", "--max-timeouts", "3"]);
        assert_eq!(cli.runs, Some(4));
        assert_eq!(cli.timeout_ms, Some(250));
        assert_eq!(cli.max_timeouts, Some(3));
    }

    #[test]
    fn test_color_flags_conflict() {
        assert!(Cli::try_parse_from(["dnsbench", "--color", "--no-color"]).is_err());

        let cli = Cli::parse_from(["dnsbench", "--color"]);
        assert_eq!(cli.color_override(), Some(true));
        assert!(cli.use_colors());
    }

    #[test]
    fn test_zero_values_rejected() {
        assert!(Cli::try_parse_from(["dnsbench", "--runs", "0"]).is_err());
        assert!(Cli::try_parse_from(["dnsbench", "--timeout-ms", "0"]).is_err());
        assert!(Cli::try_parse_from(["dnsbench", "--max-timeouts", "0"]).is_err());
        assert!(Cli::try_parse_from(["dnsbench", "--top", "0"]).is_err());
    }

    #[test]
    fn test_timeout_parsing() {
        assert_eq!(parse_timeout_ms("800").unwrap(), 800);
        assert_eq!(parse_timeout_ms("60000").unwrap(), 60_000);
        assert!(parse_timeout_ms("60001").is_err());
        assert!(parse_timeout_ms("+5").is_err());
        assert!(parse_timeout_ms("-5").is_err());
        assert!(parse_timeout_ms("abc").is_err());
    }

    #[test]
    fn test_runs_parsing() {
        assert_eq!(parse_runs("1").unwrap(), 1);
        assert_eq!(parse_runs("1000").unwrap(), 1000);
        assert!(parse_runs("1001").is_err());
        assert!(parse_runs("+3").is_err());
    }

    #[test]
    fn test_empty_path_rejected() {
        assert!(Cli::try_parse_from(["dnsbench", "--servers", ""]).is_err());
        assert!(Cli::try_parse_from(["dnsbench", "--domains", ""]).is_err());
        assert!(Cli::try_parse_from(["dnsbench", "--output-dir", ""]).is_err());
        assert!(Cli::try_parse_from(["dnsbench", "--servers", "s.json"]).is_ok());
    }
}
