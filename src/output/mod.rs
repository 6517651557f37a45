//! Output formatting and display system
//!
//! This module renders benchmark reports to the console, plain or colored,
//! and persists them as result files.

mod formatter;
mod colored;
mod writer;

pub use formatter::{
    OutputFormatter,
    PlainFormatter,
    TableFormat,
    FormattingOptions,
    Column,
    Alignment,
    RowData,
};
pub use colored::{
    ColoredFormatter,
    ColorScheme,
    level_color,
};
pub use writer::{read_results_json, ResultWriter, ResultsDocument, RESULTS_FILE_NAME, TOP_FILE_NAME};

use crate::{
    error::Result,
    executor::{RunObserver, ServerOutcome},
    models::{BenchmarkReport, RunConfig, Server},
};

/// Output formatting factory for creating appropriate formatters
pub struct OutputFormatterFactory;

impl OutputFormatterFactory {
    /// Create a formatter based on color support and preferences
    pub fn create_formatter(enable_color: bool, verbose: bool) -> Box<dyn OutputFormatter> {
        let options = FormattingOptions {
            enable_color,
            verbose_mode: verbose,
            ..FormattingOptions::default()
        };

        if enable_color {
            Box::new(ColoredFormatter::new(options))
        } else {
            Box::new(PlainFormatter::new(options))
        }
    }

    /// Create a plain text formatter for files and scripts
    pub fn create_plain_formatter() -> PlainFormatter {
        PlainFormatter::new(FormattingOptions {
            enable_color: false,
            ..FormattingOptions::default()
        })
    }
}

/// Main output coordinator that handles all result display
pub struct OutputCoordinator {
    formatter: Box<dyn OutputFormatter>,
    top_n: usize,
}

impl OutputCoordinator {
    /// Create a new output coordinator with the specified formatter
    pub fn new(formatter: Box<dyn OutputFormatter>, top_n: usize) -> Self {
        Self { formatter, top_n }
    }

    pub fn formatter(&self) -> &dyn OutputFormatter {
        self.formatter.as_ref()
    }

    /// Render the full report: summary, ranked table, top performers, abandoned servers
    pub fn display_report(&self, report: &BenchmarkReport, run_config: &RunConfig, servers: usize, domains: usize) -> Result<String> {
        let mut sections = vec![
            self.formatter.format_header("DNS Benchmark Results")?,
            self.formatter.format_run_summary(report, run_config, servers, domains)?,
            self.formatter.format_results_table(&report.results)?,
        ];

        let top = self.formatter.format_top_table(report.top(self.top_n))?;
        if !top.is_empty() {
            sections.push(top);
        }

        let exceeded = self.formatter.format_exceeded_table(&report.exceeded)?;
        if !exceeded.is_empty() {
            sections.push(exceeded);
        }

        Ok(sections.join("\n\n"))
    }
}

/// Prints one progress line per finished server
pub struct ConsoleProgress<'a> {
    formatter: &'a dyn OutputFormatter,
}

impl<'a> ConsoleProgress<'a> {
    pub fn new(formatter: &'a dyn OutputFormatter) -> Self {
        Self { formatter }
    }
}

impl RunObserver for ConsoleProgress<'_> {
    fn on_server_finish(&self, index: usize, total: usize, server: &Server, outcome: &ServerOutcome) {
        match self.formatter.format_progress(index, total, server, outcome) {
            Ok(line) => println!("{}", line),
            Err(e) => eprintln!("Failed to display progress: {}", e),
        }
    }
}
