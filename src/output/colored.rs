//! Colored formatter implementation with terminal color support
//!
//! Layout is delegated to [`PlainFormatter`]; this formatter only tints the
//! already padded cells.

use crate::{
    error::Result,
    executor::ServerOutcome,
    models::{BenchmarkReport, BenchmarkResult, ExceededEvent, RunConfig, Server},
    types::PerformanceLevel,
};
use super::formatter::{
    exceeded_rows, exceeded_table_format, format_ms, results_rows, results_table_format,
    FormattingOptions, OutputFormatter, PlainFormatter, FIRST_LATENCY_COLUMN,
};
use colored::*;

/// Terminal color for a performance level
pub fn level_color(level: PerformanceLevel) -> Color {
    match level {
        PerformanceLevel::Good => Color::Green,
        PerformanceLevel::Moderate => Color::Yellow,
        PerformanceLevel::Poor => Color::Red,
    }
}

/// Color scheme configuration
#[derive(Debug, Clone)]
pub struct ColorScheme {
    pub header: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,
    pub muted: Color,
    pub border: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            header: Color::Blue,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            info: Color::Cyan,
            muted: Color::BrightBlack,
            border: Color::BrightBlack,
        }
    }
}

/// Colored formatter implementation
pub struct ColoredFormatter {
    plain_formatter: PlainFormatter,
    options: FormattingOptions,
    color_scheme: ColorScheme,
}

impl ColoredFormatter {
    /// Create a new colored formatter with options
    pub fn new(options: FormattingOptions) -> Self {
        Self::with_color_scheme(options, ColorScheme::default())
    }

    /// Create a colored formatter with custom color scheme
    pub fn with_color_scheme(options: FormattingOptions, color_scheme: ColorScheme) -> Self {
        let plain_formatter = PlainFormatter::new(options.clone());
        Self {
            plain_formatter,
            options,
            color_scheme,
        }
    }

    /// Apply color to text if colors are enabled
    fn colorize(&self, text: &str, color: Color) -> ColoredString {
        if self.options.enable_color {
            text.color(color)
        } else {
            text.normal()
        }
    }

    /// Apply bold formatting if colors are enabled
    fn bold(&self, text: &str) -> ColoredString {
        if self.options.enable_color {
            text.bold()
        } else {
            text.normal()
        }
    }

    /// Bold and colored, or plain text when colors are disabled
    fn emphasize(&self, text: &str, color: Color) -> String {
        if self.options.enable_color {
            text.bold().color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn section_title(&self, title: &str) -> String {
        self.emphasize(title, self.color_scheme.header)
    }

    /// Ranked table with latency cells tinted by performance level
    fn colored_results_table(&self, results: &[BenchmarkResult]) -> Result<String> {
        let format = results_table_format(&self.options);
        let rows = results_rows(results);

        self.plain_formatter.create_styled_table(
            &format,
            &rows,
            &|row_idx, col_idx, cell| {
                let result = &results[row_idx];
                if col_idx == 0 && row_idx < 3 {
                    self.bold(cell).to_string()
                } else if col_idx >= FIRST_LATENCY_COLUMN {
                    let value = match col_idx - FIRST_LATENCY_COLUMN {
                        0 => result.avg_ms,
                        1 => result.median_ms,
                        2 => result.p95_ms,
                        3 => result.min_ms,
                        _ => result.max_ms,
                    };
                    self.colorize(cell, level_color(PerformanceLevel::from_latency_ms(value))).to_string()
                } else {
                    cell.to_string()
                }
            },
            &|header| self.bold(header).to_string(),
        )
    }
}

impl OutputFormatter for ColoredFormatter {
    fn format_header(&self, title: &str) -> Result<String> {
        let border = "═".repeat(title.chars().count() + 4);
        Ok(format!(
            "{}\n  {}  \n{}",
            self.colorize(&border, self.color_scheme.border),
            self.section_title(title),
            self.colorize(&border, self.color_scheme.border)
        ))
    }

    fn format_run_summary(&self, report: &BenchmarkReport, run_config: &RunConfig, servers: usize, domains: usize) -> Result<String> {
        let elapsed_ms = (report.finished_at - report.started_at).num_milliseconds().max(0) as f64;
        let abandoned = report.exceeded.len();
        let abandoned_color = if abandoned == 0 { self.color_scheme.success } else { self.color_scheme.warning };

        let lines = [
            self.section_title("Run Summary"),
            format!(
                "Servers:   {} ({} ranked, {} abandoned)",
                self.colorize(&servers.to_string(), self.color_scheme.info),
                self.colorize(&report.results.len().to_string(), self.color_scheme.success),
                self.colorize(&abandoned.to_string(), abandoned_color)
            ),
            format!("Domains:   {}", self.colorize(&domains.to_string(), self.color_scheme.info)),
            format!("Runs:      {}", run_config.runs),
            format!("Timeout:   {}ms (max {} per server)", run_config.timeout_ms, run_config.max_timeouts),
            format!("Samples:   {}", report.total_samples()),
            format!("Duration:  {}", self.plain_formatter.format_duration(elapsed_ms)),
        ];

        Ok(lines.join("\n"))
    }

    fn format_results_table(&self, results: &[BenchmarkResult]) -> Result<String> {
        if results.is_empty() {
            return Ok(self.colorize("No server produced a successful response.", self.color_scheme.error).to_string());
        }

        Ok(format!("{}\n{}", self.section_title("Results (ranked by average latency)"), self.colored_results_table(results)?))
    }

    fn format_top_table(&self, results: &[BenchmarkResult]) -> Result<String> {
        if results.is_empty() {
            return Ok(String::new());
        }

        let title = format!("Top {} Performers", results.len());
        Ok(format!("{}\n{}", self.section_title(&title), self.colored_results_table(results)?))
    }

    fn format_exceeded_table(&self, events: &[ExceededEvent]) -> Result<String> {
        if events.is_empty() {
            return Ok(String::new());
        }

        let table = self.plain_formatter.create_styled_table(
            &exceeded_table_format(&self.options),
            &exceeded_rows(events),
            &|_, col_idx, cell| {
                if col_idx == 0 {
                    self.colorize(cell, self.color_scheme.warning).to_string()
                } else {
                    cell.to_string()
                }
            },
            &|header| self.bold(header).to_string(),
        )?;

        let title = format!("Abandoned Servers ({})", events.len());
        Ok(format!("{}\n{}", self.emphasize(&title, self.color_scheme.warning), table))
    }

    fn format_progress(&self, index: usize, total: usize, server: &Server, outcome: &ServerOutcome) -> Result<String> {
        let counter = self.colorize(&format!("[{}/{}]", index + 1, total), self.color_scheme.muted);
        let status = match (&outcome.result, &outcome.exceeded) {
            (Some(result), exceeded) => {
                let avg = self.colorize(&format!("{}ms", format_ms(result.avg_ms)), level_color(result.performance_level()));
                if exceeded.is_some() {
                    format!("{} avg {} over {} samples", self.colorize("abandoned,", self.color_scheme.warning), avg, result.samples)
                } else {
                    format!("avg {} over {} samples", avg, result.samples)
                }
            }
            (None, _) => self.colorize("abandoned, no successful responses", self.color_scheme.error).to_string(),
        };

        Ok(format!("{} {} ({}): {}", counter, self.bold(&server.name), server.address, status))
    }

    fn format_warning(&self, warning: &str) -> Result<String> {
        Ok(format!("{} {}", self.emphasize("WARNING:", self.color_scheme.warning), warning))
    }

    fn format_success(&self, message: &str) -> Result<String> {
        Ok(format!("{} {}", self.emphasize("SUCCESS:", self.color_scheme.success), message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LatencySummary;

    fn result(name: &str, avg: f64) -> BenchmarkResult {
        let summary = LatencySummary { avg_ms: avg, median_ms: avg, p95_ms: avg, min_ms: avg, max_ms: avg };
        BenchmarkResult::new(&Server::new(name, "9.9.9.9"), 4, summary)
    }

    #[test]
    fn test_level_colors() {
        assert_eq!(level_color(PerformanceLevel::Good), Color::Green);
        assert_eq!(level_color(PerformanceLevel::Moderate), Color::Yellow);
        assert_eq!(level_color(PerformanceLevel::Poor), Color::Red);
    }

    #[test]
    fn test_colored_table_matches_plain_layout_without_color() {
        let options = FormattingOptions { enable_color: false, ..Default::default() };
        let colored = ColoredFormatter::new(options.clone());
        let plain = PlainFormatter::new(options);
        let results = vec![result("Quad9", 12.0), result("Other", 180.0)];

        let colored_table = colored.format_results_table(&results).unwrap();
        let plain_table = plain.format_results_table(&results).unwrap();

        let strip_title = |s: &str| s.lines().skip(1).collect::<Vec<_>>().join("\n");
        assert_eq!(strip_title(&colored_table), strip_title(&plain_table));
    }

    #[test]
    fn test_colored_output_contains_escape_codes() {
        colored::control::set_override(true);
        let colored = ColoredFormatter::new(FormattingOptions::default());
        let table = colored.format_results_table(&[result("Fast", 5.0)]).unwrap();
        colored::control::unset_override();

        assert!(table.contains("\u{1b}["));
        assert!(table.contains("Fast"));
    }

    #[test]
    fn test_exceeded_section() {
        let colored = ColoredFormatter::new(FormattingOptions { enable_color: false, ..Default::default() });
        let event = ExceededEvent::new(&Server::new("Dead", "10.1.1.1"), "a.com", 1, 800);
        let output = colored.format_exceeded_table(&[event]).unwrap();
        assert!(output.contains("Abandoned Servers (1)"));
        assert!(output.contains("Dead"));
    }
}
