//! Core formatting traits and implementations
//!
//! This module defines the output formatting interface and provides
//! a plain text implementation with table formatting capabilities.

use crate::{
    error::{AppError, Result},
    executor::ServerOutcome,
    models::{BenchmarkReport, BenchmarkResult, ExceededEvent, RunConfig, Server},
};
use std::fmt::Write as _;

/// Main trait for output formatting
pub trait OutputFormatter {
    /// Format a header section
    fn format_header(&self, title: &str) -> Result<String>;

    /// Format the parameters and totals of a finished run
    fn format_run_summary(&self, report: &BenchmarkReport, run_config: &RunConfig, servers: usize, domains: usize) -> Result<String>;

    /// Format every ranked result as a table
    fn format_results_table(&self, results: &[BenchmarkResult]) -> Result<String>;

    /// Format the top performers table
    fn format_top_table(&self, results: &[BenchmarkResult]) -> Result<String>;

    /// Format the servers abandoned for exceeding the timeout limit
    fn format_exceeded_table(&self, events: &[ExceededEvent]) -> Result<String>;

    /// Format one line of progress after a server finishes
    fn format_progress(&self, index: usize, total: usize, server: &Server, outcome: &ServerOutcome) -> Result<String>;

    /// Format warning messages
    fn format_warning(&self, warning: &str) -> Result<String>;

    /// Format success messages
    fn format_success(&self, message: &str) -> Result<String>;
}

/// Configuration options for formatting
#[derive(Debug, Clone)]
pub struct FormattingOptions {
    /// Enable colored output
    pub enable_color: bool,
    /// Enable verbose mode with detailed information
    pub verbose_mode: bool,
    /// Show table borders
    pub table_borders: bool,
    /// Maximum cell width for name/address columns
    pub max_width: usize,
}

impl Default for FormattingOptions {
    fn default() -> Self {
        Self {
            enable_color: true,
            verbose_mode: false,
            table_borders: true,
            max_width: 40,
        }
    }
}

/// Table formatting configuration
#[derive(Debug, Clone)]
pub struct TableFormat {
    /// Column definitions
    pub columns: Vec<Column>,
    /// Show borders around table
    pub show_borders: bool,
    /// Show header row
    pub show_header: bool,
    /// Maximum width for columns without a definition
    pub max_column_width: usize,
}

/// Column definition for table formatting
#[derive(Debug, Clone)]
pub struct Column {
    /// Column header
    pub header: String,
    /// Column alignment
    pub alignment: Alignment,
    /// Minimum width
    pub min_width: usize,
    /// Maximum width
    pub max_width: usize,
}

impl Column {
    pub fn left(header: &str, max_width: usize) -> Self {
        Self { header: header.to_string(), alignment: Alignment::Left, min_width: 0, max_width }
    }

    pub fn right(header: &str) -> Self {
        Self { header: header.to_string(), alignment: Alignment::Right, min_width: 0, max_width: 20 }
    }
}

/// Text alignment options
#[derive(Debug, Clone)]
pub enum Alignment {
    Left,
    Right,
    Center,
}

/// Row data for table formatting
pub type RowData = Vec<String>;

/// Column layout shared by the ranked and top tables
pub(crate) fn results_table_format(options: &FormattingOptions) -> TableFormat {
    TableFormat {
        columns: vec![
            Column::right("Rank"),
            Column::left("Name", options.max_width),
            Column::left("Server", options.max_width),
            Column::right("Samples"),
            Column::right("Avg (ms)"),
            Column::right("Median (ms)"),
            Column::right("P95 (ms)"),
            Column::right("Min (ms)"),
            Column::right("Max (ms)"),
        ],
        show_borders: options.table_borders,
        show_header: true,
        max_column_width: options.max_width,
    }
}

pub(crate) fn results_rows(results: &[BenchmarkResult]) -> Vec<RowData> {
    results
        .iter()
        .enumerate()
        .map(|(index, result)| {
            vec![
                (index + 1).to_string(),
                result.name.clone(),
                result.server.clone(),
                result.samples.to_string(),
                format_ms(result.avg_ms),
                format_ms(result.median_ms),
                format_ms(result.p95_ms),
                format_ms(result.min_ms),
                format_ms(result.max_ms),
            ]
        })
        .collect()
}

/// Index of the first latency column in [`results_table_format`]
pub(crate) const FIRST_LATENCY_COLUMN: usize = 4;

pub(crate) fn exceeded_table_format(options: &FormattingOptions) -> TableFormat {
    TableFormat {
        columns: vec![
            Column::left("Name", options.max_width),
            Column::left("Server", options.max_width),
            Column::left("Domain", options.max_width),
            Column::right("Run"),
            Column::right("Threshold (ms)"),
            Column::left("Reason", options.max_width),
        ],
        show_borders: options.table_borders,
        show_header: true,
        max_column_width: options.max_width,
    }
}

pub(crate) fn exceeded_rows(events: &[ExceededEvent]) -> Vec<RowData> {
    events
        .iter()
        .map(|event| {
            vec![
                event.name.clone(),
                event.server.clone(),
                event.domain.clone(),
                event.run.to_string(),
                event.threshold_ms.to_string(),
                event.reason.clone(),
            ]
        })
        .collect()
}

/// Latencies are shown with the same two decimals they are stored with
pub(crate) fn format_ms(value: f64) -> String {
    format!("{:.2}", value)
}

/// Plain text formatter implementation
pub struct PlainFormatter {
    options: FormattingOptions,
}

impl PlainFormatter {
    /// Create a new plain formatter with options
    pub fn new(options: FormattingOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &FormattingOptions {
        &self.options
    }

    /// Create a table with the given format and data
    pub fn create_table(&self, format: &TableFormat, rows: &[RowData]) -> Result<String> {
        self.create_styled_table(format, rows, &|_, _, cell| cell.to_string(), &|header| header.to_string())
    }

    /// Create a table, passing every padded data cell through `style_cell(row, column, text)`
    /// and every padded header cell through `style_header`
    ///
    /// Styling happens after padding so escape sequences never disturb the layout.
    pub(crate) fn create_styled_table(
        &self,
        format: &TableFormat,
        rows: &[RowData],
        style_cell: &dyn Fn(usize, usize, &str) -> String,
        style_header: &dyn Fn(&str) -> String,
    ) -> Result<String> {
        if rows.is_empty() {
            return Ok(String::new());
        }

        let column_widths = self.calculate_column_widths(format, rows);

        let mut output = String::new();

        if format.show_header && !format.columns.is_empty() {
            if format.show_borders {
                output.push_str(&self.create_horizontal_border(&column_widths));
                output.push('\n');
            }

            let headers: Vec<String> = format.columns.iter().map(|c| c.header.clone()).collect();
            output.push_str(&self.create_row(&headers, &column_widths, format, &|_, text| style_header(text)));
            output.push('\n');

            if format.show_borders {
                output.push_str(&self.create_horizontal_border(&column_widths));
                output.push('\n');
            }
        }

        for (row_idx, row) in rows.iter().enumerate() {
            output.push_str(&self.create_row(row, &column_widths, format, &|col_idx, text| style_cell(row_idx, col_idx, text)));
            output.push('\n');
        }

        if format.show_borders {
            output.push_str(&self.create_horizontal_border(&column_widths));
        }

        Ok(output)
    }

    /// Calculate optimal column widths
    fn calculate_column_widths(&self, format: &TableFormat, rows: &[RowData]) -> Vec<usize> {
        let num_columns = format.columns.len().max(
            rows.iter().map(|r| r.len()).max().unwrap_or(0)
        );

        (0..num_columns)
            .map(|col_idx| {
                let column = format.columns.get(col_idx);
                let mut width = column.map(|c| c.min_width.max(text_width(&c.header))).unwrap_or(0);

                for row in rows {
                    if let Some(cell) = row.get(col_idx) {
                        width = width.max(text_width(cell));
                    }
                }

                width.min(column.map(|c| c.max_width).unwrap_or(format.max_column_width))
            })
            .collect()
    }

    /// Create a table row
    fn create_row(
        &self,
        data: &[String],
        widths: &[usize],
        format: &TableFormat,
        style: &dyn Fn(usize, &str) -> String,
    ) -> String {
        let mut row = String::new();

        if format.show_borders {
            row.push('|');
        }

        for (idx, (cell, &width)) in data.iter().zip(widths.iter()).enumerate() {
            let alignment = format.columns.get(idx).map(|c| &c.alignment).unwrap_or(&Alignment::Left);
            let padded_cell = self.align_text(cell, width, alignment);

            if format.show_borders {
                row.push(' ');
            }
            row.push_str(&style(idx, &padded_cell));
            if format.show_borders {
                row.push_str(" |");
            } else {
                row.push_str("  ");
            }
        }

        row.trim_end().to_string()
    }

    /// Create horizontal border for table
    fn create_horizontal_border(&self, widths: &[usize]) -> String {
        let mut border = String::new();

        if !widths.is_empty() {
            border.push('+');
            for &width in widths {
                border.push_str(&"-".repeat(width + 2));
                border.push('+');
            }
        }

        border
    }

    /// Align text within specified width, truncating with "..." when too long
    fn align_text(&self, text: &str, width: usize, alignment: &Alignment) -> String {
        let len = text_width(text);
        if len > width {
            if width <= 3 {
                return text.chars().take(width).collect();
            }
            let truncated: String = text.chars().take(width - 3).collect();
            return format!("{}...", truncated);
        }

        let padding = width - len;
        match alignment {
            Alignment::Left => format!("{}{}", text, " ".repeat(padding)),
            Alignment::Right => format!("{}{}", " ".repeat(padding), text),
            Alignment::Center => {
                let left_pad = padding / 2;
                let right_pad = padding - left_pad;
                format!("{}{}{}", " ".repeat(left_pad), text, " ".repeat(right_pad))
            }
        }
    }

    /// Format duration in human-readable format
    pub(crate) fn format_duration(&self, duration_ms: f64) -> String {
        if duration_ms < 1000.0 {
            format!("{:.0}ms", duration_ms)
        } else if duration_ms < 60000.0 {
            format!("{:.2}s", duration_ms / 1000.0)
        } else {
            let minutes = (duration_ms / 60000.0) as u32;
            let seconds = (duration_ms % 60000.0) / 1000.0;
            format!("{}m{:.1}s", minutes, seconds)
        }
    }
}

fn text_width(text: &str) -> usize {
    text.chars().count()
}

fn fmt_err(e: std::fmt::Error) -> AppError {
    AppError::io(format!("Failed to format output: {}", e))
}

impl OutputFormatter for PlainFormatter {
    fn format_header(&self, title: &str) -> Result<String> {
        let mut output = String::new();
        let border = "=".repeat(text_width(title) + 4);

        writeln!(output, "{}", border).map_err(fmt_err)?;
        writeln!(output, "  {}  ", title).map_err(fmt_err)?;
        write!(output, "{}", border).map_err(fmt_err)?;

        Ok(output)
    }

    fn format_run_summary(&self, report: &BenchmarkReport, run_config: &RunConfig, servers: usize, domains: usize) -> Result<String> {
        let mut output = String::new();
        let elapsed_ms = (report.finished_at - report.started_at).num_milliseconds().max(0) as f64;

        writeln!(output, "Run Summary:").map_err(fmt_err)?;
        writeln!(output, "------------").map_err(fmt_err)?;
        writeln!(output, "Servers:          {} ({} ranked, {} abandoned)", servers, report.results.len(), report.exceeded.len()).map_err(fmt_err)?;
        writeln!(output, "Domains:          {}", domains).map_err(fmt_err)?;
        writeln!(output, "Runs:             {}", run_config.runs).map_err(fmt_err)?;
        writeln!(output, "Timeout:          {}ms (max {} per server)", run_config.timeout_ms, run_config.max_timeouts).map_err(fmt_err)?;
        writeln!(output, "Samples:          {}", report.total_samples()).map_err(fmt_err)?;
        write!(output, "Duration:         {}", self.format_duration(elapsed_ms)).map_err(fmt_err)?;

        Ok(output)
    }

    fn format_results_table(&self, results: &[BenchmarkResult]) -> Result<String> {
        if results.is_empty() {
            return Ok("No server produced a successful response.".to_string());
        }

        let mut output = String::new();
        writeln!(output, "Results (ranked by average latency):").map_err(fmt_err)?;
        output.push_str(&self.create_table(&results_table_format(&self.options), &results_rows(results))?);
        Ok(output)
    }

    fn format_top_table(&self, results: &[BenchmarkResult]) -> Result<String> {
        if results.is_empty() {
            return Ok(String::new());
        }

        let mut output = String::new();
        writeln!(output, "Top {} Performers:", results.len()).map_err(fmt_err)?;
        output.push_str(&self.create_table(&results_table_format(&self.options), &results_rows(results))?);
        Ok(output)
    }

    fn format_exceeded_table(&self, events: &[ExceededEvent]) -> Result<String> {
        if events.is_empty() {
            return Ok(String::new());
        }

        let mut output = String::new();
        writeln!(output, "Abandoned Servers ({}):", events.len()).map_err(fmt_err)?;
        output.push_str(&self.create_table(&exceeded_table_format(&self.options), &exceeded_rows(events))?);
        Ok(output)
    }

    fn format_progress(&self, index: usize, total: usize, server: &Server, outcome: &ServerOutcome) -> Result<String> {
        let status = match (&outcome.result, &outcome.exceeded) {
            (Some(result), None) => format!("avg {}ms over {} samples", format_ms(result.avg_ms), result.samples),
            (Some(result), Some(_)) => format!("abandoned, avg {}ms over {} samples", format_ms(result.avg_ms), result.samples),
            (None, _) => "abandoned, no successful responses".to_string(),
        };

        let mut line = format!("[{}/{}] {} ({}): {}", index + 1, total, server.name, server.address, status);
        if self.options.verbose_mode {
            line.push_str(&format!(" [{} queries]", outcome.attempted));
        }
        Ok(line)
    }

    fn format_warning(&self, warning: &str) -> Result<String> {
        Ok(format!("WARNING: {}", warning))
    }

    fn format_success(&self, message: &str) -> Result<String> {
        Ok(format!("SUCCESS: {}", message))
    }
}
