//! Result file persistence

use crate::{
    error::{AppError, Result},
    models::{BenchmarkReport, BenchmarkResult, ExceededEvent, RunConfig},
};
use super::formatter::OutputFormatter;
use super::OutputFormatterFactory;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Full report, JSON
pub const RESULTS_FILE_NAME: &str = "dns_benchmark_results.json";

/// Top performers table, plain text
pub const TOP_FILE_NAME: &str = "dns_benchmark_top.txt";

/// On-disk shape of [`RESULTS_FILE_NAME`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultsDocument {
    pub generated_at: DateTime<Utc>,
    pub tool_version: String,
    pub run_config: RunConfig,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub results: Vec<BenchmarkResult>,
    pub exceeded: Vec<ExceededEvent>,
}

impl ResultsDocument {
    pub fn new(report: &BenchmarkReport, run_config: RunConfig) -> Self {
        Self {
            generated_at: Utc::now(),
            tool_version: crate::VERSION.to_string(),
            run_config,
            started_at: report.started_at,
            finished_at: report.finished_at,
            results: report.results.clone(),
            exceeded: report.exceeded.clone(),
        }
    }
}

/// Writes the result artifacts into one directory
pub struct ResultWriter {
    output_dir: PathBuf,
}

impl ResultWriter {
    pub fn new<P: Into<PathBuf>>(output_dir: P) -> Self {
        Self { output_dir: output_dir.into() }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write both artifacts and return their paths
    pub fn write_all(&self, report: &BenchmarkReport, run_config: RunConfig, top_n: usize) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(&self.output_dir)
            .map_err(|e| AppError::io(format!("Failed to create output directory '{}': {}", self.output_dir.display(), e)))?;

        Ok(vec![
            self.write_results_json(report, run_config)?,
            self.write_top_text(report, top_n)?,
        ])
    }

    pub fn write_results_json(&self, report: &BenchmarkReport, run_config: RunConfig) -> Result<PathBuf> {
        let path = self.output_dir.join(RESULTS_FILE_NAME);
        let content = serde_json::to_string_pretty(&ResultsDocument::new(report, run_config))?;

        fs::write(&path, content)
            .map_err(|e| AppError::io(format!("Failed to write '{}': {}", path.display(), e)))?;

        Ok(path)
    }

    pub fn write_top_text(&self, report: &BenchmarkReport, top_n: usize) -> Result<PathBuf> {
        let path = self.output_dir.join(TOP_FILE_NAME);
        let formatter = OutputFormatterFactory::create_plain_formatter();

        let top = report.top(top_n);
        let mut content = if top.is_empty() {
            "No server produced a successful response.".to_string()
        } else {
            formatter.format_top_table(top)?
        };
        content.push('\n');

        fs::write(&path, content)
            .map_err(|e| AppError::io(format!("Failed to write '{}': {}", path.display(), e)))?;

        Ok(path)
    }
}

/// Read a results file back
pub fn read_results_json<P: AsRef<Path>>(path: P) -> Result<ResultsDocument> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .map_err(|e| AppError::io(format!("Failed to read '{}': {}", path.display(), e)))?;
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LatencySummary, Server};
    use tempfile::TempDir;

    fn sample_report() -> BenchmarkReport {
        let now = Utc::now();
        let summary = LatencySummary { avg_ms: 11.5, median_ms: 11.0, p95_ms: 14.0, min_ms: 9.25, max_ms: 14.0 };
        BenchmarkReport {
            results: vec![
                BenchmarkResult::new(&Server::new("Cloudflare", "1.1.1.1"), 20, summary),
                BenchmarkResult::new(&Server::new("Google", "8.8.8.8"), 20, LatencySummary { avg_ms: 30.0, ..summary }),
            ],
            exceeded: vec![ExceededEvent::new(&Server::new("Dead", "10.0.0.9"), "a.com", 1, 800)],
            started_at: now,
            finished_at: now,
        }
    }

    #[test]
    fn test_write_all_creates_both_files() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("nested/out");
        let writer = ResultWriter::new(&out);

        let paths = writer.write_all(&sample_report(), RunConfig::default(), 1).unwrap();

        assert_eq!(paths, vec![out.join(RESULTS_FILE_NAME), out.join(TOP_FILE_NAME)]);
        assert!(paths.iter().all(|p| p.exists()));
    }

    #[test]
    fn test_results_json_uses_external_field_names() {
        let dir = TempDir::new().unwrap();
        let writer = ResultWriter::new(dir.path());
        let path = writer.write_results_json(&sample_report(), RunConfig::default()).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"Avg_ms\": 11.5"));
        assert!(raw.contains("\"P95_ms\""));
        assert!(raw.contains("\"Reason\": \"Exceeded response limit\""));

        let document = read_results_json(&path).unwrap();
        assert_eq!(document.results.len(), 2);
        assert_eq!(document.results[0].name, "Cloudflare");
        assert_eq!(document.exceeded.len(), 1);
        assert_eq!(document.run_config, RunConfig::default());
    }

    #[test]
    fn test_top_text_limited_to_n() {
        let dir = TempDir::new().unwrap();
        let writer = ResultWriter::new(dir.path());
        let path = writer.write_top_text(&sample_report(), 1).unwrap();

        let text = fs::read_to_string(path).unwrap();
        assert!(text.contains("Top 1 Performers"));
        assert!(text.contains("Cloudflare"));
        assert!(!text.contains("Google"));
        assert!(!text.contains("\u{1b}["));
    }

    #[test]
    fn test_top_text_without_results() {
        let dir = TempDir::new().unwrap();
        let writer = ResultWriter::new(dir.path());
        let report = BenchmarkReport { results: vec![], ..sample_report() };

        let text = fs::read_to_string(writer.write_top_text(&report, 5).unwrap()).unwrap();
        assert!(text.contains("No server produced"));
    }

    #[test]
    fn test_unwritable_directory_is_io_error() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "x").unwrap();

        let err = ResultWriter::new(blocker.join("sub")).write_all(&sample_report(), RunConfig::default(), 5).unwrap_err();
        assert_eq!(err.category(), "IO");
    }
}
