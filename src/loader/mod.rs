//! Server and domain list loading
//!
//! Both lists are validated here so the benchmark itself only ever sees
//! non-empty, well-formed input.

use crate::{
    error::{AppError, ErrorContext, Result},
    models::Server,
};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Raw servers file entry; fields are optional so missing ones get a proper message
#[derive(Debug, Deserialize)]
struct ServerEntry {
    #[serde(rename = "Name", alias = "name", default)]
    name: Option<String>,
    #[serde(rename = "Address", alias = "address", default)]
    address: Option<String>,
}

/// Load servers from a JSON file
pub fn load_servers<P: AsRef<Path>>(path: P) -> Result<Vec<Server>> {
    let path = path.as_ref();
    let content = read_list_file(path, "servers")?;
    parse_servers(&content).with_context(|| format!("Invalid servers file '{}'", path.display()))
}

/// Parse a JSON array of `{"Name": ..., "Address": ...}` objects
pub fn parse_servers(content: &str) -> Result<Vec<Server>> {
    let entries: Vec<ServerEntry> = serde_json::from_str(content)?;

    if entries.is_empty() {
        return Err(AppError::validation("Server list is empty"));
    }

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            let name = required_field(entry.name, "Name", index)?;
            let address = required_field(entry.address, "Address", index)?;
            Ok(Server::new(name, address))
        })
        .collect()
}

fn required_field(value: Option<String>, field: &str, index: usize) -> Result<String> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(AppError::validation(format!(
            "Server entry {} is missing '{}'",
            index, field
        ))),
    }
}

/// Load domains from a text file, one per line
pub fn load_domains<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let content = read_list_file(path, "domains")?;
    parse_domains(&content).with_context(|| format!("Invalid domains file '{}'", path.display()))
}

/// Parse domain lines
///
/// Blank lines and `#` comments are skipped. Duplicates are dropped keeping the
/// first spelling; DNS names compare case-insensitively.
pub fn parse_domains(content: &str) -> Result<Vec<String>> {
    let mut seen = HashSet::new();
    let mut domains = Vec::new();

    for line in content.lines() {
        let domain = line.trim();
        if domain.is_empty() || domain.starts_with('#') {
            continue;
        }
        if seen.insert(domain.to_ascii_lowercase()) {
            domains.push(domain.to_string());
        }
    }

    if domains.is_empty() {
        return Err(AppError::validation("Domain list is empty"));
    }

    Ok(domains)
}

fn read_list_file(path: &Path, kind: &str) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| AppError::io(format!("Failed to read {} file '{}': {}", kind, path.display(), e)))
}
