//! Output formatting for snapshots and errors.

use crate::error::{ErrorReport, SysctlError};
use serde_json::{Value, json};
use std::collections::BTreeMap;

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!(
                "Invalid format '{}'. Valid options: text, json",
                s
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Format key/value pairs as `key = value` lines, sorted by key.
pub fn format_entries_text(entries: &BTreeMap<String, String>) -> String {
    let mut out = String::new();
    for (key, value) in entries {
        out.push_str(&format!("{} = {}\n", key, value));
    }
    out
}

/// Format key/value pairs as a JSON object.
pub fn format_entries_json(entries: &BTreeMap<String, String>) -> Value {
    json!(entries)
}

pub fn format_entries(entries: &BTreeMap<String, String>, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format_entries_text(entries),
        OutputFormat::Json => format!("{}\n", format_entries_json(entries)),
    }
}

pub fn format_error(err: &SysctlError, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format!("error [{}]: {}", err.code(), error_chain(err)),
        OutputFormat::Json => json!(ErrorReport::from(err)).to_string(),
    }
}

/// The error message followed by each nested cause.
fn error_chain(err: &SysctlError) -> String {
    let mut msg = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        let text = cause.to_string();
        if !msg.contains(&text) {
            msg.push_str(": ");
            msg.push_str(&text);
        }
        source = std::error::Error::source(cause);
    }
    msg
}
