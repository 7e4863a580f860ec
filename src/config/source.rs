//! Parser for a single sysctl configuration file.
//!
//! Format, one assignment per line:
//!
//! ```text
//! # comment
//! ; also a comment
//! kernel.domainname = example.com   # trailing comment
//! ```
//!
//! `#` truncates the line first, then `;`. What remains is trimmed; blank
//! results are skipped. Everything else must split on the literal `" = "`
//! into exactly two parts.

use super::ConfigMap;
use crate::error::{Result, SysctlError};
use std::path::Path;

/// One `key = value` line, in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub key: String,
    pub value: String,
    /// 1-based line number in the source file.
    pub line: usize,
}

/// Read and parse a configuration file into a key/value mapping.
///
/// Later lines override earlier lines with the same key. Bytes that are not
/// valid UTF-8 are replaced, as leaf values are.
pub fn parse_config(path: &Path) -> Result<ConfigMap> {
    let bytes = std::fs::read(path).map_err(|err| SysctlError::unreadable_config(path, err))?;
    parse_config_str(path, &String::from_utf8_lossy(&bytes))
}

/// Parse configuration text. `path` is only used to label errors.
pub fn parse_config_str(path: &Path, content: &str) -> Result<ConfigMap> {
    Ok(parse_assignments(path, content)?
        .into_iter()
        .map(|a| (a.key, a.value))
        .collect())
}

/// Parse configuration text into its ordered assignments.
///
/// Fails on the first malformed line; nothing is returned for the file in
/// that case.
pub fn parse_assignments(path: &Path, content: &str) -> Result<Vec<Assignment>> {
    let mut out = Vec::new();
    for (idx, raw) in content.lines().enumerate() {
        let line = idx + 1;
        let stripped = strip_comments(raw);
        if stripped.is_empty() {
            continue;
        }
        let tokens: Vec<&str> = stripped.split(" = ").collect();
        let [key, value] = tokens.as_slice() else {
            return Err(SysctlError::malformed_line(path, line, raw));
        };
        out.push(Assignment {
            key: key.trim().to_string(),
            value: value.trim().to_string(),
            line,
        });
    }
    Ok(out)
}

fn strip_comments(line: &str) -> &str {
    let line = line.split('#').next().unwrap_or_default();
    let line = line.split(';').next().unwrap_or_default();
    line.trim()
}
