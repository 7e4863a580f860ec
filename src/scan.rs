//! Recursive, pattern-filtered snapshot of a sysctl tree.
//!
//! The walk visits entries in lexicographic order and descends into
//! directories. Only regular files are leaves; a symlink counts when it
//! resolves to a regular file, and is never descended into. A leaf is read
//! only when its derived key matches the pattern. Leaves the process cannot
//! read are omitted; any other I/O failure aborts the whole scan.

use crate::error::{Result, SysctlError};
use crate::paths::key_from_path;
use regex_lite::Regex;
use std::collections::BTreeMap;
use std::fs::{self, Metadata};
use std::io;
use std::path::Path;
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

/// Point-in-time mapping of key to trimmed value. Iteration order is
/// incidental; callers must not rely on it.
pub type Snapshot = BTreeMap<String, String>;

/// Compile a key pattern. Matching is unanchored, like `grep -E`, so the
/// empty pattern matches every key.
pub fn compile_pattern(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|source| SysctlError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

/// Walk `base` and collect every leaf whose key matches `pattern`.
///
/// A `base` that is itself a symlink to a directory is followed.
pub fn scan(base: &Path, pattern: &str) -> Result<Snapshot> {
    let re = compile_pattern(pattern)?;
    debug!(base = %base.display(), pattern, "scanning sysctl tree");

    let walker = WalkDir::new(base)
        .follow_root_links(true)
        .follow_links(false)
        .min_depth(1)
        .sort_by_file_name();

    let mut snapshot = Snapshot::new();
    for entry in walker {
        let entry = entry.map_err(|err| {
            let path = err.path().unwrap_or(base).to_path_buf();
            scan_error(&path, io::Error::from(err))
        })?;
        if entry.file_type().is_dir() {
            continue;
        }
        visit_entry(base, &entry, &re, &mut snapshot)?;
    }

    debug!(matches = snapshot.len(), "scan complete");
    Ok(snapshot)
}

fn visit_entry(base: &Path, entry: &DirEntry, re: &Regex, out: &mut Snapshot) -> Result<()> {
    let path = entry.path();
    let key = key_from_path(base, path);
    if !re.is_match(&key) {
        return Ok(());
    }
    let Some(meta) = leaf_metadata(entry)? else {
        debug!(path = %path.display(), "skipping non-regular entry");
        return Ok(());
    };
    if !is_readable_by_others(&meta) {
        debug!(key = %key, "skipping leaf without read permission");
        return Ok(());
    }
    match read_value(path) {
        Ok(value) => {
            out.insert(key, value);
            Ok(())
        }
        Err(err) if err.kind() == io::ErrorKind::PermissionDenied => {
            debug!(key = %key, "skipping unreadable leaf");
            Ok(())
        }
        Err(source) => Err(scan_error(path, source)),
    }
}

/// Metadata of `entry` if it is a leaf: a regular file, or a symlink
/// resolving to one. A dangling symlink is a scan failure.
fn leaf_metadata(entry: &DirEntry) -> Result<Option<Metadata>> {
    let meta = if entry.path_is_symlink() {
        fs::metadata(entry.path())
    } else {
        entry.metadata().map_err(io::Error::from)
    }
    .map_err(|source| scan_error(entry.path(), source))?;

    Ok(meta.is_file().then_some(meta))
}

/// Read a leaf file and trim surrounding whitespace.
pub(crate) fn read_value(path: &Path) -> io::Result<String> {
    let data = fs::read(path)?;
    Ok(String::from_utf8_lossy(&data).trim().to_string())
}

/// Best-effort readability check: whether "other" users have read
/// permission. Ignores owner/group bits and the caller's identity, so it is
/// only a heuristic and never an access control.
#[cfg(unix)]
fn is_readable_by_others(meta: &Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    meta.permissions().mode() & 0o004 != 0
}

#[cfg(not(unix))]
fn is_readable_by_others(_meta: &Metadata) -> bool {
    true
}

fn scan_error(path: &Path, source: io::Error) -> SysctlError {
    SysctlError::ScanIo {
        path: path.to_path_buf(),
        source,
    }
}
