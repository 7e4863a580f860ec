//! Mapping between dotted sysctl keys and leaf file paths.
//!
//! A key such as `net.ipv4.ip_forward` lives at `<base>/net/ipv4/ip_forward`.
//! Every `.` is a hierarchy separator; there is no escaping. This module is
//! pure path manipulation (no filesystem I/O).

use std::path::{Component, Path, PathBuf};

/// Separator between key segments.
pub const KEY_SEPARATOR: char = '.';

/// Map a dotted key to its leaf file under `base`.
///
/// An empty key maps to `base` itself.
pub fn path_from_key(base: &Path, key: &str) -> PathBuf {
    if key.is_empty() {
        return base.to_path_buf();
    }
    base.join(key.replace(KEY_SEPARATOR, std::path::MAIN_SEPARATOR_STR))
}

/// Map a leaf file path back to its dotted key.
///
/// Strips `base` from the front of `path` and joins the remaining components
/// with `.`. A path that is not rooted at `base` is converted as-is.
pub fn key_from_path(base: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(base).unwrap_or(path);
    let segments: Vec<_> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(name) => Some(name.to_string_lossy()),
            _ => None,
        })
        .collect();
    segments.join(".")
}

/// Make `path` absolute (relative to the working directory) and resolve
/// `.`/`..` lexically. Trailing separators are dropped.
pub fn normalize_base(path: &Path) -> std::io::Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };
    Ok(normalize_path_components(&absolute))
}

/// Normalize path components without requiring the file to exist.
fn normalize_path_components(path: &Path) -> PathBuf {
    let mut components = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if let Some(Component::Normal(_)) = components.last() {
                    components.pop();
                } else if !matches!(components.last(), Some(Component::RootDir)) {
                    components.push(Component::ParentDir);
                }
            }
            other => components.push(other),
        }
    }

    components.iter().collect()
}
