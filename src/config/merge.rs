//! Ordered merge of configuration files.
//!
//! Files are folded left to right: when two files assign the same key, the
//! file given later wins.

use super::ConfigMap;
use super::source::parse_config;
use crate::error::Result;
use std::path::Path;
use tracing::info;

/// Configuration file read when no explicit files are given.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/sysctl.conf";

/// Merge `overlay` into `base`; keys in `overlay` replace keys in `base`.
pub fn merge(mut base: ConfigMap, overlay: ConfigMap) -> ConfigMap {
    base.extend(overlay);
    base
}

/// Merge multiple mappings in order, with later mappings taking precedence.
pub fn merge_all(maps: impl IntoIterator<Item = ConfigMap>) -> ConfigMap {
    maps.into_iter().fold(ConfigMap::new(), merge)
}

/// Load and merge configuration files in the given order.
///
/// With no files, [`DEFAULT_CONFIG_PATH`] is read. The first file that fails
/// to parse aborts the whole load.
pub fn load_config<P: AsRef<Path>>(files: &[P]) -> Result<ConfigMap> {
    if files.is_empty() {
        return load_files([Path::new(DEFAULT_CONFIG_PATH)]);
    }
    load_files(files.iter().map(|f| f.as_ref()))
}

fn load_files<'a>(files: impl IntoIterator<Item = &'a Path>) -> Result<ConfigMap> {
    let mut maps = Vec::new();
    for file in files {
        let parsed = parse_config(file)?;
        info!(file = %file.display(), entries = parsed.len(), "loaded sysctl configuration");
        maps.push(parsed);
    }
    Ok(merge_all(maps))
}
