//! Client for reading and writing sysctl keys under a base directory.

use crate::config::{self, ConfigMap};
use crate::error::{Result, SysctlError};
use crate::paths::{key_from_path, normalize_base, path_from_key};
use crate::scan::{self, Snapshot, read_value};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default base directory of the sysctl virtual files.
pub const DEFAULT_PATH: &str = "/proc/sys";

/// A client bound to one sysctl tree.
///
/// The base path is usually [`DEFAULT_PATH`], but tests or a procfs mounted
/// elsewhere can use any directory laid out the same way.
#[derive(Debug, Clone)]
pub struct Client {
    base: PathBuf,
}

impl Client {
    /// Create a client rooted at `base`.
    ///
    /// Fails if `base` does not exist or is not a directory. A trailing
    /// separator is accepted and dropped.
    pub fn new(base: impl AsRef<Path>) -> Result<Self> {
        let given = base.as_ref();
        let meta = std::fs::metadata(given)
            .map_err(|err| SysctlError::construction_io(given, err))?;
        if !meta.is_dir() {
            return Err(SysctlError::construction(given, "not a directory"));
        }
        let base =
            normalize_base(given).map_err(|err| SysctlError::construction_io(given, err))?;
        Ok(Self { base })
    }

    /// Create a client for the running system's tree at [`DEFAULT_PATH`].
    pub fn system() -> Result<Self> {
        Self::new(DEFAULT_PATH)
    }

    /// The normalized base directory.
    pub fn base(&self) -> &Path {
        &self.base
    }

    pub fn path_from_key(&self, key: &str) -> PathBuf {
        path_from_key(&self.base, key)
    }

    pub fn key_from_path(&self, path: &Path) -> String {
        key_from_path(&self.base, path)
    }

    /// Read one key. Every I/O failure is reported, permission denial
    /// included.
    pub fn get(&self, key: &str) -> Result<String> {
        let path = self.path_from_key(key);
        debug!(key, path = %path.display(), "get");
        read_value(&path).map_err(|source| SysctlError::KeyRead {
            key: key.to_string(),
            path,
            source,
        })
    }

    /// Write one key. The value is written as-is, without a newline.
    /// Parent directories are never created.
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_from_key(key);
        debug!(key, value, path = %path.display(), "set");
        write_value(&path, value).map_err(|source| SysctlError::KeyWrite {
            key: key.to_string(),
            path,
            source,
        })
    }

    /// All keys matching `pattern` (unanchored regular expression).
    pub fn get_pattern(&self, pattern: &str) -> Result<Snapshot> {
        scan::scan(&self.base, pattern)
    }

    /// All readable keys in the tree.
    pub fn get_all(&self) -> Result<Snapshot> {
        self.get_pattern("")
    }

    /// Load configuration files (later files win) and apply every entry.
    ///
    /// With no files the system default configuration is used. Returns the
    /// mapping that was applied.
    pub fn apply_config_files<P: AsRef<Path>>(&self, files: &[P]) -> Result<ConfigMap> {
        config::apply_config(self, files)
    }
}

fn write_value(path: &Path, value: &str) -> std::io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o644);
    }
    let mut file = options.open(path)?;
    file.write_all(value.as_bytes())
}
