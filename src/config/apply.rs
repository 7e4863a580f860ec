//! Apply merged configuration through a client.

use super::ConfigMap;
use super::merge::load_config;
use crate::client::Client;
use crate::error::{Result, SysctlError};
use std::path::Path;
use tracing::{info, warn};

/// Load `files` (or the default configuration) and write every entry.
///
/// The first failed write stops the run; keys written before it stay
/// written. Returns the mapping that was applied.
pub fn apply_config<P: AsRef<Path>>(client: &Client, files: &[P]) -> Result<ConfigMap> {
    let config = load_config(files)?;
    for (key, value) in &config {
        if let Err(err) = client.set(key, value) {
            warn!(key = %key, error = %err, "aborting configuration apply");
            return Err(SysctlError::ConfigApply {
                key: key.clone(),
                value: value.clone(),
                source: Box::new(err),
            });
        }
        info!(key = %key, value = %value, "applied");
    }
    Ok(config)
}
