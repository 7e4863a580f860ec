//! Sysctl configuration files.
//!
//! Parses `sysctl.conf`-style files and merges several of them into one
//! mapping, later files overriding earlier ones. The merged mapping is
//! transient: it is applied key by key through a [`Client`](crate::Client)
//! and then discarded.

mod apply;
mod merge;
mod source;

use std::collections::BTreeMap;

pub use apply::apply_config;
pub use merge::{DEFAULT_CONFIG_PATH, load_config, merge, merge_all};
pub use source::{Assignment, parse_assignments, parse_config, parse_config_str};

/// Key to value mapping produced by parsing or merging configuration.
pub type ConfigMap = BTreeMap<String, String>;
