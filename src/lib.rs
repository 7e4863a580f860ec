//! Sysctl Tree Library
//!
//! Reads and writes dotted sysctl keys (`net.ipv4.ip_forward`) backed by a
//! tree of plain-text files, scans the tree with a pattern, and applies
//! layered `sysctl.conf` files.
//!
//! ```no_run
//! use sysctl_tree::Client;
//!
//! let client = Client::system()?;
//! let forward = client.get("net.ipv4.ip_forward")?;
//! let frags = client.get_pattern("^net.ipv4.ipfrag")?;
//! client.apply_config_files(&["/etc/sysctl.d/99-local.conf"])?;
//! # Ok::<(), sysctl_tree::SysctlError>(())
//! ```

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod format;
pub mod paths;
pub mod scan;

pub use client::{Client, DEFAULT_PATH};
pub use error::{ErrorCode, Result, SysctlError};
pub use scan::Snapshot;
