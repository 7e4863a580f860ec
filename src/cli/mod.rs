//! CLI command definitions for sysctl-tree
//!
//! This module defines the CLI structure using clap's derive macros.
//! The main entry point is the `Cli` struct which contains subcommands.

use crate::client::DEFAULT_PATH;
use crate::format::OutputFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Environment variable overriding the default base directory.
pub const BASE_ENV: &str = "SYSCTL_TREE_BASE";

/// Read, write and apply sysctl keys
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Base directory of the sysctl tree (default: $SYSCTL_TREE_BASE or /proc/sys)
    #[arg(short, long, global = true)]
    pub base: Option<PathBuf>,

    /// Output format: text (default) or json
    #[arg(short, long, default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2", global = true)]
    pub log: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the value of one or more keys
    Get {
        #[arg(value_name = "KEY", required = true)]
        keys: Vec<String>,
    },

    /// Write a value, as `KEY VALUE` or `KEY=VALUE`
    Set(SetArgs),

    /// Print every readable key
    All,

    /// Print keys matching a regular expression
    Match {
        #[arg(value_name = "PATTERN")]
        pattern: String,
    },

    /// Apply configuration files; later files win (default: /etc/sysctl.conf)
    Load {
        #[arg(value_name = "FILE")]
        files: Vec<PathBuf>,
    },
}

/// Arguments for the set subcommand
#[derive(Args, Debug)]
pub struct SetArgs {
    /// Key, or `KEY=VALUE` when no separate value is given
    #[arg(value_name = "KEY")]
    pub key: String,

    #[arg(value_name = "VALUE")]
    pub value: Option<String>,
}

impl SetArgs {
    /// Resolve the key and value from either accepted form.
    pub fn assignment(&self) -> Result<(String, String), String> {
        match &self.value {
            Some(value) => Ok((self.key.clone(), value.clone())),
            None => match self.key.split_once('=') {
                Some((k, v)) if !k.trim().is_empty() => {
                    Ok((k.trim().to_string(), v.trim().to_string()))
                }
                _ => Err(format!("expected KEY VALUE or KEY=VALUE, got '{}'", self.key)),
            },
        }
    }
}

impl Cli {
    /// Base directory: `--base`, then the environment, then the default.
    pub fn resolve_base(&self) -> PathBuf {
        resolve_base(self.base.clone(), std::env::var_os(BASE_ENV).map(PathBuf::from))
    }
}

fn resolve_base(flag: Option<PathBuf>, env: Option<PathBuf>) -> PathBuf {
    flag.or(env).unwrap_or_else(|| PathBuf::from(DEFAULT_PATH))
}
