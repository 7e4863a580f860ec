//! Structured error types for key, scan and configuration operations.

use serde::Serialize;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Error codes for programmatic error handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    ConstructionError,
    InvalidPattern,
    KeyReadError,
    KeyWriteError,
    ScanIoError,
    ConfigParseError,
    ConfigApplyError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ConstructionError => "CONSTRUCTION_ERROR",
            ErrorCode::InvalidPattern => "INVALID_PATTERN",
            ErrorCode::KeyReadError => "KEY_READ_ERROR",
            ErrorCode::KeyWriteError => "KEY_WRITE_ERROR",
            ErrorCode::ScanIoError => "SCAN_IO_ERROR",
            ErrorCode::ConfigParseError => "CONFIG_PARSE_ERROR",
            ErrorCode::ConfigApplyError => "CONFIG_APPLY_ERROR",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ErrorCode {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

/// Why a configuration file could not be parsed.
#[derive(Error, Debug)]
pub enum ParseFailure {
    /// The file could not be opened or read.
    #[error("could not read file: {0}")]
    Unreadable(#[source] io::Error),

    /// A non-comment line does not have the `key = value` shape.
    #[error("line {line}: could not parse {text:?}")]
    MalformedLine { line: usize, text: String },
}

/// Errors produced by the key/path engine, the scanner and the config loader.
#[derive(Error, Debug)]
pub enum SysctlError {
    /// The base directory is missing or is not a directory.
    #[error("invalid base directory {}: {reason}", .path.display())]
    Construction {
        path: PathBuf,
        reason: String,
        #[source]
        source: Option<io::Error>,
    },

    #[error("invalid pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex_lite::Error,
    },

    #[error("could not read key {key} ({}): {source}", .path.display())]
    KeyRead {
        key: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not write key {key} ({}): {source}", .path.display())]
    KeyWrite {
        key: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A non-permission failure while walking the tree.
    #[error("error accessing sysctl path {}: {source}", .path.display())]
    ScanIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not parse file {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: ParseFailure,
    },

    /// A write failed while applying a merged configuration.
    #[error("could not set {key} = {value}: {source}")]
    ConfigApply {
        key: String,
        value: String,
        #[source]
        source: Box<SysctlError>,
    },
}

impl SysctlError {
    pub fn code(&self) -> ErrorCode {
        match self {
            SysctlError::Construction { .. } => ErrorCode::ConstructionError,
            SysctlError::InvalidPattern { .. } => ErrorCode::InvalidPattern,
            SysctlError::KeyRead { .. } => ErrorCode::KeyReadError,
            SysctlError::KeyWrite { .. } => ErrorCode::KeyWriteError,
            SysctlError::ScanIo { .. } => ErrorCode::ScanIoError,
            SysctlError::ConfigParse { .. } => ErrorCode::ConfigParseError,
            SysctlError::ConfigApply { .. } => ErrorCode::ConfigApplyError,
        }
    }

    // Convenience constructors

    pub fn construction(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        SysctlError::Construction {
            path: path.into(),
            reason: reason.into(),
            source: None,
        }
    }

    pub fn construction_io(path: impl Into<PathBuf>, err: io::Error) -> Self {
        SysctlError::Construction {
            path: path.into(),
            reason: err.to_string(),
            source: Some(err),
        }
    }

    pub fn unreadable_config(path: impl Into<PathBuf>, err: io::Error) -> Self {
        SysctlError::ConfigParse {
            path: path.into(),
            source: ParseFailure::Unreadable(err),
        }
    }

    pub fn malformed_line(path: impl Into<PathBuf>, line: usize, text: impl Into<String>) -> Self {
        SysctlError::ConfigParse {
            path: path.into(),
            source: ParseFailure::MalformedLine {
                line,
                text: text.into(),
            },
        }
    }

    /// The I/O error kind behind this error, if any.
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            SysctlError::KeyRead { source, .. }
            | SysctlError::KeyWrite { source, .. }
            | SysctlError::ScanIo { source, .. } => Some(source.kind()),
            SysctlError::ConfigParse {
                source: ParseFailure::Unreadable(err),
                ..
            } => Some(err.kind()),
            SysctlError::Construction {
                source: Some(err), ..
            } => Some(err.kind()),
            SysctlError::ConfigApply { source, .. } => source.io_kind(),
            _ => None,
        }
    }
}

/// Serializable error report, used for machine-readable output.
#[derive(Debug, Serialize)]
pub struct ErrorReport {
    pub code: ErrorCode,
    pub message: String,
}

impl From<&SysctlError> for ErrorReport {
    fn from(err: &SysctlError) -> Self {
        Self {
            code: err.code(),
            message: err.to_string(),
        }
    }
}

/// Result type for sysctl operations.
pub type Result<T> = std::result::Result<T, SysctlError>;
