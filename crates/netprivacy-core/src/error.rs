//! Shared error type across netprivacy crates.

use std::io;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Pipeline-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Malformed address, OUI, or path.
    InvalidInput,
    /// Directory/file creation or write failure.
    FilesystemError,
    /// Unreadable or invalid job configuration.
    ConfigError,
    /// Unsupported configuration version.
    UnsupportedVersion,
}

impl ErrorCode {
    /// String representation used in JSON outcomes and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidInput => "INVALID_INPUT",
            ErrorCode::FilesystemError => "FILESYSTEM_ERROR",
            ErrorCode::ConfigError => "CONFIG_ERROR",
            ErrorCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, NetPrivacyError>;

/// Unified error type used by core and job.
#[derive(Debug, Error)]
pub enum NetPrivacyError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("{}: {source}", path.display())]
    FileSystem {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("config: {0}")]
    Config(String),
    #[error("unsupported config version {0}")]
    UnsupportedVersion(u32),
}

impl NetPrivacyError {
    /// Attach the path an I/O operation was working on.
    pub fn fs(path: impl Into<PathBuf>, source: io::Error) -> Self {
        NetPrivacyError::FileSystem {
            path: path.into(),
            source,
        }
    }

    /// Map internal error to a stable pipeline-facing code.
    pub fn code(&self) -> ErrorCode {
        match self {
            NetPrivacyError::InvalidInput(_) => ErrorCode::InvalidInput,
            NetPrivacyError::FileSystem { .. } => ErrorCode::FilesystemError,
            NetPrivacyError::Config(_) => ErrorCode::ConfigError,
            NetPrivacyError::UnsupportedVersion(_) => ErrorCode::UnsupportedVersion,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filesystem_error_names_path_and_cause() {
        let err = NetPrivacyError::fs(
            "/target/etc/x.conf",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.code(), ErrorCode::FilesystemError);
        let msg = err.to_string();
        assert!(msg.contains("/target/etc/x.conf"));
        assert!(msg.contains("denied"));
    }
}
