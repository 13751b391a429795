//! Error handling module for the driver's station engine
//!
//! Provides centralized error handling with proper error types using thiserror.
//! Every stage of the configuration pipeline returns these types so the caller
//! can tell which kind of failure stopped the run.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for driver's station configuration
#[derive(Error, Debug)]
pub enum DsError {
    /// Filesystem errors (mkdir, create, write, symlink)
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Template parse or execution errors
    #[error("Template error in {source_name}: {source}")]
    Template {
        source_name: String,
        #[source]
        source: minijinja::Error,
    },

    /// Requested template is not part of the bundled assets
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    /// External command exited unsuccessfully
    #[error("Command {program} failed (exit code {code}): {stderr}")]
    Command {
        program: String,
        code: i32,
        stderr: String,
    },

    /// External command could not be started at all
    #[error("Failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Service supervision errors
    #[error("Service {name}: {reason}")]
    Service { name: String, reason: String },

    /// Configuration record errors (loading, validation)
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for driver's station operations
pub type Result<T> = std::result::Result<T, DsError>;

impl DsError {
    /// Create an IO error bound to the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a template error for the named template source
    pub fn template(source_name: impl Into<String>, source: minijinja::Error) -> Self {
        Self::Template {
            source_name: source_name.into(),
            source,
        }
    }

    /// Create a service supervision error
    pub fn service(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Service {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DsError::config("Team is required");
        assert_eq!(err.to_string(), "Configuration error: Team is required");

        let err = DsError::service("hostapd", "no service definition");
        assert_eq!(err.to_string(), "Service hostapd: no service definition");
    }

    #[test]
    fn test_io_error_keeps_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = DsError::io("/etc/dnsmasq.conf", io_err);
        assert!(matches!(err, DsError::Io { .. }));
        assert!(err.to_string().contains("/etc/dnsmasq.conf"));
    }

    #[test]
    fn test_command_error_display() {
        let err = DsError::Command {
            program: "xbps-install".to_string(),
            code: 19,
            stderr: "unable to locate".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Command xbps-install failed (exit code 19): unable to locate"
        );
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: DsError = json_err.into();
        assert!(matches!(err, DsError::Json(_)));
    }
}
