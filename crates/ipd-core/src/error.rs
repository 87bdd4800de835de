//! Error types for IPD Core
//!
//! Covers the few things that can go wrong around an otherwise infallible
//! mock model:
//! - Invalid request parameters (history length out of range)
//! - Response serialization failures
//! - Configuration loading and validation

use std::path::PathBuf;

/// Main dashboard error type
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// Request parameter outside its accepted range
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Parameter name as seen by the client
        name: &'static str,
        /// Why it was rejected
        reason: String,
    },

    /// Failed to serialize a response payload
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl DashboardError {
    /// Create an invalid parameter error
    #[inline]
    pub fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// Check if the caller is at fault
    #[inline]
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidParameter { .. })
    }

    /// HTTP status code this error maps to
    #[inline]
    #[must_use]
    pub fn status_code(&self) -> u16 {
        if self.is_client_error() {
            400
        } else {
            500
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read {path}: {source}")]
    Read {
        /// File that was requested
        path: PathBuf,
        /// Underlying IO failure
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for [`crate::DashboardConfig`]
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// File that was requested
        path: PathBuf,
        /// Underlying decode failure
        #[source]
        source: toml::de::Error,
    },

    /// Value rejected by validation
    #[error("invalid value for `{field}`: {reason}")]
    InvalidValue {
        /// Offending field
        field: &'static str,
        /// Why it was rejected
        reason: String,
    },
}

/// Result alias used across the crate
pub type Result<T, E = DashboardError> = std::result::Result<T, E>;
