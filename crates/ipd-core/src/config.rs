//! Dashboard configuration
//!
//! Defaults reproduce the stock dashboard (`0.0.0.0:5000`, 24 months, trend
//! predictor, seasonal history). Values can come from a TOML file and are
//! then overridden by command-line flags.

use crate::error::ConfigError;
use crate::history::{HistoryModel, DEFAULT_MONTHS, MAX_MONTHS};
use crate::predictor::PredictionModel;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

/// Dashboard configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Bind address
    pub host: IpAddr,
    /// Bind port
    pub port: u16,
    /// Seed for the random source; entropy when absent
    pub seed: Option<u64>,
    /// Months of history served by default
    pub history_months: u32,
    /// Mock prediction formula
    pub prediction_model: PredictionModel,
    /// Synthetic history formula
    pub history_model: HistoryModel,
    /// Where a model artifact would live
    pub model_path: Option<PathBuf>,
}

impl DashboardConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a TOML file; missing keys take their defaults
    ///
    /// # Errors
    /// - `ConfigError::Read` if the file can't be read
    /// - `ConfigError::Parse` if it isn't valid configuration
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// With bind host
    #[inline]
    #[must_use]
    pub fn with_host(mut self, host: IpAddr) -> Self {
        self.host = host;
        self
    }

    /// With bind port
    #[inline]
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// With a fixed seed
    #[inline]
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// With default history length
    #[inline]
    #[must_use]
    pub fn with_history_months(mut self, months: u32) -> Self {
        self.history_months = months;
        self
    }

    /// With prediction formula
    #[inline]
    #[must_use]
    pub fn with_prediction_model(mut self, model: PredictionModel) -> Self {
        self.prediction_model = model;
        self
    }

    /// With history formula
    #[inline]
    #[must_use]
    pub fn with_history_model(mut self, model: HistoryModel) -> Self {
        self.history_model = model;
        self
    }

    /// With model artifact path
    #[inline]
    #[must_use]
    pub fn with_model_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.model_path = Some(path.into());
        self
    }

    /// Socket address to bind
    #[inline]
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Reject unusable values
    ///
    /// # Errors
    /// `ConfigError::InvalidValue` naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "port",
                reason: "must be non-zero".to_string(),
            });
        }
        if !(1..=MAX_MONTHS).contains(&self.history_months) {
            return Err(ConfigError::InvalidValue {
                field: "history_months",
                reason: format!("must be between 1 and {MAX_MONTHS}"),
            });
        }
        Ok(())
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 5000,
            seed: None,
            history_months: DEFAULT_MONTHS,
            prediction_model: PredictionModel::Trend,
            history_model: HistoryModel::Seasonal,
            model_path: None,
        }
    }
}
