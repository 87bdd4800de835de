//! Dashboard service
//!
//! The one object the HTTP layer talks to. It is built once at startup and
//! shared behind an `Arc`; the only mutable state is the random source, which
//! is seeded from configuration so a fixed seed replays the same responses.

use crate::chart::Figure;
use crate::config::DashboardConfig;
use crate::error::{ConfigError, DashboardError, Result};
use crate::history::{HistoryIter, MAX_MONTHS};
use crate::model::{ModelHandle, ModelInfo};
use crate::types::{Feature, HistoryRecord, PredictionInput, PredictionOutput};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Records plus the chart built from them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoricalData {
    /// Chart description, JSON-encoded
    pub plot: String,
    pub data: Vec<HistoryRecord>,
}

/// Liveness document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub model_loaded: bool,
    pub using_mock_data: bool,
    pub timestamp: DateTime<Utc>,
}

/// Mock prediction service
#[derive(Debug)]
pub struct DashboardService {
    config: DashboardConfig,
    model: ModelHandle,
    rng: Mutex<StdRng>,
}

impl DashboardService {
    /// Build from configuration
    ///
    /// Seeds the random source from `config.seed`, or from OS entropy.
    #[must_use]
    pub fn new(config: DashboardConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }

    /// Build with an explicit random source
    #[must_use]
    pub fn with_rng(config: DashboardConfig, rng: StdRng) -> Self {
        let model = ModelHandle::load(config.model_path.as_deref(), config.prediction_model);
        tracing::info!(
            prediction_model = ?config.prediction_model,
            history_model = ?config.history_model,
            seeded = config.seed.is_some(),
            model_loaded = model.is_loaded(),
            "dashboard service ready"
        );
        Self {
            config,
            model,
            rng: Mutex::new(rng),
        }
    }

    /// Configuration in use
    #[inline]
    #[must_use]
    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Model handle
    #[inline]
    #[must_use]
    pub fn model(&self) -> &ModelHandle {
        &self.model
    }

    /// Mock prediction for `input`
    pub fn predict(&self, input: &PredictionInput) -> PredictionOutput {
        tracing::debug!(features = ?input.feature_vector(), "predict");
        let mut rng = self.rng.lock();
        self.model.prediction_model().predict(input, &mut *rng)
    }

    /// Lazy history series
    ///
    /// Uses the configured length when `months` is `None`.
    ///
    /// # Errors
    /// `DashboardError::InvalidParameter` if `months` is outside `1..=240`,
    /// or `DashboardError::Config` if `months` is `None` and the configured
    /// length is.
    pub fn history(&self, months: Option<u32>) -> Result<HistoryIter<StdRng>> {
        let months = match months {
            Some(months) if !(1..=MAX_MONTHS).contains(&months) => {
                return Err(DashboardError::invalid_parameter(
                    "months",
                    format!("must be between 1 and {MAX_MONTHS}, got {months}"),
                ));
            }
            Some(months) => months,
            None => {
                let months = self.config.history_months;
                if !(1..=MAX_MONTHS).contains(&months) {
                    return Err(ConfigError::InvalidValue {
                        field: "history_months",
                        reason: format!("must be between 1 and {MAX_MONTHS}, got {months}"),
                    }
                    .into());
                }
                months
            }
        };
        Ok(self.config.history_model.generate(self.fork_rng(), months))
    }

    /// History records with their chart
    ///
    /// # Errors
    /// Invalid `months`, or chart serialization failure.
    pub fn historical_data(&self, months: Option<u32>) -> Result<HistoricalData> {
        let data: Vec<HistoryRecord> = self.history(months)?.collect();
        let plot = Figure::history(&data).to_json_string()?;
        tracing::debug!(records = data.len(), "historical data generated");
        Ok(HistoricalData { plot, data })
    }

    /// Static model description
    #[inline]
    #[must_use]
    pub fn model_info(&self) -> ModelInfo {
        self.model.info()
    }

    /// Mock feature importance
    #[inline]
    #[must_use]
    pub fn feature_importance(&self) -> BTreeMap<Feature, f64> {
        self.model.feature_importance()
    }

    /// Liveness report
    #[must_use]
    pub fn health(&self) -> HealthStatus {
        HealthStatus {
            status: "healthy".to_string(),
            model_loaded: self.model.is_loaded(),
            using_mock_data: self.model.using_mock_data(),
            timestamp: Utc::now(),
        }
    }

    /// Child generator so a lazy series doesn't hold the lock
    fn fork_rng(&self) -> StdRng {
        let seed: u64 = self.rng.lock().gen();
        StdRng::seed_from_u64(seed)
    }
}

impl Default for DashboardService {
    fn default() -> Self {
        Self::new(DashboardConfig::default())
    }
}
