//! Model handle
//!
//! Placeholder for the forecasting model the dashboard is meant to front.
//! No inference backend exists: the handle only records whether a model
//! artifact was found at the configured path, and describes the model the
//! mock stands in for.

use crate::predictor::PredictionModel;
use crate::types::{Feature, Metric};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Whether a model artifact backs the handle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelStatus {
    /// Nothing configured or nothing found
    Mock,
    /// Artifact exists on disk; predictions are still mocked
    ArtifactPresent(PathBuf),
}

/// Reported accuracy of the reference model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccuracyMetrics {
    #[serde(rename = "SMAPE")]
    pub smape: String,
    #[serde(rename = "MAE")]
    pub mae: String,
    #[serde(rename = "RMSE")]
    pub rmse: String,
    #[serde(rename = "R²")]
    pub r_squared: String,
}

/// Static model description served by `/model_info`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub model_type: String,
    pub algorithm: String,
    pub prediction_window: u32,
    pub lookback_window: u32,
    pub features: Vec<Feature>,
    pub target_variables: Vec<Metric>,
    pub deployment_status: String,
    pub last_updated: String,
    pub accuracy_metrics: AccuracyMetrics,
    pub model_loaded: bool,
    pub using_mock_data: bool,
}

/// Handle to the (placeholder) forecasting model
#[derive(Debug, Clone)]
pub struct ModelHandle {
    status: ModelStatus,
    prediction_model: PredictionModel,
}

impl ModelHandle {
    /// Handle with no artifact
    #[inline]
    #[must_use]
    pub fn mock(prediction_model: PredictionModel) -> Self {
        Self {
            status: ModelStatus::Mock,
            prediction_model,
        }
    }

    /// Look for a model artifact at `path`
    ///
    /// A missing path is not an error; the handle falls back to mock mode.
    #[must_use]
    pub fn load(path: Option<&Path>, prediction_model: PredictionModel) -> Self {
        let status = match path {
            Some(p) if p.exists() => {
                tracing::info!(path = %p.display(), "model artifact found; no inference backend, serving mock predictions");
                ModelStatus::ArtifactPresent(p.to_path_buf())
            }
            Some(p) => {
                tracing::warn!(path = %p.display(), "model artifact not found; using mock predictions");
                ModelStatus::Mock
            }
            None => {
                tracing::info!("no model path configured; using mock predictions");
                ModelStatus::Mock
            }
        };
        Self {
            status,
            prediction_model,
        }
    }

    /// Current status
    #[inline]
    #[must_use]
    pub fn status(&self) -> &ModelStatus {
        &self.status
    }

    /// Whether an artifact was found
    #[inline]
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        matches!(self.status, ModelStatus::ArtifactPresent(_))
    }

    /// Predictions are always mocked
    #[inline]
    #[must_use]
    pub fn using_mock_data(&self) -> bool {
        true
    }

    /// Mock formula in use
    #[inline]
    #[must_use]
    pub fn prediction_model(&self) -> PredictionModel {
        self.prediction_model
    }

    /// Target columns
    #[inline]
    #[must_use]
    pub fn target_columns(&self) -> &'static [Metric] {
        &Metric::ALL
    }

    /// Descriptive document for `/model_info`
    #[must_use]
    pub fn info(&self) -> ModelInfo {
        let algorithm = match self.prediction_model {
            PredictionModel::Trend => "AutoAI Ensemble",
            PredictionModel::Scaled => "IBM Watson AutoAI (Mock)",
        };
        let deployment_status = if self.is_loaded() {
            "Active"
        } else {
            "Mock Mode - Ready for Integration"
        };

        ModelInfo {
            model_type: "Time Series Forecasting".to_string(),
            algorithm: algorithm.to_string(),
            prediction_window: 1,
            lookback_window: 10,
            features: self.prediction_model.features().to_vec(),
            target_variables: self.target_columns().to_vec(),
            deployment_status: deployment_status.to_string(),
            last_updated: "2024-08-04".to_string(),
            accuracy_metrics: AccuracyMetrics {
                smape: "12.5%".to_string(),
                mae: "8.3".to_string(),
                rmse: "15.7".to_string(),
                r_squared: "0.876".to_string(),
            },
            model_loaded: self.is_loaded(),
            using_mock_data: self.using_mock_data(),
        }
    }

    /// Mock feature importance scores
    #[must_use]
    pub fn feature_importance(&self) -> BTreeMap<Feature, f64> {
        [
            (Feature::NoOfRoadWorkSanctioned, 0.25),
            (Feature::LengthOfRoadWorkSanctioned, 0.20),
            (Feature::CostOfWorksSanctioned, 0.18),
            (Feature::NoOfBridgesSanctioned, 0.15),
            (Feature::ExpenditureOccured, 0.12),
            (Feature::LengthOfRoadWorkCompleted, 0.10),
        ]
        .into_iter()
        .collect()
    }
}

impl Default for ModelHandle {
    fn default() -> Self {
        Self::mock(PredictionModel::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_path_falls_back_to_mock() {
        let handle = ModelHandle::load(Some(Path::new("/definitely/not/here.pkl")), PredictionModel::Trend);
        assert_eq!(handle.status(), &ModelStatus::Mock);
        assert!(!handle.is_loaded());
        assert!(handle.using_mock_data());
    }

    #[test]
    fn existing_path_marks_loaded() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let handle = ModelHandle::load(Some(file.path()), PredictionModel::Trend);
        assert!(handle.is_loaded());
        assert_eq!(handle.info().deployment_status, "Active");
        assert!(handle.info().model_loaded);
    }

    #[test]
    fn info_lists_features_per_variant() {
        let trend = ModelHandle::mock(PredictionModel::Trend).info();
        assert_eq!(trend.features.len(), 10);
        assert_eq!(trend.target_variables.len(), 5);
        assert_eq!(trend.algorithm, "AutoAI Ensemble");

        let scaled = ModelHandle::mock(PredictionModel::Scaled).info();
        assert_eq!(scaled.features.len(), 7);
        assert_eq!(scaled.deployment_status, "Mock Mode - Ready for Integration");
    }

    #[test]
    fn info_serializes_metric_names() {
        let json = serde_json::to_value(ModelHandle::default().info()).unwrap();
        assert_eq!(json["accuracy_metrics"]["R²"], "0.876");
        assert_eq!(json["target_variables"][4], "NO_OF_BRIDGES_BALANCE");
    }

    #[test]
    fn feature_importance_sums_to_one() {
        let scores = ModelHandle::default().feature_importance();
        assert_eq!(scores.len(), 6);
        let total: f64 = scores.values().sum();
        assert!((total - 1.0).abs() < 1e-9);
    }
}
