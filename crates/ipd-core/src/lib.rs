//! IPD Core - Infrastructure Prediction Dashboard
//!
//! Everything the dashboard computes, with no HTTP in sight:
//! - Mock predictions of road/bridge sanction and completion counts
//! - Confidence bands around each prediction
//! - Synthetic monthly history and its chart description
//! - The placeholder model handle and its static description
//!
//! # Example
//!
//! ```rust
//! use ipd_core::{DashboardConfig, DashboardService, Feature, PredictionInput};
//!
//! let service = DashboardService::new(DashboardConfig::new().with_seed(42));
//!
//! let input = PredictionInput::new().with(Feature::NoOfRoadWorkSanctioned, 150.0);
//! let output = service.predict(&input);
//! assert_eq!(output.predictions.len(), 5);
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
pub mod chart;
pub mod config;
pub mod error;
pub mod history;
pub mod model;
pub mod predictor;
pub mod service;
pub mod types;

// Re-exports for convenience
pub use chart::Figure;
pub use config::DashboardConfig;
pub use error::{ConfigError, DashboardError};
pub use history::{HistoryIter, HistoryModel};
pub use model::{ModelHandle, ModelInfo, ModelStatus};
pub use predictor::PredictionModel;
pub use service::{DashboardService, HealthStatus, HistoricalData};
pub use types::{
    ConfidenceBand, Feature, FeatureVector, HistoryRecord, Metric, PredictionInput,
    PredictionOutput, MAX_INPUT_VALUE, MODEL_VERSION,
};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with IPD Core
    pub use crate::{
        ConfidenceBand, DashboardConfig, DashboardError, DashboardService, Feature,
        HistoryModel, Metric, PredictionInput, PredictionModel, PredictionOutput,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
