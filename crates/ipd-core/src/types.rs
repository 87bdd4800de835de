//! Core types for IPD
//!
//! Defines the vocabulary shared by the predictor, the history generator and
//! the HTTP layer:
//! - Feature columns and target metrics
//! - Prediction input and output records
//! - Historical records

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Model feature columns, in training column order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Feature {
    NoOfRoadWorkSanctioned,
    NoOfBridgesSanctioned,
    NoOfRoadWorksCompleted,
    NoOfBridgesCompleted,
    NoOfBridgesBalance,
    LengthOfRoadWorkSanctioned,
    CostOfWorksSanctioned,
    LengthOfRoadWorkCompleted,
    ExpenditureOccured,
    NoOfRoadWorksBalance,
}

impl Feature {
    /// All feature columns in order
    pub const ALL: [Feature; 10] = [
        Feature::NoOfRoadWorkSanctioned,
        Feature::NoOfBridgesSanctioned,
        Feature::NoOfRoadWorksCompleted,
        Feature::NoOfBridgesCompleted,
        Feature::NoOfBridgesBalance,
        Feature::LengthOfRoadWorkSanctioned,
        Feature::CostOfWorksSanctioned,
        Feature::LengthOfRoadWorkCompleted,
        Feature::ExpenditureOccured,
        Feature::NoOfRoadWorksBalance,
    ];

    /// The seven features collected by the dashboard form, in form order
    pub const FORM_INPUTS: [Feature; 7] = [
        Feature::NoOfRoadWorkSanctioned,
        Feature::NoOfBridgesSanctioned,
        Feature::LengthOfRoadWorkSanctioned,
        Feature::CostOfWorksSanctioned,
        Feature::LengthOfRoadWorkCompleted,
        Feature::ExpenditureOccured,
        Feature::NoOfRoadWorksBalance,
    ];

    /// Column name
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Feature::NoOfRoadWorkSanctioned => "NO_OF_ROAD_WORK_SANCTIONED",
            Feature::NoOfBridgesSanctioned => "NO_OF_BRIDGES_SANCTIONED",
            Feature::NoOfRoadWorksCompleted => "NO_OF_ROAD_WORKS_COMPLETED",
            Feature::NoOfBridgesCompleted => "NO_OF_BRIDGES_COMPLETED",
            Feature::NoOfBridgesBalance => "NO_OF_BRIDGES_BALANCE",
            Feature::LengthOfRoadWorkSanctioned => "LENGTH_OF_ROAD_WORK_SANCTIONED",
            Feature::CostOfWorksSanctioned => "COST_OF_WORKS_SANCTIONED",
            Feature::LengthOfRoadWorkCompleted => "LENGTH_OF_ROAD_WORK_COMPLETED",
            Feature::ExpenditureOccured => "EXPENDITURE_OCCURED",
            Feature::NoOfRoadWorksBalance => "NO_OF_ROAD_WORKS_BALANCE",
        }
    }

    /// Name of the dashboard form field feeding this feature, if any
    #[must_use]
    pub fn form_field(self) -> Option<&'static str> {
        match self {
            Feature::NoOfRoadWorkSanctioned => Some("road_work_sanctioned"),
            Feature::NoOfBridgesSanctioned => Some("bridges_sanctioned"),
            Feature::LengthOfRoadWorkSanctioned => Some("length_road_sanctioned"),
            Feature::CostOfWorksSanctioned => Some("cost_sanctioned"),
            Feature::LengthOfRoadWorkCompleted => Some("length_road_completed"),
            Feature::ExpenditureOccured => Some("expenditure"),
            Feature::NoOfRoadWorksBalance => Some("road_works_balance"),
            Feature::NoOfRoadWorksCompleted
            | Feature::NoOfBridgesCompleted
            | Feature::NoOfBridgesBalance => None,
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Target variables produced by the predictor
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Metric {
    NoOfRoadWorkSanctioned,
    NoOfBridgesSanctioned,
    NoOfRoadWorksCompleted,
    NoOfBridgesCompleted,
    NoOfBridgesBalance,
}

impl Metric {
    /// All metrics in order
    pub const ALL: [Metric; 5] = [
        Metric::NoOfRoadWorkSanctioned,
        Metric::NoOfBridgesSanctioned,
        Metric::NoOfRoadWorksCompleted,
        Metric::NoOfBridgesCompleted,
        Metric::NoOfBridgesBalance,
    ];

    /// The feature column carrying the same name
    #[must_use]
    pub fn feature(self) -> Feature {
        match self {
            Metric::NoOfRoadWorkSanctioned => Feature::NoOfRoadWorkSanctioned,
            Metric::NoOfBridgesSanctioned => Feature::NoOfBridgesSanctioned,
            Metric::NoOfRoadWorksCompleted => Feature::NoOfRoadWorksCompleted,
            Metric::NoOfBridgesCompleted => Feature::NoOfBridgesCompleted,
            Metric::NoOfBridgesBalance => Feature::NoOfBridgesBalance,
        }
    }

    /// Column name
    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.feature().as_str()
    }

    /// Human-readable chart label
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Metric::NoOfRoadWorkSanctioned => "Road Work Sanctioned",
            Metric::NoOfBridgesSanctioned => "Bridges Sanctioned",
            Metric::NoOfRoadWorksCompleted => "Road Works Completed",
            Metric::NoOfBridgesCompleted => "Bridges Completed",
            Metric::NoOfBridgesBalance => "Bridges Balance",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named numeric inputs for a prediction
///
/// Values are always finite and non-negative; anything else is coerced to
/// `0.0` on the way in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PredictionInput {
    values: BTreeMap<Feature, f64>,
}

impl PredictionInput {
    /// Create an empty input
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With a feature value
    #[inline]
    #[must_use]
    pub fn with(mut self, feature: Feature, value: f64) -> Self {
        self.insert(feature, value);
        self
    }

    /// Set a feature value, coercing invalid numbers to zero and capping at
    /// [`MAX_INPUT_VALUE`]
    pub fn insert(&mut self, feature: Feature, value: f64) {
        self.values.insert(feature, sanitize(value));
    }

    /// Get a feature value if present
    #[inline]
    #[must_use]
    pub fn get(&self, feature: Feature) -> Option<f64> {
        self.values.get(&feature).copied()
    }

    /// Number of features present
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no feature is present
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over present features
    pub fn iter(&self) -> impl Iterator<Item = (Feature, f64)> + '_ {
        self.values.iter().map(|(k, v)| (*k, *v))
    }

    /// Build from submitted form fields.
    ///
    /// Every form input is present in the result; missing or unparseable
    /// fields become `0.0`.
    #[must_use]
    pub fn from_form(form: &HashMap<String, String>) -> Self {
        let mut input = Self::new();
        for feature in Feature::FORM_INPUTS {
            let raw = feature
                .form_field()
                .and_then(|field| form.get(field))
                .map(String::as_str);
            input.insert(feature, parse_field(raw));
        }
        input
    }

    /// Project onto the full ordered feature vector, absent columns as zero
    #[must_use]
    pub fn feature_vector(&self) -> FeatureVector {
        let mut values = [0.0; 10];
        for (slot, feature) in values.iter_mut().zip(Feature::ALL) {
            *slot = self.get(feature).unwrap_or(0.0);
        }
        FeatureVector(values)
    }
}

/// Ordered feature row as a model would consume it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector(pub [f64; 10]);

impl FeatureVector {
    /// Value of one column
    #[inline]
    #[must_use]
    pub fn get(&self, feature: Feature) -> f64 {
        self.0[feature as usize]
    }
}

/// Parse a raw form value, falling back to zero
#[must_use]
pub fn parse_field(raw: Option<&str>) -> f64 {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .map_or(0.0, sanitize)
}

/// Largest accepted input value; larger finite inputs are capped to it
pub const MAX_INPUT_VALUE: f64 = 1.0e12;

fn sanitize(value: f64) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value.min(MAX_INPUT_VALUE)
    } else {
        0.0
    }
}

/// Symmetric ±15% band around a point prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfidenceBand {
    pub lower: u64,
    pub upper: u64,
}

impl ConfidenceBand {
    /// Lower bound factor
    pub const LOWER_FACTOR: f64 = 0.85;
    /// Upper bound factor
    pub const UPPER_FACTOR: f64 = 1.15;

    /// Band for a point value: `floor(0.85x)` to `floor(1.15x)`
    #[inline]
    #[must_use]
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn around(value: u64) -> Self {
        let x = value as f64;
        Self {
            lower: (x * Self::LOWER_FACTOR) as u64,
            upper: (x * Self::UPPER_FACTOR) as u64,
        }
    }

    /// Whether the band brackets `value`
    #[inline]
    #[must_use]
    pub fn contains(&self, value: u64) -> bool {
        self.lower <= value && value <= self.upper
    }
}

/// Mock model version reported with every prediction
pub const MODEL_VERSION: &str = "1.0.0";

/// Point predictions plus confidence bands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionOutput {
    pub predictions: BTreeMap<Metric, u64>,
    pub confidence_intervals: BTreeMap<Metric, ConfidenceBand>,
    pub model_version: String,
    pub prediction_timestamp: DateTime<Utc>,
}

impl PredictionOutput {
    /// Build from point values, deriving the bands
    #[must_use]
    pub fn from_values(predictions: BTreeMap<Metric, u64>, timestamp: DateTime<Utc>) -> Self {
        let confidence_intervals = predictions
            .iter()
            .map(|(metric, value)| (*metric, ConfidenceBand::around(*value)))
            .collect();
        Self {
            predictions,
            confidence_intervals,
            model_version: MODEL_VERSION.to_string(),
            prediction_timestamp: timestamp,
        }
    }

    /// Point value for a metric
    #[inline]
    #[must_use]
    pub fn value(&self, metric: Metric) -> Option<u64> {
        self.predictions.get(&metric).copied()
    }

    /// Band for a metric
    #[inline]
    #[must_use]
    pub fn band(&self, metric: Metric) -> Option<ConfidenceBand> {
        self.confidence_intervals.get(&metric).copied()
    }
}

/// One synthetic monthly observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub values: BTreeMap<Metric, f64>,
}

impl HistoryRecord {
    /// Value of one metric
    #[inline]
    #[must_use]
    pub fn value(&self, metric: Metric) -> f64 {
        self.values.get(&metric).copied().unwrap_or(0.0)
    }
}
