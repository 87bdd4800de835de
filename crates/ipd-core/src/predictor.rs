//! Mock predictor
//!
//! Stands in for model inference. Two constant sets exist for the mock and
//! neither is more authoritative than the other:
//! - [`PredictionModel::Trend`]: per-metric uniform base draw nudged by the
//!   same-named input
//! - [`PredictionModel::Scaled`]: the sanctioned inputs scaled by random
//!   factors, with per-metric floors
//!
//! Randomness is always passed in, so a seeded generator reproduces exact
//! outputs.

use crate::types::{Feature, Metric, PredictionInput, PredictionOutput};
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::Range;

/// Which mock formula to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionModel {
    /// Uniform base per metric, adjusted by a trend factor
    #[default]
    Trend,
    /// Sanctioned counts scaled by random factors
    Scaled,
}

impl PredictionModel {
    /// Produce a prediction stamped with the current time
    pub fn predict<R: Rng + ?Sized>(self, input: &PredictionInput, rng: &mut R) -> PredictionOutput {
        self.predict_at(input, rng, Utc::now())
    }

    /// Produce a prediction with an explicit timestamp
    pub fn predict_at<R: Rng + ?Sized>(
        self,
        input: &PredictionInput,
        rng: &mut R,
        timestamp: DateTime<Utc>,
    ) -> PredictionOutput {
        let values = match self {
            PredictionModel::Trend => trend_values(input, rng),
            PredictionModel::Scaled => scaled_values(input, rng),
        };
        tracing::trace!(model = ?self, ?values, "mock prediction drawn");
        PredictionOutput::from_values(values, timestamp)
    }

    /// Feature columns this variant advertises
    #[must_use]
    pub fn features(self) -> &'static [Feature] {
        match self {
            PredictionModel::Trend => &Feature::ALL,
            PredictionModel::Scaled => &Feature::FORM_INPUTS,
        }
    }
}

/// Half-open range the trend variant draws each metric's base from
#[must_use]
pub fn base_range(metric: Metric) -> Range<u64> {
    match metric {
        Metric::NoOfRoadWorkSanctioned => 50..200,
        Metric::NoOfBridgesSanctioned => 10..50,
        Metric::NoOfRoadWorksCompleted => 30..150,
        Metric::NoOfBridgesCompleted => 5..40,
        Metric::NoOfBridgesBalance => 5..30,
    }
}

/// `base × (1 + 0.1 × (input − 100) / 100)`, truncated toward zero, floored at 0
///
/// Results past `u64::MAX` saturate. Inputs built through [`PredictionInput`]
/// are capped at [`crate::types::MAX_INPUT_VALUE`], which keeps every base in
/// range well clear of that.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn apply_trend(base: u64, input_value: f64) -> u64 {
    let trend_factor = 0.1 * (input_value - 100.0) / 100.0;
    // float -> u64 truncates toward zero and saturates negatives at 0
    (base as f64 * (1.0 + trend_factor)) as u64
}

fn trend_values<R: Rng + ?Sized>(input: &PredictionInput, rng: &mut R) -> BTreeMap<Metric, u64> {
    Metric::ALL
        .into_iter()
        .map(|metric| {
            let base = rng.gen_range(base_range(metric));
            let value = match input.get(metric.feature()) {
                Some(v) => apply_trend(base, v),
                None => base,
            };
            (metric, value)
        })
        .collect()
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn floored(value: f64, floor: u64) -> u64 {
    (value as u64).max(floor)
}

fn scaled_values<R: Rng + ?Sized>(input: &PredictionInput, rng: &mut R) -> BTreeMap<Metric, u64> {
    let road_work = input.get(Feature::NoOfRoadWorkSanctioned).unwrap_or(100.0);
    let bridges = input.get(Feature::NoOfBridgesSanctioned).unwrap_or(25.0);

    let mut values = BTreeMap::new();
    values.insert(
        Metric::NoOfRoadWorkSanctioned,
        floored(road_work * rng.gen_range(0.9..1.1), 50),
    );
    values.insert(
        Metric::NoOfBridgesSanctioned,
        floored(bridges * rng.gen_range(0.8..1.2), 10),
    );
    values.insert(
        Metric::NoOfRoadWorksCompleted,
        floored(road_work * 0.8 * rng.gen_range(0.9..1.1), 30),
    );
    values.insert(
        Metric::NoOfBridgesCompleted,
        floored(bridges * 0.75 * rng.gen_range(0.8..1.2), 5),
    );
    values.insert(
        Metric::NoOfBridgesBalance,
        floored(bridges * 0.2 * rng.gen_range(0.5..1.5), 0),
    );
    values
}
