//! Testing utilities for IPD workspace
//!
//! Shared test helpers, fixtures, and assertions.

#![allow(missing_docs)]

use ipd_core::{DashboardConfig, DashboardService, Metric};
use serde_json::Value;
use std::sync::Arc;

pub const TEST_SEED: u64 = 42;

pub fn seeded_config(seed: u64) -> DashboardConfig {
    DashboardConfig::new().with_seed(seed)
}

pub fn setup_service_with(config: DashboardConfig) -> Arc<DashboardService> {
    Arc::new(DashboardService::new(config))
}

pub fn setup_service() -> Arc<DashboardService> {
    setup_service_with(seeded_config(TEST_SEED))
}

/// Form body from ASCII-safe pairs (no percent-encoding)
pub fn form_body(pairs: &[(&str, &str)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}

pub fn parse_json(body: &[u8]) -> Value {
    serde_json::from_slice(body).unwrap()
}

/// Every metric present, each bracketed by its confidence band
pub fn assert_predictions_bracketed(body: &Value) {
    let predictions = body["predictions"].as_object().unwrap();
    let intervals = body["confidence_intervals"].as_object().unwrap();
    assert_eq!(predictions.len(), Metric::ALL.len());
    assert_eq!(intervals.len(), Metric::ALL.len());

    for metric in Metric::ALL {
        let value = predictions[metric.as_str()].as_u64().unwrap();
        let band = &intervals[metric.as_str()];
        let lower = band["lower"].as_u64().unwrap();
        let upper = band["upper"].as_u64().unwrap();
        assert!(lower <= value && value <= upper, "{metric}: {lower} <= {value} <= {upper}");
    }
}
