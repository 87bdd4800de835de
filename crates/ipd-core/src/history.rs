//! Mock history generator
//!
//! Produces synthetic monthly observations for the five target metrics. The
//! sequence is lazy and owns its random source, so each call to
//! [`HistoryModel::generate`] yields fresh data and cannot be restarted.

use crate::types::{HistoryRecord, Metric};
use chrono::{Months, NaiveDate};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::iter::FusedIterator;

/// First month of every generated series
pub const EPOCH_YEAR: i32 = 2023;

/// Default number of months served to the dashboard
pub const DEFAULT_MONTHS: u32 = 24;

/// Longest series a client may request
pub const MAX_MONTHS: u32 = 240;

/// Which synthetic history to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryModel {
    /// Additive trend + seasonal + noise, dated on the first of the month
    #[default]
    Seasonal,
    /// Independent uniform draws, dated at month end
    Uniform,
}

impl HistoryModel {
    /// Lazily generate `months` records using `rng`
    pub fn generate<R: Rng>(self, rng: R, months: u32) -> HistoryIter<R> {
        HistoryIter {
            model: self,
            rng,
            index: 0,
            months,
        }
    }

    /// Date of the record at `index`
    #[must_use]
    pub fn date_for(self, index: u32) -> Option<NaiveDate> {
        let first = NaiveDate::from_ymd_opt(EPOCH_YEAR, 1, 1)?.checked_add_months(Months::new(index))?;
        match self {
            HistoryModel::Seasonal => Some(first),
            HistoryModel::Uniform => first.checked_add_months(Months::new(1))?.pred_opt(),
        }
    }

    /// Lower bound every value of `metric` respects
    #[must_use]
    pub fn floor(self, metric: Metric) -> f64 {
        match (self, metric) {
            (HistoryModel::Seasonal, Metric::NoOfRoadWorkSanctioned) => 50.0,
            (HistoryModel::Seasonal, Metric::NoOfBridgesSanctioned) => 10.0,
            (HistoryModel::Seasonal, Metric::NoOfRoadWorksCompleted) => 30.0,
            (HistoryModel::Seasonal, Metric::NoOfBridgesCompleted) => 5.0,
            (HistoryModel::Seasonal, Metric::NoOfBridgesBalance) => 0.0,
            (HistoryModel::Uniform, metric) => uniform_range(metric).0,
        }
    }
}

/// Seasonal component for month `index`: `10 × (1 + 0.5 × (i mod 12) / 12)`
#[must_use]
pub fn seasonal_component(index: u32) -> f64 {
    10.0 * (1.0 + 0.5 * f64::from(index % 12) / 12.0)
}

/// Metric values for one seasonal month given the noise draw
#[must_use]
pub fn seasonal_values(index: u32, noise: i64) -> BTreeMap<Metric, f64> {
    let trend = 2 * i64::from(index);
    let seasonal = seasonal_component(index);

    // floor division, matching `a // b` for both signs
    #[allow(clippy::cast_precision_loss)]
    let scaled = |divisor: i64| -> f64 {
        let d = divisor as f64;
        (trend.div_euclid(divisor) + noise.div_euclid(divisor)) as f64 + (seasonal / d).floor()
    };
    #[allow(clippy::cast_precision_loss)]
    let (trend, noise) = (trend as f64, noise as f64);

    let mut values = BTreeMap::new();
    values.insert(
        Metric::NoOfRoadWorkSanctioned,
        (120.0 + trend + seasonal + noise).max(50.0),
    );
    values.insert(Metric::NoOfBridgesSanctioned, (25.0 + scaled(2)).max(10.0));
    values.insert(
        Metric::NoOfRoadWorksCompleted,
        (95.0 + trend + seasonal * 0.8 + noise).max(30.0),
    );
    values.insert(Metric::NoOfBridgesCompleted, (20.0 + scaled(3)).max(5.0));
    values.insert(Metric::NoOfBridgesBalance, (8.0 + scaled(4)).max(0.0));
    values
}

fn uniform_range(metric: Metric) -> (f64, f64) {
    match metric {
        Metric::NoOfRoadWorkSanctioned => (80.0, 180.0),
        Metric::NoOfBridgesSanctioned => (15.0, 45.0),
        Metric::NoOfRoadWorksCompleted => (60.0, 160.0),
        Metric::NoOfBridgesCompleted => (10.0, 35.0),
        Metric::NoOfBridgesBalance => (5.0, 25.0),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn uniform_values<R: Rng>(rng: &mut R) -> BTreeMap<Metric, f64> {
    Metric::ALL
        .into_iter()
        .map(|metric| {
            let (low, high) = uniform_range(metric);
            let value = rng.gen_range(low as i64..high as i64);
            (metric, value as f64)
        })
        .collect()
}

/// Lazy, finite sequence of [`HistoryRecord`]s
#[derive(Debug)]
pub struct HistoryIter<R> {
    model: HistoryModel,
    rng: R,
    index: u32,
    months: u32,
}

impl<R: Rng> Iterator for HistoryIter<R> {
    type Item = HistoryRecord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.months {
            return None;
        }
        let index = self.index;
        let Some(date) = self.model.date_for(index) else {
            // past the calendar's range; end the series
            self.index = self.months;
            return None;
        };
        self.index += 1;

        let values = match self.model {
            HistoryModel::Seasonal => {
                let noise = self.rng.gen_range(-15..=15);
                seasonal_values(index, noise)
            }
            HistoryModel::Uniform => uniform_values(&mut self.rng),
        };
        Some(HistoryRecord { date, values })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, usize::try_from(self.months - self.index).ok())
    }
}

impl<R: Rng> FusedIterator for HistoryIter<R> {}
