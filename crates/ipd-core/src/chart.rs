//! Chart description for the history view
//!
//! A plotly-compatible figure: one `lines+markers` trace per metric over the
//! record dates. The dashboard page hands it straight to `Plotly.newPlot`.

use crate::types::{HistoryRecord, Metric};
use serde::{Deserialize, Serialize};

const TRACE_COLORS: [&str; 5] = ["#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd"];

/// Whole figure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

/// One line series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    pub x: Vec<String>,
    pub y: Vec<f64>,
    #[serde(rename = "type")]
    pub kind: String,
    pub mode: String,
    pub name: String,
    pub line: LineStyle,
    pub marker: MarkerStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub color: String,
    pub width: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerStyle {
    pub size: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub title: String,
    pub xaxis: Axis,
    pub yaxis: Axis,
    pub hovermode: String,
    pub template: String,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    pub title: String,
}

impl Figure {
    /// Build the history figure from generated records
    #[must_use]
    pub fn history(records: &[HistoryRecord]) -> Self {
        let dates: Vec<String> = records.iter().map(|r| r.date.format("%Y-%m-%d").to_string()).collect();

        let data = Metric::ALL
            .into_iter()
            .zip(TRACE_COLORS)
            .map(|(metric, color)| Trace {
                x: dates.clone(),
                y: records.iter().map(|r| r.value(metric)).collect(),
                kind: "scatter".to_string(),
                mode: "lines+markers".to_string(),
                name: metric.label().to_string(),
                line: LineStyle {
                    color: color.to_string(),
                    width: 2,
                },
                marker: MarkerStyle { size: 6 },
            })
            .collect();

        Self {
            data,
            layout: Layout {
                title: "Infrastructure Projects Historical Trends".to_string(),
                xaxis: Axis {
                    title: "Date".to_string(),
                },
                yaxis: Axis {
                    title: "Count".to_string(),
                },
                hovermode: "x unified".to_string(),
                template: "plotly_white".to_string(),
                height: 500,
            },
        }
    }

    /// Encode as the JSON string the dashboard expects in `plot`
    ///
    /// # Errors
    /// Propagates serializer failures.
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
