//! Load Balance Factor computation.
//!
//! All functions are pure reads over a row-major slice of congestion values.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Dispersion measure used as the Load Balance Factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LbfMetric {
    /// Population standard deviation / mean
    #[default]
    CoefficientOfVariation,
    /// Maximum / mean
    MaxOverMean,
    /// Gini coefficient
    Gini,
}

impl LbfMetric {
    /// Every metric, in declaration order.
    pub const ALL: [LbfMetric; 3] = [
        LbfMetric::CoefficientOfVariation,
        LbfMetric::MaxOverMean,
        LbfMetric::Gini,
    ];

    /// Compute the factor for `values`.
    ///
    /// # Examples
    ///
    /// ```
    /// use noc_balance::LbfMetric;
    ///
    /// // Perfectly even load
    /// assert_eq!(LbfMetric::CoefficientOfVariation.compute(&[0.5; 4]), 0.0);
    /// assert_eq!(LbfMetric::MaxOverMean.compute(&[0.5; 4]), 1.0);
    ///
    /// // Nothing to balance
    /// assert_eq!(LbfMetric::Gini.compute(&[]), 0.0);
    /// ```
    pub fn compute(&self, values: &[f64]) -> f64 {
        let summary = LoadSummary::from_values(values);
        if summary.nodes == 0 || summary.mean == 0.0 {
            return 0.0;
        }
        let raw = match self {
            LbfMetric::CoefficientOfVariation => summary.std_dev / summary.mean,
            LbfMetric::MaxOverMean => summary.max / summary.mean,
            LbfMetric::Gini => gini(values, summary.mean),
        };
        non_negative_finite(raw)
    }

    /// Stable name used in configuration.
    pub const fn name(&self) -> &'static str {
        match self {
            LbfMetric::CoefficientOfVariation => "coefficient_of_variation",
            LbfMetric::MaxOverMean => "max_over_mean",
            LbfMetric::Gini => "gini",
        }
    }
}

impl FromStr for LbfMetric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "coefficient_of_variation" | "cv" => Ok(LbfMetric::CoefficientOfVariation),
            "max_over_mean" | "max_mean" => Ok(LbfMetric::MaxOverMean),
            "gini" => Ok(LbfMetric::Gini),
            other => Err(format!("unknown LBF metric '{other}'")),
        }
    }
}

impl fmt::Display for LbfMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Compute the default (coefficient of variation) factor.
pub fn compute_lbf(values: &[f64]) -> f64 {
    LbfMetric::default().compute(values)
}

/// Basic distribution statistics of a congestion snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct LoadSummary {
    /// Number of routers
    pub nodes: usize,
    /// Lowest congestion (0 for an empty mesh)
    pub min: f64,
    /// Highest congestion (0 for an empty mesh)
    pub max: f64,
    /// Mean congestion (0 for an empty mesh)
    pub mean: f64,
    /// Population standard deviation (0 for an empty mesh)
    pub std_dev: f64,
}

impl LoadSummary {
    /// Summarise `values`.
    pub fn from_values(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }
        let n = values.len() as f64;
        let (min, max, sum) = values.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY, 0.0),
            |(min, max, sum), &c| (min.min(c), max.max(c), sum + c),
        );
        let mean = sum / n;
        let variance = values.iter().map(|&c| (c - mean).powi(2)).sum::<f64>() / n;

        Self {
            nodes: values.len(),
            min,
            max,
            mean,
            std_dev: variance.sqrt(),
        }
    }
}

/// Gini coefficient via the sorted-rank formula:
/// `G = 2 Σ i·x(i) / (n Σx) - (n + 1) / n`, with 1-based ranks.
fn gini(values: &[f64], mean: f64) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let n = sorted.len() as f64;
    let weighted: f64 = sorted
        .iter()
        .enumerate()
        .map(|(i, &c)| (i + 1) as f64 * c)
        .sum();
    2.0 * weighted / (n * n * mean) - (n + 1.0) / n
}

fn non_negative_finite(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}
