//! Load Balance Factor
//!
//! A single scalar describing how evenly congestion is spread over the mesh.
//! Higher means less balanced.
//!
//! # Metrics
//!
//! - **Coefficient of variation** (default): population standard deviation
//!   divided by the mean. 0 for a perfectly even mesh.
//! - **Max over mean**: the peak router relative to the average. 1 for a
//!   perfectly even mesh, `n` when one of `n` routers carries everything.
//! - **Gini**: mean absolute difference between routers, normalised by twice
//!   the mean. In `[0, 1 - 1/n]`.
//!
//! # Degenerate Inputs
//!
//! An empty mesh, or a mesh whose mean congestion is exactly 0, has a factor
//! of 0 under every metric. Results are always finite and non-negative.

mod lbf;

pub use lbf::{compute_lbf, LbfMetric, LoadSummary};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_inputs_are_zero_for_every_metric() {
        for metric in LbfMetric::ALL {
            assert_eq!(metric.compute(&[]), 0.0);
            assert_eq!(metric.compute(&[0.0; 16]), 0.0);
        }
    }
}
