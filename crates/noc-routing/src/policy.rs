//! Routing policies.
//!
//! A policy only answers "where does a packet at `current` go next on its
//! way to `dest`". The traffic generator owns the walk, the load accounting
//! and the sanity checks on every hop, so a policy can be swapped without
//! touching the rest of the engine.

use std::fmt;
use std::str::FromStr;

use noc_topology::{CongestionGrid, MeshCoord, Neighbors};
use serde::{Deserialize, Serialize};

/// Read access to congestion while a cycle is being routed.
pub trait CongestionView {
    /// Side length of the mesh.
    fn size(&self) -> usize;

    /// Congestion at `coord`, or `None` if the coordinate is off the mesh.
    fn congestion(&self, coord: MeshCoord) -> Option<f64>;
}

impl CongestionView for CongestionGrid {
    fn size(&self) -> usize {
        CongestionGrid::size(self)
    }

    fn congestion(&self, coord: MeshCoord) -> Option<f64> {
        self.get(coord)
    }
}

/// Next-hop selection strategy.
///
/// Implementations must return a mesh neighbor of `current` that is strictly
/// closer (Manhattan) to `dest`, or `None` when `current == dest`. Anything
/// else aborts the cycle.
pub trait RoutingPolicy: Send + Sync + fmt::Debug {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Choose the next hop.
    fn next_hop(
        &self,
        current: MeshCoord,
        dest: MeshCoord,
        view: &dyn CongestionView,
    ) -> Option<MeshCoord>;
}

/// Minimal adaptive routing.
///
/// Among the neighbors that reduce the remaining distance, pick the one with
/// the lowest congestion. Candidates are scanned in row-major order and only
/// a strictly lower value replaces the current best, so ties go to the first
/// candidate in row-major order.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinimalAdaptive;

impl RoutingPolicy for MinimalAdaptive {
    fn name(&self) -> &'static str {
        "minimal_adaptive"
    }

    fn next_hop(
        &self,
        current: MeshCoord,
        dest: MeshCoord,
        view: &dyn CongestionView,
    ) -> Option<MeshCoord> {
        let mut best: Option<(MeshCoord, f64)> = None;

        for candidate in Neighbors::productive(current, dest, view.size()) {
            let Some(congestion) = view.congestion(candidate) else {
                continue;
            };
            match best {
                None => best = Some((candidate, congestion)),
                Some((_, best_congestion)) if congestion < best_congestion => {
                    best = Some((candidate, congestion));
                }
                _ => {}
            }
        }

        best.map(|(coord, _)| coord)
    }
}

/// Deterministic dimension-ordered routing, ignoring congestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DimensionOrder {
    /// Fix the column first, then the row.
    ColumnFirst,
    /// Fix the row first, then the column.
    RowFirst,
}

impl DimensionOrder {
    fn step_towards(from: i64, to: i64) -> i64 {
        from + (to - from).signum()
    }
}

impl RoutingPolicy for DimensionOrder {
    fn name(&self) -> &'static str {
        match self {
            DimensionOrder::ColumnFirst => "column_first",
            DimensionOrder::RowFirst => "row_first",
        }
    }

    fn next_hop(
        &self,
        current: MeshCoord,
        dest: MeshCoord,
        _view: &dyn CongestionView,
    ) -> Option<MeshCoord> {
        if current == dest {
            return None;
        }
        let column_hop = MeshCoord::new(current.row, Self::step_towards(current.col, dest.col));
        let row_hop = MeshCoord::new(Self::step_towards(current.row, dest.row), current.col);

        let hop = match self {
            DimensionOrder::ColumnFirst if current.col != dest.col => column_hop,
            DimensionOrder::ColumnFirst => row_hop,
            DimensionOrder::RowFirst if current.row != dest.row => row_hop,
            DimensionOrder::RowFirst => column_hop,
        };
        Some(hop)
    }
}

/// Built-in routing policies, selectable from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutingAlgorithm {
    /// [`MinimalAdaptive`]
    #[default]
    MinimalAdaptive,
    /// [`DimensionOrder::ColumnFirst`]
    ColumnFirst,
    /// [`DimensionOrder::RowFirst`]
    RowFirst,
}

impl RoutingAlgorithm {
    /// Instantiate the policy.
    pub fn build(&self) -> Box<dyn RoutingPolicy> {
        match self {
            RoutingAlgorithm::MinimalAdaptive => Box::new(MinimalAdaptive),
            RoutingAlgorithm::ColumnFirst => Box::new(DimensionOrder::ColumnFirst),
            RoutingAlgorithm::RowFirst => Box::new(DimensionOrder::RowFirst),
        }
    }
}

impl FromStr for RoutingAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "minimal_adaptive" | "adaptive" => Ok(RoutingAlgorithm::MinimalAdaptive),
            "column_first" | "xy" => Ok(RoutingAlgorithm::ColumnFirst),
            "row_first" | "yx" => Ok(RoutingAlgorithm::RowFirst),
            other => Err(format!("unknown routing algorithm '{other}'")),
        }
    }
}

impl fmt::Display for RoutingAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.build().name())
    }
}
