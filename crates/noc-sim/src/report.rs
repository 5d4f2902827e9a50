//! Serializable session snapshot for external tooling.

use noc_balance::{LbfMetric, LoadSummary};
use noc_routing::TrafficStats;
use noc_topology::MeshCoord;
use serde::Serialize;

use crate::session::SimulationSession;

/// Everything a visualizer needs to render one moment of a session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionReport {
    /// Mesh side length
    pub size: usize,
    /// Completed cycles
    pub cycle: u64,
    /// Seed of the session RNG
    pub seed: u64,
    /// Active routing policy
    pub routing: &'static str,
    /// Metric used for `lbf_history`
    pub metric: LbfMetric,
    /// Hotspot routers, row-major
    pub hotspots: Vec<MeshCoord>,
    /// Congestion snapshot, `grid[row][col]`
    pub grid: Vec<Vec<f64>>,
    /// LBF per cycle, oldest first
    pub lbf_history: Vec<f64>,
    /// Cumulative traffic counters
    pub stats: TrafficStats,
    /// Distribution of the current grid
    pub summary: LoadSummary,
}

impl SessionReport {
    pub(crate) fn from_session(session: &SimulationSession) -> Self {
        Self {
            size: session.size(),
            cycle: session.cycle(),
            seed: session.seed(),
            routing: session.routing_policy(),
            metric: session.metric(),
            hotspots: session.hotspots().to_vec(),
            grid: session.get_congestion_grid(),
            lbf_history: session.get_lbf_history(),
            stats: session.stats(),
            summary: session.summary(),
        }
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use crate::SimulationSession;

    #[test]
    fn report_reflects_session() {
        let mut session = SimulationSession::new(3).unwrap();
        session.set_hotspot_area([(2_i64, 0_i64)]).unwrap();
        session.initialize_hotspots().unwrap();
        session.run_simulation(4).unwrap();

        let report = session.report();
        assert_eq!(report.size, 3);
        assert_eq!(report.cycle, 4);
        assert_eq!(report.lbf_history.len(), 4);
        assert_eq!(report.grid, session.get_congestion_grid());
        assert_eq!(report.stats, session.stats());
    }

    #[test]
    fn report_json_shape() {
        let mut session = SimulationSession::new(2).unwrap();
        session.set_hotspot_area([(1_i64, 1_i64)]).unwrap();
        session.run_simulation(1).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&session.report().to_json().unwrap()).unwrap();
        assert_eq!(json["size"], 2);
        assert_eq!(json["cycle"], 1);
        assert_eq!(json["metric"], "coefficient_of_variation");
        assert_eq!(json["hotspots"][0]["row"], 1);
        assert_eq!(json["hotspots"][0]["col"], 1);
        assert_eq!(json["grid"].as_array().unwrap().len(), 2);
        assert_eq!(json["lbf_history"].as_array().unwrap().len(), 1);
        assert!(json["stats"]["packets_injected"].is_u64());
    }
}
