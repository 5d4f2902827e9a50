//! NoC Congestion Simulation
//!
//! Deterministic simulation sessions over a square Network-on-Chip mesh.
//!
//! # Session Lifecycle
//!
//! 1. **Create** a [`SimulationSession`] for an N×N mesh. All routers start
//!    with zero congestion.
//! 2. **Configure** the hotspot area. The set is replaced, never merged.
//! 3. **Initialize** congestion: hotspots draw from `[0.7, 1.0]`, every
//!    other router from `[0.0, 0.4]`.
//! 4. **Run** cycles. Each cycle injects and routes traffic, then appends the
//!    Load Balance Factor of the new grid to the history.
//!
//! Runs are cumulative and reproducible: the same seed, configuration and
//! call sequence always give the same grids and histories.
//!
//! # Example
//!
//! ```
//! use noc_sim::{MeshCoord, SimulationSession};
//!
//! let mut session = SimulationSession::new(8)?;
//! session.set_hotspot_area([
//!     MeshCoord::new(1, 2),
//!     MeshCoord::new(2, 5),
//!     MeshCoord::new(3, 4),
//! ])?;
//! session.initialize_hotspots()?;
//! session.initialize_non_hotspots()?;
//!
//! session.run_simulation(25)?;
//! session.run_simulation(25)?;
//!
//! let history = session.get_lbf_history();
//! assert_eq!(history.len(), 50);
//! assert!(history.iter().all(|&lbf| lbf >= 0.0));
//! assert!(session
//!     .get_congestion_grid()
//!     .iter()
//!     .flatten()
//!     .all(|c| (0.0..=1.0).contains(c)));
//! # Ok::<(), noc_sim::Error>(())
//! ```

mod config;
mod error;
mod history;
mod report;
mod session;

pub use config::{SimulationConfig, DEFAULT_MESH_SIZE};
pub use error::{Error, Result};
pub use history::LbfHistory;
pub use report::SessionReport;
pub use session::{SimulationSession, BACKGROUND_RANGE, HOTSPOT_RANGE};

pub use noc_balance::{LbfMetric, LoadSummary};
pub use noc_routing::{
    DestinationPolicy, RoutingAlgorithm, RoutingPolicy, TrafficConfig, TrafficStats,
};
pub use noc_topology::MeshCoord;
