//! Simulation session: one mesh, one RNG, one LBF history.

use std::ops::RangeInclusive;

use noc_balance::{LbfMetric, LoadSummary};
use noc_routing::{RoutingPolicy, TrafficGenerator, TrafficStats};
use noc_topology::{CongestionGrid, HotspotRegistry, MeshCoord};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::config::SimulationConfig;
use crate::error::{Error, Result};
use crate::history::LbfHistory;
use crate::report::SessionReport;

/// Initial congestion drawn for hotspot routers.
pub const HOTSPOT_RANGE: RangeInclusive<f64> = 0.7..=1.0;

/// Initial congestion drawn for every other router.
pub const BACKGROUND_RANGE: RangeInclusive<f64> = 0.0..=0.4;

/// A deterministic congestion simulation over a square mesh.
///
/// Every mutating operation is atomic: it works on a copy of the RNG and a
/// scratch grid and only commits once nothing can fail. After an error the
/// session is exactly as it was after the last successful call.
#[derive(Debug)]
pub struct SimulationSession {
    grid: CongestionGrid,
    hotspots: HotspotRegistry,
    traffic: TrafficGenerator,
    metric: LbfMetric,
    rng: ChaCha8Rng,
    seed: u64,
    cycle: u64,
    history: LbfHistory,
}

impl SimulationSession {
    /// Create a session with the default configuration.
    ///
    /// Negative sizes are rejected with `InvalidArgument`.
    pub fn new<S: TryInto<usize>>(size: S) -> Result<Self> {
        Self::with_config(size, SimulationConfig::default())
    }

    /// Create a session with an explicit configuration.
    pub fn with_config<S: TryInto<usize>>(size: S, config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        let traffic = TrafficGenerator::new(config.traffic)?;
        Self::assemble(size, config.seed, config.metric, traffic)
    }

    /// Create a session that routes with a caller-supplied policy.
    ///
    /// `config.traffic.routing` is ignored.
    pub fn with_routing_policy<S: TryInto<usize>>(
        size: S,
        config: SimulationConfig,
        policy: Box<dyn RoutingPolicy>,
    ) -> Result<Self> {
        config.validate()?;
        let traffic = TrafficGenerator::with_policy(config.traffic, policy)?;
        Self::assemble(size, config.seed, config.metric, traffic)
    }

    fn assemble<S: TryInto<usize>>(
        size: S,
        seed: u64,
        metric: LbfMetric,
        traffic: TrafficGenerator,
    ) -> Result<Self> {
        let size: usize = size.try_into().map_err(|_| {
            Error::InvalidArgument("mesh size must be a non-negative integer".to_string())
        })?;
        if size.checked_mul(size).is_none() {
            return Err(Error::InvalidArgument(format!(
                "mesh size {size} is too large"
            )));
        }

        info!(
            size,
            seed,
            routing = traffic.policy_name(),
            metric = %metric,
            "simulation session created"
        );

        Ok(Self {
            grid: CongestionGrid::new(size),
            hotspots: HotspotRegistry::new(),
            traffic,
            metric,
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
            cycle: 0,
            history: LbfHistory::new(),
        })
    }

    /// Replace the hotspot set.
    ///
    /// Every coordinate is checked first; if any is out of bounds the call
    /// fails with `InvalidArgument` and the previous set is kept. Duplicates
    /// collapse into one hotspot. Congestion values are not touched.
    pub fn set_hotspot_area<I, C>(&mut self, coords: I) -> Result<()>
    where
        I: IntoIterator<Item = C>,
        C: Into<MeshCoord>,
    {
        let size = self.size();
        self.hotspots
            .replace(coords.into_iter().map(Into::into), size)?;
        info!(hotspots = self.hotspots.len(), "hotspot area configured");
        Ok(())
    }

    /// Seed every hotspot router with a fresh draw from [`HOTSPOT_RANGE`].
    pub fn initialize_hotspots(&mut self) -> Result<()> {
        self.seed_congestion(true, HOTSPOT_RANGE)?;
        debug!(hotspots = self.hotspots.len(), "hotspot congestion initialized");
        Ok(())
    }

    /// Seed every non-hotspot router with a fresh draw from
    /// [`BACKGROUND_RANGE`].
    pub fn initialize_non_hotspots(&mut self) -> Result<()> {
        self.seed_congestion(false, BACKGROUND_RANGE)?;
        debug!(
            routers = self.grid.len() - self.hotspots.len(),
            "background congestion initialized"
        );
        Ok(())
    }

    /// Draw a value for every router whose hotspot membership equals
    /// `hotspot`, in row-major order. Other routers keep their value.
    fn seed_congestion(&mut self, hotspot: bool, range: RangeInclusive<f64>) -> Result<()> {
        let mut rng = self.rng.clone();
        let values: Vec<f64> = self
            .grid
            .iter()
            .map(|(coord, old)| {
                if self.hotspots.contains(&coord) == hotspot {
                    rng.gen_range(range.clone())
                } else {
                    old
                }
            })
            .collect();

        self.grid.replace_all(values)?;
        self.rng = rng;
        Ok(())
    }

    /// Run one traffic step without recording history or advancing the
    /// cycle counter.
    pub fn generate_traffic(&mut self) -> Result<()> {
        let mut rng = self.rng.clone();
        let plan = self.traffic.plan(&self.grid, &self.hotspots, &mut rng)?;
        self.traffic.commit(&mut self.grid, plan)?;
        self.rng = rng;
        Ok(())
    }

    /// Run `cycles` cycles, appending one LBF value per cycle.
    ///
    /// Runs are cumulative. Negative counts are rejected with
    /// `InvalidArgument`; zero is a no-op. If a cycle fails, every cycle
    /// before it stays committed.
    pub fn run_simulation<C: TryInto<u64>>(&mut self, cycles: C) -> Result<()> {
        let cycles: u64 = cycles.try_into().map_err(|_| {
            Error::InvalidArgument("cycle count must be a non-negative integer".to_string())
        })?;
        if cycles == 0 {
            return Ok(());
        }

        info!(cycles, start = self.cycle, "running simulation");
        for _ in 0..cycles {
            self.step_cycle()?;
        }
        info!(
            cycle = self.cycle,
            lbf = self.history.last().unwrap_or_default(),
            "simulation run complete"
        );
        Ok(())
    }

    fn step_cycle(&mut self) -> Result<()> {
        let mut rng = self.rng.clone();
        let plan = self.traffic.plan(&self.grid, &self.hotspots, &mut rng)?;
        let lbf = self.metric.compute(plan.values());
        let stats = *plan.stats();

        self.traffic.commit(&mut self.grid, plan)?;
        self.rng = rng;
        self.history.record(lbf);
        self.cycle += 1;

        debug!(
            cycle = self.cycle,
            lbf,
            injected = stats.packets_injected,
            delivered = stats.packets_delivered,
            "cycle complete"
        );
        Ok(())
    }

    /// LBF of the current grid under the session's metric.
    pub fn compute_lbf(&self) -> f64 {
        self.metric.compute(self.grid.values())
    }

    /// Every recorded LBF value, oldest first.
    pub fn get_lbf_history(&self) -> Vec<f64> {
        self.history.to_vec()
    }

    /// Borrowed view of the history.
    pub fn history(&self) -> &LbfHistory {
        &self.history
    }

    /// Independent `size × size` snapshot of the congestion grid.
    pub fn get_congestion_grid(&self) -> Vec<Vec<f64>> {
        self.grid.snapshot()
    }

    /// Congestion at `coord`, or `None` if out of bounds.
    pub fn congestion(&self, coord: impl Into<MeshCoord>) -> Option<f64> {
        self.grid.get(coord.into())
    }

    /// Side length of the mesh.
    pub fn size(&self) -> usize {
        self.grid.size()
    }

    /// Completed cycles.
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Seed the session RNG was created from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Metric used for LBF values.
    pub fn metric(&self) -> LbfMetric {
        self.metric
    }

    /// The configured hotspot set.
    pub fn hotspots(&self) -> &HotspotRegistry {
        &self.hotspots
    }

    /// Whether `coord` is a hotspot.
    pub fn is_hotspot(&self, coord: impl Into<MeshCoord>) -> bool {
        self.hotspots.contains(&coord.into())
    }

    /// Name of the active routing policy.
    pub fn routing_policy(&self) -> &'static str {
        self.traffic.policy_name()
    }

    /// Swap the routing policy for subsequent cycles.
    pub fn set_routing_policy(&mut self, policy: Box<dyn RoutingPolicy>) {
        info!(routing = policy.name(), "routing policy replaced");
        self.traffic.set_policy(policy);
    }

    /// Traffic counters accumulated over every committed step.
    pub fn stats(&self) -> TrafficStats {
        *self.traffic.stats()
    }

    /// Distribution statistics of the current grid.
    pub fn summary(&self) -> LoadSummary {
        LoadSummary::from_values(self.grid.values())
    }

    /// Serializable snapshot of the whole session.
    pub fn report(&self) -> SessionReport {
        SessionReport::from_session(self)
    }
}
