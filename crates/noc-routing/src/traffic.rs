//! Per-cycle traffic generation and congestion update.
//!
//! Simulates one cycle of mesh traffic:
//! - injection at every router with a fixed probability
//! - hop-by-hop routing through the configured [`RoutingPolicy`]
//! - decay plus bounded load accumulation on every router

use noc_topology::{
    are_neighbors, clamp_congestion, CongestionGrid, Error, HotspotRegistry, MeshCoord, Result,
};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{CongestionView, DestinationPolicy, RoutingAlgorithm, RoutingPolicy};

/// Traffic and congestion-update parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrafficConfig {
    /// Probability that a router injects a packet in a cycle
    pub injection_probability: f64,
    /// Load added to a router each time a packet crosses it
    pub hop_load: f64,
    /// Cap on the load a single router can absorb in one cycle
    pub max_node_load: f64,
    /// Multiplicative cooldown applied to every router each cycle
    pub decay_factor: f64,
    /// How destinations are chosen
    pub destination: DestinationPolicy,
    /// Which built-in routing policy to use
    pub routing: RoutingAlgorithm,
}

impl Default for TrafficConfig {
    fn default() -> Self {
        Self {
            injection_probability: 0.2,
            hop_load: 0.05,
            max_node_load: 0.5,
            decay_factor: 0.9,
            destination: DestinationPolicy::Uniform,
            routing: RoutingAlgorithm::MinimalAdaptive,
        }
    }
}

impl TrafficConfig {
    /// Check that every parameter is in range.
    pub fn validate(&self) -> Result<()> {
        unit_interval("injection_probability", self.injection_probability)?;
        unit_interval("decay_factor", self.decay_factor)?;
        non_negative("hop_load", self.hop_load)?;
        non_negative("max_node_load", self.max_node_load)?;
        if let DestinationPolicy::TowardHotspots { bias } = self.destination {
            unit_interval("destination bias", bias)?;
        }
        Ok(())
    }
}

fn unit_interval(name: &str, value: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(Error::InvalidArgument(format!(
            "{name} must be in [0, 1], got {value}"
        )));
    }
    Ok(())
}

fn non_negative(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(Error::InvalidArgument(format!(
            "{name} must be finite and non-negative, got {value}"
        )));
    }
    Ok(())
}

/// A packet injected in the current cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Packet {
    /// Unique id, increasing over the generator's lifetime
    pub id: u64,
    /// Injecting router
    pub source: MeshCoord,
    /// Target router
    pub dest: MeshCoord,
}

/// Traffic statistics.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TrafficStats {
    /// Cycles stepped
    pub cycles: u64,
    /// Packets injected
    pub packets_injected: u64,
    /// Packets that reached their destination
    pub packets_delivered: u64,
    /// Hops taken by all packets
    pub hops: u64,
    /// Injection attempts dropped because no destination existed
    pub injections_without_destination: u64,
}

impl TrafficStats {
    /// Add the counters of `other` to `self`.
    pub fn accumulate(&mut self, other: &TrafficStats) {
        self.cycles += other.cycles;
        self.packets_injected += other.packets_injected;
        self.packets_delivered += other.packets_delivered;
        self.hops += other.hops;
        self.injections_without_destination += other.injections_without_destination;
    }

    /// Mean route length of delivered packets.
    pub fn average_hops(&self) -> f64 {
        if self.packets_delivered == 0 {
            0.0
        } else {
            self.hops as f64 / self.packets_delivered as f64
        }
    }
}

/// A fully computed cycle that has not been applied yet.
#[derive(Debug, Clone, PartialEq)]
pub struct CyclePlan {
    values: Vec<f64>,
    stats: TrafficStats,
}

impl CyclePlan {
    /// Congestion values the grid will hold after the commit, row-major and
    /// already clamped.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Counters for this cycle alone.
    pub fn stats(&self) -> &TrafficStats {
        &self.stats
    }
}

/// Congestion as seen by packets routed mid-cycle: the start-of-cycle value
/// plus the load already placed during this cycle.
struct WorkingView<'a> {
    grid: &'a CongestionGrid,
    load: &'a [f64],
}

impl CongestionView for WorkingView<'_> {
    fn size(&self) -> usize {
        self.grid.size()
    }

    fn congestion(&self, coord: MeshCoord) -> Option<f64> {
        let index = coord.index_in(self.grid.size())?;
        Some((self.grid.values()[index] + self.load[index]).min(1.0))
    }
}

/// Injects and routes traffic, one cycle per [`TrafficGenerator::step`].
#[derive(Debug)]
pub struct TrafficGenerator {
    config: TrafficConfig,
    policy: Box<dyn RoutingPolicy>,
    stats: TrafficStats,
    next_packet_id: u64,
}

impl TrafficGenerator {
    /// Create a generator using the policy named in `config.routing`.
    pub fn new(config: TrafficConfig) -> Result<Self> {
        let policy = config.routing.build();
        Self::with_policy(config, policy)
    }

    /// Create a generator with a caller-supplied routing policy.
    ///
    /// `config.routing` is ignored.
    pub fn with_policy(config: TrafficConfig, policy: Box<dyn RoutingPolicy>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            policy,
            stats: TrafficStats::default(),
            next_packet_id: 0,
        })
    }

    /// The active configuration.
    pub fn config(&self) -> &TrafficConfig {
        &self.config
    }

    /// Name of the active routing policy.
    pub fn policy_name(&self) -> &'static str {
        self.policy.name()
    }

    /// Swap the routing policy. Counters are kept.
    pub fn set_policy(&mut self, policy: Box<dyn RoutingPolicy>) {
        self.policy = policy;
    }

    /// Cumulative counters over every committed cycle.
    pub fn stats(&self) -> &TrafficStats {
        &self.stats
    }

    /// Plan and commit one cycle.
    pub fn step<R: Rng>(
        &mut self,
        grid: &mut CongestionGrid,
        hotspots: &HotspotRegistry,
        rng: &mut R,
    ) -> Result<TrafficStats> {
        let plan = self.plan(grid, hotspots, rng)?;
        let stats = plan.stats;
        self.commit(grid, plan)?;
        Ok(stats)
    }

    /// Compute the next cycle without modifying `grid` or the generator.
    pub fn plan<R: Rng>(
        &self,
        grid: &CongestionGrid,
        hotspots: &HotspotRegistry,
        rng: &mut R,
    ) -> Result<CyclePlan> {
        let size = grid.size();
        let mut load = vec![0.0; grid.len()];
        let mut stats = TrafficStats {
            cycles: 1,
            ..TrafficStats::default()
        };

        for index in 0..grid.len() {
            let source = MeshCoord::from_index(index, size);
            if !rng.gen_bool(self.config.injection_probability) {
                continue;
            }
            let Some(dest) = self.config.destination.choose(source, size, hotspots, rng) else {
                stats.injections_without_destination += 1;
                continue;
            };
            let packet = Packet {
                id: self.next_packet_id + stats.packets_injected,
                source,
                dest,
            };
            stats.packets_injected += 1;
            self.route(&packet, grid, &mut load, &mut stats)?;
        }

        let values = grid
            .values()
            .iter()
            .zip(&load)
            .map(|(&old, &added)| clamp_congestion(old * self.config.decay_factor + added))
            .collect::<Result<Vec<_>>>()?;

        debug!(
            injected = stats.packets_injected,
            hops = stats.hops,
            "planned traffic cycle"
        );
        Ok(CyclePlan { values, stats })
    }

    /// Apply a plan produced by [`TrafficGenerator::plan`] against the same
    /// grid.
    pub fn commit(&mut self, grid: &mut CongestionGrid, plan: CyclePlan) -> Result<()> {
        grid.replace_all(plan.values)?;
        self.next_packet_id += plan.stats.packets_injected;
        self.stats.accumulate(&plan.stats);
        Ok(())
    }

    /// Walk one packet to its destination, charging load on every router it
    /// visits (source and destination included).
    fn route(
        &self,
        packet: &Packet,
        grid: &CongestionGrid,
        load: &mut [f64],
        stats: &mut TrafficStats,
    ) -> Result<()> {
        let size = grid.size();
        let mut current = packet.source;
        self.charge(load, current, size);

        while current != packet.dest {
            let next = {
                let view = WorkingView { grid, load: &*load };
                self.policy.next_hop(current, packet.dest, &view)
            };
            let Some(next) = next else {
                return Err(Error::InvariantViolation(format!(
                    "{} found no hop from {current} towards {}",
                    self.policy.name(),
                    packet.dest
                )));
            };
            let productive = next.is_within(size)
                && are_neighbors(current, next)
                && next.manhattan_distance(&packet.dest) < current.manhattan_distance(&packet.dest);
            if !productive {
                return Err(Error::InvariantViolation(format!(
                    "{} routed packet {} from {current} to non-productive hop {next}",
                    self.policy.name(),
                    packet.id
                )));
            }

            self.charge(load, next, size);
            stats.hops += 1;
            current = next;
        }

        stats.packets_delivered += 1;
        trace!(
            packet = packet.id,
            source = %packet.source,
            dest = %packet.dest,
            "packet delivered"
        );
        Ok(())
    }

    fn charge(&self, load: &mut [f64], coord: MeshCoord, size: usize) {
        if let Some(index) = coord.index_in(size) {
            load[index] = (load[index] + self.config.hop_load).min(self.config.max_node_load);
        }
    }
}
