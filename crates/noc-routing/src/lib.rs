//! NoC Adaptive Routing
//!
//! Per-cycle traffic generation and congestion-aware routing on a 2D mesh.
//!
//! # Cycle Model
//!
//! Each call to [`TrafficGenerator::step`] models one cycle:
//!
//! 1. **Injection**: every router injects a packet with a fixed probability.
//!    The destination comes from a [`DestinationPolicy`].
//! 2. **Routing**: the packet walks hop by hop. A [`RoutingPolicy`] picks each
//!    hop; the default [`MinimalAdaptive`] policy takes the least congested
//!    neighbor that gets closer to the destination.
//! 3. **Update**: every router decays and absorbs the load of the packets
//!    that crossed it: `new = clamp(old * decay + load, 0, 1)`.
//!
//! The randomness source is supplied by the caller, so a seeded generator
//! gives a reproducible run.
//!
//! # Atomic Cycles
//!
//! A cycle is first planned into a [`CyclePlan`] without touching the grid
//! and only then committed. A failure while planning leaves the grid as it
//! was after the previous cycle.

mod destination;
mod policy;
mod traffic;

pub use destination::DestinationPolicy;
pub use policy::{
    CongestionView, DimensionOrder, MinimalAdaptive, RoutingAlgorithm, RoutingPolicy,
};
pub use traffic::{CyclePlan, Packet, TrafficConfig, TrafficGenerator, TrafficStats};
