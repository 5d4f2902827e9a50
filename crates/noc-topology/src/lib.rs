//! NoC Mesh Topology
//!
//! Square 2D mesh topology for Network-on-Chip congestion modeling.
//!
//! # Mesh Layout
//!
//! An N×N mesh of routers addressed by `(row, col)` with the origin at
//! `(0, 0)`. Each router links to at most 4 others:
//! - 2 vertical neighbors (row ± 1)
//! - 2 horizontal neighbors (col ± 1)
//!
//! Routers on the edge have 3 links, corners have 2, and a 1×1 mesh has none.
//!
//! # Congestion State
//!
//! Every router holds a congestion ratio in `[0, 1]`, stored row-major in a
//! [`CongestionGrid`]. All writes are clamped, so no arithmetic upstream can
//! push a value out of range.
//!
//! # Hotspots
//!
//! A [`HotspotRegistry`] marks the routers that receive disproportionate
//! load. The set is replaced wholesale and is validated against the mesh
//! bounds before it is accepted.

mod coord;
mod error;
mod grid;
mod hotspot;
mod neighbors;

pub use coord::MeshCoord;
pub use error::{Error, Result};
pub use grid::{clamp_congestion, CongestionGrid};
pub use hotspot::HotspotRegistry;
pub use neighbors::{are_neighbors, count_links, Neighbors};

/// Maximum links per router (interior routers).
pub const MAX_LINKS_PER_NODE: usize = 4;

/// Vertical links (row ± 1).
pub const VERTICAL_LINKS: usize = 2;

/// Horizontal links (col ± 1).
pub const HORIZONTAL_LINKS: usize = 2;

// Compile-time assertion of the 4-link mesh invariant
const _: () = assert!(VERTICAL_LINKS + HORIZONTAL_LINKS == MAX_LINKS_PER_NODE);
