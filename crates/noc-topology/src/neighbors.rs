//! 4-Link Neighbor Computation
//!
//! Every interior router in the mesh has exactly 4 neighbors:
//! - 2 vertical neighbors (row ± 1)
//! - 2 horizontal neighbors (col ± 1)
//!
//! Edge routers lose the links that would leave the mesh. All enumerations
//! here yield neighbors in row-major order, which is what makes routing
//! tie-breaks deterministic.

use crate::{MeshCoord, MAX_LINKS_PER_NODE};

/// Mesh neighbor directions.
#[derive(Debug, Clone, Copy)]
pub struct Neighbors;

impl Neighbors {
    /// The 4 link directions, sorted so that `coord + d` is row-major.
    pub const DIRECTIONS: [MeshCoord; MAX_LINKS_PER_NODE] = [
        MeshCoord { row: -1, col: 0 }, // North
        MeshCoord { row: 0, col: -1 }, // West
        MeshCoord { row: 0, col: 1 },  // East
        MeshCoord { row: 1, col: 0 },  // South
    ];

    /// Get all 4 neighbor positions of a coordinate, ignoring mesh bounds.
    pub fn of(coord: MeshCoord) -> [MeshCoord; MAX_LINKS_PER_NODE] {
        Self::DIRECTIONS.map(|dir| coord + dir)
    }

    /// Neighbors of `coord` that exist in a `size × size` mesh.
    pub fn within(coord: MeshCoord, size: usize) -> impl Iterator<Item = MeshCoord> {
        Self::of(coord).into_iter().filter(move |n| n.is_within(size))
    }

    /// Neighbors of `coord` that strictly reduce the Manhattan distance to
    /// `dest`.
    ///
    /// Empty when `coord == dest`. At most 2 entries: one along the row axis
    /// and one along the column axis.
    pub fn productive(
        coord: MeshCoord,
        dest: MeshCoord,
        size: usize,
    ) -> impl Iterator<Item = MeshCoord> {
        let remaining = coord.manhattan_distance(&dest);
        Self::within(coord, size).filter(move |n| n.manhattan_distance(&dest) < remaining)
    }
}

/// Check if two coordinates are linked in the mesh (ignoring bounds).
pub fn are_neighbors(a: MeshCoord, b: MeshCoord) -> bool {
    let diff = b - a;
    Neighbors::DIRECTIONS.contains(&diff)
}

/// Count how many links a router has in a `size × size` mesh.
pub fn count_links(coord: MeshCoord, size: usize) -> usize {
    if !coord.is_within(size) {
        return 0;
    }
    Neighbors::within(coord, size).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directions_are_unique_unit_steps() {
        let dirs = Neighbors::DIRECTIONS;
        for i in 0..dirs.len() {
            assert_eq!(dirs[i].manhattan_distance(&MeshCoord::ORIGIN), 1);
            for j in (i + 1)..dirs.len() {
                assert_ne!(dirs[i], dirs[j], "Duplicate direction at {} and {}", i, j);
            }
        }
    }

    #[test]
    fn directions_are_row_major() {
        let neighbors = Neighbors::of(MeshCoord::new(5, 5));
        let mut sorted = neighbors;
        sorted.sort();
        assert_eq!(neighbors, sorted);
    }

    #[test]
    fn link_counts_by_position() {
        let size = 4;
        assert_eq!(count_links(MeshCoord::new(0, 0), size), 2); // corner
        assert_eq!(count_links(MeshCoord::new(0, 2), size), 3); // edge
        assert_eq!(count_links(MeshCoord::new(2, 2), size), 4); // interior
        assert_eq!(count_links(MeshCoord::new(4, 4), size), 0); // outside
    }

    #[test]
    fn degenerate_meshes_have_no_links() {
        assert_eq!(count_links(MeshCoord::ORIGIN, 1), 0);
        assert_eq!(count_links(MeshCoord::ORIGIN, 0), 0);
        assert_eq!(Neighbors::within(MeshCoord::ORIGIN, 1).count(), 0);
    }

    #[test]
    fn productive_neighbors_reduce_distance() {
        let dest = MeshCoord::new(3, 0);
        let from = MeshCoord::new(0, 2);
        let hops: Vec<_> = Neighbors::productive(from, dest, 4).collect();
        assert_eq!(hops, vec![MeshCoord::new(0, 1), MeshCoord::new(1, 2)]);
    }

    #[test]
    fn productive_single_axis() {
        let hops: Vec<_> =
            Neighbors::productive(MeshCoord::new(0, 0), MeshCoord::new(2, 0), 4).collect();
        assert_eq!(hops, vec![MeshCoord::new(1, 0)]);

        let hops: Vec<_> =
            Neighbors::productive(MeshCoord::new(0, 0), MeshCoord::new(0, 3), 4).collect();
        assert_eq!(hops, vec![MeshCoord::new(0, 1)]);
    }

    #[test]
    fn no_productive_neighbor_at_destination() {
        let here = MeshCoord::new(1, 1);
        assert_eq!(Neighbors::productive(here, here, 4).count(), 0);
    }

    #[test]
    fn neighbor_relation_symmetric() {
        let a = MeshCoord::new(3, 2);
        let b = MeshCoord::new(3, 3);

        assert!(are_neighbors(a, b));
        assert!(are_neighbors(b, a));
        assert!(!are_neighbors(a, MeshCoord::new(4, 3)));
        assert!(!are_neighbors(a, a));
    }
}
