//! Mesh coordinate system.
//!
//! Routers are addressed by `(row, col)` with the origin in the top-left
//! corner. Coordinates are signed so that an out-of-range request (for
//! example a negative row coming from a config file) can be represented and
//! rejected instead of silently wrapping.

use std::ops::{Add, Neg, Sub};

/// A router position in the 2D mesh.
///
/// The derived ordering is row-major: `(row, col)` compared lexicographically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MeshCoord {
    /// Row (vertical position, grows downwards)
    pub row: i64,
    /// Column (horizontal position, grows rightwards)
    pub col: i64,
}

impl MeshCoord {
    /// Origin of the mesh.
    pub const ORIGIN: Self = Self { row: 0, col: 0 };

    /// Create a new coordinate.
    pub const fn new(row: i64, col: i64) -> Self {
        Self { row, col }
    }

    /// Manhattan distance between two coordinates.
    ///
    /// On a mesh without wrap-around links this is the length of every
    /// minimal route.
    pub fn manhattan_distance(&self, other: &Self) -> u64 {
        (self.row - other.row).unsigned_abs() + (self.col - other.col).unsigned_abs()
    }

    /// Check whether the coordinate lies inside a `size × size` mesh.
    pub fn is_within(&self, size: usize) -> bool {
        let size = size as i64;
        (0..size).contains(&self.row) && (0..size).contains(&self.col)
    }

    /// Row-major index of this coordinate in a `size × size` mesh.
    ///
    /// Returns `None` when the coordinate is out of bounds.
    pub fn index_in(&self, size: usize) -> Option<usize> {
        if !self.is_within(size) {
            return None;
        }
        Some(self.row as usize * size + self.col as usize)
    }

    /// Inverse of [`MeshCoord::index_in`].
    pub fn from_index(index: usize, size: usize) -> Self {
        debug_assert!(size > 0, "from_index on an empty mesh");
        Self {
            row: (index / size) as i64,
            col: (index % size) as i64,
        }
    }
}

impl From<(i64, i64)> for MeshCoord {
    fn from((row, col): (i64, i64)) -> Self {
        Self { row, col }
    }
}

impl From<MeshCoord> for (i64, i64) {
    fn from(value: MeshCoord) -> Self {
        (value.row, value.col)
    }
}

impl Add for MeshCoord {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Self {
            row: self.row + other.row,
            col: self.col + other.col,
        }
    }
}

impl Sub for MeshCoord {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Self {
            row: self.row - other.row,
            col: self.col - other.col,
        }
    }
}

impl Neg for MeshCoord {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self {
            row: -self.row,
            col: -self.col,
        }
    }
}

impl std::fmt::Display for MeshCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
