//! Per-router congestion state.
//!
//! Values are stored row-major. Every write is clamped to `[0, 1]`; a
//! non-finite value means the arithmetic upstream is broken and the write is
//! refused before anything changes.

use crate::{Error, MeshCoord, Result};

/// Clamp a raw congestion value into `[0, 1]`.
///
/// NaN and infinities are rejected as invariant violations.
pub fn clamp_congestion(value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(Error::InvariantViolation(format!(
            "non-finite congestion value {value}"
        )));
    }
    Ok(value.clamp(0.0, 1.0))
}

/// Congestion ratios for a `size × size` mesh.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CongestionGrid {
    size: usize,
    values: Vec<f64>,
}

impl CongestionGrid {
    /// Create a grid with zero congestion everywhere.
    ///
    /// A size of 0 gives a valid, empty grid.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            values: vec![0.0; size * size],
        }
    }

    /// Side length of the mesh.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of routers (`size²`).
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the grid has no routers.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Congestion at `coord`, or `None` if out of bounds.
    pub fn get(&self, coord: MeshCoord) -> Option<f64> {
        coord.index_in(self.size).map(|i| self.values[i])
    }

    /// Write the congestion at `coord`, clamped to `[0, 1]`.
    pub fn set(&mut self, coord: MeshCoord, value: f64) -> Result<()> {
        let index = coord.index_in(self.size).ok_or_else(|| {
            Error::InvalidArgument(format!(
                "coordinate {coord} outside {size}x{size} mesh",
                size = self.size
            ))
        })?;
        self.values[index] = clamp_congestion(value)?;
        Ok(())
    }

    /// Row-major view of all values.
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Replace every value at once.
    ///
    /// All values are clamped and checked first; on error the grid is
    /// unchanged.
    pub fn replace_all(&mut self, values: Vec<f64>) -> Result<()> {
        if values.len() != self.values.len() {
            return Err(Error::InvariantViolation(format!(
                "replacement has {} values, grid has {}",
                values.len(),
                self.values.len()
            )));
        }
        let clamped = values
            .into_iter()
            .map(clamp_congestion)
            .collect::<Result<Vec<_>>>()?;
        self.values = clamped;
        Ok(())
    }

    /// Iterate `(coord, congestion)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (MeshCoord, f64)> + '_ {
        let size = self.size;
        self.values
            .iter()
            .enumerate()
            .map(move |(i, &c)| (MeshCoord::from_index(i, size), c))
    }

    /// Independent `size × size` copy of the grid, row-major.
    pub fn snapshot(&self) -> Vec<Vec<f64>> {
        if self.size == 0 {
            return Vec::new();
        }
        self.values
            .chunks(self.size)
            .map(<[f64]>::to_vec)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn new_grid_is_all_zero() {
        for size in [0, 1, 3, 8] {
            let grid = CongestionGrid::new(size);
            let snap = grid.snapshot();
            assert_eq!(snap.len(), size);
            assert!(snap.iter().all(|row| row.len() == size));
            assert!(snap.iter().flatten().all(|&c| c == 0.0));
        }
    }

    #[test]
    fn empty_grid_is_valid() {
        let mut grid = CongestionGrid::new(0);
        assert!(grid.is_empty());
        assert!(grid.snapshot().is_empty());
        assert_eq!(grid.iter().count(), 0);
        assert!(grid.replace_all(Vec::new()).is_ok());
        assert_eq!(grid.get(MeshCoord::ORIGIN), None);
    }

    #[test]
    fn set_clamps_to_unit_interval() {
        let mut grid = CongestionGrid::new(2);
        grid.set(MeshCoord::new(0, 0), 1.7).unwrap();
        grid.set(MeshCoord::new(1, 1), -0.3).unwrap();
        grid.set(MeshCoord::new(0, 1), 0.25).unwrap();

        assert_eq!(grid.get(MeshCoord::new(0, 0)), Some(1.0));
        assert_eq!(grid.get(MeshCoord::new(1, 1)), Some(0.0));
        assert_eq!(grid.get(MeshCoord::new(0, 1)), Some(0.25));
    }

    #[test]
    fn set_out_of_bounds_is_rejected() {
        let mut grid = CongestionGrid::new(2);
        let err = grid.set(MeshCoord::new(2, 0), 0.5).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn non_finite_write_leaves_grid_unchanged() {
        let mut grid = CongestionGrid::new(2);
        grid.set(MeshCoord::new(0, 0), 0.5).unwrap();

        let err = grid.set(MeshCoord::new(0, 0), f64::NAN).unwrap_err();
        assert!(matches!(err, Error::InvariantViolation(_)));
        assert_eq!(grid.get(MeshCoord::new(0, 0)), Some(0.5));

        let before = grid.clone();
        assert!(grid
            .replace_all(vec![0.1, f64::INFINITY, 0.2, 0.3])
            .is_err());
        assert_eq!(grid, before);
    }

    #[test]
    fn replace_all_rejects_wrong_length() {
        let mut grid = CongestionGrid::new(2);
        assert!(grid.replace_all(vec![0.0; 3]).is_err());
    }

    #[test]
    fn snapshot_is_independent() {
        let mut grid = CongestionGrid::new(2);
        grid.set(MeshCoord::new(1, 0), 0.4).unwrap();

        let mut snap = grid.snapshot();
        assert_eq!(snap[1][0], 0.4);
        snap[1][0] = 0.9;
        assert_eq!(grid.get(MeshCoord::new(1, 0)), Some(0.4));
    }

    #[test]
    fn iter_is_row_major() {
        let grid = CongestionGrid::new(2);
        let coords: Vec<_> = grid.iter().map(|(c, _)| c).collect();
        assert_eq!(
            coords,
            vec![
                MeshCoord::new(0, 0),
                MeshCoord::new(0, 1),
                MeshCoord::new(1, 0),
                MeshCoord::new(1, 1),
            ]
        );
    }

    proptest! {
        #[test]
        fn writes_always_stay_in_unit_interval(
            size in 1usize..6,
            writes in proptest::collection::vec((0i64..6, 0i64..6, -10.0f64..10.0), 0..40),
        ) {
            let mut grid = CongestionGrid::new(size);
            for (row, col, value) in writes {
                let _ = grid.set(MeshCoord::new(row, col), value);
            }
            for &c in grid.values() {
                prop_assert!((0.0..=1.0).contains(&c));
            }
        }
    }
}
