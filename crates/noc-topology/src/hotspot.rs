//! Hotspot membership.
//!
//! Hotspots are kept in a `BTreeSet` so membership is `O(log n)` and
//! iteration is row-major. Anything that draws random numbers per hotspot
//! relies on that order for reproducibility.

use std::collections::BTreeSet;

use crate::{Error, MeshCoord, Result};

/// The set of hotspot routers for one mesh.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HotspotRegistry {
    members: BTreeSet<MeshCoord>,
}

impl HotspotRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry for a `size × size` mesh.
    ///
    /// Fails with `InvalidArgument` if any coordinate is out of bounds.
    /// Duplicates collapse into a single member.
    pub fn from_coords<I>(coords: I, size: usize) -> Result<Self>
    where
        I: IntoIterator<Item = MeshCoord>,
    {
        let mut members = BTreeSet::new();
        for coord in coords {
            if !coord.is_within(size) {
                return Err(Error::InvalidArgument(format!(
                    "hotspot {coord} outside {size}x{size} mesh"
                )));
            }
            members.insert(coord);
        }
        Ok(Self { members })
    }

    /// Replace the whole set.
    ///
    /// The new set is validated first; on error the current set is kept.
    pub fn replace<I>(&mut self, coords: I, size: usize) -> Result<()>
    where
        I: IntoIterator<Item = MeshCoord>,
    {
        *self = Self::from_coords(coords, size)?;
        Ok(())
    }

    /// Whether `coord` is a hotspot.
    #[inline]
    pub fn contains(&self, coord: &MeshCoord) -> bool {
        self.members.contains(coord)
    }

    /// Number of hotspots.
    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether there are no hotspots.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Hotspots in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &MeshCoord> + '_ {
        self.members.iter()
    }

    /// Hotspots as an owned, row-major `Vec`.
    pub fn to_vec(&self) -> Vec<MeshCoord> {
        self.members.iter().copied().collect()
    }
}
