//! Destination selection for injected packets.

use noc_topology::{HotspotRegistry, MeshCoord};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// How an injecting router picks the destination of its packet.
///
/// A packet never targets its own source. When no valid destination exists
/// (a 1×1 mesh, or every candidate excluded) nothing is injected.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DestinationPolicy {
    /// Uniform over every other router.
    #[default]
    Uniform,
    /// Uniform over the non-hotspot routers.
    AvoidHotspots,
    /// With probability `bias` a uniformly chosen hotspot, otherwise uniform
    /// over every other router.
    TowardHotspots {
        /// Probability of targeting a hotspot, in `[0, 1]`
        bias: f64,
    },
}

impl DestinationPolicy {
    /// Pick a destination for a packet injected at `source`.
    ///
    /// A `TowardHotspots` bias outside `[0, 1]` is clamped into range, and a
    /// NaN bias never targets hotspots.
    pub fn choose<R: Rng>(
        &self,
        source: MeshCoord,
        size: usize,
        hotspots: &HotspotRegistry,
        rng: &mut R,
    ) -> Option<MeshCoord> {
        match *self {
            DestinationPolicy::Uniform => uniform_other(source, size, rng),
            DestinationPolicy::AvoidHotspots => {
                let candidates: Vec<MeshCoord> = (0..size * size)
                    .map(|i| MeshCoord::from_index(i, size))
                    .filter(|c| *c != source && !hotspots.contains(c))
                    .collect();
                pick(&candidates, rng)
            }
            DestinationPolicy::TowardHotspots { bias } => {
                if rng.gen_bool(unit_probability(bias)) {
                    let candidates: Vec<MeshCoord> =
                        hotspots.iter().copied().filter(|c| *c != source).collect();
                    if let Some(dest) = pick(&candidates, rng) {
                        return Some(dest);
                    }
                }
                uniform_other(source, size, rng)
            }
        }
    }
}

fn unit_probability(p: f64) -> f64 {
    if p.is_nan() {
        0.0
    } else {
        p.clamp(0.0, 1.0)
    }
}

/// Uniform draw over every router except `source`, without allocating.
fn uniform_other<R: Rng>(source: MeshCoord, size: usize, rng: &mut R) -> Option<MeshCoord> {
    let nodes = size * size;
    let source_index = source.index_in(size)?;
    if nodes < 2 {
        return None;
    }
    let drawn = rng.gen_range(0..nodes - 1);
    let index = if drawn >= source_index { drawn + 1 } else { drawn };
    Some(MeshCoord::from_index(index, size))
}

fn pick<R: Rng>(candidates: &[MeshCoord], rng: &mut R) -> Option<MeshCoord> {
    if candidates.is_empty() {
        return None;
    }
    Some(candidates[rng.gen_range(0..candidates.len())])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn hotspots(coords: &[(i64, i64)], size: usize) -> HotspotRegistry {
        HotspotRegistry::from_coords(coords.iter().map(|&c| MeshCoord::from(c)), size).unwrap()
    }

    #[test]
    fn uniform_never_targets_source() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let none = HotspotRegistry::new();
        let source = MeshCoord::new(1, 1);
        for _ in 0..500 {
            let dest = DestinationPolicy::Uniform
                .choose(source, 3, &none, &mut rng)
                .unwrap();
            assert_ne!(dest, source);
            assert!(dest.is_within(3));
        }
    }

    #[test]
    fn uniform_reaches_every_other_router() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let none = HotspotRegistry::new();
        let source = MeshCoord::new(0, 0);
        let mut seen = std::collections::BTreeSet::new();
        for _ in 0..2000 {
            seen.insert(DestinationPolicy::Uniform.choose(source, 3, &none, &mut rng).unwrap());
        }
        assert_eq!(seen.len(), 8);
        assert!(!seen.contains(&source));
    }

    #[test]
    fn degenerate_meshes_have_no_destination() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let none = HotspotRegistry::new();
        for policy in [
            DestinationPolicy::Uniform,
            DestinationPolicy::AvoidHotspots,
            DestinationPolicy::TowardHotspots { bias: 1.0 },
        ] {
            assert_eq!(policy.choose(MeshCoord::ORIGIN, 1, &none, &mut rng), None);
            assert_eq!(policy.choose(MeshCoord::ORIGIN, 0, &none, &mut rng), None);
        }
    }

    #[test]
    fn avoid_hotspots_excludes_them() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let hot = hotspots(&[(0, 0), (1, 1), (2, 2)], 4);
        for _ in 0..1000 {
            let dest = DestinationPolicy::AvoidHotspots
                .choose(MeshCoord::new(3, 3), 4, &hot, &mut rng)
                .unwrap();
            assert!(!hot.contains(&dest));
            assert_ne!(dest, MeshCoord::new(3, 3));
        }
    }

    #[test]
    fn avoid_hotspots_with_no_candidate() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let hot = hotspots(&[(0, 1), (1, 0), (1, 1)], 2);
        let dest = DestinationPolicy::AvoidHotspots.choose(MeshCoord::new(0, 0), 2, &hot, &mut rng);
        assert_eq!(dest, None);
    }

    #[test]
    fn full_bias_always_targets_hotspots() {
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let hot = hotspots(&[(2, 3), (3, 1)], 4);
        let policy = DestinationPolicy::TowardHotspots { bias: 1.0 };
        for _ in 0..200 {
            let dest = policy.choose(MeshCoord::new(0, 0), 4, &hot, &mut rng).unwrap();
            assert!(hot.contains(&dest));
        }
    }

    #[test]
    fn biased_source_on_only_hotspot_falls_back_to_uniform() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let hot = hotspots(&[(1, 1)], 3);
        let policy = DestinationPolicy::TowardHotspots { bias: 1.0 };
        let dest = policy.choose(MeshCoord::new(1, 1), 3, &hot, &mut rng).unwrap();
        assert_ne!(dest, MeshCoord::new(1, 1));
    }

    #[test]
    fn out_of_range_bias_is_clamped() {
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let hot = hotspots(&[(2, 2)], 3);
        let source = MeshCoord::new(0, 0);

        for _ in 0..100 {
            let dest = DestinationPolicy::TowardHotspots { bias: 1.5 }
                .choose(source, 3, &hot, &mut rng)
                .unwrap();
            assert_eq!(dest, MeshCoord::new(2, 2));
        }
        for bias in [-0.5, f64::NAN] {
            let dest = DestinationPolicy::TowardHotspots { bias }
                .choose(source, 3, &hot, &mut rng)
                .unwrap();
            assert_ne!(dest, source);
        }
    }

    #[test]
    fn policy_serializes_with_kind_tag() {
        let json = serde_json::to_string(&DestinationPolicy::TowardHotspots { bias: 0.25 }).unwrap();
        assert_eq!(json, r#"{"kind":"toward_hotspots","bias":0.25}"#);

        let parsed: DestinationPolicy = serde_json::from_str(r#"{"kind":"avoid_hotspots"}"#).unwrap();
        assert_eq!(parsed, DestinationPolicy::AvoidHotspots);
    }
}
