//! Arena geometry and spawn placement.
//!
//! Placement uses rejection sampling: draw a candidate inside the target
//! region, reject it if any existing entity sits within the clearance
//! radius, retry a bounded number of times. Exhausting the attempt budget
//! skips the spawn for this round rather than forcing an overlap.

use rand::Rng;
use tracing::warn;

use ecosim_types::Vec2;

/// Clearance radius a candidate position must keep from existing entities.
pub const DEFAULT_CHECK_RADIUS: f32 = 1.5;

/// How many candidates to try before giving up on a spawn.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;

/// The rectangular play area, centred on the origin.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Arena {
    /// Half-extent along each axis; the arena spans `[-x, x] x [-z, z]`.
    pub half_extents: Vec2,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            half_extents: Vec2::new(20.0, 20.0),
        }
    }
}

impl Arena {
    /// An arena with the given half-extents.
    pub const fn new(half_x: f32, half_z: f32) -> Self {
        Self {
            half_extents: Vec2::new(half_x, half_z),
        }
    }

    /// Whether a point lies inside the arena bounds.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x.abs() <= self.half_extents.x && point.z.abs() <= self.half_extents.z
    }

    /// Clamp a point back inside the arena bounds.
    pub fn clamp(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            point.x.clamp(-self.half_extents.x, self.half_extents.x),
            point.z.clamp(-self.half_extents.z, self.half_extents.z),
        )
    }
}

/// Which region of the arena to sample from.
///
/// Quadrants segregate species at seed time: prey are seeded in the
/// north-east quadrant, predators in the south-west, so neither species
/// starts inside the other's territory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpawnRegion {
    /// Anywhere inside the arena.
    Any,
    /// Positive x, positive z.
    NorthEast,
    /// Negative x, positive z.
    NorthWest,
    /// Negative x, negative z.
    SouthWest,
    /// Positive x, negative z.
    SouthEast,
}

impl SpawnRegion {
    /// Sample a uniform point within this region of the arena.
    fn sample<R: Rng>(self, arena: &Arena, rng: &mut R) -> Vec2 {
        let hx = arena.half_extents.x;
        let hz = arena.half_extents.z;
        let (x_range, z_range) = match self {
            Self::Any => ((-hx, hx), (-hz, hz)),
            Self::NorthEast => ((0.0, hx), (0.0, hz)),
            Self::NorthWest => ((-hx, 0.0), (0.0, hz)),
            Self::SouthWest => ((-hx, 0.0), (-hz, 0.0)),
            Self::SouthEast => ((0.0, hx), (-hz, 0.0)),
        };
        Vec2::new(
            rng.random_range(x_range.0..=x_range.1),
            rng.random_range(z_range.0..=z_range.1),
        )
    }
}

/// Find a clear spawn position via rejection sampling.
///
/// Returns `None` when `max_attempts` candidates were all within
/// `check_radius` of an existing blocker; callers skip the spawn for the
/// round and try again on the next maintenance pass.
pub fn find_spawn_position<R: Rng>(
    arena: &Arena,
    region: SpawnRegion,
    blockers: &[Vec2],
    check_radius: f32,
    max_attempts: u32,
    rng: &mut R,
) -> Option<Vec2> {
    for _ in 0..max_attempts {
        let candidate = region.sample(arena, rng);
        let blocked = blockers
            .iter()
            .any(|blocker| candidate.distance_to(*blocker) < check_radius);
        if !blocked {
            return Some(candidate);
        }
    }
    warn!(
        ?region,
        check_radius, max_attempts, "no clear spawn position found, skipping"
    );
    None
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    #[test]
    fn arena_contains_and_clamps() {
        let arena = Arena::new(10.0, 10.0);
        assert!(arena.contains(Vec2::new(5.0, -5.0)));
        assert!(!arena.contains(Vec2::new(11.0, 0.0)));
        let clamped = arena.clamp(Vec2::new(15.0, -30.0));
        assert!((clamped.x - 10.0).abs() < 1e-6);
        assert!((clamped.z + 10.0).abs() < 1e-6);
    }

    #[test]
    fn open_arena_always_places() {
        let arena = Arena::new(10.0, 10.0);
        let mut rng = SmallRng::seed_from_u64(7);
        let spot = find_spawn_position(
            &arena,
            SpawnRegion::Any,
            &[],
            DEFAULT_CHECK_RADIUS,
            DEFAULT_MAX_ATTEMPTS,
            &mut rng,
        );
        assert!(spot.is_some_and(|p| arena.contains(p)));
    }

    #[test]
    fn quadrant_samples_stay_in_quadrant() {
        let arena = Arena::new(10.0, 10.0);
        let mut rng = SmallRng::seed_from_u64(11);
        for _ in 0..50 {
            let spot = find_spawn_position(&arena, SpawnRegion::SouthWest, &[], 0.0, 1, &mut rng);
            let spot = spot.unwrap_or(Vec2::new(1.0, 1.0));
            assert!(spot.x <= 0.0 && spot.z <= 0.0);
        }
    }

    #[test]
    fn crowded_region_skips_spawn() {
        // One blocker whose clearance covers the whole sampling region.
        let arena = Arena::new(1.0, 1.0);
        let mut rng = SmallRng::seed_from_u64(3);
        let spot = find_spawn_position(
            &arena,
            SpawnRegion::Any,
            &[Vec2::ZERO],
            10.0,
            DEFAULT_MAX_ATTEMPTS,
            &mut rng,
        );
        assert!(spot.is_none());
    }

    #[test]
    fn placement_respects_clearance() {
        let arena = Arena::new(10.0, 10.0);
        let blockers = vec![Vec2::ZERO, Vec2::new(3.0, 3.0)];
        let mut rng = SmallRng::seed_from_u64(19);
        for _ in 0..20 {
            if let Some(spot) =
                find_spawn_position(&arena, SpawnRegion::Any, &blockers, 1.5, 10, &mut rng)
            {
                for blocker in &blockers {
                    assert!(spot.distance_to(*blocker) >= 1.5);
                }
            }
        }
    }
}
