//! # Collision World
//!
//! Static geometry of the arena: crate obstacles and trigger zones.
//!
//! Obstacles only support the player from below and stop bullets. There is
//! no horizontal obstruction; players walk through crate sides.

use skirmish_core::SeededRandom;
use skirmish_economy::Zone;
use skirmish_shared::constants::SCENERY_SEED;
use skirmish_shared::math::{Aabb, Vec3};

use crate::config::{ConfigResult, SimulationConfig, WorldConfig};

/// Obstacles and zones.
#[derive(Clone, Debug)]
pub struct World {
    obstacles: Vec<Aabb>,
    zones: Vec<Zone>,
    next_seed: u64,
}

impl Default for World {
    fn default() -> Self {
        Self {
            obstacles: Vec::new(),
            zones: Vec::new(),
            next_seed: SCENERY_SEED,
        }
    }
}

impl World {
    /// Creates an empty arena: floor only.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the arena described by `config`: seeded scenery plus zones.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured zone is invalid.
    pub fn from_config(config: &SimulationConfig) -> ConfigResult<Self> {
        let (obstacles, next_seed) = place_crates(&config.world);
        Ok(Self {
            obstacles,
            zones: config.zones()?,
            next_seed,
        })
    }

    /// Adds a crate.
    pub fn add_obstacle(&mut self, bounds: Aabb) {
        self.obstacles.push(bounds);
    }

    /// Adds a trigger zone. Declaration order decides which zone of a
    /// category wins when several overlap.
    pub fn add_zone(&mut self, zone: Zone) {
        self.zones.push(zone);
    }

    /// Crate volumes.
    #[must_use]
    pub fn obstacles(&self) -> &[Aabb] {
        &self.obstacles
    }

    /// Trigger zones, in declaration order.
    #[must_use]
    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    /// Returns true if a downward segment of `length` from `eye` touches a
    /// crate.
    #[must_use]
    pub fn ground_probe(&self, eye: Vec3, length: f32) -> bool {
        self.obstacles
            .iter()
            .any(|crate_box| crate_box.hit_by_downward_ray(eye, length))
    }

    /// Returns true if `point` lies inside any crate.
    #[must_use]
    pub fn point_in_obstacle(&self, point: Vec3) -> bool {
        self.obstacles.iter().any(|crate_box| crate_box.contains_point(point))
    }

    /// Seed the scenery sequence stopped at. The session sequence picks up
    /// from here unless configured otherwise.
    #[must_use]
    pub const fn next_seed(&self) -> u64 {
        self.next_seed
    }
}

/// The point tested against zones: the player's feet.
#[inline]
#[must_use]
pub fn footprint(eye: Vec3, player_height: f32) -> Vec3 {
    Vec3::new(eye.x, eye.y - player_height, eye.z)
}

/// Places crates with the scenery sequence.
///
/// Each crate draws x, then z, then its stacking level. Grid coordinates are
/// half-integers, so crate centers sit on multiples of half a crate.
#[must_use]
pub fn generate_scenery(config: &WorldConfig) -> Vec<Aabb> {
    place_crates(config).0
}

/// Crates plus the seed left over once they are placed.
fn place_crates(config: &WorldConfig) -> (Vec<Aabb>, u64) {
    let mut rng = SeededRandom::new(config.scenery_seed);
    let edge = config.crate_size;
    let half_cells = f64::from(config.map_size / 2.0 / edge);

    let crates = (0..config.crate_count())
        .map(|_| {
            let x = rng.range_f64(-half_cells, half_cells) as f32 * edge;
            let z = rng.range_f64(-half_cells, half_cells) as f32 * edge;
            let y = edge / 2.0 + rng.range(0, 20) as f32 * edge;
            Aabb::cube(Vec3::new(x, y, z), edge)
        })
        .collect();
    (crates, rng.seed())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scenery_layout() {
        let config = WorldConfig::default();
        let crates = generate_scenery(&config);
        assert_eq!(crates.len(), 3750);

        for crate_box in &crates {
            let center = (crate_box.min + crate_box.max) * 0.5;
            assert!(center.x.abs() <= 375.0);
            assert!(center.z.abs() <= 375.0);
            assert!(center.y >= 5.0 && center.y <= 205.0);
            // Half-integer cells put centers on 5-unit multiples.
            assert!((center.x / 5.0 - (center.x / 5.0).round()).abs() < 1e-3);
        }
    }

    #[test]
    fn test_scenery_is_reproducible() {
        let config = WorldConfig {
            crate_count: Some(50),
            ..WorldConfig::default()
        };
        assert_eq!(generate_scenery(&config), generate_scenery(&config));
    }

    #[test]
    fn test_session_sequence_continues_after_scenery() {
        let mut config = SimulationConfig::default();
        config.world.crate_count = Some(50);
        let world = World::from_config(&config).unwrap();

        // Three draws per crate.
        assert_eq!(world.next_seed(), SCENERY_SEED + 150);
        assert_eq!(World::new().next_seed(), SCENERY_SEED);
    }

    #[test]
    fn test_ground_probe_hits_crate_top() {
        let mut world = World::new();
        world.add_obstacle(Aabb::cube(Vec3::new(0.0, 5.0, 0.0), 10.0));

        // Standing on top: eye 2 above the crate's top face.
        assert!(world.ground_probe(Vec3::new(0.0, 12.0, 0.0), 2.05));
        assert!(!world.ground_probe(Vec3::new(0.0, 12.1, 0.0), 2.05));
        assert!(!world.ground_probe(Vec3::new(20.0, 12.0, 0.0), 2.05));
    }

    #[test]
    fn test_point_in_obstacle() {
        let mut world = World::new();
        world.add_obstacle(Aabb::cube(Vec3::new(0.0, 5.0, 0.0), 10.0));
        assert!(world.point_in_obstacle(Vec3::new(4.9, 9.9, -4.9)));
        assert!(!world.point_in_obstacle(Vec3::new(0.0, 10.5, 0.0)));
    }

    #[test]
    fn test_footprint() {
        assert_eq!(footprint(Vec3::new(1.0, 2.0, 3.0), 2.0), Vec3::new(1.0, 0.0, 3.0));
    }
}
