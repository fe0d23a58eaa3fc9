//! # Projectiles
//!
//! Bullets fly straight along their facing and terminate on the first of,
//! in order:
//!
//! 1. lifetime expired
//! 2. at or below the floor
//! 3. inside a crate
//! 4. inside any player's body except the shooter's (registry order)
//!
//! The set only moves bullets and reports terminations. Damage, sounds and
//! visuals are the caller's business.

use skirmish_core::{Arena, ArenaId, PlayerId, PlayerRegistry};
use skirmish_shared::math::{Euler, Vec3};
use skirmish_shared::protocol::RemoteShot;

use crate::collision::World;

/// A bullet in flight.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bullet {
    /// Shooter
    pub owner: PlayerId,
    /// Creation time on the shooter's clock (milliseconds).
    pub created_at_ms: u64,
    /// Current position
    pub position: Vec3,
    /// Fixed facing; travel is along its forward axis.
    pub rotation: Euler,
}

impl From<RemoteShot> for Bullet {
    fn from(shot: RemoteShot) -> Self {
        Self {
            owner: shot.player_id,
            created_at_ms: shot.created_at,
            position: shot.position,
            rotation: shot.rotation,
        }
    }
}

/// Why a bullet stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
    /// Lifetime exceeded.
    Expired,
    /// Reached the floor.
    Ground,
    /// Entered a crate.
    Obstacle,
    /// Entered a player's body.
    PlayerHit(PlayerId),
}

/// A bullet removed during a step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Impact {
    /// Handle the bullet had
    pub id: ArenaId,
    /// Final state
    pub bullet: Bullet,
    /// Cause
    pub termination: Termination,
}

/// Every bullet in flight.
#[derive(Clone, Debug, Default)]
pub struct ProjectileSet {
    bullets: Arena<Bullet>,
}

impl ProjectileSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a bullet.
    pub fn spawn(&mut self, bullet: Bullet) -> ArenaId {
        self.bullets.insert(bullet)
    }

    /// Bullets with their handles.
    pub fn iter(&self) -> impl Iterator<Item = (ArenaId, &Bullet)> {
        self.bullets.iter()
    }

    /// Bullets in flight.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bullets.len()
    }

    /// Returns true if nothing is in flight.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bullets.is_empty()
    }

    /// Moves every bullet and removes the ones that terminated.
    pub fn step(
        &mut self,
        now_ms: u64,
        dt: f32,
        speed: f32,
        timeout_ms: u64,
        world: &World,
        registry: &PlayerRegistry,
    ) -> Vec<Impact> {
        let mut impacts = Vec::new();

        for id in self.bullets.ids() {
            let Some(bullet) = self.bullets.get_mut(id) else {
                continue;
            };
            bullet.position += bullet.rotation.forward() * (speed * dt);

            if let Some(termination) = terminate(bullet, now_ms, timeout_ms, world, registry) {
                if let Some(bullet) = self.bullets.remove(id) {
                    impacts.push(Impact {
                        id,
                        bullet,
                        termination,
                    });
                }
            }
        }

        impacts
    }
}

fn terminate(
    bullet: &Bullet,
    now_ms: u64,
    timeout_ms: u64,
    world: &World,
    registry: &PlayerRegistry,
) -> Option<Termination> {
    if now_ms.saturating_sub(bullet.created_at_ms) >= timeout_ms {
        return Some(Termination::Expired);
    }
    if bullet.position.y <= 0.0 {
        return Some(Termination::Ground);
    }
    if world.point_in_obstacle(bullet.position) {
        return Some(Termination::Obstacle);
    }
    registry
        .iter()
        .filter(|player| player.id != bullet.owner)
        .find(|player| player.bounds().contains_point(bullet.position))
        .map(|player| Termination::PlayerHit(player.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use skirmish_core::Player;
    use skirmish_shared::math::Aabb;

    fn player(id: PlayerId, position: Vec3) -> Player {
        Player {
            id,
            name: format!("p{id}"),
            position,
            rotation: Euler::IDENTITY,
            health: 100,
            strength: 100,
            attack: 10,
            money: 0,
        }
    }

    fn bullet(owner: PlayerId, position: Vec3) -> Bullet {
        Bullet {
            owner,
            created_at_ms: 0,
            position,
            rotation: Euler::IDENTITY,
        }
    }

    #[test]
    fn test_bullet_expires() {
        let mut set = ProjectileSet::new();
        set.spawn(bullet(1, Vec3::new(0.0, 50.0, 0.0)));

        let registry = PlayerRegistry::new();
        let world = World::new();
        assert!(set.step(2499, 0.016, 40.0, 2500, &world, &registry).is_empty());

        let impacts = set.step(2500, 0.016, 40.0, 2500, &world, &registry);
        assert_eq!(impacts.len(), 1);
        assert_eq!(impacts[0].termination, Termination::Expired);
        assert!(set.is_empty());
    }

    #[test]
    fn test_bullet_travels_forward() {
        let mut set = ProjectileSet::new();
        set.spawn(bullet(1, Vec3::new(0.0, 50.0, 0.0)));
        set.step(0, 0.5, 40.0, 2500, &World::new(), &PlayerRegistry::new());
        let moved = set.iter().next().unwrap().1.position;
        assert!((moved.z + 20.0).abs() < 1e-4);
    }

    #[test]
    fn test_expiry_wins_over_hit() {
        let mut registry = PlayerRegistry::new();
        registry.upsert(player(2, Vec3::new(0.0, 2.0, -1.0)));

        let mut set = ProjectileSet::new();
        set.spawn(bullet(1, Vec3::new(0.0, 2.0, 0.0)));
        let impacts = set.step(3000, 0.016, 40.0, 2500, &World::new(), &registry);
        assert_eq!(impacts[0].termination, Termination::Expired);
    }

    #[test]
    fn test_ground_and_obstacle() {
        let mut world = World::new();
        world.add_obstacle(Aabb::cube(Vec3::new(0.0, 5.0, -10.0), 10.0));

        let mut set = ProjectileSet::new();
        set.spawn(bullet(1, Vec3::new(50.0, 0.0, 0.0)));
        set.spawn(bullet(1, Vec3::new(0.0, 5.0, -6.0)));

        let impacts = set.step(0, 0.016, 40.0, 2500, &world, &PlayerRegistry::new());
        let kinds: Vec<_> = impacts.iter().map(|i| i.termination).collect();
        assert_eq!(kinds, vec![Termination::Ground, Termination::Obstacle]);
    }

    #[test]
    fn test_owner_is_never_hit() {
        let mut registry = PlayerRegistry::new();
        registry.upsert(player(1, Vec3::new(0.0, 2.0, 0.0)));
        registry.upsert(player(2, Vec3::new(0.0, 2.0, -1.0)));

        let mut set = ProjectileSet::new();
        set.spawn(bullet(1, Vec3::new(0.0, 2.0, 0.0)));
        let impacts = set.step(0, 0.016, 40.0, 2500, &World::new(), &registry);
        assert_eq!(impacts[0].termination, Termination::PlayerHit(2));
    }

    #[test]
    fn test_first_registered_body_wins() {
        let mut registry = PlayerRegistry::new();
        registry.upsert(player(5, Vec3::new(0.0, 2.0, -1.0)));
        registry.upsert(player(3, Vec3::new(0.0, 2.0, -1.2)));

        let mut set = ProjectileSet::new();
        set.spawn(bullet(9, Vec3::new(0.0, 2.0, -0.5)));
        let impacts = set.step(0, 0.016, 40.0, 2500, &World::new(), &registry);
        assert_eq!(impacts[0].termination, Termination::PlayerHit(5));
    }
}
