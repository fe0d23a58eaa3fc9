//! # Entity Registry
//!
//! The authoritative local mapping of participant id → [`Player`].
//!
//! Participants are kept in arrival order: projectile hit tests walk the
//! registry and the first body hit wins, so iteration order is observable.
//! Sessions hold a handful of players, so lookups are linear.

use skirmish_shared::math::{Aabb, Euler, Vec3};
use skirmish_shared::protocol::PlayerSnapshot;

/// Stable participant identifier assigned by the peer.
pub type PlayerId = u32;

/// Body volume relative to the eye position: head, torso and name plate.
const BODY_MIN: Vec3 = Vec3::new(-0.5, -2.0, -0.5);
const BODY_MAX: Vec3 = Vec3::new(0.5, 1.125, 0.5);

/// State of one participant.
///
/// Invariant: `health <= strength`.
#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    /// Stable id
    pub id: PlayerId,
    /// Display name
    pub name: String,
    /// Eye position
    pub position: Vec3,
    /// View rotation
    pub rotation: Euler,
    /// Current health
    pub health: u32,
    /// Health capacity
    pub strength: u32,
    /// Damage scaling
    pub attack: u32,
    /// Currency
    pub money: u32,
}

impl Player {
    /// Builds a player from a wire snapshot, clamping health into capacity.
    #[must_use]
    pub fn from_snapshot(snapshot: PlayerSnapshot) -> Self {
        Self {
            id: snapshot.id,
            name: snapshot.name,
            position: snapshot.position,
            rotation: snapshot.rotation,
            health: snapshot.health.min(snapshot.strength),
            strength: snapshot.strength,
            attack: snapshot.attack,
            money: snapshot.money,
        }
    }

    /// World-space body volume used for projectile hits.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.position + BODY_MIN, self.position + BODY_MAX)
    }

    /// Sets health, clamped into `0..=strength`.
    pub fn set_health(&mut self, health: u32) {
        self.health = health.min(self.strength);
    }

    /// Sets capacity, pulling health down if it no longer fits.
    pub fn set_strength(&mut self, strength: u32) {
        self.strength = strength;
        self.health = self.health.min(strength);
    }
}

/// Participant registry with the local player distinguished.
#[derive(Clone, Debug, Default)]
pub struct PlayerRegistry {
    players: Vec<Player>,
    local_id: Option<PlayerId>,
}

impl PlayerRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            players: Vec::new(),
            local_id: None,
        }
    }

    /// Id of the local player, once `player.init` has arrived.
    #[inline]
    #[must_use]
    pub const fn local_id(&self) -> Option<PlayerId> {
        self.local_id
    }

    /// Returns true if `id` is the local player.
    #[must_use]
    pub fn is_local(&self, id: PlayerId) -> bool {
        self.local_id() == Some(id)
    }

    /// Establishes the local identity. Replaces any previous entry for the id.
    pub fn set_local(&mut self, player: Player) {
        self.local_id = Some(player.id);
        self.upsert(player);
    }

    /// Inserts a participant, replacing an existing entry in place.
    ///
    /// Returns true if the id was new.
    pub fn upsert(&mut self, player: Player) -> bool {
        if let Some(existing) = self.get_mut(player.id) {
            *existing = player;
            false
        } else {
            self.players.push(player);
            true
        }
    }

    /// Removes a participant. The local player cannot be removed this way.
    pub fn remove(&mut self, id: PlayerId) -> Option<Player> {
        if self.is_local(id) {
            return None;
        }
        let index = self.players.iter().position(|p| p.id == id)?;
        Some(self.players.remove(index))
    }

    /// Looks up a participant.
    #[must_use]
    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Looks up a participant mutably.
    pub fn get_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    /// The local player.
    #[must_use]
    pub fn local(&self) -> Option<&Player> {
        self.get(self.local_id?)
    }

    /// The local player, mutably.
    pub fn local_mut(&mut self) -> Option<&mut Player> {
        let id = self.local_id?;
        self.get_mut(id)
    }

    /// All participants in arrival order.
    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    /// Remote participants in arrival order.
    pub fn remotes(&self) -> impl Iterator<Item = &Player> {
        let local = self.local_id;
        self.players.iter().filter(move |p| Some(p.id) != local)
    }

    /// Number of participants, local included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Returns true if nobody is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(id: PlayerId) -> Player {
        Player {
            id,
            name: format!("p{id}"),
            position: Vec3::new(0.0, 2.0, 0.0),
            rotation: Euler::IDENTITY,
            health: 100,
            strength: 100,
            attack: 10,
            money: 0,
        }
    }

    #[test]
    fn test_local_is_distinguished() {
        let mut registry = PlayerRegistry::new();
        registry.set_local(player(1));
        registry.upsert(player(2));

        assert!(registry.is_local(1));
        assert_eq!(registry.local().map(|p| p.id), Some(1));
        assert_eq!(registry.remotes().map(|p| p.id).collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn test_upsert_keeps_arrival_order() {
        let mut registry = PlayerRegistry::new();
        assert!(registry.upsert(player(3)));
        assert!(registry.upsert(player(1)));

        let mut renamed = player(3);
        renamed.name = "renamed".into();
        assert!(!registry.upsert(renamed));

        let ids: Vec<_> = registry.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 1]);
        assert_eq!(registry.get(3).unwrap().name, "renamed");
    }

    #[test]
    fn test_local_cannot_be_closed() {
        let mut registry = PlayerRegistry::new();
        registry.set_local(player(1));
        assert!(registry.remove(1).is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_health_clamps_to_strength() {
        let mut p = player(1);
        p.set_health(250);
        assert_eq!(p.health, 100);

        p.set_strength(60);
        assert_eq!(p.health, 60);
    }

    #[test]
    fn test_bounds_cover_head_and_body() {
        let p = player(1);
        let bounds = p.bounds();
        assert!(bounds.contains_point(Vec3::new(0.0, 2.5, 0.0)));
        assert!(bounds.contains_point(Vec3::new(0.0, 0.5, 0.0)));
        assert!(!bounds.contains_point(Vec3::new(0.0, -0.5, 0.0)));
    }
}
