//! # Zones
//!
//! Static trigger volumes placed in the arena.

use serde::Deserialize;
use skirmish_shared::math::{Aabb, Vec3};

/// Upgrades sold by shop zones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShopItem {
    /// Raises health capacity and current health equally.
    Strength,
    /// Raises damage dealt.
    Attack,
    /// Raises jump impulse (local only).
    Jump,
    /// Raises movement speed (local only).
    Speed,
}

/// What a zone does when the local player stands in it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ZoneKind {
    /// Chance of free currency.
    Bank,
    /// Paid chance of one unit of health.
    Hospital,
    /// Paid stat upgrade.
    Shop(ShopItem),
    /// Teleport to `destination`. Never on cooldown.
    Door {
        /// Where the player lands (eye position).
        destination: Vec3,
    },
}

/// Cooldown timers are shared by every zone of the same kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CooldownKey {
    /// All banks
    Bank,
    /// All hospitals
    Hospital,
    /// All shops selling this item
    Shop(ShopItem),
}

/// Axis-aligned trigger volume.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Zone {
    /// Volume tested against the player's footprint.
    pub bounds: Aabb,
    /// Effect
    pub kind: ZoneKind,
}

impl Zone {
    /// Creates a zone.
    #[must_use]
    pub const fn new(bounds: Aabb, kind: ZoneKind) -> Self {
        Self { bounds, kind }
    }

    /// Returns true if `point` lies inside the volume (faces inclusive).
    #[must_use]
    pub fn contains(&self, point: Vec3) -> bool {
        self.bounds.contains_point(point)
    }
}
