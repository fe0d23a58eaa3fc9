//! # Zone Triggers
//!
//! Each tick the local player's feet are tested against every zone. Within
//! a category the first zone in declaration order wins, so at most one bank,
//! one hospital, one shop item and one door fire per tick.

use skirmish_economy::{ShopItem, Zone, ZoneKind};
use skirmish_shared::math::Vec3;

/// Zones the player stands in this tick, one per category at most.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TriggeredZones {
    /// Standing in a bank
    pub bank: bool,
    /// Standing in a hospital
    pub hospital: bool,
    /// Shop item on offer
    pub shop: Option<ShopItem>,
    /// Door destination
    pub door: Option<Vec3>,
}

impl TriggeredZones {
    /// Returns true if nothing was triggered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Finds the zones containing `feet`.
#[must_use]
pub fn evaluate(zones: &[Zone], feet: Vec3) -> TriggeredZones {
    let mut triggered = TriggeredZones::default();

    for zone in zones.iter().filter(|zone| zone.contains(feet)) {
        match zone.kind {
            ZoneKind::Bank => triggered.bank = true,
            ZoneKind::Hospital => triggered.hospital = true,
            ZoneKind::Shop(item) => {
                triggered.shop.get_or_insert(item);
            }
            ZoneKind::Door { destination } => {
                triggered.door.get_or_insert(destination);
            }
        }
    }

    triggered
}

#[cfg(test)]
mod tests {
    use super::*;
    use skirmish_shared::math::Aabb;

    fn area() -> Aabb {
        Aabb::new(Vec3::new(-5.0, 0.0, -5.0), Vec3::new(5.0, 5.0, 5.0))
    }

    #[test]
    fn test_first_zone_per_category_wins() {
        let zones = [
            Zone::new(area(), ZoneKind::Shop(ShopItem::Jump)),
            Zone::new(area(), ZoneKind::Shop(ShopItem::Attack)),
            Zone::new(
                area(),
                ZoneKind::Door {
                    destination: Vec3::new(1.0, 2.0, 3.0),
                },
            ),
            Zone::new(
                area(),
                ZoneKind::Door {
                    destination: Vec3::new(9.0, 9.0, 9.0),
                },
            ),
            Zone::new(area(), ZoneKind::Bank),
        ];

        let triggered = evaluate(&zones, Vec3::ZERO);
        assert!(triggered.bank);
        assert!(!triggered.hospital);
        assert_eq!(triggered.shop, Some(ShopItem::Jump));
        assert_eq!(triggered.door, Some(Vec3::new(1.0, 2.0, 3.0)));
    }

    #[test]
    fn test_outside_triggers_nothing() {
        let zones = [Zone::new(area(), ZoneKind::Hospital)];
        assert!(evaluate(&zones, Vec3::new(0.0, 6.0, 0.0)).is_empty());
    }
}
