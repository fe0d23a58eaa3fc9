//! # Economy Balance Data
//!
//! Every field has a default, so a partial TOML table overrides only what it
//! names:
//!
//! ```toml
//! [bank]
//! cooldown_ms = 1000
//! chance = 3
//! min_credit = 1
//! max_credit = 5
//!
//! [shop.attack]
//! price = 25
//! increment = 2
//! ```

use serde::Deserialize;

use crate::error::{EconomyError, EconomyResult};
use crate::zones::ShopItem;

/// Bank zones: a 1-in-`chance` roll for `min_credit..=max_credit` currency.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BankConfig {
    /// Minimum time between rolls.
    pub cooldown_ms: u64,
    /// Odds denominator.
    pub chance: u32,
    /// Smallest payout.
    pub min_credit: u32,
    /// Largest payout.
    pub max_credit: u32,
}

impl Default for BankConfig {
    fn default() -> Self {
        Self {
            cooldown_ms: 1000,
            chance: 3,
            min_credit: 1,
            max_credit: 5,
        }
    }
}

/// Hospital zones: pay `price` for a 1-in-`chance` roll at `heal` health.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HospitalConfig {
    /// Minimum time between rolls.
    pub cooldown_ms: u64,
    /// Cost of a successful heal.
    pub price: u32,
    /// Odds denominator.
    pub chance: u32,
    /// Health restored on success.
    pub heal: u32,
}

impl Default for HospitalConfig {
    fn default() -> Self {
        Self {
            cooldown_ms: 500,
            price: 1,
            chance: 2,
            heal: 1,
        }
    }
}

/// Price and effect of one shop item.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShopItemConfig {
    /// Cost
    pub price: u32,
    /// Amount added to the upgraded stat.
    pub increment: u32,
}

impl ShopItemConfig {
    /// Creates an item entry.
    #[must_use]
    pub const fn new(price: u32, increment: u32) -> Self {
        Self { price, increment }
    }
}

/// Shop zones.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShopConfig {
    /// Minimum time between purchases of the same item.
    pub cooldown_ms: u64,
    /// Health capacity upgrade.
    pub strength: ShopItemConfig,
    /// Damage upgrade.
    pub attack: ShopItemConfig,
    /// Jump impulse upgrade.
    pub jump: ShopItemConfig,
    /// Movement speed upgrade.
    pub speed: ShopItemConfig,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            cooldown_ms: 1000,
            strength: ShopItemConfig::new(25, 10),
            attack: ShopItemConfig::new(25, 2),
            jump: ShopItemConfig::new(15, 10),
            speed: ShopItemConfig::new(15, 10),
        }
    }
}

impl ShopConfig {
    /// Entry for `item`.
    #[must_use]
    pub const fn item(&self, item: ShopItem) -> &ShopItemConfig {
        match item {
            ShopItem::Strength => &self.strength,
            ShopItem::Attack => &self.attack,
            ShopItem::Jump => &self.jump,
            ShopItem::Speed => &self.speed,
        }
    }
}

/// All economy balance data.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EconomyConfig {
    /// Bank zones
    pub bank: BankConfig,
    /// Hospital zones
    pub hospital: HospitalConfig,
    /// Shop zones
    pub shop: ShopConfig,
}

impl EconomyConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`EconomyError::InvalidConfig`] on syntax errors, unknown keys
    /// or values that fail [`Self::validate`].
    pub fn from_toml_str(text: &str) -> EconomyResult<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| EconomyError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns [`EconomyError::InvalidConfig`] naming the first bad field.
    pub fn validate(&self) -> EconomyResult<()> {
        if self.bank.chance == 0 {
            return Err(EconomyError::InvalidConfig("bank.chance must be at least 1".into()));
        }
        if self.bank.min_credit > self.bank.max_credit {
            return Err(EconomyError::InvalidConfig(format!(
                "bank.min_credit ({}) exceeds bank.max_credit ({})",
                self.bank.min_credit, self.bank.max_credit
            )));
        }
        if self.hospital.chance == 0 {
            return Err(EconomyError::InvalidConfig(
                "hospital.chance must be at least 1".into(),
            ));
        }
        if self.hospital.heal == 0 {
            return Err(EconomyError::InvalidConfig("hospital.heal must be at least 1".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        let config = EconomyConfig::from_toml_str("").unwrap();
        assert_eq!(config, EconomyConfig::default());
        assert_eq!(config.shop.item(ShopItem::Attack), &ShopItemConfig::new(25, 2));
    }

    #[test]
    fn test_partial_override() {
        let config = EconomyConfig::from_toml_str(
            "[bank]\nchance = 5\n\n[shop.speed]\nprice = 40\nincrement = 20\n",
        )
        .unwrap();

        assert_eq!(config.bank.chance, 5);
        assert_eq!(config.bank.cooldown_ms, 1000);
        assert_eq!(config.shop.speed, ShopItemConfig::new(40, 20));
        assert_eq!(config.shop.jump, ShopItemConfig::new(15, 10));
    }

    #[test]
    fn test_rejects_inverted_credit_range() {
        let err = EconomyConfig::from_toml_str("[bank]\nmin_credit = 9\nmax_credit = 2\n")
            .unwrap_err();
        assert!(matches!(err, EconomyError::InvalidConfig(msg) if msg.contains("min_credit")));
    }

    #[test]
    fn test_rejects_unknown_keys() {
        assert!(EconomyConfig::from_toml_str("[bank]\njackpot = 1\n").is_err());
    }
}
