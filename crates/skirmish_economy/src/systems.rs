//! # Economy Systems
//!
//! Cooldown-gated handlers invoked when the local player overlaps a zone.
//!
//! ## Handler contract
//!
//! ```text
//! overlap -> cooldown elapsed? -> deterministic preconditions? ->
//!   1. stamp cooldown
//!   2. roll (bank, hospital) or purchase (shop)
//!   3. mutate player / tuning
//!   4. return the changed stats
//! ```
//!
//! A failed precondition returns an empty list and leaves the cooldown
//! untouched. A failed roll returns an empty list but keeps the stamp.

use skirmish_core::{MovementTuning, Player, PlayerId, PlayerRegistry, SeededRandom};
use skirmish_shared::protocol::{ClientMessage, MoneyGivePayload};

use crate::config::EconomyConfig;
use crate::cooldown::Cooldowns;
use crate::zones::{CooldownKey, ShopItem};

/// A stat the economy changed, carrying its new value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StatChange {
    /// Local money
    Money(u32),
    /// Local health
    Health(u32),
    /// Local health capacity
    Strength(u32),
    /// Local attack
    Attack(u32),
    /// Local movement speed (not broadcast)
    MoveSpeed(f32),
    /// Local jump impulse (not broadcast)
    JumpImpulse(f32),
}

impl StatChange {
    /// Outbound message reporting this change, if the peer tracks the stat.
    #[must_use]
    pub fn outbound(self) -> Option<ClientMessage> {
        match self {
            Self::Money(money) => Some(ClientMessage::Money { money }),
            Self::Health(health) => Some(ClientMessage::Health { health }),
            Self::Strength(strength) => Some(ClientMessage::Strength { strength }),
            Self::Attack(attack) => Some(ClientMessage::Attack { attack }),
            Self::MoveSpeed(_) | Self::JumpImpulse(_) => None,
        }
    }
}

/// Applies zone effects to the local player.
#[derive(Clone, Debug, Default)]
pub struct EconomySystem {
    config: EconomyConfig,
    cooldowns: Cooldowns,
}

impl EconomySystem {
    /// Creates a system with fresh cooldowns.
    #[must_use]
    pub fn new(config: EconomyConfig) -> Self {
        Self {
            config,
            cooldowns: Cooldowns::new(),
        }
    }

    /// Balance data in use.
    #[must_use]
    pub const fn config(&self) -> &EconomyConfig {
        &self.config
    }

    /// Cooldown timers.
    #[must_use]
    pub const fn cooldowns(&self) -> &Cooldowns {
        &self.cooldowns
    }

    /// Bank overlap: 1-in-N chance of free currency.
    pub fn on_bank(
        &mut self,
        player: &mut Player,
        rng: &mut SeededRandom,
        now_ms: u64,
    ) -> Vec<StatChange> {
        let bank = &self.config.bank;
        if !self.cooldowns.ready(CooldownKey::Bank, now_ms, bank.cooldown_ms) {
            return Vec::new();
        }
        self.cooldowns.mark(CooldownKey::Bank, now_ms);

        if !rng.one_in(bank.chance) {
            return Vec::new();
        }
        let credit = rng.range_u32(bank.min_credit, bank.max_credit);
        player.money = player.money.saturating_add(credit);
        tracing::debug!("Bank paid {} (money={})", credit, player.money);

        vec![StatChange::Money(player.money)]
    }

    /// Hospital overlap: pay for a chance at one unit of health.
    pub fn on_hospital(
        &mut self,
        player: &mut Player,
        rng: &mut SeededRandom,
        now_ms: u64,
    ) -> Vec<StatChange> {
        let hospital = &self.config.hospital;
        if !self
            .cooldowns
            .ready(CooldownKey::Hospital, now_ms, hospital.cooldown_ms)
        {
            return Vec::new();
        }
        if player.money < hospital.price || player.health >= player.strength {
            return Vec::new();
        }
        self.cooldowns.mark(CooldownKey::Hospital, now_ms);

        if !rng.one_in(hospital.chance) {
            return Vec::new();
        }
        player.money -= hospital.price;
        player.set_health(player.health.saturating_add(hospital.heal));
        tracing::debug!("Hospital healed to {} (money={})", player.health, player.money);

        vec![
            StatChange::Money(player.money),
            StatChange::Health(player.health),
        ]
    }

    /// Shop overlap: buy one unit of `item` if affordable.
    pub fn on_shop(
        &mut self,
        item: ShopItem,
        player: &mut Player,
        tuning: &mut MovementTuning,
        now_ms: u64,
    ) -> Vec<StatChange> {
        let key = CooldownKey::Shop(item);
        let entry = self.config.shop.item(item);
        if !self
            .cooldowns
            .ready(key, now_ms, self.config.shop.cooldown_ms)
        {
            return Vec::new();
        }
        if player.money < entry.price {
            return Vec::new();
        }
        self.cooldowns.mark(key, now_ms);
        player.money -= entry.price;

        let increment = entry.increment;
        let upgraded = match item {
            ShopItem::Strength => {
                player.set_strength(player.strength.saturating_add(increment));
                player.set_health(player.health.saturating_add(increment));
                vec![
                    StatChange::Strength(player.strength),
                    StatChange::Health(player.health),
                ]
            }
            ShopItem::Attack => {
                player.attack = player.attack.saturating_add(increment);
                vec![StatChange::Attack(player.attack)]
            }
            ShopItem::Jump => {
                tuning.jump_impulse += increment as f32;
                vec![StatChange::JumpImpulse(tuning.jump_impulse)]
            }
            ShopItem::Speed => {
                tuning.speed += increment as f32;
                vec![StatChange::MoveSpeed(tuning.speed)]
            }
        };
        tracing::debug!("Bought {:?} (money={})", item, player.money);

        let mut changes = Vec::with_capacity(upgraded.len() + 1);
        changes.push(StatChange::Money(player.money));
        changes.extend(upgraded);
        changes
    }
}

/// Moves all local currency to `killer`.
///
/// The killer is credited in the registry when still present. Returns the
/// `player.money.give` message to send, or `None` if there is no local player.
pub fn settle_death(registry: &mut PlayerRegistry, killer: PlayerId) -> Option<ClientMessage> {
    let local = registry.local_mut()?;
    let money = std::mem::take(&mut local.money);

    if let Some(owner) = registry.get_mut(killer) {
        owner.money = owner.money.saturating_add(money);
    }
    tracing::warn!("Killed by {}; {} transferred", killer, money);

    Some(ClientMessage::MoneyGive(MoneyGivePayload { id: killer, money }))
}
