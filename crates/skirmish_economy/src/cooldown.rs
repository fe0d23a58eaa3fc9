//! Per-kind trigger cooldowns.

use std::collections::HashMap;

use crate::zones::CooldownKey;

/// Last firing time of each cooldown key, in milliseconds.
#[derive(Clone, Debug, Default)]
pub struct Cooldowns {
    last_fired: HashMap<CooldownKey, u64>,
}

impl Cooldowns {
    /// Creates an empty set; every key starts ready.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if at least `cooldown_ms` elapsed since `key` last fired.
    #[must_use]
    pub fn ready(&self, key: CooldownKey, now_ms: u64, cooldown_ms: u64) -> bool {
        self.last_fired(key)
            .map_or(true, |last| now_ms.saturating_sub(last) >= cooldown_ms)
    }

    /// Stamps `key` as fired at `now_ms`.
    pub fn mark(&mut self, key: CooldownKey, now_ms: u64) {
        self.last_fired.insert(key, now_ms);
    }

    /// Time `key` last fired.
    #[must_use]
    pub fn last_fired(&self, key: CooldownKey) -> Option<u64> {
        self.last_fired.get(&key).copied()
    }
}
