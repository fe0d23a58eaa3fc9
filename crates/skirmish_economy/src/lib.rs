//! # SKIRMISH Economy System
//!
//! In-world currency, healing and stat upgrades for the local player.
//!
//! ## Design Principles
//!
//! 1. **Cooldown-gated** - each zone kind re-fires no faster than its cooldown
//! 2. **Silent failure** - unmet preconditions change nothing and report nothing
//! 3. **Explicit changes** - every handler returns the stats it touched, so the
//!    caller can broadcast exactly one message per field
//! 4. **External configuration** - all balance data in TOML files
//!
//! ## Trust
//!
//! The peer echoes whatever the client reports. Nothing here is authoritative.
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut economy = EconomySystem::new(EconomyConfig::from_toml_str(text)?);
//!
//! for change in economy.on_bank(player, &mut rng, now_ms) {
//!     if let Some(message) = change.outbound() {
//!         session.send(&message);
//!     }
//! }
//! ```

#![deny(unsafe_code)]

pub mod config;
pub mod cooldown;
pub mod error;
pub mod systems;
pub mod zones;

pub use config::{BankConfig, EconomyConfig, HospitalConfig, ShopConfig, ShopItemConfig};
pub use cooldown::Cooldowns;
pub use error::{EconomyError, EconomyResult};
pub use systems::{settle_death, EconomySystem, StatChange};
pub use zones::{CooldownKey, ShopItem, Zone, ZoneKind};
