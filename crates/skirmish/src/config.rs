//! # Simulation Configuration
//!
//! All tuning is loaded once at startup from TOML. Every key has a default,
//! so an empty document yields the stock arena; see `config/default.toml`
//! at the workspace root for the full list.

use std::path::Path;

use serde::Deserialize;
use skirmish_economy::{EconomyConfig, EconomyError, ShopItem, Zone, ZoneKind};
use skirmish_shared::constants::{CRATE_SIZE, MAP_SIZE, PLAYER_BASE_ATTACK, PLAYER_HEIGHT, SCENERY_SEED};
use skirmish_shared::math::{Aabb, Vec3};
use thiserror::Error;

/// Errors raised while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not valid TOML or has unknown keys.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Economy balance data is inconsistent.
    #[error(transparent)]
    Economy(#[from] EconomyError),

    /// A value is out of range.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Local player movement.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PhysicsConfig {
    /// Horizontal velocity decay per second.
    pub damping: f32,
    /// World gravity.
    pub gravity: f32,
    /// Player mass; scales gravity.
    pub mass: f32,
    /// Base horizontal acceleration.
    pub speed: f32,
    /// Base jump impulse.
    pub jump_impulse: f32,
    /// Eye height above the feet.
    pub player_height: f32,
    /// Radians per pixel of mouse motion.
    pub sensitivity: f32,
    /// Extra reach of the ground probe below the feet.
    pub ground_probe_epsilon: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            damping: 10.0,
            gravity: 6.0,
            mass: 40.0,
            speed: 150.0,
            jump_impulse: 150.0,
            player_height: PLAYER_HEIGHT,
            sensitivity: 0.004,
            ground_probe_epsilon: 0.05,
        }
    }
}

/// Bullets.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectileConfig {
    /// Units travelled per second.
    pub speed: f32,
    /// Lifetime in milliseconds.
    pub timeout_ms: u64,
    /// Minimum spacing between local shots.
    pub shot_cooldown_ms: u64,
    /// Attack used when the shooter already left.
    pub default_attack: u32,
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            speed: 40.0,
            timeout_ms: 2500,
            shot_cooldown_ms: 500,
            default_attack: PLAYER_BASE_ATTACK,
        }
    }
}

/// Outbound sync and inbound presentation.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NetworkConfig {
    /// Minimum spacing between movement updates.
    pub move_interval_ms: u64,
    /// Decimal places kept in movement updates.
    pub move_precision: u32,
    /// Glide duration toward a received position.
    pub tween_ms: u64,
    /// Chat lines kept.
    pub chat_capacity: usize,
    /// Chat line lifetime.
    pub chat_expiry_ms: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            move_interval_ms: skirmish_networking::MOVE_INTERVAL_MS,
            move_precision: skirmish_networking::MOVE_PRECISION,
            tween_ms: skirmish_networking::TWEEN_DURATION_MS,
            chat_capacity: skirmish_networking::MAX_CHAT_ENTRIES,
            chat_expiry_ms: skirmish_networking::CHAT_EXPIRY_MS,
        }
    }
}

/// Zone kind as written in TOML.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneKindConfig {
    /// Bank
    Bank,
    /// Hospital
    Hospital,
    /// Shop; needs `item`
    Shop,
    /// Door; needs `destination`
    Door,
}

/// One zone as written in TOML.
///
/// ```toml
/// [[world.zones]]
/// kind = "shop"
/// item = "attack"
/// min = { x = 20, y = 0, z = 20 }
/// max = { x = 30, y = 5, z = 30 }
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ZoneConfig {
    /// Zone kind
    pub kind: ZoneKindConfig,
    /// Item sold (shops only)
    #[serde(default)]
    pub item: Option<ShopItem>,
    /// Minimum corner
    pub min: Vec3,
    /// Maximum corner
    pub max: Vec3,
    /// Landing eye position (doors only)
    #[serde(default)]
    pub destination: Option<Vec3>,
}

impl ZoneConfig {
    /// Builds the runtime zone.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for inverted bounds, a shop without
    /// an item or a door without a destination.
    pub fn to_zone(&self) -> ConfigResult<Zone> {
        if self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z {
            return Err(ConfigError::Invalid(format!(
                "zone min {:?} exceeds max {:?}",
                self.min, self.max
            )));
        }
        let kind = match self.kind {
            ZoneKindConfig::Bank => ZoneKind::Bank,
            ZoneKindConfig::Hospital => ZoneKind::Hospital,
            ZoneKindConfig::Shop => ZoneKind::Shop(
                self.item
                    .ok_or_else(|| ConfigError::Invalid("shop zone without item".into()))?,
            ),
            ZoneKindConfig::Door => ZoneKind::Door {
                destination: self
                    .destination
                    .ok_or_else(|| ConfigError::Invalid("door zone without destination".into()))?,
            },
        };
        Ok(Zone::new(Aabb::new(self.min, self.max), kind))
    }
}

/// Arena layout.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorldConfig {
    /// Edge length of the square arena.
    pub map_size: f32,
    /// Edge length of one crate.
    pub crate_size: f32,
    /// Seed of the scenery sequence.
    pub scenery_seed: u64,
    /// Number of crates; `map_size² / 150` when absent.
    pub crate_count: Option<usize>,
    /// Seed of the session sequence (trigger and damage rolls). When absent
    /// the sequence continues where scenery generation stopped.
    pub session_seed: Option<u64>,
    /// Trigger zones.
    pub zones: Vec<ZoneConfig>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            map_size: MAP_SIZE,
            crate_size: CRATE_SIZE,
            scenery_seed: SCENERY_SEED,
            crate_count: None,
            session_seed: None,
            zones: Vec::new(),
        }
    }
}

impl WorldConfig {
    /// Crates placed by the scenery generator.
    #[must_use]
    pub fn crate_count(&self) -> usize {
        self.crate_count
            .unwrap_or((self.map_size * self.map_size / 150.0) as usize)
    }
}

/// Everything the simulation is tuned by.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Local movement
    pub physics: PhysicsConfig,
    /// Bullets
    pub projectiles: ProjectileConfig,
    /// Sync and presentation
    pub network: NetworkConfig,
    /// Arena layout
    pub world: WorldConfig,
    /// Bank, hospital and shop balance
    pub economy: EconomyConfig,
}

impl SimulationConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for bad TOML and the errors of
    /// [`Self::validate`].
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`Self::from_toml_str`].
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Checks ranges and cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] or [`ConfigError::Economy`] naming the
    /// first bad value.
    pub fn validate(&self) -> ConfigResult<()> {
        let physics = &self.physics;
        if physics.player_height <= 0.0 {
            return Err(ConfigError::Invalid("physics.player_height must be positive".into()));
        }
        if physics.damping < 0.0 || physics.gravity < 0.0 || physics.mass < 0.0 {
            return Err(ConfigError::Invalid(
                "physics.damping, gravity and mass must not be negative".into(),
            ));
        }
        if self.projectiles.timeout_ms == 0 {
            return Err(ConfigError::Invalid("projectiles.timeout_ms must be positive".into()));
        }
        if self.network.chat_capacity == 0 {
            return Err(ConfigError::Invalid("network.chat_capacity must be positive".into()));
        }
        if self.world.map_size <= 0.0 || self.world.crate_size <= 0.0 {
            return Err(ConfigError::Invalid(
                "world.map_size and world.crate_size must be positive".into(),
            ));
        }
        for zone in &self.world.zones {
            zone.to_zone()?;
        }
        self.economy.validate()?;
        Ok(())
    }

    /// Runtime zones, in declaration order.
    ///
    /// # Errors
    ///
    /// As [`ZoneConfig::to_zone`].
    pub fn zones(&self) -> ConfigResult<Vec<Zone>> {
        self.world.zones.iter().map(ZoneConfig::to_zone).collect()
    }
}
