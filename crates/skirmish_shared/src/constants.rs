//! # World & Network Constants
//!
//! Values baked into the client binary. Tunable gameplay numbers live in the
//! TOML configuration instead; these are the defaults it falls back to.

// =============================================================================
// NETWORK CONFIGURATION
// =============================================================================

/// Protocol version announced by the peer in `server.info`.
///
/// A mismatch blocks session entry.
pub const PROTOCOL_VERSION: &str = "1.0.0";

/// Player id reserved for messages authored by the peer itself (chat).
pub const SERVER_PLAYER_ID: u32 = 0;

// =============================================================================
// WORLD CONFIGURATION
// =============================================================================

/// Edge length of the square arena.
pub const MAP_SIZE: f32 = 750.0;

/// Edge length of a crate obstacle.
pub const CRATE_SIZE: f32 = 10.0;

/// Seed used for scenery placement.
pub const SCENERY_SEED: u64 = 1;

// =============================================================================
// PLAYER CONFIGURATION
// =============================================================================

/// Eye height above the feet.
pub const PLAYER_HEIGHT: f32 = 2.0;

/// Attack stat of a freshly spawned player.
pub const PLAYER_BASE_ATTACK: u32 = 10;

/// Maximum length of an outbound chat line.
pub const MAX_CHAT_MESSAGE_LEN: usize = 24;
