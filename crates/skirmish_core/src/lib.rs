//! # SKIRMISH Core
//!
//! The state every other crate mutates:
//!
//! - [`PlayerRegistry`]: participant id → [`Player`], with the local player
//!   distinguished
//! - [`Arena`]: generational slots for projectiles, so the core only hands
//!   ids to the rendering collaborator
//! - [`SeededRandom`]: the reproducible sequence behind scenery placement and
//!   every economy/damage roll
//! - [`MovementTuning`]: local-only movement constants upgraded by the shop
//!
//! Nothing here is thread-safe. The simulation has exactly one writer.

#![deny(unsafe_code)]

pub mod arena;
pub mod random;
pub mod registry;
pub mod tuning;

pub use arena::{Arena, ArenaId};
pub use random::SeededRandom;
pub use registry::{Player, PlayerId, PlayerRegistry};
pub use tuning::MovementTuning;
