//! # SKIRMISH
//!
//! Client-side simulation core of a multiplayer first-person arena shooter.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                          Simulation::tick                            │
//! │                                                                      │
//! │  physics ──► projectiles ──► triggers ──► economy ──► outbound sync  │
//! │     │             │              │            │             │        │
//! │     └─────────────┴──────┬───────┴────────────┘             │        │
//! │                          ▼                                  ▼        │
//! │                   PlayerRegistry                      ClientSession  │
//! │                          ▲                                           │
//! │                          │                                           │
//! │            Simulation::handle_message (between ticks)                │
//! └──────────────────────────────────────────────────────────────────────┘
//!            │                                         │
//!            ▼                                         ▼
//!        Presenter                                 Transport
//!   (render, audio, overlay)                    (host socket)
//! ```
//!
//! ## Modules
//!
//! - `config`: TOML-loaded tuning for every stage
//! - `physics`: kinematic integration of the local player
//! - `collision`: static obstacles, zones and the ground probe
//! - `projectiles`: bullet flight and termination
//! - `triggers`: per-tick zone evaluation
//! - `events`: the presenter interface
//! - `game_loop`: tick orchestration and inbound dispatch

#![deny(unsafe_code)]

pub mod collision;
pub mod config;
pub mod events;
pub mod game_loop;
pub mod physics;
pub mod projectiles;
pub mod triggers;

pub use skirmish_core as core;
pub use skirmish_economy as economy;
pub use skirmish_networking as networking;
pub use skirmish_shared as shared;

pub use collision::World;
pub use config::{ConfigError, ConfigResult, SimulationConfig};
pub use events::{
    NullPresenter, Overlay, Presenter, PresenterCall, RecordingPresenter, SoundKind, VisualId,
};
pub use game_loop::{Simulation, SimulationState};
pub use physics::{KinematicState, MovementInput};
pub use projectiles::{Bullet, ProjectileSet, Termination};
pub use triggers::TriggeredZones;
