//! # SKIRMISH Shared
//!
//! Common types used by every layer of the client core.
//!
//! ## CRITICAL RULE
//!
//! This crate must NEVER depend on rendering, audio or socket crates.
//! The wire types in [`protocol`] are matched field-for-field by the remote
//! peer; renaming a field is a protocol break.

#![deny(unsafe_code)]

pub mod constants;
pub mod math;
pub mod protocol;

pub use constants::PROTOCOL_VERSION;
pub use math::{Aabb, Euler, Vec3};
pub use protocol::{ClientMessage, PlayerSnapshot, ServerMessage};
