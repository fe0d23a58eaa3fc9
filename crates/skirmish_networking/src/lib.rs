//! # SKIRMISH Networking
//!
//! Reconciles local state with the remote peer over a persistent text
//! channel.
//!
//! ## Architecture
//!
//! ```text
//!   tick ──► MovementThrottle ──► ClientSession::send ──► Transport ──► host socket
//!                                        ▲
//!   economy / combat / chat ─────────────┘   (immediate)
//!
//!   host socket ──► protocol::decode ──► dispatch::apply ──► PlayerRegistry
//!                                               │
//!                                               └──► InboundEvent (tweens, bullets, chat, overlay)
//! ```
//!
//! ## Trust
//!
//! The peer rebroadcasts whatever clients report about themselves. Money,
//! health and stats arriving here are applied as-is.

#![deny(unsafe_code)]

pub mod chat;
pub mod client;
pub mod dispatch;
pub mod error;
pub mod interpolation;
pub mod protocol;
pub mod sync;
pub mod transport;

pub use chat::{ChatEntry, ChatLog};
pub use client::{ClientSession, SessionState};
pub use dispatch::{apply, InboundEvent, StatField};
pub use error::{NetworkError, NetworkResult};
pub use interpolation::{MotionTween, TweenSet};
pub use sync::MovementThrottle;
pub use transport::{ChannelTransport, Transport};

/// Default minimum spacing between movement updates.
pub const MOVE_INTERVAL_MS: u64 = 100;

/// Decimal places kept in movement updates.
pub const MOVE_PRECISION: u32 = 2;

/// Duration of the eased glide toward a received position.
pub const TWEEN_DURATION_MS: u64 = 75;

/// Chat lines kept on screen.
pub const MAX_CHAT_ENTRIES: usize = 10;

/// How long a chat line stays visible.
pub const CHAT_EXPIRY_MS: u64 = 15_000;
