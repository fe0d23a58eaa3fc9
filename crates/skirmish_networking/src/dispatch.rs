//! # Inbound Dispatch
//!
//! Applies one decoded [`ServerMessage`] to the [`PlayerRegistry`] and
//! reports what happened, so the caller can drive visuals, projectiles and
//! the chat log.
//!
//! Every apply is idempotent: receiving the same message twice leaves the
//! registry as receiving it once (`player.money.give` is additive by
//! definition and is the one exception).
//!
//! Messages naming an unknown participant are ignored.

use skirmish_core::{Player, PlayerId, PlayerRegistry};
use skirmish_shared::constants::SERVER_PLAYER_ID;
use skirmish_shared::math::{Euler, Vec3};
use skirmish_shared::protocol::{RemoteShot, ServerMessage};

use crate::chat::SERVER_AUTHOR;

/// Player field touched by a field-level update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatField {
    /// Display name
    Name,
    /// Current health
    Health,
    /// Health capacity
    Strength,
    /// Damage scaling
    Attack,
    /// Currency
    Money,
}

/// Outcome of applying an inbound message.
#[derive(Clone, Debug, PartialEq)]
pub enum InboundEvent {
    /// Peer announced its protocol version.
    ServerInfo {
        /// Peer version
        version: String,
    },
    /// The local identity was established.
    LocalJoined {
        /// Local id
        id: PlayerId,
        /// Initial eye position
        position: Vec3,
        /// Initial rotation
        rotation: Euler,
    },
    /// A remote participant joined (or was re-announced).
    PlayerJoined {
        /// Joining id
        id: PlayerId,
        /// Initial position
        position: Vec3,
        /// False when the id was already known and was replaced in place
        fresh: bool,
    },
    /// A remote participant left.
    PlayerLeft {
        /// Leaving id
        id: PlayerId,
    },
    /// A field of a participant changed.
    StatUpdated {
        /// Participant
        id: PlayerId,
        /// Changed field
        field: StatField,
    },
    /// A remote participant moved.
    PlayerMoved {
        /// Participant
        id: PlayerId,
        /// Position before the update
        previous: Vec3,
        /// Reported position
        position: Vec3,
        /// Reported rotation
        rotation: Euler,
    },
    /// A remote participant fired.
    ShotFired(RemoteShot),
    /// A chat line arrived.
    Chat {
        /// Author display name
        author: String,
        /// Text
        message: String,
    },
}

/// Applies `message` to `registry`.
///
/// Returns `None` when the message was ignored.
pub fn apply(registry: &mut PlayerRegistry, message: ServerMessage) -> Option<InboundEvent> {
    match message {
        ServerMessage::Info { version } => Some(InboundEvent::ServerInfo { version }),

        ServerMessage::Init(snapshot) => {
            let player = Player::from_snapshot(snapshot);
            let event = InboundEvent::LocalJoined {
                id: player.id,
                position: player.position,
                rotation: player.rotation,
            };
            tracing::info!("Joined as #{} ({})", player.id, player.name);
            registry.set_local(player);
            Some(event)
        }

        ServerMessage::New(snapshot) => {
            if registry.is_local(snapshot.id) {
                return None;
            }
            let player = Player::from_snapshot(snapshot);
            let (id, position) = (player.id, player.position);
            let fresh = registry.upsert(player);
            if fresh {
                tracing::debug!("Player #{} joined", id);
            }
            Some(InboundEvent::PlayerJoined { id, position, fresh })
        }

        ServerMessage::Close { id } => registry
            .remove(id)
            .map(|_| InboundEvent::PlayerLeft { id }),

        ServerMessage::Name { id, name } => update(registry, id, StatField::Name, |p| p.name = name),
        ServerMessage::Health { id, health } => {
            update(registry, id, StatField::Health, |p| p.set_health(health))
        }
        ServerMessage::Strength { id, strength } => {
            update(registry, id, StatField::Strength, |p| p.set_strength(strength))
        }
        ServerMessage::Attack { id, attack } => {
            update(registry, id, StatField::Attack, |p| p.attack = attack)
        }
        ServerMessage::Money { id, money } => {
            update(registry, id, StatField::Money, |p| p.money = money)
        }
        ServerMessage::MoneyGive(give) => update(registry, give.id, StatField::Money, |p| {
            p.money = p.money.saturating_add(give.money);
        }),

        ServerMessage::Move(remote) => {
            // The local pose is owned by the physics integrator.
            if registry.is_local(remote.id) {
                return None;
            }
            let player = registry.get_mut(remote.id)?;
            let previous = player.position;
            player.position = remote.position;
            player.rotation = remote.rotation;
            Some(InboundEvent::PlayerMoved {
                id: remote.id,
                previous,
                position: remote.position,
                rotation: remote.rotation,
            })
        }

        ServerMessage::Shoot(shot) => {
            if registry.is_local(shot.player_id) || registry.get(shot.player_id).is_none() {
                return None;
            }
            Some(InboundEvent::ShotFired(shot))
        }

        ServerMessage::Chat { id, message } => {
            let author = if id == SERVER_PLAYER_ID {
                SERVER_AUTHOR.to_owned()
            } else {
                registry.get(id)?.name.clone()
            };
            Some(InboundEvent::Chat { author, message })
        }
    }
}

fn update(
    registry: &mut PlayerRegistry,
    id: PlayerId,
    field: StatField,
    apply: impl FnOnce(&mut Player),
) -> Option<InboundEvent> {
    apply(registry.get_mut(id)?);
    Some(InboundEvent::StatUpdated { id, field })
}
