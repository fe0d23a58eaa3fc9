//! Wire protocol shared with the remote peer.
//!
//! Every message is a JSON envelope `{ "type": string, "data": object }`.
//! Both directions are modelled as adjacently tagged enums so that dispatch is
//! an exhaustive `match` instead of probing for fields.
//!
//! The field names below are matched by an unmodified counterpart
//! implementation. Do not rename them.

use crate::math::{Euler, Vec3};
use serde::{Deserialize, Serialize};

/// Full state of one participant, as carried by `player.init` / `player.new`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    /// Stable participant id
    pub id: u32,
    /// Display name
    pub name: String,
    /// Eye position
    pub position: Vec3,
    /// View rotation
    #[serde(default)]
    pub rotation: Euler,
    /// Current health
    pub health: u32,
    /// Health capacity
    pub strength: u32,
    /// Damage scaling
    pub attack: u32,
    /// Currency
    #[serde(default)]
    pub money: u32,
}

/// Movement update (outbound, no id: the peer knows who sent it).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MovePayload {
    /// Eye position
    pub position: Vec3,
    /// View rotation
    pub rotation: Euler,
}

/// Shot fired by the local player.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShootPayload {
    /// Shooter clock at creation (milliseconds)
    pub created_at: u64,
    /// Muzzle position
    pub position: Vec3,
    /// Travel rotation
    pub rotation: Euler,
}

/// Currency handed to another participant (death payout).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoneyGivePayload {
    /// Receiving participant
    pub id: u32,
    /// Amount credited
    pub money: u32,
}

/// Messages produced by this client.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ClientMessage {
    /// First message on a fresh channel, carries the chosen display name.
    #[serde(rename = "player.connect")]
    Connect {
        /// Display name
        name: String,
    },
    /// Display name changed.
    #[serde(rename = "player.name")]
    Name {
        /// Display name
        name: String,
    },
    /// Throttled position + rotation update.
    #[serde(rename = "player.move")]
    Move(MovePayload),
    /// Local health changed.
    #[serde(rename = "player.health")]
    Health {
        /// New health
        health: u32,
    },
    /// Local health capacity changed.
    #[serde(rename = "player.strength")]
    Strength {
        /// New capacity
        strength: u32,
    },
    /// Local attack changed.
    #[serde(rename = "player.attack")]
    Attack {
        /// New attack
        attack: u32,
    },
    /// Local money changed.
    #[serde(rename = "player.money")]
    Money {
        /// New balance
        money: u32,
    },
    /// Currency handed to another participant.
    #[serde(rename = "player.money.give")]
    MoneyGive(MoneyGivePayload),
    /// Shot fired.
    #[serde(rename = "player.shoot")]
    Shoot(ShootPayload),
    /// Chat line.
    #[serde(rename = "player.chat")]
    Chat {
        /// Message text
        message: String,
    },
}

impl ClientMessage {
    /// Returns the wire `type` tag.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Connect { .. } => "player.connect",
            Self::Name { .. } => "player.name",
            Self::Move(_) => "player.move",
            Self::Health { .. } => "player.health",
            Self::Strength { .. } => "player.strength",
            Self::Attack { .. } => "player.attack",
            Self::Money { .. } => "player.money",
            Self::MoneyGive(_) => "player.money.give",
            Self::Shoot(_) => "player.shoot",
            Self::Chat { .. } => "player.chat",
        }
    }
}

/// Remote movement update.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RemoteMove {
    /// Moving participant
    pub id: u32,
    /// Eye position
    pub position: Vec3,
    /// View rotation
    pub rotation: Euler,
}

/// Remote shot.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteShot {
    /// Shooter
    pub player_id: u32,
    /// Shooter clock at creation (milliseconds)
    pub created_at: u64,
    /// Muzzle position
    pub position: Vec3,
    /// Travel rotation
    pub rotation: Euler,
}

/// Messages delivered by the peer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ServerMessage {
    /// Version handshake.
    #[serde(rename = "server.info")]
    Info {
        /// Peer protocol version
        version: String,
    },
    /// Local identity + initial snapshot.
    #[serde(rename = "player.init")]
    Init(PlayerSnapshot),
    /// A remote participant joined.
    #[serde(rename = "player.new")]
    New(PlayerSnapshot),
    /// A remote participant left.
    #[serde(rename = "player.close")]
    Close {
        /// Leaving participant
        id: u32,
    },
    /// Display name update.
    #[serde(rename = "player.name")]
    Name {
        /// Participant
        id: u32,
        /// Display name
        name: String,
    },
    /// Health update.
    #[serde(rename = "player.health")]
    Health {
        /// Participant
        id: u32,
        /// New health
        health: u32,
    },
    /// Health capacity update.
    #[serde(rename = "player.strength")]
    Strength {
        /// Participant
        id: u32,
        /// New capacity
        strength: u32,
    },
    /// Attack update.
    #[serde(rename = "player.attack")]
    Attack {
        /// Participant
        id: u32,
        /// New attack
        attack: u32,
    },
    /// Balance update.
    #[serde(rename = "player.money")]
    Money {
        /// Participant
        id: u32,
        /// New balance
        money: u32,
    },
    /// Additive credit.
    #[serde(rename = "player.money.give")]
    MoneyGive(MoneyGivePayload),
    /// Position + rotation update.
    #[serde(rename = "player.move")]
    Move(RemoteMove),
    /// Remote shot.
    #[serde(rename = "player.shoot")]
    Shoot(RemoteShot),
    /// Chat line (`id == 0` is the peer itself).
    #[serde(rename = "player.chat")]
    Chat {
        /// Author
        id: u32,
        /// Message text
        message: String,
    },
}

impl ServerMessage {
    /// Returns the wire `type` tag.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Info { .. } => "server.info",
            Self::Init(_) => "player.init",
            Self::New(_) => "player.new",
            Self::Close { .. } => "player.close",
            Self::Name { .. } => "player.name",
            Self::Health { .. } => "player.health",
            Self::Strength { .. } => "player.strength",
            Self::Attack { .. } => "player.attack",
            Self::Money { .. } => "player.money",
            Self::MoneyGive(_) => "player.money.give",
            Self::Move(_) => "player.move",
            Self::Shoot(_) => "player.shoot",
            Self::Chat { .. } => "player.chat",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_move_envelope_layout() {
        let msg = ClientMessage::Move(MovePayload {
            position: Vec3::new(1.5, 2.0, -3.25),
            rotation: Euler::new(0.5, 0.25, 0.0),
        });
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "player.move",
                "data": {
                    "position": { "x": 1.5, "y": 2.0, "z": -3.25 },
                    "rotation": { "x": 0.5, "y": 0.25, "z": 0.0 }
                }
            })
        );
    }

    #[test]
    fn test_shoot_uses_camel_case() {
        let msg = ClientMessage::Shoot(ShootPayload {
            created_at: 1234,
            position: Vec3::ZERO,
            rotation: Euler::IDENTITY,
        });
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["type"], "player.shoot");
        assert_eq!(value["data"]["createdAt"], 1234);
    }

    #[test]
    fn test_money_give_tag() {
        let msg = ClientMessage::MoneyGive(MoneyGivePayload { id: 7, money: 50 });
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value, json!({ "type": "player.money.give", "data": { "id": 7, "money": 50 } }));
        assert_eq!(msg.kind(), "player.money.give");
    }

    #[test]
    fn test_parse_remote_shot() {
        let text = r#"{"type":"player.shoot","data":{"playerId":3,"createdAt":99,
            "position":{"x":1,"y":2,"z":3},"rotation":{"x":0,"y":0,"z":0}}}"#;
        let msg: ServerMessage = serde_json::from_str(text).unwrap();
        match msg {
            ServerMessage::Shoot(shot) => {
                assert_eq!(shot.player_id, 3);
                assert_eq!(shot.created_at, 99);
                assert_eq!(shot.position, Vec3::new(1.0, 2.0, 3.0));
            }
            other => panic!("unexpected message {other:?}"),
        }
    }

    #[test]
    fn test_snapshot_defaults_optional_fields() {
        let text = r#"{"type":"player.new","data":{"id":2,"name":"bob",
            "position":{"x":0,"y":2,"z":0},"health":100,"strength":100,"attack":10}}"#;
        let msg: ServerMessage = serde_json::from_str(text).unwrap();
        let ServerMessage::New(snapshot) = msg else {
            panic!("expected player.new");
        };
        assert_eq!(snapshot.money, 0);
        assert_eq!(snapshot.rotation, Euler::IDENTITY);
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let text = r#"{"type":"player.teleport","data":{}}"#;
        assert!(serde_json::from_str::<ServerMessage>(text).is_err());
    }
}
