//! # Wire Codec
//!
//! Text frames carry one `{ "type", "data" }` envelope each.

use skirmish_shared::protocol::{ClientMessage, ServerMessage};

use crate::error::{NetworkError, NetworkResult};

/// Serializes an outbound message into a text frame.
///
/// # Errors
///
/// Returns [`NetworkError::Encode`] if serialization fails.
pub fn encode(message: &ClientMessage) -> NetworkResult<String> {
    serde_json::to_string(message).map_err(NetworkError::Encode)
}

/// Parses an inbound text frame.
///
/// # Errors
///
/// Returns [`NetworkError::Malformed`] for invalid JSON, unknown types or
/// payloads missing required fields.
pub fn decode(frame: &str) -> NetworkResult<ServerMessage> {
    serde_json::from_str(frame).map_err(NetworkError::Malformed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use skirmish_shared::math::Vec3;

    #[test]
    fn test_encode_envelope() {
        let frame = encode(&ClientMessage::Health { health: 42 }).unwrap();
        let value: serde_json::Value = serde_json::from_str(&frame).unwrap();
        assert_eq!(value["type"], "player.health");
        assert_eq!(value["data"]["health"], 42);
    }

    #[test]
    fn test_decode_move() {
        let message = decode(
            r#"{"type":"player.move","data":{"id":3,"position":{"x":1,"y":2,"z":3},"rotation":{"x":0,"y":0.5,"z":0}}}"#,
        )
        .unwrap();
        match message {
            ServerMessage::Move(remote) => {
                assert_eq!(remote.id, 3);
                assert_eq!(remote.position, Vec3::new(1.0, 2.0, 3.0));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(decode("not json"), Err(NetworkError::Malformed(_))));
        assert!(matches!(
            decode(r#"{"type":"player.teleport","data":{}}"#),
            Err(NetworkError::Malformed(_))
        ));
        assert!(matches!(
            decode(r#"{"type":"player.health","data":{"id":1}}"#),
            Err(NetworkError::Malformed(_))
        ));
    }
}
