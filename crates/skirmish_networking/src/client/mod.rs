//! # Client Session
//!
//! Lifecycle of one connection to the peer.
//!
//! ```text
//!                 server.info (match)          player.init
//!   Connecting ───────────────────────► Ready ─────────────► Playing
//!       │  │                                                  │  │
//!       │  └─ server.info (mismatch) ─► VersionMismatch       │  └─ killed ─► Dead
//!       │                                                     │
//!       └───────────────── channel closed ────────────────────┴──► Disconnected
//! ```
//!
//! `player.init` may also arrive before `server.info`; the session then
//! moves straight from `Connecting` to `Playing` once the versions agree.
//! `Dead`, `Disconnected` and `VersionMismatch` are terminal: only a fresh
//! session recovers.

use skirmish_core::PlayerId;
use skirmish_shared::constants::PROTOCOL_VERSION;
use skirmish_shared::protocol::ClientMessage;

use crate::protocol::encode;
use crate::transport::Transport;

/// Session state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SessionState {
    /// Waiting for the version handshake.
    #[default]
    Connecting,
    /// The peer speaks another protocol version.
    VersionMismatch {
        /// Version this client speaks
        expected: String,
        /// Version the peer announced
        found: String,
    },
    /// Handshake done, waiting for the local identity.
    Ready,
    /// In the arena.
    Playing,
    /// Killed; the channel is closed.
    Dead {
        /// Who fired the killing shot
        killer_id: PlayerId,
        /// Their display name at the time
        killer_name: String,
    },
    /// The channel closed underneath us.
    Disconnected,
}

impl SessionState {
    /// Returns true for states only a fresh session leaves.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::VersionMismatch { .. } | Self::Dead { .. } | Self::Disconnected
        )
    }
}

/// One connection to the peer.
pub struct ClientSession<T: Transport> {
    transport: T,
    state: SessionState,
    name: String,
    has_identity: bool,
    dropped: u64,
}

impl<T: Transport> ClientSession<T> {
    /// Creates a session that will announce itself as `name`.
    pub fn new(transport: T, name: impl Into<String>) -> Self {
        Self {
            transport,
            state: SessionState::Connecting,
            name: name.into(),
            has_identity: false,
            dropped: 0,
        }
    }

    /// Current state.
    #[inline]
    #[must_use]
    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    /// Display name announced to the peer.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Frames discarded because the channel was closed or failed.
    #[must_use]
    pub const fn dropped_count(&self) -> u64 {
        self.dropped
    }

    /// Returns true while frames can be sent.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.transport.is_open()
    }

    /// Sends one message. Sends on a closed channel are dropped silently.
    ///
    /// Returns true if the frame reached the transport.
    pub fn send(&mut self, message: &ClientMessage) -> bool {
        if !self.transport.is_open() {
            self.dropped += 1;
            return false;
        }
        let result = encode(message).and_then(|frame| self.transport.send_text(frame));
        match result {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!("Dropped {}: {}", message.kind(), e);
                self.dropped += 1;
                false
            }
        }
    }

    /// Channel is up: announce the display name.
    pub fn on_channel_opened(&mut self) {
        let message = ClientMessage::Connect {
            name: self.name.clone(),
        };
        self.send(&message);
    }

    /// Changes the display name and tells the peer.
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
        let message = ClientMessage::Name {
            name: self.name.clone(),
        };
        self.send(&message);
    }

    /// Version handshake.
    pub fn on_server_info(&mut self, version: &str) {
        if self.state != SessionState::Connecting {
            return;
        }
        if version == PROTOCOL_VERSION {
            self.state = if self.has_identity {
                SessionState::Playing
            } else {
                SessionState::Ready
            };
            tracing::info!("Handshake ok (version {})", version);
        } else {
            tracing::info!(
                "Version mismatch: client {}, peer {}",
                PROTOCOL_VERSION,
                version
            );
            self.state = SessionState::VersionMismatch {
                expected: PROTOCOL_VERSION.to_owned(),
                found: version.to_owned(),
            };
        }
    }

    /// The local identity arrived.
    pub fn on_local_joined(&mut self) {
        self.has_identity = true;
        if self.state == SessionState::Ready {
            self.state = SessionState::Playing;
            tracing::info!("Entered the arena");
        }
    }

    /// Local player died: close the channel and stop.
    pub fn enter_dead(&mut self, killer_id: PlayerId, killer_name: impl Into<String>) {
        if self.state.is_terminal() {
            return;
        }
        self.transport.close();
        self.state = SessionState::Dead {
            killer_id,
            killer_name: killer_name.into(),
        };
    }

    /// The channel closed. A terminal state keeps its reason.
    pub fn on_channel_closed(&mut self) {
        self.transport.close();
        if self.state.is_terminal() {
            return;
        }
        tracing::warn!("Connection lost");
        self.state = SessionState::Disconnected;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::ChannelTransport;
    use crossbeam_channel::Receiver;

    fn session() -> (ClientSession<ChannelTransport>, Receiver<String>) {
        let (transport, host) = ChannelTransport::unbounded();
        (ClientSession::new(transport, "ada"), host)
    }

    #[test]
    fn test_connect_announces_name() {
        let (mut session, host) = session();
        session.on_channel_opened();
        let frame = host.try_recv().unwrap();
        assert!(frame.contains("\"player.connect\""));
        assert!(frame.contains("\"ada\""));
    }

    #[test]
    fn test_handshake_then_init() {
        let (mut session, _host) = session();
        session.on_server_info(PROTOCOL_VERSION);
        assert_eq!(session.state(), &SessionState::Ready);
        session.on_local_joined();
        assert_eq!(session.state(), &SessionState::Playing);
    }

    #[test]
    fn test_init_before_handshake() {
        let (mut session, _host) = session();
        session.on_local_joined();
        assert_eq!(session.state(), &SessionState::Connecting);
        session.on_server_info(PROTOCOL_VERSION);
        assert_eq!(session.state(), &SessionState::Playing);
    }

    #[test]
    fn test_version_mismatch_blocks_entry() {
        let (mut session, _host) = session();
        session.on_server_info("0.9.0");
        session.on_local_joined();
        assert_eq!(
            session.state(),
            &SessionState::VersionMismatch {
                expected: PROTOCOL_VERSION.to_owned(),
                found: "0.9.0".to_owned(),
            }
        );
    }

    #[test]
    fn test_sends_after_close_are_dropped() {
        let (mut session, host) = session();
        session.on_channel_closed();
        assert!(!session.send(&ClientMessage::Money { money: 1 }));
        assert_eq!(session.dropped_count(), 1);
        assert!(host.try_recv().is_err());
    }

    #[test]
    fn test_channel_closed_after_death_stays_dead() {
        let (mut session, _host) = session();
        session.on_server_info(PROTOCOL_VERSION);
        session.on_local_joined();
        session.enter_dead(7, "rival");
        session.on_channel_closed();

        assert!(matches!(session.state(), SessionState::Dead { killer_id: 7, .. }));
        assert!(!session.is_open());
    }

    #[test]
    fn test_channel_closed_after_mismatch_keeps_reason() {
        let (mut session, _host) = session();
        session.on_server_info("0.9.0");
        session.on_channel_closed();

        assert!(matches!(session.state(), SessionState::VersionMismatch { .. }));
        assert!(!session.is_open());
    }

    #[test]
    fn test_channel_closed_disconnects() {
        let (mut session, _host) = session();
        session.on_server_info(PROTOCOL_VERSION);
        session.on_channel_closed();
        assert_eq!(session.state(), &SessionState::Disconnected);
        assert!(session.state().is_terminal());
    }
}
