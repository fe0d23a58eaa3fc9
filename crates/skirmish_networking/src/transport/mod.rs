//! # Transport Layer
//!
//! The socket lives in the host. The simulation only hands it text frames
//! through [`Transport`], and never waits on it.

use crossbeam_channel::{Receiver, Sender};

use crate::error::{NetworkError, NetworkResult};

/// Outbound half of the persistent message channel.
pub trait Transport {
    /// Queues one text frame.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::ChannelClosed`] once the channel is gone.
    fn send_text(&mut self, frame: String) -> NetworkResult<()>;

    /// Closes the channel. Idempotent.
    fn close(&mut self);

    /// Returns true while frames can still be sent.
    fn is_open(&self) -> bool;
}

/// Transport backed by a `crossbeam-channel` queue.
///
/// The host drains the paired [`Receiver`] on its socket thread. Closing
/// drops the sender, which the host observes as a disconnected receiver.
#[derive(Debug)]
pub struct ChannelTransport {
    sender: Option<Sender<String>>,
}

impl ChannelTransport {
    /// Creates an unbounded channel and returns the host's end with it.
    #[must_use]
    pub fn unbounded() -> (Self, Receiver<String>) {
        let (sender, receiver) = crossbeam_channel::unbounded();
        (Self::from_sender(sender), receiver)
    }

    /// Wraps an existing sender.
    #[must_use]
    pub const fn from_sender(sender: Sender<String>) -> Self {
        Self {
            sender: Some(sender),
        }
    }
}

impl Transport for ChannelTransport {
    fn send_text(&mut self, frame: String) -> NetworkResult<()> {
        let sender = self.sender.as_ref().ok_or(NetworkError::ChannelClosed)?;
        if sender.send(frame).is_err() {
            // Host dropped its end.
            self.sender = None;
            return Err(NetworkError::ChannelClosed);
        }
        Ok(())
    }

    fn close(&mut self) {
        self.sender = None;
    }

    fn is_open(&self) -> bool {
        self.sender.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frames_reach_host() {
        let (mut transport, host) = ChannelTransport::unbounded();
        transport.send_text("a".into()).unwrap();
        transport.send_text("b".into()).unwrap();
        assert_eq!(host.try_iter().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_close_disconnects_host() {
        let (mut transport, host) = ChannelTransport::unbounded();
        transport.close();
        transport.close();

        assert!(!transport.is_open());
        assert!(matches!(
            transport.send_text("late".into()),
            Err(NetworkError::ChannelClosed)
        ));
        assert!(host.recv().is_err());
    }

    #[test]
    fn test_dropped_host_closes_transport() {
        let (mut transport, host) = ChannelTransport::unbounded();
        drop(host);
        assert!(transport.send_text("x".into()).is_err());
        assert!(!transport.is_open());
    }
}
