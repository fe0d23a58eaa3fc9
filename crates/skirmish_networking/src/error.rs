//! Network error types.

use thiserror::Error;

/// Errors raised while encoding, decoding or sending frames.
#[derive(Error, Debug)]
pub enum NetworkError {
    /// Inbound frame is not valid JSON or names an unknown message type.
    #[error("malformed message: {0}")]
    Malformed(#[source] serde_json::Error),

    /// Outbound message could not be serialized.
    #[error("failed to encode message: {0}")]
    Encode(#[source] serde_json::Error),

    /// The channel is closed; nothing more can be sent.
    #[error("channel closed")]
    ChannelClosed,
}

/// Result type for network operations.
pub type NetworkResult<T> = Result<T, NetworkError>;
