//! # Economy Error Types

use thiserror::Error;

/// Errors that can occur in the economy system.
///
/// Trigger handlers never fail: an unmet precondition is a silent no-op.
/// Only loading balance data can go wrong.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EconomyError {
    /// Invalid configuration file.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for economy operations.
pub type EconomyResult<T> = Result<T, EconomyError>;
