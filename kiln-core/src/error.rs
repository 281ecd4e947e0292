//! Errors of the core crate.
use thiserror::Error;

/// Errors raised by the core collaborators.
#[derive(Debug, Error)]
pub enum KilnError {
    /// Sampling was requested from a buffer holding no transitions.
    #[error("cannot sample a batch from an empty buffer")]
    EmptyBuffer,

    /// A configuration value was rejected at construction.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
