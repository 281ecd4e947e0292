//! Experience buffers.
//!
//! A buffer owns the transitions collected from the environment and
//! hands out batches for the fit phase. The [`BufferKind`] tag, fixed
//! at construction, tells the [`Trainer`](crate::Trainer) how to
//! schedule collection: an on-policy buffer is refilled wholesale
//! before every fit, an off-policy buffer grows by one transition per
//! iteration and reuses its history.
mod batch;
mod config;
mod replay;
mod rollout;

use anyhow::Result;
pub use batch::{GenericBatch, Transition, TransitionBatch};
pub use config::{ReplayBufferConfig, RolloutBufferConfig};
pub use replay::ReplayBuffer;
pub use rollout::RolloutBuffer;
use serde::{Deserialize, Serialize};

/// Retention policy of a buffer, decided at construction.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub enum BufferKind {
    /// Fixed-horizon storage, cleared and refilled each collection
    /// cycle. Every fit consumes exactly one buffer's worth of fresh
    /// transitions.
    OnPolicy,

    /// Circular storage; old transitions are reused across many fits.
    OffPolicy,
}

/// Interface for buffers that store experiences from an environment.
pub trait ExperienceBuffer {
    /// Observation type of the stored transitions.
    type Obs;

    /// Action type of the stored transitions.
    type Act;

    /// The type of batch handed out for training.
    type Batch: TransitionBatch;

    /// Pushes a transition into the buffer.
    fn push(&mut self, tr: Transition<Self::Obs, Self::Act>) -> Result<()>;

    /// Samples a batch of `batch_size` transitions.
    fn sample(&mut self, batch_size: usize) -> Result<Self::Batch>;

    /// Returns the most recent `batch_size` transitions in insertion
    /// order, clamped to the number of stored transitions.
    fn last(&self, batch_size: usize) -> Self::Batch;

    /// Returns the current number of stored transitions.
    fn len(&self) -> usize;

    /// Returns `true` if the buffer holds no transitions.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the fixed capacity of the buffer.
    fn capacity(&self) -> usize;

    /// Returns the retention policy of the buffer.
    fn kind(&self) -> BufferKind;
}
