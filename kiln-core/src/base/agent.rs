//! Agent.
use super::{Env, Policy};
use crate::record::Log;
use anyhow::Result;
use std::path::Path;

/// Represents a trainable policy on an environment.
///
/// The [`Trainer`](crate::Trainer) drives data collection; the agent
/// owns the model parameters and consumes batches from the buffer `R`
/// in [`Agent::opt`].
pub trait Agent<E: Env, R>: Policy<E> {
    /// Performs a fit phase: samples batches from `buffer` and runs the
    /// actor and critic updaters the requested number of epochs each.
    ///
    /// Returns a [`Log`] with the loss fields populated. The `reward`
    /// field may be left at its default; the training loop overwrites
    /// it with the mean reward of the most recent buffer entries.
    fn opt(
        &mut self,
        buffer: &mut R,
        batch_size: usize,
        actor_epochs: usize,
        critic_epochs: usize,
    ) -> Result<Log>;

    /// Saves the model parameters in the given directory.
    ///
    /// This method commonly creates a number of files in the directory,
    /// one per network owned by the agent.
    fn save_params(&self, path: &Path) -> Result<()>;

    /// Loads the model parameters from the given directory.
    ///
    /// Loading from a nonexistent path is a non-fatal no-op: the agent
    /// logs the event and keeps its initialized weights.
    fn load_params(&mut self, path: &Path) -> Result<()>;
}
