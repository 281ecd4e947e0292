//! Environment.
use anyhow::Result;

/// Represents an environment, typically an MDP.
///
/// The environment is stepped exclusively by the
/// [`Trainer`](crate::Trainer); each step yields an [`EnvStep`] from
/// which a [`Transition`](crate::Transition) is built.
pub trait Env {
    /// Configuration of the environment.
    type Config: Clone;

    /// Observation of the environment.
    type Obs: Clone;

    /// Action of the environment.
    type Act: Clone;

    /// Builds an environment with a given random seed.
    fn build(config: &Self::Config, seed: i64) -> Result<Self>
    where
        Self: Sized;

    /// Resets the environment, returning the initial observation.
    fn reset(&mut self) -> Result<Self::Obs>;

    /// Performs an environment step.
    fn step(&mut self, act: &Self::Act) -> Result<EnvStep<Self>>
    where
        Self: Sized;
}

/// The outcome of a single environment step.
pub struct EnvStep<E: Env> {
    /// Reward `r_t`.
    pub reward: f32,

    /// Observation `o_t+1`.
    pub next_obs: E::Obs,

    /// Flag denoting if the episode has ended.
    pub is_done: bool,
}

impl<E: Env> EnvStep<E> {
    /// Constructs an [`EnvStep`] object.
    pub fn new(reward: f32, next_obs: E::Obs, is_done: bool) -> Self {
        Self {
            reward,
            next_obs,
            is_done,
        }
    }
}
