//! Train [`Agent`].
mod config;

use crate::{
    record::Recorder, Agent, BufferKind, Env, ExperienceBuffer, Explorer, Transition,
    TransitionBatch,
};
use anyhow::Result;
pub use config::TrainerConfig;
use log::info;

/// Manages the training loop and related objects.
///
/// # Training loop
///
/// One call to [`Trainer::train`] runs the following cycle:
///
/// 1. If the buffer is on-policy, `num_steps` is converted to a
///    training-iteration count by integer division by the buffer
///    capacity: on-policy training consumes exactly one full buffer of
///    fresh transitions per iteration.
/// 2. The environment is reset once.
/// 3. For every iteration `step`:
///     1. Collection phase. `batch_size` environment steps on the first
///        iteration (bootstrap, so the first fit has enough data);
///        afterwards one full buffer per iteration for an on-policy
///        buffer and a single step for an off-policy buffer.
///     2. Each environment step takes its action from the explorer if
///        one is configured, else from the agent's forward pass, pushes
///        the transition into the buffer, and resets the environment
///        when an episode ends.
///     3. Fit phase. [`Agent::opt`] samples from the buffer and runs
///        the agent's updaters `actor_epochs`/`critic_epochs` times.
///     4. `log.reward` is overwritten with the mean reward of the most
///        recent `batch_size` buffer entries, normalizing the metric
///        across on- and off-policy collection, and the log is written
///        to the recorder keyed by `step`.
///
/// The loop exits after the computed number of iterations with no
/// implicit cleanup of the environment or the buffer.
pub struct Trainer<E, R>
where
    E: Env,
    R: ExperienceBuffer<Obs = E::Obs, Act = E::Act>,
{
    env: E,
    buffer: R,
    explorer: Option<Box<dyn Explorer<E>>>,
    recorder: Box<dyn Recorder>,
}

impl<E, R> Trainer<E, R>
where
    E: Env,
    R: ExperienceBuffer<Obs = E::Obs, Act = E::Act>,
{
    /// Constructs a trainer over an environment, a buffer and a
    /// metrics sink.
    pub fn new(env: E, buffer: R, recorder: Box<dyn Recorder>) -> Self {
        Self {
            env,
            buffer,
            explorer: None,
            recorder,
        }
    }

    /// Sets the exploration strategy used during collection.
    pub fn explorer(mut self, explorer: Box<dyn Explorer<E>>) -> Self {
        self.explorer = Some(explorer);
        self
    }

    /// Returns the buffer.
    pub fn buffer(&self) -> &R {
        &self.buffer
    }

    /// Performs `num_steps` environment steps, pushing a transition
    /// into the buffer at each, and returns the observation the next
    /// collection phase starts from.
    fn step_env<A>(&mut self, agent: &mut A, obs: E::Obs, num_steps: usize) -> Result<E::Obs>
    where
        A: Agent<E, R>,
    {
        let mut obs = obs;
        for _ in 0..num_steps {
            let act = match &mut self.explorer {
                Some(explorer) => explorer.select(agent, &obs),
                None => agent.sample(&obs),
            };
            let step = self.env.step(&act)?;
            self.buffer.push(Transition {
                obs,
                act,
                reward: step.reward,
                next_obs: step.next_obs.clone(),
                is_done: step.is_done,
            })?;
            obs = if step.is_done {
                self.env.reset()?
            } else {
                step.next_obs
            };
        }
        Ok(obs)
    }

    /// Trains the agent over the configured number of environment
    /// steps.
    pub fn train<A>(&mut self, agent: &mut A, config: &TrainerConfig) -> Result<()>
    where
        A: Agent<E, R>,
    {
        let num_steps = match self.buffer.kind() {
            // On-policy training consumes one full buffer per iteration.
            BufferKind::OnPolicy => config.num_steps / self.buffer.capacity(),
            BufferKind::OffPolicy => config.num_steps,
        };

        let mut obs = self.env.reset()?;
        for step in 0..num_steps {
            let n = if step == 0 {
                // Fill the buffer with enough samples for the first fit.
                config.batch_size
            } else {
                match self.buffer.kind() {
                    BufferKind::OnPolicy => self.buffer.capacity(),
                    // Old samples are reused, a single fresh step suffices.
                    BufferKind::OffPolicy => 1,
                }
            };
            obs = self.step_env(agent, obs, n)?;

            let mut log = agent.opt(
                &mut self.buffer,
                config.batch_size,
                config.actor_epochs,
                config.critic_epochs,
            )?;
            log.reward = mean(self.buffer.last(config.batch_size).reward());
            log.write(self.recorder.as_mut(), step);
            info!("{}: {:?}", step, log);
        }

        Ok(())
    }
}

fn mean(xs: &[f32]) -> f32 {
    if xs.is_empty() {
        return 0.0;
    }
    xs.iter().sum::<f32>() / xs.len() as f32
}
