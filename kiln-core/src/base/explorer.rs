//! Exploration strategies.
use super::{Env, Policy};
use serde::{Deserialize, Serialize};

/// Selects the action taken during the collection phase.
///
/// An explorer is an optional collaborator of the
/// [`Trainer`](crate::Trainer). When no explorer is configured, actions
/// come directly from the policy's forward pass.
pub trait Explorer<E: Env> {
    /// Selects an action for the given observation.
    fn select(&mut self, policy: &mut dyn Policy<E>, obs: &E::Obs) -> E::Act;
}

/// Epsilon-greedy action selection with a linear schedule.
///
/// Works on environments with discrete actions convertible from an
/// action index.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct EpsilonGreedy {
    n_steps: usize,
    n_actions: u32,
    eps_start: f64,
    eps_final: f64,
    final_step: usize,
}

impl EpsilonGreedy {
    /// Constructs an epsilon-greedy explorer over `n_actions` actions.
    pub fn new(n_actions: u32) -> Self {
        Self {
            n_steps: 0,
            n_actions,
            eps_start: 1.0,
            eps_final: 0.02,
            final_step: 100_000,
        }
    }

    /// Sets the epsilon value at the start.
    pub fn eps_start(mut self, v: f64) -> Self {
        self.eps_start = v;
        self
    }

    /// Sets the epsilon value at the final step.
    pub fn eps_final(mut self, v: f64) -> Self {
        self.eps_final = v;
        self
    }

    /// Sets the step at which epsilon reaches its final value.
    pub fn final_step(mut self, v: usize) -> Self {
        self.final_step = v;
        self
    }

    fn eps(&self) -> f64 {
        let d = (self.eps_start - self.eps_final) / (self.final_step as f64);
        (self.eps_start - d * self.n_steps as f64).max(self.eps_final)
    }
}

impl<E> Explorer<E> for EpsilonGreedy
where
    E: Env,
    E::Act: From<u32>,
{
    fn select(&mut self, policy: &mut dyn Policy<E>, obs: &E::Obs) -> E::Act {
        let is_random = fastrand::f64() < self.eps();
        self.n_steps += 1;

        if is_random {
            fastrand::u32(..self.n_actions).into()
        } else {
            policy.sample(obs)
        }
    }
}
