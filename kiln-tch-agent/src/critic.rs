//! Critic models.
//!
//! A critic is a neural network estimating values of observations
//! (a state-value function) or of observation-action pairs (an
//! action-value function). [`Critic`] wraps a single network,
//! [`CriticEnsemble`] holds several networks sharing one set of
//! variables, and [`CriticModel`] abstracts over the two so that
//! updaters can treat them uniformly.
mod base;
mod config;
mod ensemble;
mod model;
pub use base::Critic;
pub use config::CriticModelConfig;
pub use ensemble::CriticEnsemble;
pub use model::CriticModel;
