//! Deep Q-learning agent.
mod base;
mod config;
pub use base::DeepQ;
pub use config::DeepQConfig;
