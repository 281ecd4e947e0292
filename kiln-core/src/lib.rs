#![warn(missing_docs)]
//! Core interfaces and the training loop of the Kiln reinforcement
//! learning library.
//!
//! This crate is backend-free: it defines the seams between an
//! environment ([`Env`]), an experience buffer ([`ExperienceBuffer`]),
//! a trainable policy ([`Agent`]) and a metrics sink
//! ([`Recorder`](record::Recorder)), plus the [`Trainer`] that drives
//! them. Gradient-based agents live in backend crates such as
//! `kiln-tch-agent`.
mod base;
mod buffer;
mod error;
pub mod record;
mod trainer;

pub use base::{Agent, Env, EnvStep, EpsilonGreedy, Explorer, Policy};
pub use buffer::{
    BufferKind, ExperienceBuffer, GenericBatch, ReplayBuffer, ReplayBufferConfig, RolloutBuffer,
    RolloutBufferConfig, Transition, TransitionBatch,
};
pub use error::KilnError;
pub use trainer::{Trainer, TrainerConfig};
