//! RL agents and updater strategies for Kiln implemented with
//! [tch](https://crates.io/crates/tch).
mod actor;
mod critic;
mod error;
mod mlp;
mod model;
mod opt;
mod qlearn;
mod updater;
mod util;

pub use actor::Actor;
pub use critic::{Critic, CriticEnsemble, CriticModel, CriticModelConfig};
pub use error::UpdaterError;
pub use mlp::{Mlp, MlpConfig};
pub use model::{ModelBase, SubModel, SubModel2};
pub use opt::{Optimizer, OptimizerConfig};
pub use qlearn::{DeepQ, DeepQConfig};
pub use updater::{
    ContinuousQRegression, CriticUpdaterConfig, DiscreteQRegression, GradStepper, PolicyGradient,
    ValueRegression,
};
pub use util::{gather_actions, track, CriticLoss, OutDim};
