//! Interfaces between the training loop and its collaborators.
mod agent;
mod env;
mod explorer;
mod policy;

pub use agent::Agent;
pub use env::{Env, EnvStep};
pub use explorer::{EpsilonGreedy, Explorer};
pub use policy::Policy;
