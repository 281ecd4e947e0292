//! Updaters applying gradient steps to actor and critic models.
//!
//! Every updater owns a [`GradStepper`], which lazily builds the
//! optimizer over a model's variables and runs the
//! zero-grad/backward/clip/step sequence. The critic updaters differ
//! only in how they compute the loss: [`ValueRegression`] regresses
//! state values, [`ContinuousQRegression`] regresses action values of
//! observation-action pairs and [`DiscreteQRegression`] regresses the
//! action values of the actions that were taken.
mod actor;
mod config;
mod critics;
mod stepper;
pub use actor::PolicyGradient;
pub use config::CriticUpdaterConfig;
pub use critics::{ContinuousQRegression, DiscreteQRegression, ValueRegression};
pub use stepper::GradStepper;
