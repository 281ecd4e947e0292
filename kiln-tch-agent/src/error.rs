//! Errors of the updater strategies.
use thiserror::Error;

/// Errors raised by updater construction and optimization steps.
#[derive(Debug, Error)]
pub enum UpdaterError {
    /// A configuration value was rejected at construction.
    #[error("invalid updater configuration: {0}")]
    InvalidConfig(String),

    /// The model does not expose a usable critic parameter set.
    #[error("model does not expose critic parameters: {0}")]
    InvalidModelType(String),

    /// The loss became non-finite; the optimizer step is refused so the
    /// weights are left untouched.
    #[error("training diverged: critic loss is {0}")]
    DivergedTraining(f64),
}
