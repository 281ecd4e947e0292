//! Types for recording training metrics.
//!
//! Each training iteration produces a [`Log`], assembled from the
//! [`UpdaterLog`]s returned by the updater strategies, and writes its
//! populated fields to a [`Recorder`] keyed by the step index.
mod recorder;

pub use recorder::{BufferedRecorder, NullRecorder, Recorder};

/// Scalar metrics of one training iteration.
///
/// Transient: reconstructed every iteration and consumed by the
/// metrics sink, never retained.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Log {
    /// Mean reward of the most recent buffer entries.
    pub reward: f32,

    /// Loss of the actor updater, if the agent has one.
    pub actor_loss: Option<f32>,

    /// Loss of the critic updater, if the agent has one.
    pub critic_loss: Option<f32>,

    /// KL divergence between the old and updated policies.
    pub kl_divergence: Option<f32>,

    /// Entropy of the updated policy.
    pub entropy: Option<f32>,
}

impl Log {
    /// Writes every populated field to `recorder`, keyed by `step`.
    pub fn write(&self, recorder: &mut dyn Recorder, step: usize) {
        recorder.write_scalar("reward", step, self.reward);
        if let Some(v) = self.actor_loss {
            recorder.write_scalar("actor_loss", step, v);
        }
        if let Some(v) = self.critic_loss {
            recorder.write_scalar("critic_loss", step, v);
        }
        if let Some(v) = self.kl_divergence {
            recorder.write_scalar("kl_divergence", step, v);
        }
        if let Some(v) = self.entropy {
            recorder.write_scalar("entropy", step, v);
        }
    }
}

/// The outcome of a single updater invocation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UpdaterLog {
    /// Scalar loss of the optimization step.
    pub loss: f32,
}
