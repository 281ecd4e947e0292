use super::GradStepper;
use crate::opt::OptimizerConfig;
use anyhow::Result;
use kiln_core::record::UpdaterLog;
use tch::{nn::VarStore, Kind, Tensor};

/// Updater applying a policy gradient step to an actor model.
///
/// The loss is the negative mean of `log_probs * advantages`, with the
/// advantages detached from the computation graph so that the gradient
/// only flows through the actor.
pub struct PolicyGradient {
    stepper: GradStepper,
}

impl PolicyGradient {
    /// Constructs [`PolicyGradient`].
    pub fn build(opt_config: OptimizerConfig, max_grad: f64) -> Result<Self> {
        Ok(Self {
            stepper: GradStepper::build(opt_config, max_grad)?,
        })
    }

    /// Applies one policy gradient step on the variables of `vs`.
    pub fn update(
        &mut self,
        vs: &VarStore,
        log_probs: &Tensor,
        advantages: &Tensor,
    ) -> Result<UpdaterLog> {
        let loss = -(log_probs * advantages.detach()).mean(Kind::Float);
        let loss = self.stepper.run(vs, &loss)?;

        Ok(UpdaterLog { loss: loss as f32 })
    }
}
