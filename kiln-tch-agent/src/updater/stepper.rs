use crate::{
    error::UpdaterError,
    opt::{Optimizer, OptimizerConfig},
};
use anyhow::Result;
use tch::{nn::VarStore, Tensor};

/// Runs gradient steps on a model's variables.
///
/// The optimizer is built over the variables of the [`VarStore`]
/// passed to the first [`GradStepper::run`] call and reused for
/// subsequent calls, so that stateful optimizers keep their moment
/// estimates across updates.
///
/// [`VarStore`]: https://docs.rs/tch/0.16.0/tch/nn/struct.VarStore.html
#[derive(Debug)]
pub struct GradStepper {
    opt_config: OptimizerConfig,
    max_grad: f64,
    opt: Option<Optimizer>,
}

impl GradStepper {
    /// Constructs [`GradStepper`].
    ///
    /// `max_grad` is the maximum global norm of the gradients; zero
    /// disables clipping and negative values are rejected.
    pub fn build(opt_config: OptimizerConfig, max_grad: f64) -> Result<Self> {
        if max_grad < 0.0 {
            return Err(UpdaterError::InvalidConfig(format!(
                "max_grad must be >= 0, got {}",
                max_grad
            ))
            .into());
        }
        opt_config.validate()?;

        Ok(Self {
            opt_config,
            max_grad,
            opt: None,
        })
    }

    /// Applies one optimization step of `loss` on the variables of
    /// `vs` and returns the loss value.
    ///
    /// Fails with [`UpdaterError::DivergedTraining`] if the loss is
    /// not finite; in that case the model is left untouched.
    pub fn run(&mut self, vs: &VarStore, loss: &Tensor) -> Result<f64> {
        let loss_value = loss.double_value(&[]);
        if !loss_value.is_finite() {
            return Err(UpdaterError::DivergedTraining(loss_value).into());
        }

        if self.opt.is_none() {
            self.opt = Some(self.opt_config.build(vs)?);
        }
        let opt = self.opt.as_mut().unwrap();

        opt.zero_grad();
        loss.backward();
        if self.max_grad > 0.0 {
            opt.clip_grad_norm(self.max_grad);
        }
        opt.step();

        Ok(loss_value)
    }
}
