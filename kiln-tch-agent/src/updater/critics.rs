use super::{CriticUpdaterConfig, GradStepper};
use crate::{
    critic::CriticModel,
    model::{ModelBase, SubModel, SubModel2},
    util::{gather_actions, CriticLoss},
};
use anyhow::Result;
use kiln_core::record::UpdaterLog;
use tch::{Kind, Tensor};

fn as_column(t: &Tensor) -> Tensor {
    if t.dim() == 1 {
        t.unsqueeze(-1)
    } else {
        t.shallow_clone()
    }
}

/// Updater regressing state values onto returns.
///
/// The loss for each critic is the elementwise loss between
/// `model(obs)` and `returns`; an ensemble's loss is the mean over its
/// critics. The whole parameter set of the model is updated in a
/// single optimizer step.
pub struct ValueRegression {
    loss: CriticLoss,
    loss_coeff: f64,
    stepper: GradStepper,
}

impl ValueRegression {
    /// Constructs [`ValueRegression`].
    pub fn build(config: &CriticUpdaterConfig) -> Result<Self> {
        Ok(Self {
            loss: config.loss.clone(),
            loss_coeff: config.loss_coeff,
            stepper: GradStepper::build(config.opt_config.clone(), config.max_grad)?,
        })
    }

    /// Applies one regression step of the critics onto `returns`.
    pub fn update<Q>(
        &mut self,
        model: &CriticModel<Q>,
        obs: &Tensor,
        returns: &Tensor,
    ) -> Result<UpdaterLog>
    where
        Q: SubModel<Input = Tensor, Output = Tensor>,
        Q::Config: Clone,
    {
        let tgt = as_column(returns);
        let losses: Vec<_> = model
            .forward_v_all(obs)
            .iter()
            .map(|pred| self.loss.eval(pred, &tgt))
            .collect();
        let loss = self.loss_coeff * Tensor::stack(&losses, 0).mean(Kind::Float);
        let loss = self.stepper.run(model.get_var_store(), &loss)?;

        Ok(UpdaterLog { loss: loss as f32 })
    }
}

/// Updater regressing action values of observation-action pairs onto
/// returns.
///
/// Like [`ValueRegression`], except that the critics take the action
/// as a second input, as with continuous action spaces.
pub struct ContinuousQRegression {
    loss: CriticLoss,
    loss_coeff: f64,
    stepper: GradStepper,
}

impl ContinuousQRegression {
    /// Constructs [`ContinuousQRegression`].
    pub fn build(config: &CriticUpdaterConfig) -> Result<Self> {
        Ok(Self {
            loss: config.loss.clone(),
            loss_coeff: config.loss_coeff,
            stepper: GradStepper::build(config.opt_config.clone(), config.max_grad)?,
        })
    }

    /// Applies one regression step of the critics onto `returns`.
    pub fn update<Q>(
        &mut self,
        model: &CriticModel<Q>,
        obs: &Tensor,
        act: &Tensor,
        returns: &Tensor,
    ) -> Result<UpdaterLog>
    where
        Q: SubModel2<Input1 = Tensor, Input2 = Tensor, Output = Tensor>,
        Q::Config: Clone,
    {
        let tgt = as_column(returns);
        let losses: Vec<_> = model
            .forward_q_all(obs, act)
            .iter()
            .map(|pred| self.loss.eval(pred, &tgt))
            .collect();
        let loss = self.loss_coeff * Tensor::stack(&losses, 0).mean(Kind::Float);
        let loss = self.stepper.run(model.get_var_store(), &loss)?;

        Ok(UpdaterLog { loss: loss as f32 })
    }
}

/// Updater regressing the action values of taken actions onto returns.
///
/// The critics output one value per action of a discrete action
/// space; for each sample the value of the action that was taken is
/// gathered and regressed onto `returns`.
pub struct DiscreteQRegression {
    loss: CriticLoss,
    loss_coeff: f64,
    stepper: GradStepper,
}

impl DiscreteQRegression {
    /// Constructs [`DiscreteQRegression`].
    pub fn build(config: &CriticUpdaterConfig) -> Result<Self> {
        Ok(Self {
            loss: config.loss.clone(),
            loss_coeff: config.loss_coeff,
            stepper: GradStepper::build(config.opt_config.clone(), config.max_grad)?,
        })
    }

    /// Applies one regression step of the critics onto `returns`.
    ///
    /// `actions` holds one action index per sample.
    pub fn update<Q>(
        &mut self,
        model: &CriticModel<Q>,
        obs: &Tensor,
        actions: &Tensor,
        returns: &Tensor,
    ) -> Result<UpdaterLog>
    where
        Q: SubModel<Input = Tensor, Output = Tensor>,
        Q::Config: Clone,
    {
        let tgt = as_column(returns);
        let losses: Vec<_> = model
            .forward_v_all(obs)
            .iter()
            .map(|qvals| self.loss.eval(&gather_actions(qvals, actions), &tgt))
            .collect();
        let loss = self.loss_coeff * Tensor::stack(&losses, 0).mean(Kind::Float);
        let loss = self.stepper.run(model.get_var_store(), &loss)?;

        Ok(UpdaterLog { loss: loss as f32 })
    }
}
