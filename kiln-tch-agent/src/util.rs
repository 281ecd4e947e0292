//! Utilities.
use crate::model::ModelBase;
use log::trace;
use serde::{Deserialize, Serialize};
use tch::Tensor;

/// Critic loss type.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub enum CriticLoss {
    /// Mean squared error.
    Mse,

    /// Smooth L1 loss.
    SmoothL1,
}

impl Default for CriticLoss {
    fn default() -> Self {
        Self::Mse
    }
}

impl CriticLoss {
    /// Computes the mean elementwise loss between `pred` and `tgt`.
    pub fn eval(&self, pred: &Tensor, tgt: &Tensor) -> Tensor {
        match self {
            CriticLoss::Mse => pred.mse_loss(tgt, tch::Reduction::Mean),
            CriticLoss::SmoothL1 => pred.smooth_l1_loss(tgt, tch::Reduction::Mean, 1.0),
        }
    }
}

/// Soft update of model parameters.
///
/// Each variable of `dest` tracks the `src` variable of the same name:
/// `dest = tau * src + (1 - tau) * dest`. The two models must hold the
/// same variable set.
pub fn track<M: ModelBase>(dest: &mut M, src: &mut M, tau: f64) {
    let src = src.get_var_store().variables();
    let mut dest = dest.get_var_store().variables();
    debug_assert_eq!(src.len(), dest.len());

    tch::no_grad(|| {
        for (name, src) in src.iter() {
            let dest = dest.get_mut(name).unwrap();
            dest.copy_(&(tau * src + (1.0 - tau) * &*dest));
        }
    });
    trace!("soft update, tau = {}", tau);
}

/// Gathers, for each sample, the Q-value of the action that was taken.
///
/// `qvals` has shape `[batch, num_actions]`; `actions` holds one action
/// index per sample and is cast to an integer index type before the
/// gather. Returns a `[batch, 1]` tensor with `Q[i, actions[i]]`.
pub fn gather_actions(qvals: &Tensor, actions: &Tensor) -> Tensor {
    let ixs = actions.to_kind(tch::Kind::Int64);
    let ixs = if ixs.dim() == 1 { ixs.unsqueeze(-1) } else { ixs };
    qvals.gather(-1, &ixs, false)
}

/// Interface for handling output dimensions.
pub trait OutDim {
    /// Returns the output dimension.
    fn get_out_dim(&self) -> i64;

    /// Sets the output dimension.
    fn set_out_dim(&mut self, v: i64);
}
