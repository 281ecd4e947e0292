//! Optimizers.
use crate::UpdaterError;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use tch::{
    nn::{Adam, AdamW, Optimizer as Optimizer_, OptimizerConfig as OptimizerConfig_, Sgd, VarStore},
    Tensor,
};

/// Configures an optimizer for training neural networks in an RL agent.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub enum OptimizerConfig {
    /// Plain stochastic gradient descent.
    Sgd {
        /// Learning rate.
        lr: f64,
    },

    /// Adam optimizer.
    Adam {
        /// Learning rate.
        lr: f64,
    },

    /// AdamW optimizer.
    AdamW {
        /// Learning rate.
        lr: f64,
        /// First moment decay.
        beta1: f64,
        /// Second moment decay.
        beta2: f64,
        /// Weight decay.
        wd: f64,
        /// Epsilon for numerical stability.
        eps: f64,
        /// Whether to use the AMSGrad variant.
        amsgrad: bool,
    },
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self::Adam { lr: 1e-3 }
    }
}

impl OptimizerConfig {
    /// Returns the learning rate.
    pub fn lr(&self) -> f64 {
        match self {
            Self::Sgd { lr } => *lr,
            Self::Adam { lr } => *lr,
            Self::AdamW { lr, .. } => *lr,
        }
    }

    /// Validates the configuration, rejecting non-positive learning
    /// rates.
    pub fn validate(&self) -> Result<()> {
        if self.lr() <= 0.0 {
            return Err(
                UpdaterError::InvalidConfig(format!("learning rate must be > 0, got {}", self.lr()))
                    .into(),
            );
        }
        Ok(())
    }

    /// Constructs an optimizer over the variables of `vs`.
    pub fn build(&self, vs: &VarStore) -> Result<Optimizer> {
        self.validate()?;
        match &self {
            OptimizerConfig::Sgd { lr } => {
                let opt = Sgd::default().build(vs, *lr)?;
                Ok(Optimizer::Sgd(opt))
            }
            OptimizerConfig::Adam { lr } => {
                let opt = Adam::default().build(vs, *lr)?;
                Ok(Optimizer::Adam(opt))
            }
            OptimizerConfig::AdamW {
                lr,
                beta1,
                beta2,
                wd,
                eps,
                amsgrad,
            } => {
                let opt = AdamW {
                    beta1: *beta1,
                    beta2: *beta2,
                    wd: *wd,
                    eps: *eps,
                    amsgrad: *amsgrad,
                }
                .build(vs, *lr)?;
                Ok(Optimizer::AdamW(opt))
            }
        }
    }
}

/// Optimizers.
///
/// This is a thin wrapper of [tch::nn::Optimizer].
///
/// [tch::nn::Optimizer]: https://docs.rs/tch/0.16.0/tch/nn/struct.Optimizer.html
#[derive(Debug)]
pub enum Optimizer {
    /// SGD optimizer.
    Sgd(Optimizer_),

    /// Adam optimizer.
    Adam(Optimizer_),

    /// AdamW optimizer.
    AdamW(Optimizer_),
}

impl Optimizer {
    fn inner(&mut self) -> &mut Optimizer_ {
        match self {
            Self::Sgd(opt) => opt,
            Self::Adam(opt) => opt,
            Self::AdamW(opt) => opt,
        }
    }

    /// Resets accumulated gradients to zero.
    pub fn zero_grad(&mut self) {
        self.inner().zero_grad();
    }

    /// Clips the global norm of the gradients to `max`.
    pub fn clip_grad_norm(&mut self, max: f64) {
        self.inner().clip_grad_norm(max);
    }

    /// Applies one optimization step.
    pub fn step(&mut self) {
        self.inner().step();
    }

    /// Applies a backward step pass: zeroes gradients, backpropagates
    /// the loss and steps the optimizer.
    pub fn backward_step(&mut self, loss: &Tensor) {
        self.inner().backward_step(loss);
    }
}
