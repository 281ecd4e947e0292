use crate::{opt::OptimizerConfig, util::CriticLoss};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of critic updaters.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct CriticUpdaterConfig {
    pub(super) opt_config: OptimizerConfig,
    pub(super) max_grad: f64,
    pub(super) loss: CriticLoss,
    pub(super) loss_coeff: f64,
}

impl Default for CriticUpdaterConfig {
    fn default() -> Self {
        Self {
            opt_config: OptimizerConfig::default(),
            max_grad: 0.0,
            loss: CriticLoss::default(),
            loss_coeff: 1.0,
        }
    }
}

impl CriticUpdaterConfig {
    /// Sets the optimizer configuration.
    pub fn opt_config(mut self, opt_config: OptimizerConfig) -> Self {
        self.opt_config = opt_config;
        self
    }

    /// Sets the maximum global norm of the gradients.
    ///
    /// Zero, the default, disables clipping.
    pub fn max_grad(mut self, max_grad: f64) -> Self {
        self.max_grad = max_grad;
        self
    }

    /// Sets the loss function.
    pub fn loss(mut self, loss: CriticLoss) -> Self {
        self.loss = loss;
        self
    }

    /// Sets the coefficient the loss is multiplied by.
    pub fn loss_coeff(mut self, loss_coeff: f64) -> Self {
        self.loss_coeff = loss_coeff;
        self
    }

    /// Constructs [`CriticUpdaterConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let config = serde_yaml::from_reader(rdr)?;
        Ok(config)
    }

    /// Saves [`CriticUpdaterConfig`] to YAML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
