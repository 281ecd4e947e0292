use crate::{critic::CriticModelConfig, updater::CriticUpdaterConfig};
use anyhow::Result;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`DeepQ`](super::DeepQ).
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct DeepQConfig<QC> {
    pub(super) model_config: CriticModelConfig<QC>,
    pub(super) updater_config: CriticUpdaterConfig,
    pub(super) gamma: f64,
    pub(super) tau: f64,
    pub(super) soft_update_interval: usize,
}

impl<QC> Default for DeepQConfig<QC> {
    fn default() -> Self {
        Self {
            model_config: CriticModelConfig::default(),
            updater_config: CriticUpdaterConfig::default(),
            gamma: 0.99,
            tau: 0.005,
            soft_update_interval: 1,
        }
    }
}

impl<QC> DeepQConfig<QC> {
    /// Sets the configuration of the Q-network model.
    pub fn model_config(mut self, model_config: CriticModelConfig<QC>) -> Self {
        self.model_config = model_config;
        self
    }

    /// Sets the configuration of the critic updater.
    pub fn updater_config(mut self, updater_config: CriticUpdaterConfig) -> Self {
        self.updater_config = updater_config;
        self
    }

    /// Sets the discount factor.
    pub fn gamma(mut self, gamma: f64) -> Self {
        self.gamma = gamma;
        self
    }

    /// Sets the soft update coefficient of the target network.
    pub fn tau(mut self, tau: f64) -> Self {
        self.tau = tau;
        self
    }

    /// Sets the number of fit phases between soft updates of the
    /// target network.
    pub fn soft_update_interval(mut self, soft_update_interval: usize) -> Self {
        self.soft_update_interval = soft_update_interval;
        self
    }

    /// Constructs [`DeepQConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self>
    where
        QC: DeserializeOwned,
    {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let config = serde_yaml::from_reader(rdr)?;
        Ok(config)
    }

    /// Saves [`DeepQConfig`] to YAML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()>
    where
        QC: Serialize,
    {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
