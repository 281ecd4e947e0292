use super::{Critic, CriticEnsemble, CriticModel};
use crate::{
    error::UpdaterError,
    model::{SubModel, SubModel2},
};
use anyhow::Result;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};
use tch::{Device, Tensor};

/// Configuration of [`CriticModel`].
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct CriticModelConfig<QC> {
    pub(super) q_config: Option<QC>,
    pub(super) n_critics: usize,
}

impl<QC> Default for CriticModelConfig<QC> {
    fn default() -> Self {
        Self {
            q_config: None,
            n_critics: 1,
        }
    }
}

impl<QC> CriticModelConfig<QC> {
    /// Sets the configuration of the value network.
    pub fn q_config(mut self, q_config: QC) -> Self {
        self.q_config = Some(q_config);
        self
    }

    /// Sets the number of critics.
    pub fn n_critics(mut self, n_critics: usize) -> Self {
        self.n_critics = n_critics;
        self
    }

    fn take_q_config(&self) -> Result<QC>
    where
        QC: Clone,
    {
        self.q_config
            .clone()
            .ok_or_else(|| UpdaterError::InvalidConfig("q_config is not set".to_string()).into())
    }

    /// Constructs a critic model with state-value networks.
    pub fn build<Q>(&self, device: Device) -> Result<CriticModel<Q>>
    where
        Q: SubModel<Config = QC, Input = Tensor, Output = Tensor>,
        QC: Clone,
    {
        let q_config = self.take_q_config()?;
        match self.n_critics {
            0 => Err(UpdaterError::InvalidModelType(
                "an ensemble must have at least one critic".to_string(),
            )
            .into()),
            1 => Ok(CriticModel::Single(Critic::build(q_config, device))),
            n => Ok(CriticModel::Ensemble(CriticEnsemble::build(
                q_config, n, device,
            ))),
        }
    }

    /// Constructs a critic model with action-value networks.
    pub fn build_q<Q>(&self, device: Device) -> Result<CriticModel<Q>>
    where
        Q: SubModel2<Config = QC, Input1 = Tensor, Input2 = Tensor, Output = Tensor>,
        QC: Clone,
    {
        let q_config = self.take_q_config()?;
        match self.n_critics {
            0 => Err(UpdaterError::InvalidModelType(
                "an ensemble must have at least one critic".to_string(),
            )
            .into()),
            1 => Ok(CriticModel::Single(Critic::build_q(q_config, device))),
            n => Ok(CriticModel::Ensemble(CriticEnsemble::build_q(
                q_config, n, device,
            ))),
        }
    }

    /// Constructs [`CriticModelConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self>
    where
        QC: DeserializeOwned,
    {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let config = serde_yaml::from_reader(rdr)?;
        Ok(config)
    }

    /// Saves [`CriticModelConfig`] to YAML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()>
    where
        QC: Serialize,
    {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
