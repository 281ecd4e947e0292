//! Configuration of [`Trainer`](super::Trainer).
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of a call to [`Trainer::train`](super::Trainer::train).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct TrainerConfig {
    /// Total number of environment steps to train over.
    ///
    /// With an on-policy buffer this is converted to a training
    /// iteration count by integer division by the buffer capacity.
    pub num_steps: usize,

    /// Minibatch size of a single gradient descent step.
    pub batch_size: usize,

    /// How many times to update the actor network in each training
    /// iteration.
    pub actor_epochs: usize,

    /// How many times to update the critic network in each training
    /// iteration.
    pub critic_epochs: usize,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            num_steps: 0,
            batch_size: 1,
            actor_epochs: 1,
            critic_epochs: 1,
        }
    }
}

impl TrainerConfig {
    /// Sets the total number of environment steps.
    pub fn num_steps(mut self, v: usize) -> Self {
        self.num_steps = v;
        self
    }

    /// Sets the minibatch size.
    pub fn batch_size(mut self, v: usize) -> Self {
        self.batch_size = v;
        self
    }

    /// Sets the number of actor updates per training iteration.
    pub fn actor_epochs(mut self, v: usize) -> Self {
        self.actor_epochs = v;
        self
    }

    /// Sets the number of critic updates per training iteration.
    pub fn critic_epochs(mut self, v: usize) -> Self {
        self.critic_epochs = v;
        self
    }

    /// Constructs [`TrainerConfig`] from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`TrainerConfig`] to a YAML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
