//! Configurations of the provided buffers.
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`ReplayBuffer`](super::ReplayBuffer).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct ReplayBufferConfig {
    /// Maximum number of stored transitions.
    pub capacity: usize,
}

impl Default for ReplayBufferConfig {
    fn default() -> Self {
        Self { capacity: 100_000 }
    }
}

impl ReplayBufferConfig {
    /// Sets the capacity of the buffer.
    pub fn capacity(mut self, v: usize) -> Self {
        self.capacity = v;
        self
    }

    /// Constructs [`ReplayBufferConfig`] from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`ReplayBufferConfig`] to a YAML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}

/// Configuration of [`RolloutBuffer`](super::RolloutBuffer).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct RolloutBufferConfig {
    /// Rollout horizon, in environment steps.
    pub capacity: usize,
}

impl Default for RolloutBufferConfig {
    fn default() -> Self {
        Self { capacity: 2048 }
    }
}

impl RolloutBufferConfig {
    /// Sets the rollout horizon.
    pub fn capacity(mut self, v: usize) -> Self {
        self.capacity = v;
        self
    }

    /// Constructs [`RolloutBufferConfig`] from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`RolloutBufferConfig`] to a YAML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
