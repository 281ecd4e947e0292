use crate::model::{ModelBase, SubModel, SubModel2};
use anyhow::Result;
use log::info;
use std::path::Path;
use tch::{nn, Device, Tensor};

/// Ensemble of critics sharing a single [`VarStore`].
///
/// The `i`-th head's variables live under the `critic{i}` namespace
/// of the shared store, so one optimizer built from the store updates
/// every head in a single step.
///
/// [`VarStore`]: https://docs.rs/tch/0.16.0/tch/nn/struct.VarStore.html
#[derive(Debug)]
pub struct CriticEnsemble<Q> {
    device: Device,
    var_store: nn::VarStore,
    heads: Vec<Q>,
}

impl<Q> CriticEnsemble<Q> {
    /// The number of critics in the ensemble.
    pub fn n_critics(&self) -> usize {
        self.heads.len()
    }
}

impl<Q> CriticEnsemble<Q>
where
    Q: SubModel<Input = Tensor, Output = Tensor>,
    Q::Config: Clone,
{
    /// Constructs an ensemble of state-value networks.
    pub fn build(config: Q::Config, n_critics: usize, device: Device) -> Self {
        let var_store = nn::VarStore::new(device);
        let heads = (0..n_critics)
            .map(|i| Q::build(&(var_store.root() / format!("critic{}", i)), config.clone()))
            .collect();

        Self {
            device,
            var_store,
            heads,
        }
    }

    /// Values of the given observations, one tensor per head.
    pub fn forward_v_all(&self, obs: &Tensor) -> Vec<Tensor> {
        self.heads.iter().map(|q| q.forward(obs)).collect()
    }
}

impl<Q> CriticEnsemble<Q>
where
    Q: SubModel2<Input1 = Tensor, Input2 = Tensor, Output = Tensor>,
    Q::Config: Clone,
{
    /// Constructs an ensemble of action-value networks.
    pub fn build_q(config: Q::Config, n_critics: usize, device: Device) -> Self {
        let var_store = nn::VarStore::new(device);
        let heads = (0..n_critics)
            .map(|i| {
                <Q as SubModel2>::build(
                    &(var_store.root() / format!("critic{}", i)),
                    config.clone(),
                )
            })
            .collect();

        Self {
            device,
            var_store,
            heads,
        }
    }

    /// Values of the given observation-action pairs, one tensor per
    /// head.
    pub fn forward_q_all(&self, obs: &Tensor, act: &Tensor) -> Vec<Tensor> {
        self.heads.iter().map(|q| q.forward(obs, act)).collect()
    }
}

impl<Q: SubModel> Clone for CriticEnsemble<Q> {
    fn clone(&self) -> Self {
        let mut var_store = nn::VarStore::new(self.device);
        let heads = self
            .heads
            .iter()
            .enumerate()
            .map(|(i, q)| q.clone_with_path(&(var_store.root() / format!("critic{}", i))))
            .collect();
        var_store.copy(&self.var_store).unwrap();

        Self {
            device: self.device,
            var_store,
            heads,
        }
    }
}

impl<Q> ModelBase for CriticEnsemble<Q> {
    fn get_var_store_mut(&mut self) -> &mut nn::VarStore {
        &mut self.var_store
    }

    fn get_var_store(&self) -> &nn::VarStore {
        &self.var_store
    }

    fn save<T: AsRef<Path>>(&self, path: T) -> Result<()> {
        self.var_store.save(&path)?;
        info!("Save critic ensemble parameters to {:?}", path.as_ref());
        Ok(())
    }

    fn load<T: AsRef<Path>>(&mut self, path: T) -> Result<()> {
        self.var_store.load(&path)?;
        info!("Load critic ensemble parameters from {:?}", path.as_ref());
        Ok(())
    }
}
