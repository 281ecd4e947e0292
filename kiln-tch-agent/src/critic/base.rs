use crate::model::{ModelBase, SubModel, SubModel2};
use anyhow::Result;
use log::info;
use std::path::Path;
use tch::{nn, Device, Tensor};

/// Critic wrapping a single value network.
///
/// The wrapped network is either a state-value network, taking an
/// observation (see [`Critic::forward_v`]), or an action-value
/// network, taking an observation and an action (see
/// [`Critic::forward_q`]). The critic owns the [`VarStore`] holding
/// the network's variables.
///
/// [`VarStore`]: https://docs.rs/tch/0.16.0/tch/nn/struct.VarStore.html
#[derive(Debug)]
pub struct Critic<Q> {
    device: Device,
    var_store: nn::VarStore,
    q: Q,
}

impl<Q> Critic<Q>
where
    Q: SubModel<Input = Tensor, Output = Tensor>,
{
    /// Constructs a critic with a state-value network.
    pub fn build(config: Q::Config, device: Device) -> Self {
        let var_store = nn::VarStore::new(device);
        let q = Q::build(&var_store.root(), config);

        Self {
            device,
            var_store,
            q,
        }
    }

    /// Values of the given observations.
    pub fn forward_v(&self, obs: &Tensor) -> Tensor {
        self.q.forward(obs)
    }
}

impl<Q> Critic<Q>
where
    Q: SubModel2<Input1 = Tensor, Input2 = Tensor, Output = Tensor>,
{
    /// Constructs a critic with an action-value network.
    pub fn build_q(config: Q::Config, device: Device) -> Self {
        let var_store = nn::VarStore::new(device);
        let q = <Q as SubModel2>::build(&var_store.root(), config);

        Self {
            device,
            var_store,
            q,
        }
    }

    /// Values of the given observation-action pairs.
    pub fn forward_q(&self, obs: &Tensor, act: &Tensor) -> Tensor {
        self.q.forward(obs, act)
    }
}

impl<Q: SubModel> Clone for Critic<Q> {
    fn clone(&self) -> Self {
        let mut var_store = nn::VarStore::new(self.device);
        let q = self.q.clone_with_path(&var_store.root());
        var_store.copy(&self.var_store).unwrap();

        Self {
            device: self.device,
            var_store,
            q,
        }
    }
}

impl<Q> ModelBase for Critic<Q> {
    fn get_var_store_mut(&mut self) -> &mut nn::VarStore {
        &mut self.var_store
    }

    fn get_var_store(&self) -> &nn::VarStore {
        &self.var_store
    }

    fn save<T: AsRef<Path>>(&self, path: T) -> Result<()> {
        self.var_store.save(&path)?;
        info!("Save critic parameters to {:?}", path.as_ref());
        Ok(())
    }

    fn load<T: AsRef<Path>>(&mut self, path: T) -> Result<()> {
        self.var_store.load(&path)?;
        info!("Load critic parameters from {:?}", path.as_ref());
        Ok(())
    }
}
