//! Actor model.
use crate::model::{ModelBase, SubModel};
use anyhow::Result;
use log::info;
use std::path::Path;
use tch::{nn, Device, Tensor};

/// Actor wrapping a policy network.
///
/// The actor owns its own [`VarStore`], separate from any critic's, so
/// selecting critic parameters for an update can never touch actor
/// weights. Gradient steps go through
/// [`PolicyGradient`](crate::PolicyGradient) over this store.
///
/// [`VarStore`]: https://docs.rs/tch/0.16.0/tch/nn/struct.VarStore.html
pub struct Actor<P> {
    device: Device,
    var_store: nn::VarStore,
    pi: P,
}

impl<P> Actor<P>
where
    P: SubModel<Input = Tensor>,
{
    /// Constructs an actor with the given policy network configuration.
    pub fn build(config: P::Config, device: Device) -> Self {
        let var_store = nn::VarStore::new(device);
        let pi = P::build(&var_store.root(), config);

        Self {
            device,
            var_store,
            pi,
        }
    }

    /// Output of the policy network for the given observations.
    pub fn forward(&self, obs: &Tensor) -> P::Output {
        self.pi.forward(&obs.to(self.device))
    }
}

impl<P: SubModel> Clone for Actor<P> {
    fn clone(&self) -> Self {
        let mut var_store = nn::VarStore::new(self.device);
        let pi = self.pi.clone_with_path(&var_store.root());
        var_store.copy(&self.var_store).unwrap();

        Self {
            device: self.device,
            var_store,
            pi,
        }
    }
}

impl<P> ModelBase for Actor<P> {
    fn get_var_store_mut(&mut self) -> &mut nn::VarStore {
        &mut self.var_store
    }

    fn get_var_store(&self) -> &nn::VarStore {
        &self.var_store
    }

    fn save<T: AsRef<Path>>(&self, path: T) -> Result<()> {
        self.var_store.save(&path)?;
        info!("Save actor parameters to {:?}", path.as_ref());
        Ok(())
    }

    fn load<T: AsRef<Path>>(&mut self, path: T) -> Result<()> {
        self.var_store.load(&path)?;
        info!("Load actor parameters from {:?}", path.as_ref());
        Ok(())
    }
}
