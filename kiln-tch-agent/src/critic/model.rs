use super::{Critic, CriticEnsemble};
use crate::model::{ModelBase, SubModel, SubModel2};
use anyhow::Result;
use std::path::Path;
use tch::{nn, Tensor};

/// A critic model, either a single critic or an ensemble.
///
/// Updaters match on the variant when they need per-head outputs and
/// use [`ModelBase`] when they need the parameter set as a whole.
#[derive(Debug)]
pub enum CriticModel<Q> {
    /// A single critic.
    Single(Critic<Q>),
    /// An ensemble of critics sharing one set of variables.
    Ensemble(CriticEnsemble<Q>),
}

impl<Q> CriticModel<Q> {
    /// The number of critics in the model.
    pub fn n_critics(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Ensemble(e) => e.n_critics(),
        }
    }
}

impl<Q> CriticModel<Q>
where
    Q: SubModel<Input = Tensor, Output = Tensor>,
    Q::Config: Clone,
{
    /// Values of the given observations, one tensor per critic.
    pub fn forward_v_all(&self, obs: &Tensor) -> Vec<Tensor> {
        match self {
            Self::Single(c) => vec![c.forward_v(obs)],
            Self::Ensemble(e) => e.forward_v_all(obs),
        }
    }
}

impl<Q> CriticModel<Q>
where
    Q: SubModel2<Input1 = Tensor, Input2 = Tensor, Output = Tensor>,
    Q::Config: Clone,
{
    /// Values of the given observation-action pairs, one tensor per
    /// critic.
    pub fn forward_q_all(&self, obs: &Tensor, act: &Tensor) -> Vec<Tensor> {
        match self {
            Self::Single(c) => vec![c.forward_q(obs, act)],
            Self::Ensemble(e) => e.forward_q_all(obs, act),
        }
    }
}

impl<Q: SubModel> Clone for CriticModel<Q> {
    fn clone(&self) -> Self {
        match self {
            Self::Single(c) => Self::Single(c.clone()),
            Self::Ensemble(e) => Self::Ensemble(e.clone()),
        }
    }
}

impl<Q> ModelBase for CriticModel<Q> {
    fn get_var_store_mut(&mut self) -> &mut nn::VarStore {
        match self {
            Self::Single(c) => c.get_var_store_mut(),
            Self::Ensemble(e) => e.get_var_store_mut(),
        }
    }

    fn get_var_store(&self) -> &nn::VarStore {
        match self {
            Self::Single(c) => c.get_var_store(),
            Self::Ensemble(e) => e.get_var_store(),
        }
    }

    fn save<T: AsRef<Path>>(&self, path: T) -> Result<()> {
        match self {
            Self::Single(c) => c.save(path),
            Self::Ensemble(e) => e.save(path),
        }
    }

    fn load<T: AsRef<Path>>(&mut self, path: T) -> Result<()> {
        match self {
            Self::Single(c) => c.load(path),
            Self::Ensemble(e) => e.load(path),
        }
    }
}
