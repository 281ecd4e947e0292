//! Definition of interfaces of neural networks.
use anyhow::Result;
use std::path::Path;
use tch::nn;

/// Base interface of a model owning a [`VarStore`].
///
/// [`VarStore`]: https://docs.rs/tch/0.16.0/tch/nn/struct.VarStore.html
pub trait ModelBase {
    /// Returns `var_store` as mutable reference.
    fn get_var_store_mut(&mut self) -> &mut nn::VarStore;

    /// Returns `var_store`.
    fn get_var_store(&self) -> &nn::VarStore;

    /// Save parameters of the neural network.
    fn save<T: AsRef<Path>>(&self, path: T) -> Result<()>;

    /// Load parameters of the neural network.
    fn load<T: AsRef<Path>>(&mut self, path: T) -> Result<()>;
}

/// Neural network module built under a [`Path`] of a [`VarStore`].
///
/// The purpose of this trait is for modularity of neural network
/// models: modules consisting a model share a [`VarStore`], each under
/// its own namespace, and a module can be rebuilt under a path of a
/// fresh [`VarStore`], which is useful when creating a target network.
///
/// [`Path`]: https://docs.rs/tch/0.16.0/tch/nn/struct.Path.html
/// [`VarStore`]: https://docs.rs/tch/0.16.0/tch/nn/struct.VarStore.html
pub trait SubModel {
    /// Configuration from which [`SubModel`] is constructed.
    type Config;

    /// Input of the [`SubModel`].
    type Input;

    /// Output of the [`SubModel`].
    type Output;

    /// Builds [`SubModel`] under the given path.
    fn build(p: &nn::Path, config: Self::Config) -> Self;

    /// Clones [`SubModel`], creating its variables under the given
    /// path.
    fn clone_with_path(&self, p: &nn::Path) -> Self;

    /// A generalized forward function.
    fn forward(&self, input: &Self::Input) -> Self::Output;
}

/// Neural network module built under a [`Path`] of a [`VarStore`].
///
/// The difference from [`SubModel`] is that this trait takes two inputs.
///
/// [`Path`]: https://docs.rs/tch/0.16.0/tch/nn/struct.Path.html
/// [`VarStore`]: https://docs.rs/tch/0.16.0/tch/nn/struct.VarStore.html
pub trait SubModel2 {
    /// Configuration from which [`SubModel2`] is constructed.
    type Config;

    /// Input of the [`SubModel2`].
    type Input1;

    /// Input of the [`SubModel2`].
    type Input2;

    /// Output of the [`SubModel2`].
    type Output;

    /// Builds [`SubModel2`] under the given path.
    fn build(p: &nn::Path, config: Self::Config) -> Self;

    /// Clones [`SubModel2`], creating its variables under the given
    /// path.
    fn clone_with_path(&self, p: &nn::Path) -> Self;

    /// A generalized forward function.
    fn forward(&self, input1: &Self::Input1, input2: &Self::Input2) -> Self::Output;
}
