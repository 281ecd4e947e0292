use super::{hidden_layers, MlpConfig};
use crate::model::{SubModel, SubModel2};
use tch::{nn, nn::Module, Device, Tensor};

/// Multilayer perceptron with ReLU activations on the hidden layers.
#[derive(Debug)]
pub struct Mlp {
    config: MlpConfig,
    device: Device,
    seq: nn::Sequential,
}

impl Mlp {
    fn create_net(p: &nn::Path, config: &MlpConfig) -> nn::Sequential {
        let n = config.units.len();
        let in_dim = config.units.last().copied().unwrap_or(config.in_dim);
        hidden_layers(p, config).add(nn::linear(
            p / format!("ln{}", n),
            in_dim,
            config.out_dim,
            Default::default(),
        ))
    }
}

impl SubModel for Mlp {
    type Config = MlpConfig;
    type Input = Tensor;
    type Output = Tensor;

    fn build(p: &nn::Path, config: Self::Config) -> Self {
        let device = p.device();
        let seq = Self::create_net(p, &config);

        Self {
            config,
            device,
            seq,
        }
    }

    fn clone_with_path(&self, p: &nn::Path) -> Self {
        <Self as SubModel>::build(p, self.config.clone())
    }

    fn forward(&self, x: &Tensor) -> Tensor {
        self.seq.forward(&x.to(self.device))
    }
}

impl SubModel2 for Mlp {
    type Config = MlpConfig;
    type Input1 = Tensor;
    type Input2 = Tensor;
    type Output = Tensor;

    fn build(p: &nn::Path, config: Self::Config) -> Self {
        <Self as SubModel>::build(p, config)
    }

    fn clone_with_path(&self, p: &nn::Path) -> Self {
        <Self as SubModel>::clone_with_path(self, p)
    }

    fn forward(&self, obs: &Tensor, act: &Tensor) -> Tensor {
        let x = Tensor::cat(&[obs, act], -1).to(self.device);
        self.seq.forward(&x)
    }
}
