//! Multilayer perceptron.
mod base;
mod config;
pub use base::Mlp;
pub use config::MlpConfig;
use tch::nn;

fn hidden_layers(p: &nn::Path, config: &MlpConfig) -> nn::Sequential {
    let mut seq = nn::seq();
    let mut in_dim = config.in_dim;
    for (i, &out_dim) in config.units.iter().enumerate() {
        seq = seq.add(nn::linear(
            p / format!("ln{}", i),
            in_dim,
            out_dim,
            Default::default(),
        ));
        seq = seq.add_fn(|x| x.relu());
        in_dim = out_dim;
    }
    seq
}
