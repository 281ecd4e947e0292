use super::DeepQConfig;
use crate::{
    critic::CriticModel,
    model::{ModelBase, SubModel},
    updater::DiscreteQRegression,
    util::track,
};
use anyhow::Result;
use kiln_core::{
    record::Log, Agent, Env, ExperienceBuffer, GenericBatch, Policy, TransitionBatch,
};
use log::info;
use std::{fs, marker::PhantomData, path::Path};
use tch::{Device, Tensor};

fn stack_obs<O: Into<Vec<f32>>>(rows: Vec<O>, device: Device) -> Tensor {
    let rows: Vec<_> = rows
        .into_iter()
        .map(|o| Tensor::from_slice(&o.into()))
        .collect();
    Tensor::stack(&rows, 0).to(device)
}

/// Deep Q-learning agent.
///
/// Holds a Q-network and a target network of the same shape. The fit
/// phase regresses the Q-values of taken actions onto one-step TD
/// targets computed with the target network; the target network tracks
/// the Q-network through soft updates.
///
/// With more than one critic configured, the TD target takes the
/// minimum over the target heads to curb overestimation.
///
/// Exploration is not handled here: [`DeepQ::sample`] is greedy, and
/// an explorer configured on the training loop takes care of random
/// action selection.
pub struct DeepQ<E, Q>
where
    Q: SubModel<Input = Tensor, Output = Tensor>,
{
    qnet: CriticModel<Q>,
    qnet_tgt: CriticModel<Q>,
    updater: DiscreteQRegression,
    gamma: f64,
    tau: f64,
    soft_update_interval: usize,
    n_fits: usize,
    device: Device,
    phantom: PhantomData<E>,
}

impl<E, Q> DeepQ<E, Q>
where
    Q: SubModel<Input = Tensor, Output = Tensor>,
    Q::Config: Clone,
{
    /// Constructs [`DeepQ`].
    pub fn build(config: DeepQConfig<Q::Config>, device: Device) -> Result<Self> {
        let qnet = config.model_config.build::<Q>(device)?;
        let qnet_tgt = qnet.clone();
        let updater = DiscreteQRegression::build(&config.updater_config)?;

        Ok(Self {
            qnet,
            qnet_tgt,
            updater,
            gamma: config.gamma,
            tau: config.tau,
            soft_update_interval: config.soft_update_interval,
            n_fits: 0,
            device,
            phantom: PhantomData,
        })
    }

    /// Returns the Q-network.
    pub fn qnet(&self) -> &CriticModel<Q> {
        &self.qnet
    }

    /// Saves the Q-network and its target network in the directory.
    pub fn save_params(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path)?;
        self.qnet.save(path.join("qnet.pt"))?;
        self.qnet_tgt.save(path.join("qnet_tgt.pt"))?;
        Ok(())
    }

    /// Loads the Q-network and its target network from the directory.
    ///
    /// A missing checkpoint is a non-fatal no-op, whether the directory
    /// itself or the checkpoint files inside it do not exist.
    pub fn load_params(&mut self, path: &Path) -> Result<()> {
        let qnet_path = path.join("qnet.pt");
        let qnet_tgt_path = path.join("qnet_tgt.pt");
        if !qnet_path.exists() || !qnet_tgt_path.exists() {
            info!(
                "No saved parameters at {:?}, keeping initialized weights",
                path
            );
            return Ok(());
        }
        self.qnet.load(qnet_path)?;
        self.qnet_tgt.load(qnet_tgt_path)?;
        Ok(())
    }

    fn td_target(&self, reward: &Tensor, next_obs: &Tensor, is_done: &Tensor) -> Tensor {
        tch::no_grad(|| {
            let maxes: Vec<_> = self
                .qnet_tgt
                .forward_v_all(next_obs)
                .iter()
                .map(|q| q.max_dim(-1, true).0)
                .collect();
            let q_next = if maxes.len() == 1 {
                maxes.into_iter().next().unwrap()
            } else {
                Tensor::stack(&maxes, 0).min_dim(0, false).0
            };
            reward + (1f32 - is_done) * Tensor::from(self.gamma as f32) * q_next
        })
    }
}

impl<E, Q> Policy<E> for DeepQ<E, Q>
where
    E: Env,
    E::Obs: Into<Vec<f32>>,
    E::Act: From<u32>,
    Q: SubModel<Input = Tensor, Output = Tensor>,
    Q::Config: Clone,
{
    /// Greedy action selection over the mean of the critic heads.
    fn sample(&mut self, obs: &E::Obs) -> E::Act {
        let obs = Tensor::from_slice(&obs.clone().into())
            .unsqueeze(0)
            .to(self.device);
        let act = tch::no_grad(|| {
            let qvals = self.qnet.forward_v_all(&obs);
            let mut q = qvals[0].shallow_clone();
            for head in &qvals[1..] {
                q = q + head;
            }
            q.argmax(-1, false).int64_value(&[0])
        });
        (act as u32).into()
    }
}

impl<E, Q, R> Agent<E, R> for DeepQ<E, Q>
where
    E: Env,
    E::Obs: Into<Vec<f32>>,
    E::Act: From<u32> + Into<u32>,
    Q: SubModel<Input = Tensor, Output = Tensor>,
    Q::Config: Clone,
    R: ExperienceBuffer<Obs = E::Obs, Act = E::Act, Batch = GenericBatch<E::Obs, E::Act>>,
{
    fn opt(
        &mut self,
        buffer: &mut R,
        batch_size: usize,
        _actor_epochs: usize,
        critic_epochs: usize,
    ) -> Result<Log> {
        let mut loss_sum = 0f32;

        for _ in 0..critic_epochs {
            let batch = buffer.sample(batch_size)?;
            let (obs, act, next_obs, reward, is_done) = batch.unpack();

            let obs = stack_obs(obs, self.device);
            let next_obs = stack_obs(next_obs, self.device);
            let act: Vec<_> = act.into_iter().map(|a| a.into() as i64).collect();
            let act = Tensor::from_slice(&act).to(self.device);
            let reward = Tensor::from_slice(&reward).unsqueeze(-1).to(self.device);
            let is_done: Vec<_> = is_done.iter().map(|&d| d as f32).collect();
            let is_done = Tensor::from_slice(&is_done).unsqueeze(-1).to(self.device);

            let tgt = self.td_target(&reward, &next_obs, &is_done);
            let log = self.updater.update(&self.qnet, &obs, &act, &tgt)?;
            loss_sum += log.loss;
        }

        self.n_fits += 1;
        if self.soft_update_interval > 0 && self.n_fits % self.soft_update_interval == 0 {
            track(&mut self.qnet_tgt, &mut self.qnet, self.tau);
        }

        Ok(Log {
            critic_loss: Some(loss_sum / critic_epochs.max(1) as f32),
            ..Default::default()
        })
    }

    fn save_params(&self, path: &Path) -> Result<()> {
        DeepQ::save_params(self, path)
    }

    fn load_params(&mut self, path: &Path) -> Result<()> {
        DeepQ::load_params(self, path)
    }
}
