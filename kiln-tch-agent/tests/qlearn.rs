use anyhow::Result;
use kiln_core::{
    record::NullRecorder, Agent, Env, EnvStep, EpsilonGreedy, ExperienceBuffer, ReplayBuffer,
    ReplayBufferConfig, Trainer, TrainerConfig, Transition,
};
use kiln_tch_agent::{
    CriticModelConfig, CriticUpdaterConfig, DeepQ, DeepQConfig, Mlp, MlpConfig, ModelBase,
    OptimizerConfig,
};
use tch::{Device, Kind};
use tempdir::TempDir;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Walk right along a line to reach the goal.
struct LineEnv {
    pos: f32,
    t: usize,
    goal: f32,
}

#[derive(Clone)]
struct LineEnvConfig {
    goal: f32,
}

#[derive(Clone, Copy)]
struct Move(u32);

impl From<u32> for Move {
    fn from(v: u32) -> Self {
        Move(v)
    }
}

impl From<Move> for u32 {
    fn from(m: Move) -> u32 {
        m.0
    }
}

impl Env for LineEnv {
    type Config = LineEnvConfig;
    type Obs = Vec<f32>;
    type Act = Move;

    fn build(config: &Self::Config, _seed: i64) -> Result<Self> {
        Ok(Self {
            pos: 0.0,
            t: 0,
            goal: config.goal,
        })
    }

    fn reset(&mut self) -> Result<Self::Obs> {
        self.pos = 0.0;
        self.t = 0;
        Ok(vec![0.0])
    }

    fn step(&mut self, act: &Self::Act) -> Result<EnvStep<Self>> {
        self.pos += if act.0 == 1 { 1.0 } else { -1.0 };
        self.t += 1;
        let reached = self.pos >= self.goal;
        let reward = if reached { 1.0 } else { 0.0 };
        let is_done = reached || self.t >= 10;
        Ok(EnvStep::new(reward, vec![self.pos], is_done))
    }
}

type Buf = ReplayBuffer<Vec<f32>, Move>;

fn agent_config() -> DeepQConfig<MlpConfig> {
    DeepQConfig::default()
        .model_config(CriticModelConfig::default().q_config(MlpConfig::new(1, vec![8], 2)))
        .updater_config(
            CriticUpdaterConfig::default().opt_config(OptimizerConfig::Adam { lr: 1e-3 }),
        )
}

fn build_agent() -> Result<DeepQ<LineEnv, Mlp>> {
    DeepQ::build(agent_config(), Device::Cpu)
}

fn vars_delta(a: &DeepQ<LineEnv, Mlp>, b: &DeepQ<LineEnv, Mlp>) -> f64 {
    let vars_b = b.qnet().get_var_store().variables();
    a.qnet()
        .get_var_store()
        .variables()
        .iter()
        .map(|(name, t)| {
            (t - vars_b.get(name).unwrap())
                .abs()
                .sum(Kind::Float)
                .double_value(&[])
        })
        .sum()
}

#[test]
fn fit_phase_returns_critic_loss() -> Result<()> {
    init_logger();
    let mut agent = build_agent()?;
    let mut buffer = Buf::build(&ReplayBufferConfig::default().capacity(32))?;
    for i in 0..8u32 {
        buffer.push(Transition {
            obs: vec![i as f32],
            act: Move(i % 2),
            reward: 0.5,
            next_obs: vec![i as f32 + 1.0],
            is_done: i == 7,
        })?;
    }

    let log = agent.opt(&mut buffer, 4, 1, 2)?;
    assert!(log.critic_loss.is_some());
    assert!(log.actor_loss.is_none());
    Ok(())
}

#[test]
fn training_loop_runs_with_epsilon_greedy_exploration() -> Result<()> {
    init_logger();
    fastrand::seed(42);
    let env = LineEnv::build(&LineEnvConfig { goal: 3.0 }, 0)?;
    let buffer = Buf::build(&ReplayBufferConfig::default().capacity(64))?;
    let mut trainer = Trainer::new(env, buffer, Box::new(NullRecorder {}))
        .explorer(Box::new(EpsilonGreedy::new(2).final_step(100)));
    let mut agent = build_agent()?;

    let config = TrainerConfig::default()
        .num_steps(8)
        .batch_size(4)
        .critic_epochs(2);
    trainer.train(&mut agent, &config)?;

    // batch_size steps up front, then one per remaining iteration.
    assert_eq!(trainer.buffer().len(), 11);
    Ok(())
}

#[test]
fn load_from_missing_path_keeps_initialized_weights() -> Result<()> {
    init_logger();
    let dir = TempDir::new("kiln_qlearn")?;
    let mut agent = build_agent()?;
    let reference = build_agent()?;
    let before = vars_delta(&agent, &reference);

    agent.load_params(&dir.path().join("does_not_exist"))?;
    assert_eq!(vars_delta(&agent, &reference), before);
    Ok(())
}

#[test]
fn load_from_dir_without_checkpoints_keeps_initialized_weights() -> Result<()> {
    init_logger();
    // The directory exists, the checkpoint files inside it do not.
    let dir = TempDir::new("kiln_qlearn")?;
    let mut agent = build_agent()?;
    let reference = build_agent()?;
    let before = vars_delta(&agent, &reference);

    agent.load_params(dir.path())?;
    assert_eq!(vars_delta(&agent, &reference), before);
    Ok(())
}

#[test]
fn save_then_load_restores_parameters() -> Result<()> {
    init_logger();
    let dir = TempDir::new("kiln_qlearn")?;
    let saved = build_agent()?;
    saved.save_params(dir.path())?;

    let mut loaded = build_agent()?;
    assert!(vars_delta(&saved, &loaded) > 0.0);
    loaded.load_params(dir.path())?;
    assert_eq!(vars_delta(&saved, &loaded), 0.0);
    Ok(())
}
