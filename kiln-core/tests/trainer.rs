use anyhow::Result;
use kiln_core::{
    record::{BufferedRecorder, Recorder},
    Agent, Env, EnvStep, EpsilonGreedy, ExperienceBuffer, Policy, ReplayBuffer,
    ReplayBufferConfig, RolloutBuffer, RolloutBufferConfig, Trainer, TrainerConfig,
    TransitionBatch,
};
use std::{
    cell::{Cell, RefCell},
    path::Path,
    rc::Rc,
};

/// Deterministic environment: reward of the t-th step of an episode is
/// `t` (1-based), episodes end after `episode_len` steps.
#[derive(Clone)]
struct CountEnvConfig {
    episode_len: usize,
}

struct CountEnv {
    t: usize,
    episode_len: usize,
    total_steps: Rc<Cell<usize>>,
    resets: Rc<Cell<usize>>,
}

impl CountEnv {
    fn with_counters(
        episode_len: usize,
    ) -> (Self, Rc<Cell<usize>>, Rc<Cell<usize>>) {
        let total_steps = Rc::new(Cell::new(0));
        let resets = Rc::new(Cell::new(0));
        let env = Self {
            t: 0,
            episode_len,
            total_steps: total_steps.clone(),
            resets: resets.clone(),
        };
        (env, total_steps, resets)
    }
}

impl Env for CountEnv {
    type Config = CountEnvConfig;
    type Obs = f32;
    type Act = u32;

    fn build(config: &Self::Config, _seed: i64) -> Result<Self> {
        Ok(Self::with_counters(config.episode_len).0)
    }

    fn reset(&mut self) -> Result<Self::Obs> {
        self.t = 0;
        self.resets.set(self.resets.get() + 1);
        Ok(0.0)
    }

    fn step(&mut self, _act: &Self::Act) -> Result<EnvStep<Self>> {
        self.t += 1;
        self.total_steps.set(self.total_steps.get() + 1);
        Ok(EnvStep::new(
            self.t as f32,
            self.t as f32,
            self.t == self.episode_len,
        ))
    }
}

/// Agent double: records the buffer length at every fit call and
/// returns a canned log.
struct RecordingAgent {
    opt_lens: Vec<usize>,
    canned: kiln_core::record::Log,
    panic_on_sample: bool,
}

impl RecordingAgent {
    fn new() -> Self {
        Self {
            opt_lens: Vec::new(),
            canned: kiln_core::record::Log {
                // Deliberately wrong; the loop must overwrite it.
                reward: 99.0,
                critic_loss: Some(0.25),
                ..Default::default()
            },
            panic_on_sample: false,
        }
    }
}

impl Policy<CountEnv> for RecordingAgent {
    fn sample(&mut self, _obs: &f32) -> u32 {
        if self.panic_on_sample {
            panic!("policy sampled although an explorer was configured");
        }
        0
    }
}

impl<R> Agent<CountEnv, R> for RecordingAgent
where
    R: ExperienceBuffer<Obs = f32, Act = u32>,
{
    fn opt(
        &mut self,
        buffer: &mut R,
        _batch_size: usize,
        _actor_epochs: usize,
        _critic_epochs: usize,
    ) -> Result<kiln_core::record::Log> {
        self.opt_lens.push(buffer.len());
        Ok(self.canned.clone())
    }

    fn save_params(&self, _path: &Path) -> Result<()> {
        Ok(())
    }

    fn load_params(&mut self, _path: &Path) -> Result<()> {
        Ok(())
    }
}

/// Recorder handle that can be inspected after the trainer consumed it.
#[derive(Clone, Default)]
struct SharedRecorder(Rc<RefCell<BufferedRecorder>>);

impl Recorder for SharedRecorder {
    fn write_scalar(&mut self, tag: &str, step: usize, value: f32) {
        self.0.borrow_mut().write_scalar(tag, step, value);
    }
}

#[test]
fn off_policy_scheduling_collects_one_step_per_iteration() {
    let (env, total_steps, _) = CountEnv::with_counters(1000);
    let buffer = ReplayBuffer::build(&ReplayBufferConfig { capacity: 4 }).unwrap();
    let mut trainer = Trainer::new(env, buffer, Box::new(SharedRecorder::default()));
    let mut agent = RecordingAgent::new();

    let config = TrainerConfig::default().num_steps(4).batch_size(2);
    trainer.train(&mut agent, &config).unwrap();

    // Step 0 bootstraps with batch_size steps, the remaining three
    // iterations collect a single transition each: 2 + 3 * 1 = 5.
    assert_eq!(total_steps.get(), 5);
    assert_eq!(agent.opt_lens, vec![2, 3, 4, 4]);
    assert!(trainer.buffer().len() <= 4);
}

#[test]
fn on_policy_scheduling_runs_floor_n_over_c_iterations() {
    let (env, total_steps, _) = CountEnv::with_counters(1000);
    let buffer = RolloutBuffer::build(&RolloutBufferConfig { capacity: 4 }).unwrap();
    let mut trainer = Trainer::new(env, buffer, Box::new(SharedRecorder::default()));
    let mut agent = RecordingAgent::new();

    let config = TrainerConfig::default().num_steps(17).batch_size(2);
    trainer.train(&mut agent, &config).unwrap();

    // floor(17 / 4) = 4 iterations; the first collects batch_size
    // steps, each of the rest a full buffer: 2 + 3 * 4 = 14.
    assert_eq!(agent.opt_lens.len(), 4);
    assert_eq!(total_steps.get(), 14);
}

#[test]
fn on_policy_non_first_iterations_refill_the_whole_rollout() {
    let (env, _, _) = CountEnv::with_counters(1000);
    let buffer = RolloutBuffer::build(&RolloutBufferConfig { capacity: 4 }).unwrap();
    let mut trainer = Trainer::new(env, buffer, Box::new(SharedRecorder::default()));
    let mut agent = RecordingAgent::new();

    let config = TrainerConfig::default().num_steps(8).batch_size(2);
    trainer.train(&mut agent, &config).unwrap();

    // At the second fit the buffer holds exactly one fresh rollout.
    assert_eq!(agent.opt_lens, vec![2, 4]);
    assert_eq!(trainer.buffer().last(4).reward(), &[3.0, 4.0, 5.0, 6.0]);
}

#[test]
fn reward_log_is_mean_of_last_batch_entries() {
    let (env, _, _) = CountEnv::with_counters(1000);
    let buffer = ReplayBuffer::build(&ReplayBufferConfig { capacity: 4 }).unwrap();
    let recorder = SharedRecorder::default();
    let mut trainer = Trainer::new(env, buffer, Box::new(recorder.clone()));
    let mut agent = RecordingAgent::new();

    let config = TrainerConfig::default().num_steps(4).batch_size(2);
    trainer.train(&mut agent, &config).unwrap();

    // Rewards pushed are 1, 2, 3, 4, 5; the canned log's reward of
    // 99.0 must be overwritten by the mean of the last two entries.
    let rewards = recorder.0.borrow().scalars("reward");
    assert_eq!(
        rewards,
        vec![(0, 1.5), (1, 2.5), (2, 3.5), (3, 4.5)]
    );

    // The loss reported by the agent passes through untouched.
    let losses = recorder.0.borrow().scalars("critic_loss");
    assert_eq!(losses, vec![(0, 0.25), (1, 0.25), (2, 0.25), (3, 0.25)]);

    // Unpopulated fields are not written at all.
    assert!(recorder.0.borrow().scalars("actor_loss").is_empty());
}

#[test]
fn explorer_overrides_policy_sampling() {
    let (env, _, _) = CountEnv::with_counters(1000);
    let buffer = ReplayBuffer::build(&ReplayBufferConfig { capacity: 8 }).unwrap();
    let explorer = EpsilonGreedy::new(2).eps_start(1.0).eps_final(1.0);
    let mut trainer = Trainer::new(env, buffer, Box::new(SharedRecorder::default()))
        .explorer(Box::new(explorer));
    let mut agent = RecordingAgent::new();
    agent.panic_on_sample = true;

    let config = TrainerConfig::default().num_steps(3).batch_size(2);
    // With epsilon pinned at 1.0 every action is random; the policy's
    // own sample must never be consulted.
    trainer.train(&mut agent, &config).unwrap();
}

#[test]
fn episode_end_resets_the_environment() {
    let (env, total_steps, resets) = CountEnv::with_counters(2);
    let buffer = ReplayBuffer::build(&ReplayBufferConfig { capacity: 8 }).unwrap();
    let mut trainer = Trainer::new(env, buffer, Box::new(SharedRecorder::default()));
    let mut agent = RecordingAgent::new();

    let config = TrainerConfig::default().num_steps(5).batch_size(2);
    trainer.train(&mut agent, &config).unwrap();

    // 2 + 4 * 1 = 6 env steps with episodes of length 2: the initial
    // reset plus one per finished episode.
    assert_eq!(total_steps.get(), 6);
    assert_eq!(resets.get(), 4);
}
