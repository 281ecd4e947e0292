//! Transitions and batches.

/// A single environment transition `(o_t, a_t, r_t, o_t+1, done_t)`.
///
/// Immutable once pushed into a buffer.
#[derive(Clone, Debug)]
pub struct Transition<O, A> {
    /// Observation `o_t`.
    pub obs: O,

    /// Action `a_t`.
    pub act: A,

    /// Reward `r_t`.
    pub reward: f32,

    /// Observation `o_t+1`.
    pub next_obs: O,

    /// Flag denoting if the episode ended at this step.
    pub is_done: bool,
}

/// Represents a batch of transitions.
pub trait TransitionBatch {
    /// A set of observations in a batch.
    type ObsBatch;

    /// A set of actions in a batch.
    type ActBatch;

    /// Unpacks the data `(o_t, a_t, o_t+1, r_t, is_done_t)`.
    fn unpack(
        self,
    ) -> (
        Self::ObsBatch,
        Self::ActBatch,
        Self::ObsBatch,
        Vec<f32>,
        Vec<i8>,
    );

    /// Returns the number of transitions in the batch.
    fn len(&self) -> usize;

    /// Returns `true` if the batch is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `r_t`.
    fn reward(&self) -> &[f32];
}

/// Columnar batch handed out by the buffers in this crate.
pub struct GenericBatch<O, A> {
    /// Observations `o_t`.
    pub obs: Vec<O>,

    /// Actions `a_t`.
    pub act: Vec<A>,

    /// Observations `o_t+1`.
    pub next_obs: Vec<O>,

    /// Rewards `r_t`.
    pub reward: Vec<f32>,

    /// Episode-end flags, `1` where the episode ended.
    pub is_done: Vec<i8>,
}

impl<O, A> GenericBatch<O, A> {
    pub(super) fn with_capacity(n: usize) -> Self {
        Self {
            obs: Vec::with_capacity(n),
            act: Vec::with_capacity(n),
            next_obs: Vec::with_capacity(n),
            reward: Vec::with_capacity(n),
            is_done: Vec::with_capacity(n),
        }
    }

    pub(super) fn push(&mut self, tr: &Transition<O, A>)
    where
        O: Clone,
        A: Clone,
    {
        self.obs.push(tr.obs.clone());
        self.act.push(tr.act.clone());
        self.next_obs.push(tr.next_obs.clone());
        self.reward.push(tr.reward);
        self.is_done.push(tr.is_done as i8);
    }
}

impl<O, A> TransitionBatch for GenericBatch<O, A> {
    type ObsBatch = Vec<O>;
    type ActBatch = Vec<A>;

    fn unpack(
        self,
    ) -> (
        Self::ObsBatch,
        Self::ActBatch,
        Self::ObsBatch,
        Vec<f32>,
        Vec<i8>,
    ) {
        (self.obs, self.act, self.next_obs, self.reward, self.is_done)
    }

    fn len(&self) -> usize {
        self.reward.len()
    }

    fn reward(&self) -> &[f32] {
        &self.reward
    }
}
