//! On-policy rollout buffer.
use super::{
    BufferKind, ExperienceBuffer, GenericBatch, RolloutBufferConfig, Transition, TransitionBatch,
};
use crate::KilnError;
use anyhow::Result;

/// Fixed-horizon buffer for on-policy training.
///
/// The buffer holds at most one rollout's worth of transitions and is
/// reused cycle after cycle: once the horizon is reached the write
/// position wraps, so a full collection phase replaces the previous
/// rollout wholesale. Minibatches are sampled uniformly from the
/// current contents.
#[derive(Debug)]
pub struct RolloutBuffer<O, A> {
    capacity: usize,

    // Next insertion slot.
    i: usize,

    size: usize,
    items: Vec<Transition<O, A>>,
}

impl<O: Clone, A: Clone> RolloutBuffer<O, A> {
    /// Builds a rollout buffer with the given configuration.
    ///
    /// Rejects a zero horizon.
    pub fn build(config: &RolloutBufferConfig) -> Result<Self> {
        if config.capacity == 0 {
            return Err(KilnError::InvalidConfig("capacity must be > 0".to_string()).into());
        }
        Ok(Self {
            capacity: config.capacity,
            i: 0,
            size: 0,
            items: Vec::with_capacity(config.capacity),
        })
    }
}

impl<O: Clone, A: Clone> ExperienceBuffer for RolloutBuffer<O, A> {
    type Obs = O;
    type Act = A;
    type Batch = GenericBatch<O, A>;

    fn push(&mut self, tr: Transition<O, A>) -> Result<()> {
        if self.size < self.capacity {
            self.items.push(tr);
        } else {
            self.items[self.i] = tr;
        }
        self.i = (self.i + 1) % self.capacity;
        self.size = (self.size + 1).min(self.capacity);
        Ok(())
    }

    fn sample(&mut self, batch_size: usize) -> Result<Self::Batch> {
        if self.size == 0 {
            return Err(KilnError::EmptyBuffer.into());
        }
        let mut batch = GenericBatch::with_capacity(batch_size);
        for _ in 0..batch_size {
            batch.push(&self.items[fastrand::usize(..self.size)]);
        }
        Ok(batch)
    }

    fn last(&self, batch_size: usize) -> Self::Batch {
        let n = batch_size.min(self.size);
        let mut batch = GenericBatch::with_capacity(n);
        for j in 0..n {
            let ix = (self.i + self.capacity - n + j) % self.capacity;
            batch.push(&self.items[ix]);
        }
        batch
    }

    fn len(&self) -> usize {
        self.size
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn kind(&self) -> BufferKind {
        BufferKind::OnPolicy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tr(v: f32) -> Transition<f32, i32> {
        Transition {
            obs: v,
            act: 0,
            reward: v,
            next_obs: v + 1.0,
            is_done: false,
        }
    }

    #[test]
    fn full_cycle_replaces_previous_rollout() {
        let mut buffer = RolloutBuffer::build(&RolloutBufferConfig { capacity: 4 }).unwrap();
        for v in 0..2 {
            buffer.push(tr(v as f32)).unwrap();
        }
        // A capacity-sized collection replaces everything, whatever the
        // write position was.
        for v in 2..6 {
            buffer.push(tr(v as f32)).unwrap();
        }
        assert_eq!(buffer.len(), 4);
        assert_eq!(buffer.last(4).reward(), &[2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn zero_horizon_is_rejected() {
        let err = RolloutBuffer::<f32, i32>::build(&RolloutBufferConfig { capacity: 0 })
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<KilnError>(),
            Some(KilnError::InvalidConfig(_))
        ));
    }

    #[test]
    fn never_exceeds_horizon() {
        let mut buffer = RolloutBuffer::build(&RolloutBufferConfig { capacity: 3 }).unwrap();
        for v in 0..10 {
            buffer.push(tr(v as f32)).unwrap();
            assert!(buffer.len() <= 3);
        }
    }
}
