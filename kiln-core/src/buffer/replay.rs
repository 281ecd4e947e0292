//! Off-policy circular replay buffer.
use super::{
    BufferKind, ExperienceBuffer, GenericBatch, ReplayBufferConfig, Transition, TransitionBatch,
};
use crate::KilnError;
use anyhow::Result;

/// Fixed-capacity circular buffer with uniform random sampling.
///
/// Once full, the oldest transition is overwritten. Sampling is with
/// replacement over the stored transitions.
#[derive(Debug)]
pub struct ReplayBuffer<O, A> {
    capacity: usize,

    // Next insertion slot.
    i: usize,

    size: usize,
    items: Vec<Transition<O, A>>,
}

impl<O: Clone, A: Clone> ReplayBuffer<O, A> {
    /// Builds a replay buffer with the given configuration.
    ///
    /// Rejects a zero capacity.
    pub fn build(config: &ReplayBufferConfig) -> Result<Self> {
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

impl<O: Clone, A: Clone> ExperienceBuffer for ReplayBuffer<O, A> {
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
            // Walk back from the most recent slot, then emit in
            // insertion order.
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
        BufferKind::OffPolicy
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
    fn overwrites_oldest_when_full() {
        let mut buffer = ReplayBuffer::build(&ReplayBufferConfig { capacity: 3 }).unwrap();
        for v in 0..5 {
            buffer.push(tr(v as f32)).unwrap();
        }
        assert_eq!(buffer.len(), 3);
        let batch = buffer.last(3);
        assert_eq!(batch.reward(), &[2.0, 3.0, 4.0]);
    }

    #[test]
    fn last_is_in_insertion_order_and_clamped() {
        let mut buffer = ReplayBuffer::build(&ReplayBufferConfig { capacity: 8 }).unwrap();
        for v in 0..3 {
            buffer.push(tr(v as f32)).unwrap();
        }
        let batch = buffer.last(2);
        assert_eq!(batch.reward(), &[1.0, 2.0]);
        let batch = buffer.last(10);
        assert_eq!(batch.reward(), &[0.0, 1.0, 2.0]);
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let err = ReplayBuffer::<f32, i32>::build(&ReplayBufferConfig { capacity: 0 })
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<KilnError>(),
            Some(KilnError::InvalidConfig(_))
        ));
    }

    #[test]
    fn sample_from_empty_buffer_fails() {
        let mut buffer = ReplayBuffer::<f32, i32>::build(&ReplayBufferConfig { capacity: 4 }).unwrap();
        assert!(buffer.sample(2).is_err());
    }

    #[test]
    fn sample_has_requested_size() {
        let mut buffer = ReplayBuffer::build(&ReplayBufferConfig { capacity: 4 }).unwrap();
        buffer.push(tr(1.0)).unwrap();
        let batch = buffer.sample(6).unwrap();
        assert_eq!(batch.len(), 6);
    }
}
