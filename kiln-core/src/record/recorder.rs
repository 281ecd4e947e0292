//! Metrics sinks.

/// Writes scalar time series keyed by step index.
///
/// Recorders are explicit collaborators passed to the
/// [`Trainer`](crate::Trainer), never ambient state, so training loops
/// stay independently testable.
pub trait Recorder {
    /// Writes a scalar value under `tag` at `step`.
    fn write_scalar(&mut self, tag: &str, step: usize, value: f32);
}

/// A recorder that ignores any record. This struct is used just for
/// debugging.
pub struct NullRecorder {}

impl Recorder for NullRecorder {
    fn write_scalar(&mut self, _tag: &str, _step: usize, _value: f32) {}
}

/// A recorder that keeps scalars in memory for later inspection.
#[derive(Default)]
pub struct BufferedRecorder {
    scalars: Vec<(String, usize, f32)>,
}

impl BufferedRecorder {
    /// Constructs an empty [`BufferedRecorder`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Iterates over the recorded `(tag, step, value)` triples.
    pub fn iter(&self) -> impl Iterator<Item = &(String, usize, f32)> {
        self.scalars.iter()
    }

    /// Returns the values recorded under `tag`, in write order.
    pub fn scalars(&self, tag: &str) -> Vec<(usize, f32)> {
        self.scalars
            .iter()
            .filter(|(t, _, _)| t == tag)
            .map(|(_, step, value)| (*step, *value))
            .collect()
    }
}

impl Recorder for BufferedRecorder {
    fn write_scalar(&mut self, tag: &str, step: usize, value: f32) {
        self.scalars.push((tag.to_string(), step, value));
    }
}
