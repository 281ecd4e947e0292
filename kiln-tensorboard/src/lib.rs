//! Tensorboard recorder for Kiln.
use kiln_core::record::Recorder;
use std::path::Path;
use tensorboard_rs::summary_writer::SummaryWriter;

/// Writes training metrics to TFRecord files.
///
/// The written scalars can be inspected with Tensorboard pointed at
/// the log directory.
pub struct TensorboardRecorder {
    writer: SummaryWriter,
}

impl TensorboardRecorder {
    /// Constructs a [`TensorboardRecorder`].
    ///
    /// TFRecord files will be stored in `logdir`.
    pub fn new<P: AsRef<Path>>(logdir: P) -> Self {
        Self {
            writer: SummaryWriter::new(logdir),
        }
    }
}

impl Recorder for TensorboardRecorder {
    fn write_scalar(&mut self, tag: &str, step: usize, value: f32) {
        self.writer.add_scalar(tag, value, step);
    }
}
