use std::path::PathBuf;

use crate::capture::types::Frame;
use crate::graph::config::PipelineConfiguration;
use crate::graph::error::Result;
use crate::graph::packets::{OutputPacket, OutputStream};

/// Construction-time options for the pose tracking graph.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphOptions {
    /// Resolved model files, detector first.
    pub model_paths: Vec<PathBuf>,
    pub min_detection_confidence: f32,
    pub min_tracking_confidence: f32,
}

/// External dataflow graph session.
///
/// The session drives it strictly in order: `initialize`, `observe_stream`
/// for each output, `start_run`, then `add_frame`/`try_next` while
/// streaming, and finally `close_input` and `wait_until_idle`.
pub trait GraphEngine: Send + Sync {
    /// Build the graph from its config and model assets.
    fn initialize(&self, options: &GraphOptions) -> Result<()>;

    /// Attach a poller to an output stream. Must precede `start_run`.
    fn observe_stream(&self, stream: OutputStream) -> Result<()>;

    /// Start a run with the given side packets.
    fn start_run(&self, config: &PipelineConfiguration) -> Result<()>;

    /// Submit a frame to the input stream.
    fn add_frame(&self, frame: &Frame) -> Result<()>;

    /// Next pending packet on an observed stream, without blocking.
    fn try_next(&self, stream: OutputStream) -> Result<Option<OutputPacket>>;

    /// Close all input streams so pending work can finish.
    fn close_input(&self) -> Result<()>;

    /// Block until every in-flight packet has been processed.
    fn wait_until_idle(&self) -> Result<()>;
}
