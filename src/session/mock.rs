//! In-memory graph engine and asset loader for session tests.
//!
//! The graph records every call in order, echoes a configurable set of
//! output values for each submitted frame, and supports per-operation error
//! injection.

use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::path::PathBuf;

use crate::capture::types::Frame;
use crate::graph::assets::AssetLoader;
use crate::graph::config::PipelineConfiguration;
use crate::graph::engine::{GraphEngine, GraphOptions};
use crate::graph::error::{GraphError, Result};
use crate::graph::packets::{OutputPacket, OutputStream, OutputValue};

#[derive(Default)]
struct MockState {
    calls: Vec<String>,
    options: Option<GraphOptions>,
    config: Option<PipelineConfiguration>,
    observed: Vec<OutputStream>,
    queues: HashMap<OutputStream, VecDeque<OutputPacket>>,
    frames: u64,
    errors: HashMap<&'static str, GraphError>,
}

#[derive(Default)]
pub struct MockGraph {
    emits: Vec<OutputValue>,
    state: Mutex<MockState>,
}

impl MockGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Values pushed onto their streams for every submitted frame.
    pub fn emitting(mut self, values: Vec<OutputValue>) -> Self {
        self.emits = values;
        self
    }

    /// Make `operation` fail with `error` on every call.
    pub fn failing(self, operation: &'static str, error: GraphError) -> Self {
        self.state.lock().errors.insert(operation, error);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().calls.clone()
    }

    pub fn call_count(&self, operation: &str) -> usize {
        self.state
            .lock()
            .calls
            .iter()
            .filter(|c| c.as_str() == operation)
            .count()
    }

    pub fn options(&self) -> Option<GraphOptions> {
        self.state.lock().options.clone()
    }

    pub fn config(&self) -> Option<PipelineConfiguration> {
        self.state.lock().config.clone()
    }

    pub fn observed(&self) -> Vec<OutputStream> {
        self.state.lock().observed.clone()
    }

    pub fn frames(&self) -> u64 {
        self.state.lock().frames
    }

    fn enter(&self, call: String, operation: &'static str) -> Result<()> {
        let mut state = self.state.lock();
        state.calls.push(call);
        match state.errors.get(operation) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

impl GraphEngine for MockGraph {
    fn initialize(&self, options: &GraphOptions) -> Result<()> {
        self.enter("initialize".to_string(), "initialize")?;
        self.state.lock().options = Some(options.clone());
        Ok(())
    }

    fn observe_stream(&self, stream: OutputStream) -> Result<()> {
        self.enter(format!("observe:{stream}"), "observe_stream")?;
        self.state.lock().observed.push(stream);
        Ok(())
    }

    fn start_run(&self, config: &PipelineConfiguration) -> Result<()> {
        self.enter("start_run".to_string(), "start_run")?;
        self.state.lock().config = Some(config.clone());
        Ok(())
    }

    fn add_frame(&self, frame: &Frame) -> Result<()> {
        // Frame traffic is counted, not logged, to keep `calls` readable.
        let mut state = self.state.lock();
        if let Some(err) = state.errors.get("add_frame") {
            return Err(err.clone());
        }
        state.frames += 1;
        for value in &self.emits {
            let stream = value.stream();
            if state.observed.contains(&stream) {
                state.queues.entry(stream).or_default().push_back(OutputPacket {
                    timestamp_us: frame.timestamp_us,
                    value: value.clone(),
                });
            }
        }
        Ok(())
    }

    fn try_next(&self, stream: OutputStream) -> Result<Option<OutputPacket>> {
        let mut state = self.state.lock();
        if let Some(err) = state.errors.get("try_next") {
            return Err(err.clone());
        }
        Ok(state.queues.get_mut(&stream).and_then(VecDeque::pop_front))
    }

    fn close_input(&self) -> Result<()> {
        self.enter("close_input".to_string(), "close_input")
    }

    fn wait_until_idle(&self) -> Result<()> {
        self.enter("wait_until_idle".to_string(), "wait_until_idle")
    }
}

/// Asset loader that resolves every name to itself.
pub struct StaticAssets;

impl AssetLoader for StaticAssets {
    fn load(&self, name: &str) -> Result<PathBuf> {
        Ok(PathBuf::from(name))
    }
}
