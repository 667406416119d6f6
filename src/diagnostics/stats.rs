use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Instant;

use crate::graph::packets::OutputStream;

/// Frame and packet counters for one pose session.
pub struct DiagnosticStats {
    started: Instant,
    frames: u64,
    empty_polls: u64,
    per_stream: BTreeMap<&'static str, u64>,
    last_frame: Option<Instant>,
    last_output: Option<Instant>,
}

/// Point-in-time view of a session's pipeline throughput.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticSnapshot {
    pub uptime_ms: u64,
    pub frame_count: u64,
    pub frame_rate: f64,
    /// Pump ticks where the device had no frame ready.
    pub empty_polls: u64,
    pub output_count: u64,
    pub outputs_per_frame: f64,
    /// Packets taken per output stream name.
    pub per_stream: BTreeMap<&'static str, u64>,
    pub frame_idle_ms: Option<u64>,
    pub output_idle_ms: Option<u64>,
}

fn millis_since(t: Instant) -> u64 {
    u64::try_from(t.elapsed().as_millis()).unwrap_or(u64::MAX)
}

impl DiagnosticStats {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            frames: 0,
            empty_polls: 0,
            per_stream: BTreeMap::new(),
            last_frame: None,
            last_output: None,
        }
    }

    /// A frame went into the graph.
    pub fn record_frame(&mut self) {
        self.frames += 1;
        self.last_frame = Some(Instant::now());
    }

    pub fn record_empty_poll(&mut self) {
        self.empty_polls += 1;
    }

    /// A packet came off `stream`.
    pub fn record_output(&mut self, stream: OutputStream) {
        *self.per_stream.entry(stream.name()).or_insert(0) += 1;
        self.last_output = Some(Instant::now());
    }

    pub fn output_count(&self) -> u64 {
        self.per_stream.values().sum()
    }

    /// Frames submitted per second of uptime.
    pub fn frame_rate(&self) -> f64 {
        let secs = self.started.elapsed().as_secs_f64();
        if secs < 0.001 {
            0.0
        } else {
            self.frames as f64 / secs
        }
    }

    /// Average packets emitted across all streams for each frame.
    pub fn outputs_per_frame(&self) -> f64 {
        if self.frames == 0 {
            return 0.0;
        }
        self.output_count() as f64 / self.frames as f64
    }

    pub fn snapshot(&self) -> DiagnosticSnapshot {
        DiagnosticSnapshot {
            uptime_ms: millis_since(self.started),
            frame_count: self.frames,
            frame_rate: self.frame_rate(),
            empty_polls: self.empty_polls,
            output_count: self.output_count(),
            outputs_per_frame: self.outputs_per_frame(),
            per_stream: self.per_stream.clone(),
            frame_idle_ms: self.last_frame.map(millis_since),
            output_idle_ms: self.last_output.map(millis_since),
        }
    }
}

impl Default for DiagnosticStats {
    fn default() -> Self {
        Self::new()
    }
}
