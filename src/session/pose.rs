use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::capture::backend::{CaptureDevice, CaptureProvider};
use crate::capture::error::CaptureError;
use crate::capture::types::{DeviceId, Frame, FrameBuffer};
use crate::diagnostics::stats::{DiagnosticSnapshot, DiagnosticStats};
use crate::graph::assets::{prepare_assets, AssetLoader};
use crate::graph::config::{FeatureToggles, PipelineConfiguration};
use crate::graph::engine::{GraphEngine, GraphOptions};
use crate::graph::packets::{OutputPacket, OutputStream};
use crate::orientation::{resolve, ResolvedOrientation, RotationAngle};
use crate::session::error::{Result, SessionError};
use crate::session::outputs::OutputStore;
use crate::settings::types::{ModelComplexity, SessionOptions};

/// Callback type for reporting pump failures to the host.
/// Arguments: (device_id, error_message).
pub type ErrorCallback = Arc<dyn Fn(&str, &str) + Send + Sync>;

/// Everything the host supplies to start a session.
#[derive(Clone)]
pub struct SessionRequest {
    pub options: SessionOptions,
    /// Display rotation as reported by the platform.
    pub display_rotation: RotationAngle,
    /// Whether the host presents the camera image mirrored.
    pub expect_mirrored: bool,
    pub on_error: Option<ErrorCallback>,
}

impl SessionRequest {
    pub fn new(options: SessionOptions, display_rotation: RotationAngle, expect_mirrored: bool) -> Self {
        Self {
            options,
            display_rotation,
            expect_mirrored,
            on_error: None,
        }
    }

    pub fn with_error_callback(mut self, on_error: ErrorCallback) -> Self {
        self.on_error = Some(on_error);
        self
    }
}

/// A running camera-to-landmark pipeline.
///
/// Owns the capture device and one pump thread that moves frames into the
/// graph and packets out of it. Dropping the session tears it down.
pub struct PoseSession {
    device_id: DeviceId,
    device: Arc<dyn CaptureDevice>,
    graph: Arc<dyn GraphEngine>,
    buffer: Arc<FrameBuffer>,
    outputs: Arc<OutputStore>,
    stats: Arc<Mutex<DiagnosticStats>>,
    running: Arc<AtomicBool>,
    pump_error: Arc<Mutex<Option<String>>>,
    pump: Option<JoinHandle<()>>,
    orientation: ResolvedOrientation,
    image_rotation: RotationAngle,
    config: PipelineConfiguration,
    stopped: bool,
}

/// State shared with the pump thread.
struct Pump {
    device_id: String,
    device: Arc<dyn CaptureDevice>,
    graph: Arc<dyn GraphEngine>,
    buffer: Arc<FrameBuffer>,
    outputs: Arc<OutputStore>,
    stats: Arc<Mutex<DiagnosticStats>>,
    running: Arc<AtomicBool>,
    pump_error: Arc<Mutex<Option<String>>>,
    streams: Vec<OutputStream>,
    poll_interval: Duration,
    on_error: Option<ErrorCallback>,
}

impl PoseSession {
    /// Start a session.
    ///
    /// Steps run in a fixed order: device acquisition, buffer allocation,
    /// graph construction, orientation, configuration handoff, streaming.
    /// If a step fails, completed steps are undone in reverse order: an
    /// initialized graph is closed and drained, then the device released.
    pub fn start(
        provider: &dyn CaptureProvider,
        graph: Arc<dyn GraphEngine>,
        assets: &dyn AssetLoader,
        request: SessionRequest,
    ) -> Result<Self> {
        let SessionRequest {
            options,
            display_rotation,
            expect_mirrored,
            on_error,
        } = request;
        options.validate().map_err(SessionError::InvalidOption)?;

        let device = acquire_device(provider, &options)?;
        let device_id = device.info().id;

        let buffer = Arc::new(FrameBuffer::new(options.frame_buffer_capacity));

        let abort = |e: SessionError, graph_built: bool| {
            error!("pose session start failed for {device_id}: {e}");
            if graph_built {
                drain_graph(graph.as_ref(), &device_id);
            }
            release_device(device.as_ref());
            e
        };

        let (features, graph_options) =
            plan_graph(assets, &options).map_err(|e| abort(e, false))?;
        graph
            .initialize(&graph_options)
            .map_err(|e| abort(e.into(), false))?;

        let started = observe_streams(graph.as_ref(), &options).and_then(|()| {
            let orientation = resolve(display_rotation, expect_mirrored);
            let config = PipelineConfiguration::new(&orientation, features);
            info!("starting graph for {device_id} with {}", config.to_json());
            graph.start_run(&config)?;
            Ok((orientation, config))
        });
        let (orientation, config) = started.map_err(|e| abort(e, true))?;

        let outputs = Arc::new(OutputStore::new());
        let stats = Arc::new(Mutex::new(DiagnosticStats::new()));
        let running = Arc::new(AtomicBool::new(true));
        let pump_error = Arc::new(Mutex::new(None));

        let pump = Pump {
            device_id: device_id.to_string(),
            device: Arc::clone(&device),
            graph: Arc::clone(&graph),
            buffer: Arc::clone(&buffer),
            outputs: Arc::clone(&outputs),
            stats: Arc::clone(&stats),
            running: Arc::clone(&running),
            pump_error: Arc::clone(&pump_error),
            streams: OutputStream::required(options.enable_segmentation),
            poll_interval: Duration::from_millis(options.poll_interval_ms),
            on_error,
        };
        let handle = std::thread::Builder::new()
            .name(format!("pose-pump-{device_id}"))
            .spawn(move || pump.run())
            .expect("failed to spawn pump thread");

        info!("pose session started for {device_id}");

        Ok(Self {
            device_id,
            device,
            graph,
            buffer,
            outputs,
            stats,
            running,
            pump_error,
            pump: Some(handle),
            image_rotation: orientation.image_rotation,
            orientation,
            config,
            stopped: false,
        })
    }

    /// Stop streaming and release everything. Idempotent.
    ///
    /// The graph is drained and the device released even when an earlier
    /// teardown step fails; the first failure is returned.
    pub fn stop(&mut self) -> Result<()> {
        if self.stopped {
            return Ok(());
        }
        self.stopped = true;

        self.running.store(false, Ordering::Relaxed);
        if let Some(handle) = self.pump.take() {
            if handle.join().is_err() {
                warn!("pump thread for {} panicked", self.device_id);
            }
        }

        let mut first: Option<SessionError> = None;
        let mut keep = |step: &str, err: SessionError| {
            warn!("teardown step '{step}' failed for {}: {err}", self.device_id);
            if first.is_none() {
                first = Some(err);
            }
        };

        if let Err(e) = self.graph.close_input() {
            keep("close_input", e.into());
        }
        if let Err(e) = self.graph.wait_until_idle() {
            keep("wait_until_idle", e.into());
        }
        if let Err(e) = self.device.stop() {
            keep("release_device", e.into());
        }

        info!("pose session stopped for {}", self.device_id);
        first.map_or(Ok(()), Err)
    }

    /// Whether the pump is still moving frames.
    pub fn is_running(&self) -> bool {
        !self.stopped && self.running.load(Ordering::Relaxed)
    }

    pub fn device_id(&self) -> &DeviceId {
        &self.device_id
    }

    /// Orientation computed at start.
    pub fn orientation(&self) -> &ResolvedOrientation {
        &self.orientation
    }

    /// Current image-space rotation of the session.
    pub fn image_rotation(&self) -> RotationAngle {
        self.image_rotation
    }

    /// Side packets the graph was started with.
    pub fn configuration(&self) -> &PipelineConfiguration {
        &self.config
    }

    /// Most recent packet on `stream`.
    pub fn latest(&self, stream: OutputStream) -> Option<OutputPacket> {
        self.outputs.latest(stream)
    }

    pub fn outputs(&self) -> &OutputStore {
        &self.outputs
    }

    /// Most recent captured frame.
    pub fn latest_frame(&self) -> Option<Arc<Frame>> {
        self.buffer.latest()
    }

    /// Message of the failure that stopped the pump, if any.
    pub fn pump_error(&self) -> Option<String> {
        self.pump_error.lock().clone()
    }

    pub fn diagnostics(&self) -> DiagnosticSnapshot {
        self.stats.lock().snapshot()
    }
}

impl Drop for PoseSession {
    fn drop(&mut self) {
        if let Err(e) = self.stop() {
            warn!("pose session teardown failed for {}: {e}", self.device_id);
        }
    }
}

/// Pick, open, and start the capture device.
fn acquire_device(
    provider: &dyn CaptureProvider,
    options: &SessionOptions,
) -> Result<Arc<dyn CaptureDevice>> {
    let devices = provider.enumerate_devices()?;
    let chosen = match &options.device_id {
        Some(wanted) => devices
            .into_iter()
            .find(|d| d.id.as_str() == wanted && d.is_connected)
            .ok_or_else(|| CaptureError::DeviceNotFound(wanted.clone()))?,
        None => devices
            .into_iter()
            .find(|d| d.is_connected)
            .ok_or(SessionError::NoCaptureDevice)?,
    };

    debug!("opening capture device '{}' ({})", chosen.name, chosen.id);
    let device: Arc<dyn CaptureDevice> = Arc::from(provider.open(&chosen.id)?);
    device.start(options.width, options.height, options.fps)?;
    Ok(device)
}

/// Check the model complexity and load its assets.
fn plan_graph(
    assets: &dyn AssetLoader,
    options: &SessionOptions,
) -> Result<(FeatureToggles, GraphOptions)> {
    let model_complexity = ModelComplexity::try_from(options.model_complexity)
        .map_err(SessionError::UnsupportedModelComplexity)?;
    let model_paths = prepare_assets(assets, model_complexity)?;

    let features = FeatureToggles {
        model_complexity,
        smooth_landmarks: options.smooth_landmarks,
        enable_segmentation: options.enable_segmentation,
        smooth_segmentation: options.smooth_segmentation,
    };
    let graph_options = GraphOptions {
        model_paths,
        min_detection_confidence: options.min_detection_confidence,
        min_tracking_confidence: options.min_tracking_confidence,
    };
    Ok((features, graph_options))
}

fn observe_streams(graph: &dyn GraphEngine, options: &SessionOptions) -> Result<()> {
    for stream in OutputStream::required(options.enable_segmentation) {
        graph.observe_stream(stream)?;
    }
    Ok(())
}

/// Close and drain an initialized graph whose run never got going.
fn drain_graph(graph: &dyn GraphEngine, device_id: &DeviceId) {
    if let Err(e) = graph.close_input() {
        warn!("failed to close graph input for {device_id}: {e}");
    }
    if let Err(e) = graph.wait_until_idle() {
        warn!("graph did not go idle for {device_id}: {e}");
    }
}

fn release_device(device: &dyn CaptureDevice) {
    if let Err(e) = device.stop() {
        warn!("failed to release capture device {}: {e}", device.info().id);
    }
}

impl Pump {
    fn run(self) {
        debug!("pump starting for {}", self.device_id);
        while self.running.load(Ordering::Relaxed) {
            if let Err(message) = self.tick() {
                error!("pump failed for {}: {message}", self.device_id);
                *self.pump_error.lock() = Some(message.clone());
                if let Some(cb) = &self.on_error {
                    cb(&self.device_id, &message);
                }
                self.running.store(false, Ordering::Relaxed);
                break;
            }
            if !self.poll_interval.is_zero() {
                std::thread::sleep(self.poll_interval);
            }
        }
        debug!("pump exiting for {}", self.device_id);
    }

    /// Move one frame in and every pending packet out.
    fn tick(&self) -> std::result::Result<(), String> {
        match self.device.next_frame().map_err(|e| e.to_string())? {
            Some(frame) => {
                let frame = self.buffer.push(frame);
                self.graph.add_frame(&frame).map_err(|e| e.to_string())?;
                self.stats.lock().record_frame();
            }
            None => self.stats.lock().record_empty_poll(),
        }

        for &stream in &self.streams {
            while let Some(packet) = self.graph.try_next(stream).map_err(|e| e.to_string())? {
                self.outputs.record(stream, packet);
                self.stats.lock().record_output(stream);
            }
        }
        Ok(())
    }
}
