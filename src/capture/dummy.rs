use parking_lot::Mutex;
use std::sync::Arc;

use crate::capture::backend::{CaptureDevice, CaptureProvider};
use crate::capture::error::{CaptureError, Result};
use crate::capture::types::{CaptureDeviceInfo, DeviceId, Frame};

const DUMMY_DEVICE_ID: &str = "dummy:test:camera-001";
const DUMMY_DEVICE_NAME: &str = "Dummy Test Camera";

#[derive(Debug, Default)]
struct DummyState {
    capturing: bool,
    width: u32,
    height: u32,
    frame_interval_us: u64,
    frames_delivered: u64,
    start_calls: u32,
    stop_calls: u32,
    fail_start: bool,
    fail_stop: bool,
}

/// A fake capture provider for running without real hardware.
///
/// Exposes one device that renders a moving gradient test pattern. Every
/// opened handle shares state with the provider so callers can observe
/// whether capture is still running.
///
/// Enable via `DUMMY_CAMERA=1` environment variable.
#[derive(Clone, Default)]
pub struct DummyProvider {
    state: Arc<Mutex<DummyState>>,
}

impl DummyProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the dummy camera is enabled via environment variable.
    pub fn is_enabled() -> bool {
        std::env::var("DUMMY_CAMERA").is_ok_and(|v| v == "1" || v == "true")
    }

    /// The stable device ID for the dummy camera.
    pub fn device_id() -> DeviceId {
        DeviceId::new(DUMMY_DEVICE_ID)
    }

    /// Make `start` fail on the next opened device.
    pub fn with_failing_start(self) -> Self {
        self.state.lock().fail_start = true;
        self
    }

    /// Make `stop` fail (the device is still marked released).
    pub fn with_failing_stop(self) -> Self {
        self.state.lock().fail_stop = true;
        self
    }

    pub fn is_capturing(&self) -> bool {
        self.state.lock().capturing
    }

    pub fn start_calls(&self) -> u32 {
        self.state.lock().start_calls
    }

    pub fn stop_calls(&self) -> u32 {
        self.state.lock().stop_calls
    }

    pub fn frames_delivered(&self) -> u64 {
        self.state.lock().frames_delivered
    }

    fn info() -> CaptureDeviceInfo {
        CaptureDeviceInfo {
            id: Self::device_id(),
            name: DUMMY_DEVICE_NAME.to_string(),
            is_connected: true,
        }
    }
}

impl CaptureProvider for DummyProvider {
    fn enumerate_devices(&self) -> Result<Vec<CaptureDeviceInfo>> {
        Ok(vec![Self::info()])
    }

    fn open(&self, id: &DeviceId) -> Result<Box<dyn CaptureDevice>> {
        if id != &Self::device_id() {
            return Err(CaptureError::DeviceNotFound(id.to_string()));
        }
        Ok(Box::new(DummyCamera {
            state: Arc::clone(&self.state),
        }))
    }
}

/// Handle to the simulated device.
pub struct DummyCamera {
    state: Arc<Mutex<DummyState>>,
}

/// Diagonal gradient that shifts one pixel per frame.
fn test_pattern(width: u32, height: u32, offset: u64) -> Vec<u8> {
    let mut data = Vec::with_capacity(width as usize * height as usize * 3);
    for y in 0..height {
        for x in 0..width {
            let v = ((u64::from(x) + u64::from(y) + offset) % 256) as u8;
            data.extend_from_slice(&[v, 255 - v, 128]);
        }
    }
    data
}

impl CaptureDevice for DummyCamera {
    fn info(&self) -> CaptureDeviceInfo {
        DummyProvider::info()
    }

    fn start(&self, width: u32, height: u32, fps: f32) -> Result<()> {
        let mut state = self.state.lock();
        state.start_calls += 1;
        if state.fail_start {
            return Err(CaptureError::Start("injected start failure".to_string()));
        }
        state.width = width;
        state.height = height;
        state.frame_interval_us = if fps > 0.0 {
            (1_000_000.0 / f64::from(fps)) as u64
        } else {
            0
        };
        state.frames_delivered = 0;
        state.capturing = true;
        Ok(())
    }

    fn next_frame(&self) -> Result<Option<Frame>> {
        let mut state = self.state.lock();
        if !state.capturing {
            return Err(CaptureError::Read("capture not started".to_string()));
        }
        let index = state.frames_delivered;
        state.frames_delivered += 1;
        Ok(Some(Frame {
            data: test_pattern(state.width, state.height, index),
            width: state.width,
            height: state.height,
            timestamp_us: index * state.frame_interval_us,
        }))
    }

    fn stop(&self) -> Result<()> {
        let mut state = self.state.lock();
        if !state.capturing {
            return Ok(());
        }
        state.capturing = false;
        state.stop_calls += 1;
        if state.fail_stop {
            return Err(CaptureError::Stop("injected stop failure".to_string()));
        }
        Ok(())
    }
}
