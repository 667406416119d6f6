use parking_lot::Mutex;
use serde::Serialize;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Stable capture device identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DeviceId(String);

impl DeviceId {
    /// Create a new `DeviceId` from a raw string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Return the inner string representation.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Discovered capture device.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureDeviceInfo {
    pub id: DeviceId,
    pub name: String,
    pub is_connected: bool,
}

/// A single captured frame.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Raw pixel data (RGB24, row-major).
    pub data: Vec<u8>,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Capture timestamp in microseconds.
    pub timestamp_us: u64,
}

impl Frame {
    /// Allocate a black RGB24 frame.
    pub fn blank(width: u32, height: u32, timestamp_us: u64) -> Self {
        Self {
            data: vec![0; width as usize * height as usize * 3],
            width,
            height,
            timestamp_us,
        }
    }
}

/// Thread-safe ring buffer for captured frames.
///
/// Stores up to `capacity` frames, overwriting the oldest when full.
/// Frames are wrapped in `Arc` so readers never copy pixel data.
pub struct FrameBuffer {
    frames: Mutex<Vec<Option<Arc<Frame>>>>,
    capacity: usize,
    write_idx: Mutex<usize>,
    /// Monotonic counter incremented on each push, independent of the
    /// frame's own timestamp.
    sequence: AtomicU64,
}

impl FrameBuffer {
    /// Create a new ring buffer with the given capacity.
    pub fn new(capacity: usize) -> Self {
        let frames = (0..capacity).map(|_| None).collect();
        Self {
            frames: Mutex::new(frames),
            capacity,
            write_idx: Mutex::new(0),
            sequence: AtomicU64::new(0),
        }
    }

    /// Push a new frame, overwriting the oldest if full. Returns the shared
    /// handle that was stored.
    pub fn push(&self, frame: Frame) -> Arc<Frame> {
        let frame = Arc::new(frame);
        if self.capacity == 0 {
            return frame;
        }
        let mut frames = self.frames.lock();
        let mut idx = self.write_idx.lock();
        frames[*idx] = Some(Arc::clone(&frame));
        *idx = (*idx + 1) % self.capacity;
        self.sequence.fetch_add(1, Ordering::Relaxed);
        frame
    }

    /// Number of frames pushed so far.
    pub fn sequence(&self) -> u64 {
        self.sequence.load(Ordering::Relaxed)
    }

    /// The most recently pushed frame, if any.
    pub fn latest(&self) -> Option<Arc<Frame>> {
        if self.capacity == 0 {
            return None;
        }
        let frames = self.frames.lock();
        let idx = self.write_idx.lock();
        let latest_idx = if *idx == 0 {
            self.capacity - 1
        } else {
            *idx - 1
        };
        frames[latest_idx].clone()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
