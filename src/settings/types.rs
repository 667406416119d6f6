use serde::{Deserialize, Serialize};

/// Landmark model size. The raw value is what the graph receives as
/// `model_complexity`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "i32")]
pub enum ModelComplexity {
    Lite,
    Full,
    Heavy,
}

impl ModelComplexity {
    pub fn as_i32(self) -> i32 {
        match self {
            Self::Lite => 0,
            Self::Full => 1,
            Self::Heavy => 2,
        }
    }

    /// File name of the landmark model for this complexity.
    pub fn landmark_asset(self) -> &'static str {
        match self {
            Self::Lite => "pose_landmark_lite.bytes",
            Self::Full => "pose_landmark_full.bytes",
            Self::Heavy => "pose_landmark_heavy.bytes",
        }
    }
}

impl TryFrom<i32> for ModelComplexity {
    type Error = i32;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Lite),
            1 => Ok(Self::Full),
            2 => Ok(Self::Heavy),
            other => Err(other),
        }
    }
}

impl From<ModelComplexity> for i32 {
    fn from(complexity: ModelComplexity) -> Self {
        complexity.as_i32()
    }
}

/// Host-supplied options for a pose session.
///
/// `model_complexity` is kept raw so an unsupported selection is reported
/// when assets are prepared rather than when the file is parsed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionOptions {
    /// Capture device to open; the first connected device when unset.
    pub device_id: Option<String>,
    pub width: u32,
    pub height: u32,
    pub fps: f32,
    pub model_complexity: i32,
    pub smooth_landmarks: bool,
    pub enable_segmentation: bool,
    pub smooth_segmentation: bool,
    pub min_detection_confidence: f32,
    pub min_tracking_confidence: f32,
    /// Number of captured frames retained for readers.
    pub frame_buffer_capacity: usize,
    /// Sleep between pump ticks.
    pub poll_interval_ms: u64,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            device_id: None,
            width: 640,
            height: 480,
            fps: 30.0,
            model_complexity: ModelComplexity::Lite.as_i32(),
            smooth_landmarks: true,
            enable_segmentation: true,
            smooth_segmentation: true,
            min_detection_confidence: 0.5,
            min_tracking_confidence: 0.5,
            frame_buffer_capacity: 3,
            poll_interval_ms: 5,
        }
    }
}

impl SessionOptions {
    /// Check ranges that the graph and capture device cannot recover from.
    /// Returns a description of the first offending field.
    pub fn validate(&self) -> Result<(), String> {
        if self.width == 0 || self.height == 0 {
            return Err(format!(
                "capture size must be non-zero, got {}x{}",
                self.width, self.height
            ));
        }
        if self.fps.is_nan() || self.fps <= 0.0 {
            return Err(format!("fps must be positive, got {}", self.fps));
        }
        if !(0.0..=1.0).contains(&self.min_detection_confidence) {
            return Err(format!(
                "minDetectionConfidence must be within [0, 1], got {}",
                self.min_detection_confidence
            ));
        }
        if !(0.0..=1.0).contains(&self.min_tracking_confidence) {
            return Err(format!(
                "minTrackingConfidence must be within [0, 1], got {}",
                self.min_tracking_confidence
            ));
        }
        if self.frame_buffer_capacity == 0 {
            return Err("frameBufferCapacity must be at least 1".to_string());
        }
        Ok(())
    }
}
