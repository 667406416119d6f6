use serde::Serialize;
use std::fmt;

/// Output streams published by the pose tracking graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputStream {
    PoseDetection,
    PoseLandmarks,
    PoseWorldLandmarks,
    SegmentationMask,
    RoiFromLandmarks,
}

impl OutputStream {
    pub const ALL: [Self; 5] = [
        Self::PoseDetection,
        Self::PoseLandmarks,
        Self::PoseWorldLandmarks,
        Self::SegmentationMask,
        Self::RoiFromLandmarks,
    ];

    /// Stream name as declared in the graph config.
    pub fn name(self) -> &'static str {
        match self {
            Self::PoseDetection => "pose_detection",
            Self::PoseLandmarks => "pose_landmarks",
            Self::PoseWorldLandmarks => "pose_world_landmarks",
            Self::SegmentationMask => "segmentation_mask",
            Self::RoiFromLandmarks => "roi_from_landmarks",
        }
    }

    /// Streams to observe for a session. The mask stream only exists when
    /// segmentation is enabled.
    pub fn required(enable_segmentation: bool) -> Vec<Self> {
        Self::ALL
            .into_iter()
            .filter(|s| enable_segmentation || *s != Self::SegmentationMask)
            .collect()
    }
}

impl fmt::Display for OutputStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Person bounding box from the detector, in normalised image coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoseDetection {
    pub xmin: f32,
    pub ymin: f32,
    pub width: f32,
    pub height: f32,
    pub score: f32,
}

/// Landmark in normalised image coordinates; `z` is relative depth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NormalizedLandmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub visibility: f32,
    pub presence: f32,
}

/// Landmark in metres, origin at the hip centre.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub visibility: f32,
    pub presence: f32,
}

/// Per-pixel person confidence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentationMask {
    pub width: u32,
    pub height: u32,
    pub data: Vec<f32>,
}

/// Rotated region of interest in normalised image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedRect {
    pub x_center: f32,
    pub y_center: f32,
    pub width: f32,
    pub height: f32,
    /// Radians, clockwise.
    pub rotation: f32,
}

/// Payload of a single output packet.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum OutputValue {
    Detection(PoseDetection),
    Landmarks(Vec<NormalizedLandmark>),
    WorldLandmarks(Vec<Landmark>),
    Mask(SegmentationMask),
    Roi(NormalizedRect),
}

impl OutputValue {
    /// The stream that carries this kind of value.
    pub fn stream(&self) -> OutputStream {
        match self {
            Self::Detection(_) => OutputStream::PoseDetection,
            Self::Landmarks(_) => OutputStream::PoseLandmarks,
            Self::WorldLandmarks(_) => OutputStream::PoseWorldLandmarks,
            Self::Mask(_) => OutputStream::SegmentationMask,
            Self::Roi(_) => OutputStream::RoiFromLandmarks,
        }
    }
}

/// A timestamped packet taken from an output stream.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputPacket {
    pub timestamp_us: u64,
    pub value: OutputValue,
}
