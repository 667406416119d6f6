// Orientation normalisation: display space to image space rotation and mirroring.

pub mod resolver;
pub mod rotation;

pub use resolver::{resolve, resolve_input, resolve_output, OrientationState, ResolvedOrientation};
pub use rotation::RotationAngle;
