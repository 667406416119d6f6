//! Camera-to-landmark pose pipeline.
//!
//! Captures frames, hands them to an external pose tracking graph, and
//! collects its output streams. Before the graph starts, the display's
//! rotation and mirroring are normalised into the rotation and flip side
//! packets the graph's input and output stages expect.

pub mod capture;
pub mod diagnostics;
pub mod graph;
pub mod orientation;
pub mod session;
pub mod settings;

use capture::backend::{CaptureProvider, NullProvider};
use capture::dummy::DummyProvider;

pub use orientation::{resolve, OrientationState, ResolvedOrientation, RotationAngle};
pub use session::{PoseSession, SessionRequest};
pub use settings::types::{ModelComplexity, SessionOptions};

/// Create the capture provider for the current environment.
///
/// When `DUMMY_CAMERA=1` is set, a simulated camera is used instead. No
/// native backend ships with this crate, so hosts otherwise get an empty
/// provider and should pass their own.
pub fn create_capture_provider() -> Box<dyn CaptureProvider> {
    if DummyProvider::is_enabled() {
        tracing::info!("using dummy capture provider");
        return Box::new(DummyProvider::new());
    }
    Box::new(NullProvider)
}
