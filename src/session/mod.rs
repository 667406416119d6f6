// Pose session lifecycle: ordered start, streaming pump, reverse teardown.

pub mod error;
#[cfg(test)]
mod mock;
pub mod outputs;
pub mod pose;

pub use pose::{ErrorCallback, PoseSession, SessionRequest};
