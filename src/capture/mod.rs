// Capture domain: device discovery, frame delivery, and frame buffering.

pub mod backend;
pub mod dummy;
pub mod error;
pub mod types;
