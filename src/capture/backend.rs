use crate::capture::error::Result;
use crate::capture::types::{CaptureDeviceInfo, DeviceId, Frame};

/// Source of capture devices.
///
/// Implemented per platform. The session only enumerates and opens; the
/// returned device owns the native handle.
pub trait CaptureProvider: Send + Sync {
    /// Enumerate all currently connected devices.
    fn enumerate_devices(&self) -> Result<Vec<CaptureDeviceInfo>>;

    /// Open a device for capture.
    fn open(&self, id: &DeviceId) -> Result<Box<dyn CaptureDevice>>;
}

/// An opened capture device.
pub trait CaptureDevice: Send + Sync {
    /// Static description of the device.
    fn info(&self) -> CaptureDeviceInfo;

    /// Begin delivering frames at the requested format.
    fn start(&self, width: u32, height: u32, fps: f32) -> Result<()>;

    /// The next available frame, or `None` when nothing new has arrived.
    fn next_frame(&self) -> Result<Option<Frame>>;

    /// Release the device. Idempotent.
    fn stop(&self) -> Result<()>;
}

/// Provider with no devices, used where no native backend exists.
pub struct NullProvider;

impl CaptureProvider for NullProvider {
    fn enumerate_devices(&self) -> Result<Vec<CaptureDeviceInfo>> {
        Ok(vec![])
    }

    fn open(&self, id: &DeviceId) -> Result<Box<dyn CaptureDevice>> {
        Err(crate::capture::error::CaptureError::DeviceNotFound(
            id.to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_provider_has_no_devices() {
        let provider = NullProvider;
        assert!(provider.enumerate_devices().unwrap().is_empty());
        assert!(provider.open(&DeviceId::new("any")).is_err());
    }

    #[test]
    fn trait_objects_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Box<dyn CaptureProvider>>();
        assert_send_sync::<Box<dyn CaptureDevice>>();
    }
}
