use parking_lot::Mutex;
use std::collections::HashMap;

use crate::graph::packets::{OutputPacket, OutputStream};

struct Slot {
    latest: OutputPacket,
    count: u64,
}

/// Latest packet per output stream.
///
/// Written by the pump thread, read by anyone holding the session.
#[derive(Default)]
pub struct OutputStore {
    slots: Mutex<HashMap<OutputStream, Slot>>,
}

impl OutputStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the latest packet for `stream`.
    pub fn record(&self, stream: OutputStream, packet: OutputPacket) {
        let mut slots = self.slots.lock();
        match slots.get_mut(&stream) {
            Some(slot) => {
                slot.latest = packet;
                slot.count += 1;
            }
            None => {
                slots.insert(
                    stream,
                    Slot {
                        latest: packet,
                        count: 1,
                    },
                );
            }
        }
    }

    pub fn latest(&self, stream: OutputStream) -> Option<OutputPacket> {
        self.slots.lock().get(&stream).map(|s| s.latest.clone())
    }

    /// Packets received on `stream` since the last `clear`.
    pub fn count(&self, stream: OutputStream) -> u64 {
        self.slots.lock().get(&stream).map_or(0, |s| s.count)
    }

    pub fn clear(&self) {
        self.slots.lock().clear();
    }
}
