//! Delivery counters

use serde::Serialize;

/// Running totals for frames handed to the transport.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DeliveryStats {
    pub frames_sent: u64,
    pub frames_dropped: u64,
    pub bytes_sent: u64,
}

impl DeliveryStats {
    pub fn record_sent(&mut self, len: usize) {
        self.frames_sent += 1;
        self.bytes_sent += len as u64;
    }

    pub fn record_dropped(&mut self) {
        self.frames_dropped += 1;
    }

    /// Frames offered to the output, sent or not.
    pub fn frames_total(&self) -> u64 {
        self.frames_sent + self.frames_dropped
    }
}
