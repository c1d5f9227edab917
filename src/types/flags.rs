//! Per-buffer flags passed along by the encoder

use serde::{Deserialize, Serialize};

/// Flags attached to every encoded buffer by the pipeline.
///
/// The output does not act on them today; they are kept so the sink signature
/// matches what the encoder hands over and so they show up in the delivery logs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameFlags(pub u32);

impl FrameFlags {
    /// Buffer starts with a keyframe (IDR).
    pub const KEYFRAME: u32 = 1;
    /// Encoder restarted; timestamps may jump.
    pub const RESTART: u32 = 2;

    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn is_restart(&self) -> bool {
        self.has_flag(Self::RESTART)
    }

    /// Check if a specific flag is set using a bitmask.
    pub fn has_flag(&self, flag: u32) -> bool {
        (self.0 & flag) != 0
    }

    pub fn is_keyframe(&self) -> bool {
        self.has_flag(Self::KEYFRAME)
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl From<u32> for FrameFlags {
    fn from(value: u32) -> Self {
        Self(value)
    }
}
