//! Inter-frame timing

use serde::{Deserialize, Serialize};
use tracing::warn;

/// What to do with frame durations that are not positive.
///
/// `Passthrough` forwards `timestamp - last` as-is: a backwards timestamp wraps
/// to a huge unsigned duration, exactly what the C interface would receive from
/// an unsigned subtraction. `ClampToZero` forwards such durations as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimestampPolicy {
    #[default]
    Passthrough,
    ClampToZero,
}

/// Tracks the last delivered timestamp and derives per-frame durations.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_timestamp_us: i64,
    policy: TimestampPolicy,
}

impl FrameClock {
    pub fn new(policy: TimestampPolicy) -> Self {
        Self { last_timestamp_us: 0, policy }
    }

    /// Record `timestamp_us` as delivered and return the duration since the previous one.
    ///
    /// The first call measures from zero. The stored timestamp always moves to
    /// `timestamp_us`, whatever the caller does with the duration.
    pub fn advance(&mut self, timestamp_us: i64) -> u64 {
        let delta = timestamp_us.wrapping_sub(self.last_timestamp_us);
        let previous = self.last_timestamp_us;
        self.last_timestamp_us = timestamp_us;

        match self.policy {
            TimestampPolicy::Passthrough => delta as u64,
            TimestampPolicy::ClampToZero if delta < 0 => {
                warn!(
                    previous,
                    timestamp_us,
                    "Frame timestamp went backwards, clamping duration to 0"
                );
                0
            }
            TimestampPolicy::ClampToZero => delta as u64,
        }
    }

    pub fn last_timestamp_us(&self) -> i64 {
        self.last_timestamp_us
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(TimestampPolicy::default())
    }
}
