//! Connection failure escalation
//!
//! The output never exits the process on its own. It reports a
//! [`ConnectionResult`]; the application decides what that means by applying a
//! [`FailurePolicy`], typically straight after constructing the output and
//! before handing it any frames.

use serde::{Deserialize, Serialize};
use tracing::{error, warn};

/// Exit status used by [`FailurePolicy::terminate`].
pub const CONNECTION_FAILURE_EXIT_STATUS: i32 = 3;

/// Outcome of the connection handshake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConnectionResult {
    /// A remote peer joined the session
    Connected,
    /// The transport could not be initialised or no peer joined
    Failed,
    /// Configuration was rejected, so no connection was attempted
    NotAttempted,
}

/// What the application does when the connection handshake fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Keep running; every frame write is still attempted and fails per call.
    #[default]
    Degrade,
    /// Exit the process with `exit_status`.
    Terminate { exit_status: i32 },
}

/// Decision produced by a [`FailurePolicy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Escalation {
    Continue,
    Exit(i32),
}

impl FailurePolicy {
    /// Terminate with [`CONNECTION_FAILURE_EXIT_STATUS`].
    pub const fn terminate() -> Self {
        FailurePolicy::Terminate { exit_status: CONNECTION_FAILURE_EXIT_STATUS }
    }

    /// Decide what to do with a connection outcome.
    ///
    /// Only [`ConnectionResult::Failed`] escalates; a rejected configuration is
    /// not a connection failure.
    pub fn decide(&self, result: ConnectionResult) -> Escalation {
        match (self, result) {
            (FailurePolicy::Terminate { exit_status }, ConnectionResult::Failed) => {
                Escalation::Exit(*exit_status)
            }
            _ => Escalation::Continue,
        }
    }

    /// Apply the decision, exiting the process when it says so.
    pub fn enforce(&self, result: ConnectionResult) {
        match self.decide(result) {
            Escalation::Continue => {
                if result == ConnectionResult::Failed {
                    warn!("RTC connection failed, continuing in degraded mode");
                }
            }
            Escalation::Exit(status) => {
                error!(status, "RTC connection failed, terminating");
                std::process::exit(status);
            }
        }
    }
}
