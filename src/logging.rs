//! Log subscriber setup for applications embedding the output

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `EYECAM_LOG=eyecam_output=debug`.
pub const LOG_ENV: &str = "EYECAM_LOG";

/// Install a fmt subscriber filtered by [`LOG_ENV`], defaulting to `info`.
///
/// Returns `false` when a global subscriber was already installed, in which
/// case the existing one is left in place.
pub fn init() -> bool {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_ansi(true).try_init().is_ok()
}
