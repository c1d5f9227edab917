//! Error types for the WebRTC output sink.
//!
//! Every failure the sink can run into is described by [`OutputError`]. None of
//! them cross the pipeline-facing boundary: the sink handles each error where it
//! is detected (logging it, recording it, or dropping a frame) and only exposes
//! them for inspection.
//!
//! ## Error Categories
//!
//! - **Configuration Errors**: unsupported codec, unusable session name, bad config file
//! - **Connection Errors**: the transport could not be initialised or no peer joined
//! - **Transport Write Errors**: a single frame could not be handed to the transport
//!
//! ```rust
//! use eyecam_output::OutputError;
//!
//! let error = OutputError::unsupported_codec("vp8");
//! assert!(!error.is_retryable());
//! for suggestion in error.recovery_suggestions() {
//!     println!("  - {}", suggestion);
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for output operations.
pub type Result<T, E = OutputError> = std::result::Result<T, E>;

/// Main error type for the output sink.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum OutputError {
    #[error("WebRTC output only supports h264, got '{codec}'")]
    UnsupportedCodec { codec: String },

    #[error("Invalid session name {name:?}: {reason}")]
    InvalidSessionName { name: String, reason: String },

    #[error("Failed to initialise transport: {reason}")]
    TransportInit { reason: String },

    #[error("No peer connected to session '{session}'")]
    Connection { session: String },

    #[error("Transport rejected frame of {len} bytes (duration {duration_us}us)")]
    TransportWrite { len: usize, duration_us: u64 },

    #[error("Output is not streaming")]
    NotStreaming,

    #[error("Config file error: {path}")]
    ConfigFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config parse error: {details}")]
    ConfigParse {
        details: String,
        #[source]
        source: Option<serde_yaml_ng::Error>,
    },

    #[error("Blocking task failed: {context}")]
    Task { context: String },
}

impl OutputError {
    /// Returns whether this error is potentially recoverable through retry.
    pub fn is_retryable(&self) -> bool {
        match self {
            OutputError::UnsupportedCodec { .. } => false,
            OutputError::InvalidSessionName { .. } => false,
            OutputError::TransportInit { .. } => true,
            OutputError::Connection { .. } => true,
            OutputError::TransportWrite { .. } => true,
            OutputError::NotStreaming => false,
            OutputError::ConfigFile { .. } => false,
            OutputError::ConfigParse { .. } => false,
            OutputError::Task { .. } => false,
        }
    }

    /// Returns whether this error belongs to the configuration category.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            OutputError::UnsupportedCodec { .. }
                | OutputError::InvalidSessionName { .. }
                | OutputError::ConfigFile { .. }
                | OutputError::ConfigParse { .. }
        )
    }

    /// Returns suggested recovery actions for this error.
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            OutputError::UnsupportedCodec { .. } => vec![
                "Switch the encoder to h264",
                "Use a file or network output for other codecs",
            ],
            OutputError::InvalidSessionName { .. } => vec![
                "Remove NUL bytes from the session name",
                "Check how the session name is built from user input",
            ],
            OutputError::TransportInit { .. } => vec![
                "Check that the eyecam_net library is installed",
                "Check available system resources (threads, sockets)",
                "Restart the application",
            ],
            OutputError::Connection { .. } => vec![
                "Make sure the viewer joined the same session name",
                "Check network reachability of the signalling service",
                "Restart the output to wait for a new peer",
            ],
            OutputError::TransportWrite { .. } => vec![
                "Check that the peer is still connected",
                "Verify the encoder produces Annex-B h264",
            ],
            OutputError::NotStreaming => vec![
                "Inspect OutputState and failure() for the cause",
                "Recreate the output with a valid configuration",
            ],
            OutputError::ConfigFile { .. } => {
                vec!["Check the config file exists and is readable", "Check file permissions"]
            }
            OutputError::ConfigParse { .. } => vec![
                "Check the YAML syntax of the config file",
                "Verify field names against OutputOptions",
            ],
            OutputError::Task { .. } => vec!["Check the runtime is still alive"],
        }
    }

    /// Helper constructor for unsupported codec errors.
    pub fn unsupported_codec(codec: impl Into<String>) -> Self {
        OutputError::UnsupportedCodec { codec: codec.into() }
    }

    /// Helper constructor for session name errors.
    pub fn invalid_session_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        OutputError::InvalidSessionName { name: name.into(), reason: reason.into() }
    }

    /// Helper constructor for transport initialisation errors.
    pub fn transport_init(reason: impl Into<String>) -> Self {
        OutputError::TransportInit { reason: reason.into() }
    }

    /// Helper constructor for connection errors.
    pub fn connection_failed(session: impl Into<String>) -> Self {
        OutputError::Connection { session: session.into() }
    }

    /// Helper constructor for config file errors with path context.
    pub fn config_file(path: PathBuf, source: std::io::Error) -> Self {
        OutputError::ConfigFile { path, source }
    }
}

impl From<serde_yaml_ng::Error> for OutputError {
    fn from(err: serde_yaml_ng::Error) -> Self {
        OutputError::ConfigParse { details: err.to_string(), source: Some(err) }
    }
}
