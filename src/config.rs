//! Output configuration
//!
//! [`OutputOptions`] is what the pipeline hands to the output. It can be built
//! in code or loaded from YAML:
//!
//! ```yaml
//! codec: h264
//! session_name: room1
//! on_connection_failure:
//!   terminate:
//!     exit_status: 3
//! timestamps: clamp_to_zero
//! ```
//!
//! Everything except `session_name` has a default. The codec stays a plain
//! string here so that an unsupported value reaches the output and is reported
//! there as a configuration error.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::output::{FailurePolicy, TimestampPolicy};
use crate::types::{Codec, SessionName};
use crate::{OutputError, Result};

fn default_codec() -> String {
    Codec::H264.name().to_string()
}

/// Options for a WebRTC output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputOptions {
    /// Encoder codec name; only `h264` is accepted
    #[serde(default = "default_codec")]
    pub codec: String,

    /// Session (namespace) the viewer joins
    pub session_name: String,

    /// Escalation applied by the application when no peer connects
    #[serde(default, with = "serde_yaml_ng::with::singleton_map")]
    pub on_connection_failure: FailurePolicy,

    /// Handling of non-positive frame durations
    #[serde(default)]
    pub timestamps: TimestampPolicy,
}

/// Options after validation, in the types the output works with.
#[derive(Debug, Clone)]
pub struct ValidatedOptions {
    pub codec: Codec,
    pub session_name: SessionName,
    pub timestamps: TimestampPolicy,
}

impl OutputOptions {
    /// Default options for `session_name`.
    pub fn new(session_name: impl Into<String>) -> Self {
        Self {
            codec: default_codec(),
            session_name: session_name.into(),
            on_connection_failure: FailurePolicy::default(),
            timestamps: TimestampPolicy::default(),
        }
    }

    pub fn with_codec(mut self, codec: impl Into<String>) -> Self {
        self.codec = codec.into();
        self
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.on_connection_failure = policy;
        self
    }

    pub fn with_timestamp_policy(mut self, policy: TimestampPolicy) -> Self {
        self.timestamps = policy;
        self
    }

    /// Parse options from a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Load options from a YAML file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading output options");
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| OutputError::config_file(path.to_path_buf(), e))?;
        Self::from_yaml_str(&yaml)
    }

    /// Check the codec and session name.
    ///
    /// The codec is checked first, so an unsupported codec is reported even
    /// when the session name is also unusable.
    pub fn validate(&self) -> Result<ValidatedOptions> {
        let codec = self.codec.parse::<Codec>()?;
        let session_name = SessionName::new(self.session_name.as_str())?;
        Ok(ValidatedOptions { codec, session_name, timestamps: self.timestamps })
    }
}
