//! Codec identifiers accepted by the WebRTC output

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::OutputError;

/// Video codecs the output can forward.
///
/// The transport negotiates a single H.264 track, so this enumeration is closed
/// over that one value. Any other codec name is rejected when parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Codec {
    /// H.264 Annex-B byte stream
    H264,
}

impl Codec {
    /// Name used in configuration and pipeline options.
    pub const fn name(&self) -> &'static str {
        match self {
            Codec::H264 => "h264",
        }
    }

    /// MIME type the transport advertises for this codec.
    pub const fn mime_type(&self) -> &'static str {
        match self {
            Codec::H264 => "video/H264",
        }
    }
}

impl FromStr for Codec {
    type Err = OutputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "h264" => Ok(Codec::H264),
            other => Err(OutputError::unsupported_codec(other)),
        }
    }
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
