//! Session names passed to the transport

use std::ffi::{CStr, CString};
use std::fmt;

use crate::{OutputError, Result};

/// Name of the session (namespace) a remote viewer joins.
///
/// Stored as a C string because the transport receives it across the C ABI.
/// Construction rejects names with interior NUL bytes, which cannot cross
/// the C ABI. Any other name, including an empty one, is passed through.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionName(CString);

impl SessionName {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        CString::new(name.clone())
            .map(Self)
            .map_err(|e| {
                OutputError::invalid_session_name(
                    name,
                    format!("interior NUL byte at position {}", e.nul_position()),
                )
            })
    }

    pub fn as_c_str(&self) -> &CStr {
        &self.0
    }

    pub fn as_str(&self) -> &str {
        // Built from a String, so always valid UTF-8
        self.0.to_str().unwrap_or_default()
    }
}

impl fmt::Display for SessionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
