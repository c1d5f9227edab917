//! WebRTC video output for camera capture pipelines.
//!
//! Eyecam Output forwards encoded H.264 frames from a capture pipeline to a
//! remote viewer. Session setup, ICE, encryption and packetization live in the
//! native `eyecam_net` library; this crate owns the handle to it, performs the
//! connection handshake, and keeps inter-frame timing right.
//!
//! # Features
//!
//! - **Owned transport handle**: acquired once, released exactly once on drop
//! - **Blocking handshake**: waits for a viewer to join a named session
//! - **Frame timing**: every frame carries the time elapsed since the previous one
//! - **Best-effort delivery**: failed writes drop one frame, never stall the pipeline
//! - **Explicit escalation**: the application decides whether a failed handshake is fatal
//!
//! ## Example
//!
//! ```rust
//! use eyecam_output::{FrameDelivery, FrameFlags, OutputOptions, OutputSink, SessionName};
//! use eyecam_output::{OutputError, StreamingOutput, Transport};
//!
//! struct Loopback;
//!
//! impl Transport for Loopback {
//!     fn wait_for_connection(&mut self, _session: &SessionName) -> bool {
//!         true
//!     }
//!
//!     fn write_video(&mut self, frame: &FrameDelivery<'_>) -> bool {
//!         println!("{} bytes, {}us", frame.len(), frame.duration_us);
//!         true
//!     }
//! }
//!
//! let options = OutputOptions::new("room1");
//! let mut output = StreamingOutput::new(&options, || Ok::<_, OutputError>(Loopback));
//! options.on_connection_failure.enforce(output.connection_result());
//!
//! output.output_buffer(&[0, 0, 0, 1, 0x65], 1000, FrameFlags::default());
//! output.output_buffer(&[0, 0, 0, 1, 0x41], 1033, FrameFlags::default());
//! assert_eq!(output.stats().frames_sent, 2);
//! ```

mod error;
pub mod types;

pub mod config;
pub mod logging;
pub mod output;
pub mod transport;

#[cfg_attr(any(test, feature = "benchmark"), path = "test_utils.rs")]
#[cfg(any(test, feature = "benchmark"))]
pub mod test_utils;

// Native transport bindings
#[cfg(feature = "native")]
pub mod native;

// Core exports
pub use error::*;
pub use types::*;

pub use config::OutputOptions;
pub use output::{
    ConnectionResult, DeliveryStats, Escalation, FailurePolicy, OutputSink, OutputState,
    StreamingOutput, TimestampPolicy,
};
pub use transport::{Transport, TransportProvider};

#[cfg(feature = "native")]
pub use native::{NativeProvider, NetHandle};
