//! Native eyecam_net transport
//!
//! Binds the four C-linkage entry points of the `eyecam_net` library and wraps
//! its opaque state pointer in an owned [`NetHandle`]. The library does ICE,
//! SDP signalling, DTLS/SRTP and H.264 packetization; this crate only sees the
//! handle.
//!
//! # Usage
//!
//! ```rust,ignore
//! use eyecam_output::native::NativeProvider;
//! use eyecam_output::{OutputOptions, StreamingOutput};
//!
//! let options = OutputOptions::new("room1");
//! let mut output = StreamingOutput::new(&options, NativeProvider);
//! ```
//!
//! Enabled with the `native` feature; the crate links `libeyecam_net`.

mod handle;

pub use handle::{NativeProvider, NetHandle};
