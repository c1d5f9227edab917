//! Core types shared between the pipeline-facing sink and the transport.
//!
//! - [`Codec`] is the closed set of codecs the output accepts
//! - [`FrameFlags`] carries the encoder's per-buffer flags
//! - [`FrameDelivery`] is the transient record passed to the transport per frame
//! - [`EncodedFrame`] is an owned frame for stream-driven pipelines
//! - [`SessionName`] is the validated, C-compatible session identifier
//!
//! ```rust
//! use eyecam_output::types::{Codec, FrameDelivery};
//!
//! let codec: Codec = "h264".parse().unwrap();
//! assert_eq!(codec, Codec::H264);
//!
//! let bytes = [0u8, 0, 0, 1, 0x65];
//! let delivery = FrameDelivery::new(&bytes, 1033, 33);
//! assert_eq!(delivery.len(), 5);
//! ```

mod codec;
mod flags;
mod frame;
mod session;

// Re-export all public types
pub use codec::Codec;
pub use flags::FrameFlags;
pub use frame::{EncodedFrame, FrameDelivery};
pub use session::SessionName;
