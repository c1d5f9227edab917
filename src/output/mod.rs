//! WebRTC streaming output
//!
//! [`StreamingOutput`] is the sink the capture pipeline writes encoded frames
//! into. It owns one transport handle for its whole lifetime:
//!
//! 1. Construction validates the options. An unsupported codec (or unusable
//!    session name) leaves the output inert: no handle is acquired and no
//!    connection is attempted.
//! 2. Otherwise a handle is acquired and the output blocks until a peer joins
//!    the session or the transport gives up.
//! 3. Each delivered buffer is forwarded with the time elapsed since the
//!    previous buffer. Failed writes are logged and the frame is dropped.
//! 4. Dropping the output releases the handle.
//!
//! Construction never exits the process. Use [`StreamingOutput::connection_result`]
//! with a [`FailurePolicy`] to escalate a failed handshake.
//!
//! ```rust,ignore
//! use eyecam_output::native::NativeProvider;
//! use eyecam_output::{FrameFlags, OutputOptions, OutputSink, StreamingOutput};
//!
//! let options = OutputOptions::from_path("output.yaml")?;
//! let mut output = StreamingOutput::new(&options, NativeProvider);
//! options.on_connection_failure.enforce(output.connection_result());
//!
//! output.output_buffer(&encoded, timestamp_us, FrameFlags::default());
//! ```

mod escalation;
mod stats;
mod timing;

pub use escalation::{CONNECTION_FAILURE_EXIT_STATUS, ConnectionResult, Escalation, FailurePolicy};
pub use stats::DeliveryStats;
pub use timing::{FrameClock, TimestampPolicy};

#[cfg(test)]
mod tests;

use futures::{Stream, StreamExt};
use tracing::{debug, error, info, trace};

use crate::config::OutputOptions;
use crate::transport::{Transport, TransportProvider};
use crate::types::{Codec, EncodedFrame, FrameDelivery, FrameFlags};
use crate::{OutputError, Result};

/// Pipeline-facing contract for encoded video outputs.
///
/// Frames are delivered in capture order. The sink reports nothing back per
/// frame; losing a frame is preferred over stalling the pipeline.
pub trait OutputSink {
    fn output_buffer(&mut self, data: &[u8], timestamp_us: i64, flags: FrameFlags);
}

/// Lifecycle of a [`StreamingOutput`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputState {
    Uninitialized,
    Connecting,
    Streaming,
    /// Configuration rejected, transport unavailable, or no peer connected
    Failed,
}

/// Output sink forwarding encoded frames to a WebRTC transport.
pub struct StreamingOutput<T: Transport> {
    /// Owned handle; `None` when configuration was rejected or acquisition failed
    transport: Option<T>,

    /// Session name as configured, for logging
    session_name: String,

    /// Validated codec; `None` when configuration was rejected
    codec: Option<Codec>,

    clock: FrameClock,
    state: OutputState,

    /// Error that moved the output to `Failed`
    failure: Option<OutputError>,

    stats: DeliveryStats,
}

impl<T: Transport> StreamingOutput<T> {
    /// Build the output and block until the connection handshake resolves.
    ///
    /// Never fails: problems are logged, recorded in [`failure`](Self::failure)
    /// and reflected in [`state`](Self::state).
    pub fn new<P>(options: &OutputOptions, mut provider: P) -> Self
    where
        P: TransportProvider<Transport = T>,
    {
        let mut output = Self {
            transport: None,
            session_name: options.session_name.clone(),
            codec: None,
            clock: FrameClock::new(options.timestamps),
            state: OutputState::Uninitialized,
            failure: None,
            stats: DeliveryStats::default(),
        };

        let validated = match options.validate() {
            Ok(validated) => validated,
            Err(e) => {
                error!(codec = %options.codec, error = %e, "WebRTC output configuration rejected");
                output.fail(e);
                return output;
            }
        };
        output.codec = Some(validated.codec);
        output.state = OutputState::Connecting;

        let mut transport = match provider.acquire() {
            Ok(transport) => transport,
            Err(e) => {
                error!(error = %e, "Failed to acquire WebRTC transport");
                output.fail(e);
                return output;
            }
        };

        info!(
            session = %validated.session_name,
            mime = validated.codec.mime_type(),
            "Waiting for RTC connection"
        );

        let connected = transport.wait_for_connection(&validated.session_name);
        output.transport = Some(transport);

        if connected {
            info!(session = %validated.session_name, "RTC peer connected");
            output.state = OutputState::Streaming;
        } else {
            error!(session = %validated.session_name, "RTC connection failed");
            output.fail(OutputError::connection_failed(validated.session_name.as_str()));
        }

        output
    }

    fn fail(&mut self, error: OutputError) {
        self.state = OutputState::Failed;
        self.failure = Some(error);
    }

    /// Forward one encoded buffer.
    ///
    /// The duration passed to the transport is the time since the previous
    /// call (since zero for the first). The stored timestamp advances even when
    /// the frame is not sent.
    pub fn deliver(&mut self, data: &[u8], timestamp_us: i64, flags: FrameFlags) -> Result<()> {
        let duration_us = self.clock.advance(timestamp_us);
        let delivery = FrameDelivery::new(data, timestamp_us, duration_us);

        trace!(
            len = delivery.len(),
            timestamp_us,
            duration_us,
            keyframe = flags.is_keyframe(),
            "Delivering frame"
        );
        if flags.is_restart() {
            debug!(timestamp_us, duration_us, "Encoder restart flagged on frame");
        }

        let Some(transport) = self.transport.as_mut() else {
            self.stats.record_dropped();
            return Err(OutputError::NotStreaming);
        };

        if transport.write_video(&delivery) {
            self.stats.record_sent(delivery.len());
            Ok(())
        } else {
            self.stats.record_dropped();
            Err(OutputError::TransportWrite { len: delivery.len(), duration_us })
        }
    }

    /// Deliver every frame of `frames` in order, returning the stats afterwards.
    pub async fn forward<S>(&mut self, frames: S) -> DeliveryStats
    where
        S: Stream<Item = EncodedFrame>,
    {
        futures::pin_mut!(frames);
        while let Some(frame) = frames.next().await {
            self.output_buffer(&frame.data, frame.timestamp_us, frame.flags);
        }
        self.stats
    }

    pub fn state(&self) -> OutputState {
        self.state
    }

    pub fn is_streaming(&self) -> bool {
        self.state == OutputState::Streaming
    }

    /// Outcome of the handshake, for use with [`FailurePolicy`].
    pub fn connection_result(&self) -> ConnectionResult {
        match (self.state, &self.failure) {
            (OutputState::Streaming, _) => ConnectionResult::Connected,
            (OutputState::Failed, Some(e)) if e.is_configuration() => {
                ConnectionResult::NotAttempted
            }
            _ => ConnectionResult::Failed,
        }
    }

    pub fn failure(&self) -> Option<&OutputError> {
        self.failure.as_ref()
    }

    pub fn codec(&self) -> Option<Codec> {
        self.codec
    }

    pub fn session_name(&self) -> &str {
        &self.session_name
    }

    pub fn last_timestamp_us(&self) -> i64 {
        self.clock.last_timestamp_us()
    }

    pub fn stats(&self) -> DeliveryStats {
        self.stats
    }
}

impl<T> StreamingOutput<T>
where
    T: Transport + Send + 'static,
{
    /// Async variant of [`new`](Self::new).
    ///
    /// The handshake blocks until the transport resolves it, so it runs on
    /// tokio's blocking pool instead of a runtime worker.
    pub async fn connect_async<P>(options: OutputOptions, provider: P) -> Result<Self>
    where
        P: TransportProvider<Transport = T> + Send + 'static,
    {
        tokio::task::spawn_blocking(move || Self::new(&options, provider)).await.map_err(|e| {
            OutputError::Task { context: format!("Connection handshake task failed: {}", e) }
        })
    }
}

impl<T: Transport> OutputSink for StreamingOutput<T> {
    fn output_buffer(&mut self, data: &[u8], timestamp_us: i64, flags: FrameFlags) {
        match self.deliver(data, timestamp_us, flags) {
            Ok(()) => {}
            Err(OutputError::NotStreaming) => {
                debug!(session = %self.session_name, "Output inactive, dropping frame");
            }
            Err(e) => {
                error!(session = %self.session_name, error = %e, "Failed to send frame");
            }
        }
    }
}

impl<T: Transport> Drop for StreamingOutput<T> {
    fn drop(&mut self) {
        info!(
            session = %self.session_name,
            frames_sent = self.stats.frames_sent,
            frames_dropped = self.stats.frames_dropped,
            bytes_sent = self.stats.bytes_sent,
            "Closing WebRTC output"
        );
    }
}
