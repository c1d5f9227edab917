//! Transport traits for the session capability

use crate::Result;
use crate::types::{FrameDelivery, SessionName};

/// One session with the external transport subsystem.
///
/// A value of this type *is* the transport handle: it is created by a
/// [`TransportProvider`], exclusively owned by a single output, and released
/// exactly once when dropped. Implementations must release their native state
/// in `Drop` and never expose a way to release it earlier.
///
/// Every method takes `&mut self`, so calls into one handle are serialized by
/// construction.
pub trait Transport {
    /// Block until a remote peer joins `session`, or the transport gives up.
    ///
    /// Returns `true` when connected. The transport owns any timeout policy;
    /// callers impose none.
    fn wait_for_connection(&mut self, session: &SessionName) -> bool;

    /// Hand one encoded frame to the transport.
    ///
    /// Best effort and non-blocking from the caller's point of view. Returns
    /// `false` if the frame could not be sent.
    fn write_video(&mut self, frame: &FrameDelivery<'_>) -> bool;
}

/// Source of transport handles.
///
/// Providers abstract over the native library and test doubles. Acquisition
/// takes no session parameters; a failed acquisition means no handle exists
/// and nothing needs releasing.
pub trait TransportProvider {
    type Transport: Transport;

    /// Allocate and initialise a new transport session.
    fn acquire(&mut self) -> Result<Self::Transport>;
}

impl<F, T> TransportProvider for F
where
    F: FnMut() -> Result<T>,
    T: Transport,
{
    type Transport = T;

    fn acquire(&mut self) -> Result<T> {
        self()
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn wait_for_connection(&mut self, session: &SessionName) -> bool {
        (**self).wait_for_connection(session)
    }

    fn write_video(&mut self, frame: &FrameDelivery<'_>) -> bool {
        (**self).write_video(frame)
    }
}
