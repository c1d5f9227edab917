//! Owned handle over the eyecam_net C interface

use crate::transport::{Transport, TransportProvider};
use crate::types::{FrameDelivery, SessionName};
use crate::{OutputError, Result};
use std::ffi::{c_char, c_int, c_void};
use std::ptr::NonNull;
use tracing::{debug, trace};

#[link(name = "eyecam_net")]
unsafe extern "C" {
    fn eyecam_net_init() -> *const c_void;
    fn eyecam_net_deinit(state: *const c_void);
    fn eyecam_net_wait_for_connection(state: *const c_void, name: *const c_char) -> c_int;
    fn eyecam_net_write_video(
        state: *const c_void,
        len: usize,
        data: *const c_void,
        duration_us: u64,
    ) -> c_int;
}

/// Exclusive owner of one eyecam_net session.
///
/// The state pointer is only ever handed back to the library while `self` is
/// alive, and `eyecam_net_deinit` runs once from `Drop`.
pub struct NetHandle {
    state: NonNull<c_void>,
}

impl NetHandle {
    /// Initialise a new transport session.
    pub fn acquire() -> Result<Self> {
        trace!("Initialising eyecam_net transport");

        let raw = unsafe { eyecam_net_init() };
        let state = NonNull::new(raw as *mut c_void)
            .ok_or_else(|| OutputError::transport_init("eyecam_net_init returned null"))?;

        debug!(state = ?state, "eyecam_net transport initialised");
        Ok(Self { state })
    }
}

impl Transport for NetHandle {
    fn wait_for_connection(&mut self, session: &SessionName) -> bool {
        let connected = unsafe {
            eyecam_net_wait_for_connection(self.state.as_ptr(), session.as_c_str().as_ptr())
        };
        debug!(session = %session, connected, "eyecam_net_wait_for_connection returned");
        connected != 0
    }

    fn write_video(&mut self, frame: &FrameDelivery<'_>) -> bool {
        let written = unsafe {
            eyecam_net_write_video(
                self.state.as_ptr(),
                frame.len(),
                frame.data.as_ptr() as *const c_void,
                frame.duration_us,
            )
        };
        written != 0
    }
}

impl Drop for NetHandle {
    fn drop(&mut self) {
        debug!(state = ?self.state, "Releasing eyecam_net transport");
        unsafe {
            eyecam_net_deinit(self.state.as_ptr());
        }
    }
}

// SAFETY: the library state is owned by exactly one NetHandle and every call
// goes through `&mut self`, so it is never touched from two threads at once.
unsafe impl Send for NetHandle {}

/// Provider that acquires [`NetHandle`]s from the native library.
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeProvider;

impl TransportProvider for NativeProvider {
    type Transport = NetHandle;

    fn acquire(&mut self) -> Result<NetHandle> {
        NetHandle::acquire()
    }
}
