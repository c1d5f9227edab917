//! Test doubles for the transport layer
//!
//! [`MockProvider`] hands out [`RecordingTransport`]s that append every call
//! they receive to a shared [`TransportLog`], including their own release on
//! drop. Tests and benchmarks use it to observe exactly what an output did to
//! its handle.

#![cfg(any(test, feature = "benchmark"))]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::transport::{Transport, TransportProvider};
use crate::types::{FrameDelivery, SessionName};
use crate::{OutputError, Result};

/// One call observed by a [`RecordingTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    Acquired { id: usize },
    WaitForConnection { id: usize, session: String },
    WriteVideo { id: usize, data: Vec<u8>, duration_us: u64 },
    Released { id: usize },
}

/// Shared, ordered record of transport calls.
#[derive(Debug, Clone, Default)]
pub struct TransportLog {
    events: Arc<Mutex<Vec<TransportEvent>>>,
}

impl TransportLog {
    fn push(&self, event: TransportEvent) {
        self.lock().push(event);
    }

    fn lock(&self) -> MutexGuard<'_, Vec<TransportEvent>> {
        // A panicking test thread must not hide the log from the assertions
        self.events.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn events(&self) -> Vec<TransportEvent> {
        self.lock().clone()
    }

    pub fn acquired(&self) -> usize {
        self.count(|e| matches!(e, TransportEvent::Acquired { .. }))
    }

    pub fn released(&self) -> usize {
        self.count(|e| matches!(e, TransportEvent::Released { .. }))
    }

    pub fn waits(&self) -> usize {
        self.count(|e| matches!(e, TransportEvent::WaitForConnection { .. }))
    }

    /// Durations of every write attempt, in order.
    pub fn write_durations(&self) -> Vec<u64> {
        self.lock()
            .iter()
            .filter_map(|e| match e {
                TransportEvent::WriteVideo { duration_us, .. } => Some(*duration_us),
                _ => None,
            })
            .collect()
    }

    /// Payloads of every write attempt, in order.
    pub fn write_payloads(&self) -> Vec<Vec<u8>> {
        self.lock()
            .iter()
            .filter_map(|e| match e {
                TransportEvent::WriteVideo { data, .. } => Some(data.clone()),
                _ => None,
            })
            .collect()
    }

    fn count(&self, predicate: impl Fn(&TransportEvent) -> bool) -> usize {
        self.lock().iter().filter(|e| predicate(e)).count()
    }
}

/// Transport that records its calls and answers from a script.
#[derive(Debug)]
pub struct RecordingTransport {
    id: usize,
    log: TransportLog,
    connect: bool,
    /// Results for upcoming writes; once empty, `default_write` is used
    writes: VecDeque<bool>,
    default_write: bool,
    record_payloads: bool,
}

impl Transport for RecordingTransport {
    fn wait_for_connection(&mut self, session: &SessionName) -> bool {
        self.log.push(TransportEvent::WaitForConnection {
            id: self.id,
            session: session.as_str().to_string(),
        });
        self.connect
    }

    fn write_video(&mut self, frame: &FrameDelivery<'_>) -> bool {
        let data = if self.record_payloads { frame.data.to_vec() } else { Vec::new() };
        self.log.push(TransportEvent::WriteVideo {
            id: self.id,
            data,
            duration_us: frame.duration_us,
        });
        self.writes.pop_front().unwrap_or(self.default_write)
    }
}

impl Drop for RecordingTransport {
    fn drop(&mut self) {
        self.log.push(TransportEvent::Released { id: self.id });
    }
}

/// Provider producing [`RecordingTransport`]s.
#[derive(Debug, Clone)]
pub struct MockProvider {
    log: TransportLog,
    next_id: usize,
    fail_acquire: bool,
    connect: bool,
    writes: VecDeque<bool>,
    default_write: bool,
    record_payloads: bool,
}

impl MockProvider {
    /// Provider whose transports connect and accept every write.
    pub fn new() -> Self {
        Self {
            log: TransportLog::default(),
            next_id: 0,
            fail_acquire: false,
            connect: true,
            writes: VecDeque::new(),
            default_write: true,
            record_payloads: true,
        }
    }

    /// Make acquisition fail as if the native init returned null.
    pub fn failing_acquire(mut self) -> Self {
        self.fail_acquire = true;
        self
    }

    /// Make the connection handshake fail.
    pub fn refusing_connection(mut self) -> Self {
        self.connect = false;
        self
    }

    /// Script the results of the first writes, in order.
    pub fn with_write_results(mut self, results: impl IntoIterator<Item = bool>) -> Self {
        self.writes = results.into_iter().collect();
        self
    }

    /// Result of writes once the script is exhausted.
    pub fn with_default_write(mut self, result: bool) -> Self {
        self.default_write = result;
        self
    }

    /// Skip copying payloads into the log.
    pub fn without_payloads(mut self) -> Self {
        self.record_payloads = false;
        self
    }

    pub fn log(&self) -> TransportLog {
        self.log.clone()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl TransportProvider for MockProvider {
    type Transport = RecordingTransport;

    fn acquire(&mut self) -> Result<RecordingTransport> {
        if self.fail_acquire {
            return Err(OutputError::transport_init("mock init returned null"));
        }

        let id = self.next_id;
        self.next_id += 1;
        self.log.push(TransportEvent::Acquired { id });

        Ok(RecordingTransport {
            id,
            log: self.log.clone(),
            connect: self.connect,
            writes: self.writes.clone(),
            default_write: self.default_write,
            record_payloads: self.record_payloads,
        })
    }
}
