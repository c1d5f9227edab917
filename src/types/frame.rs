//! Frame delivery records handed to the transport

/// One encoded frame on its way to the transport.
///
/// Built per call from a buffer the pipeline lends for the duration of the
/// call, consumed synchronously by the transport write, then discarded.
#[derive(Debug, Clone, Copy)]
pub struct FrameDelivery<'a> {
    /// Encoded bytes, borrowed from the pipeline
    pub data: &'a [u8],

    /// Absolute capture timestamp in microseconds
    pub timestamp_us: i64,

    /// Time since the previous delivered frame in microseconds
    pub duration_us: u64,
}

impl<'a> FrameDelivery<'a> {
    pub fn new(data: &'a [u8], timestamp_us: i64, duration_us: u64) -> Self {
        Self { data, timestamp_us, duration_us }
    }

    /// Length of the encoded buffer in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// An owned encoded frame, for pipelines that hand frames over a channel or stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedFrame {
    pub data: Vec<u8>,
    pub timestamp_us: i64,
    pub flags: super::FrameFlags,
}

impl EncodedFrame {
    pub fn new(data: Vec<u8>, timestamp_us: i64, flags: super::FrameFlags) -> Self {
        Self { data, timestamp_us, flags }
    }
}
