//! Size accounting sinks.

use std::sync::atomic::{AtomicU64, Ordering};

/// Which header compression scheme produced a stats event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodecType {
    Hpack,
}

/// Compressed and uncompressed byte counts for one encode or decode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeaderSize {
    pub compressed: usize,
    pub uncompressed: usize,
}

/// Receives per-operation size events from a header codec.
///
/// One recorder is usually shared by every connection, hence `Send + Sync`
/// and `&self` receivers.
pub trait HeaderCodecStats: Send + Sync {
    fn record_encode(&self, codec: CodecType, size: HeaderSize);
    fn record_decode(&self, codec: CodecType, size: HeaderSize);
    fn record_decode_error(&self, codec: CodecType);
}

/// Lock-free running totals.
#[derive(Debug, Default)]
pub struct CodecCounters {
    encodes: AtomicU64,
    encoded_compressed: AtomicU64,
    encoded_uncompressed: AtomicU64,
    decodes: AtomicU64,
    decoded_compressed: AtomicU64,
    decoded_uncompressed: AtomicU64,
    decode_errors: AtomicU64,
}

/// Point-in-time copy of [`CodecCounters`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CounterSnapshot {
    pub encodes: u64,
    pub encoded_compressed: u64,
    pub encoded_uncompressed: u64,
    pub decodes: u64,
    pub decoded_compressed: u64,
    pub decoded_uncompressed: u64,
    pub decode_errors: u64,
}

impl CodecCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> CounterSnapshot {
        CounterSnapshot {
            encodes: self.encodes.load(Ordering::Relaxed),
            encoded_compressed: self.encoded_compressed.load(Ordering::Relaxed),
            encoded_uncompressed: self.encoded_uncompressed.load(Ordering::Relaxed),
            decodes: self.decodes.load(Ordering::Relaxed),
            decoded_compressed: self.decoded_compressed.load(Ordering::Relaxed),
            decoded_uncompressed: self.decoded_uncompressed.load(Ordering::Relaxed),
            decode_errors: self.decode_errors.load(Ordering::Relaxed),
        }
    }
}

impl HeaderCodecStats for CodecCounters {
    fn record_encode(&self, _codec: CodecType, size: HeaderSize) {
        self.encodes.fetch_add(1, Ordering::Relaxed);
        self.encoded_compressed
            .fetch_add(size.compressed as u64, Ordering::Relaxed);
        self.encoded_uncompressed
            .fetch_add(size.uncompressed as u64, Ordering::Relaxed);
    }

    fn record_decode(&self, _codec: CodecType, size: HeaderSize) {
        self.decodes.fetch_add(1, Ordering::Relaxed);
        self.decoded_compressed
            .fetch_add(size.compressed as u64, Ordering::Relaxed);
        self.decoded_uncompressed
            .fetch_add(size.uncompressed as u64, Ordering::Relaxed);
    }

    fn record_decode_error(&self, _codec: CodecType) {
        self.decode_errors.fetch_add(1, Ordering::Relaxed);
    }
}
