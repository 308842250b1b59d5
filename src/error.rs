use std::io;

/// Decode failures surfaced to callers of [`HpackCodec::decode`](crate::HpackCodec::decode).
///
/// Every engine-level cause other than an oversized header list collapses
/// into [`DecodeError::BadEncoding`]. Either way the connection's HPACK state
/// should be considered lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The decoded header list exceeded the configured limit.
    #[error("headers too large")]
    HeadersTooLarge,

    /// The header block is malformed.
    #[error("bad header encoding")]
    BadEncoding,
}

/// Errors produced by a compression engine while encoding.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    /// Writing the header block failed.
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Detailed error state reported by a [`HeaderDecoder`](crate::HeaderDecoder).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// The header list grew past `limit` bytes (RFC 7541 entry size).
    #[error("header list size {size} exceeds limit {limit}")]
    HeadersTooLarge { size: usize, limit: usize },

    /// The declared block length runs past the end of the input.
    #[error("header block truncated: declared {declared} bytes, {available} available")]
    Truncated { declared: usize, available: usize },

    /// The engine rejected the block (bad index, bad integer, bad literal...).
    #[error("compression error: {0}")]
    Compression(String),
}

impl From<&EngineError> for DecodeError {
    fn from(err: &EngineError) -> Self {
        match err {
            EngineError::HeadersTooLarge { .. } => DecodeError::HeadersTooLarge,
            EngineError::Truncated { .. } | EngineError::Compression(_) => DecodeError::BadEncoding,
        }
    }
}
