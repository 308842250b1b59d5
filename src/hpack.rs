//! HPACK: Header Compression for HTTP/2 (RFC 7541)
//!
//! The compression engine seen by [`HpackCodec`](crate::HpackCodec). The
//! [`HeaderEncoder`] and [`HeaderDecoder`] traits are the seam; the
//! production engines wrap `fluke-hpack`, which owns the dynamic table,
//! integer coding and literal handling.

use std::fmt;

use bytes::Bytes;

use crate::block::HeaderBlock;
use crate::error::{EncodeError, EngineError};
use crate::header::HpackHeader;

/// Per-field overhead used for header list size limits (RFC 7541 §4.1).
pub const ENTRY_OVERHEAD: usize = 32;

/// Which message direction an engine instance compresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageType {
    Request,
    Response,
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageType::Request => f.write_str("request"),
            MessageType::Response => f.write_str("response"),
        }
    }
}

/// Encoding half of a compression engine.
pub trait HeaderEncoder {
    fn role(&self) -> MessageType;

    /// Encode `headers` in order, reserving `headroom` spare bytes in front
    /// of the block. `Ok(None)` means the engine produced no block.
    fn encode(
        &mut self,
        headers: &[HpackHeader],
        headroom: usize,
    ) -> Result<Option<HeaderBlock>, EncodeError>;
}

/// Decoding half of a compression engine.
pub trait HeaderDecoder {
    fn role(&self) -> MessageType;

    /// Decode one complete header block, appending fields to `headers`.
    /// Returns the number of bytes consumed.
    fn decode(&mut self, block: &[u8], headers: &mut Vec<HpackHeader>)
        -> Result<usize, EngineError>;

    /// The error that broke this decoder, if any.
    fn error(&self) -> Option<&EngineError>;

    fn has_error(&self) -> bool {
        self.error().is_some()
    }

    fn set_max_header_list_size(&mut self, size: usize);

    /// One-line dump of the decoder's state for diagnostics.
    fn table_state(&self) -> String;
}

/// HPACK decoder for HTTP/2 header blocks.
/// Wraps `fluke_hpack::Decoder` which maintains dynamic table state per-connection.
///
/// Errors are sticky: once a block fails, the dynamic table can no longer be
/// trusted and every later call reports the same error.
pub struct HpackDecoder {
    inner: fluke_hpack::Decoder<'static>,
    role: MessageType,
    max_header_list_size: usize,
    blocks_decoded: u64,
    error: Option<EngineError>,
}

impl fmt::Debug for HpackDecoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HpackDecoder")
            .field("role", &self.role)
            .field("max_header_list_size", &self.max_header_list_size)
            .field("blocks_decoded", &self.blocks_decoded)
            .field("error", &self.error)
            .finish()
    }
}

impl HpackDecoder {
    pub fn new(role: MessageType, max_header_list_size: usize) -> Self {
        Self {
            inner: fluke_hpack::Decoder::new(),
            role,
            max_header_list_size,
            blocks_decoded: 0,
            error: None,
        }
    }

    fn fail(&mut self, err: EngineError) -> EngineError {
        self.error = Some(err.clone());
        err
    }
}

impl HeaderDecoder for HpackDecoder {
    fn role(&self) -> MessageType {
        self.role
    }

    fn decode(
        &mut self,
        block: &[u8],
        headers: &mut Vec<HpackHeader>,
    ) -> Result<usize, EngineError> {
        if let Some(err) = &self.error {
            return Err(err.clone());
        }

        let limit = self.max_header_list_size;
        let mut list_size = 0usize;
        // Keep feeding the engine past the limit so its table stays coherent,
        // but stop buffering fields.
        let result = self.inner.decode_with_cb(block, |name, value| {
            list_size += name.len() + value.len() + ENTRY_OVERHEAD;
            if list_size <= limit {
                headers.push(HpackHeader::new(
                    Bytes::from(name.into_owned()),
                    Bytes::from(value.into_owned()),
                ));
            }
        });

        // The limit is breached on a field fluke already emitted, so it takes
        // precedence over any error fluke hits later in the block.
        if list_size > limit {
            headers.clear();
            return Err(self.fail(EngineError::HeadersTooLarge {
                size: list_size,
                limit,
            }));
        }
        if let Err(e) = result {
            headers.clear();
            return Err(self.fail(EngineError::Compression(format!("{:?}", e))));
        }

        self.blocks_decoded += 1;
        Ok(block.len())
    }

    fn error(&self) -> Option<&EngineError> {
        self.error.as_ref()
    }

    fn set_max_header_list_size(&mut self, size: usize) {
        self.max_header_list_size = size;
    }

    fn table_state(&self) -> String {
        let error = match &self.error {
            Some(err) => err.to_string(),
            None => "none".to_string(),
        };
        format!(
            "role={} blocks_decoded={} max_header_list_size={} error={}",
            self.role, self.blocks_decoded, self.max_header_list_size, error
        )
    }
}

/// HPACK encoder for HTTP/2 header blocks.
/// Wraps `fluke_hpack::Encoder` which maintains dynamic table state per-connection.
pub struct HpackEncoder {
    inner: fluke_hpack::Encoder<'static>,
    role: MessageType,
}

impl fmt::Debug for HpackEncoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HpackEncoder").field("role", &self.role).finish()
    }
}

impl HpackEncoder {
    pub fn new(role: MessageType) -> Self {
        Self {
            inner: fluke_hpack::Encoder::new(),
            role,
        }
    }
}

impl HeaderEncoder for HpackEncoder {
    fn role(&self) -> MessageType {
        self.role
    }

    fn encode(
        &mut self,
        headers: &[HpackHeader],
        headroom: usize,
    ) -> Result<Option<HeaderBlock>, EncodeError> {
        let pairs: Vec<(&[u8], &[u8])> = headers
            .iter()
            .map(|h| (&h.name[..], &h.value[..]))
            .collect();
        let mut buf = vec![0u8; headroom];
        self.inner.encode_into(pairs, &mut buf)?;
        Ok(Some(HeaderBlock::from_parts(buf, headroom)))
    }
}

// ============================================================================
// Tests
// ============================================================================
