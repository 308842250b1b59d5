//! Direction-aware HPACK header codec.
//!
//! [`HpackCodec`] sits between the transport codec's header lists and a
//! stateful compression engine. It binds the engine's encoder and decoder to
//! the request or response role, lowercases names on the way out, flattens
//! decoded fields into a piece list on the way in, keeps per-operation size
//! accounting, and folds engine failures into [`DecodeError`].

use std::fmt;
use std::sync::Arc;

use bytes::Buf;
use tracing::{error, trace};

use crate::block::HeaderBlock;
use crate::config::CodecConfig;
use crate::error::{DecodeError, EncodeError, EngineError};
use crate::header::{Header, HeaderPiece, HpackHeader};
use crate::hpack::{HeaderDecoder, HeaderEncoder, HpackDecoder, HpackEncoder, MessageType};
use crate::stats::{CodecType, HeaderCodecStats, HeaderSize};

/// Protocol identifier negotiated for this header codec.
pub const HPACK_NPN: &str = "spdy/3.1-fb-0.5";

/// Which side of the connection this endpoint is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportDirection {
    /// Server side: decodes requests, encodes responses.
    Downstream,
    /// Client side: encodes requests, decodes responses.
    Upstream,
}

impl TransportDirection {
    /// `(encoder role, decoder role)` for this direction.
    pub fn roles(self) -> (MessageType, MessageType) {
        match self {
            TransportDirection::Downstream => (MessageType::Response, MessageType::Request),
            TransportDirection::Upstream => (MessageType::Request, MessageType::Response),
        }
    }
}

/// A successful decode.
///
/// `pieces` borrows the codec's reused output buffer, so it must be consumed
/// before the next call to [`HpackCodec::decode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOutcome<'a> {
    /// Name piece then value piece for every decoded header, in block order.
    pub pieces: &'a [HeaderPiece],
    pub bytes_consumed: usize,
}

impl<'a> DecodeOutcome<'a> {
    /// Number of decoded headers.
    pub fn header_count(&self) -> usize {
        self.pieces.len() / 2
    }

    /// Iterate `(name, value)` piece pairs.
    pub fn headers(&self) -> impl Iterator<Item = (&'a HeaderPiece, &'a HeaderPiece)> + 'a {
        let pieces: &'a [HeaderPiece] = self.pieces;
        pieces.chunks_exact(2).map(|pair| (&pair[0], &pair[1]))
    }
}

/// Per-connection HPACK codec.
///
/// Not thread-safe: the engine's dynamic tables are mutated by every call, and
/// every operation takes `&mut self`.
pub struct HpackCodec<E = HpackEncoder, D = HpackDecoder> {
    direction: TransportDirection,
    encoder: E,
    decoder: D,
    encode_headroom: usize,
    encoded_size: HeaderSize,
    decoded_size: HeaderSize,
    stats: Option<Arc<dyn HeaderCodecStats>>,
    // reused across decode calls
    decoded_headers: Vec<HpackHeader>,
    out_pieces: Vec<HeaderPiece>,
    scratch: Vec<u8>,
}

impl<E, D> fmt::Debug for HpackCodec<E, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HpackCodec")
            .field("direction", &self.direction)
            .field("encode_headroom", &self.encode_headroom)
            .field("encoded_size", &self.encoded_size)
            .field("decoded_size", &self.decoded_size)
            .field("stats", &self.stats.is_some())
            .finish()
    }
}

impl HpackCodec {
    /// Codec backed by `fluke-hpack` with the default [`CodecConfig`].
    pub fn new(direction: TransportDirection) -> Self {
        Self::with_config(direction, CodecConfig::default())
    }

    /// Codec backed by `fluke-hpack`, tuned by `config`.
    pub fn with_config(direction: TransportDirection, config: CodecConfig) -> Self {
        let mut codec = Self::with_engines(direction, HpackEncoder::new, |role| {
            HpackDecoder::new(role, config.max_header_list_size)
        });
        codec.encode_headroom = config.encode_headroom;
        codec
    }
}

impl<E: HeaderEncoder, D: HeaderDecoder> HpackCodec<E, D> {
    /// Build a codec from engine constructors, each handed the role that
    /// `direction` assigns to it.
    pub fn with_engines(
        direction: TransportDirection,
        make_encoder: impl FnOnce(MessageType) -> E,
        make_decoder: impl FnOnce(MessageType) -> D,
    ) -> Self {
        let (encoder_role, decoder_role) = direction.roles();
        Self {
            direction,
            encoder: make_encoder(encoder_role),
            decoder: make_decoder(decoder_role),
            encode_headroom: 0,
            encoded_size: HeaderSize::default(),
            decoded_size: HeaderSize::default(),
            stats: None,
            decoded_headers: Vec::new(),
            out_pieces: Vec::new(),
            scratch: Vec::new(),
        }
    }

    /// The direction this codec was built for.
    pub fn direction(&self) -> TransportDirection {
        self.direction
    }

    /// Role of the encoder: `Response` downstream, `Request` upstream.
    pub fn encoder_role(&self) -> MessageType {
        self.encoder.role()
    }

    /// Role of the decoder: `Request` downstream, `Response` upstream.
    pub fn decoder_role(&self) -> MessageType {
        self.decoder.role()
    }

    /// The underlying encoding engine.
    pub fn encoder(&self) -> &E {
        &self.encoder
    }

    /// The underlying decoding engine, e.g. to inspect its error state.
    pub fn decoder(&self) -> &D {
        &self.decoder
    }

    /// Sizes recorded by the last successful encode.
    pub fn encoded_size(&self) -> HeaderSize {
        self.encoded_size
    }

    /// Sizes recorded by the last successful decode.
    pub fn decoded_size(&self) -> HeaderSize {
        self.decoded_size
    }

    /// Spare bytes to reserve in front of every later encoded block.
    pub fn set_encode_headroom(&mut self, headroom: usize) {
        self.encode_headroom = headroom;
    }

    /// Set the decoder's header list limit, beyond which decodes fail with
    /// [`DecodeError::HeadersTooLarge`].
    pub fn set_max_uncompressed(&mut self, size: usize) {
        self.decoder.set_max_header_list_size(size);
    }

    /// Attach a stats sink, or detach with `None`.
    pub fn set_stats(&mut self, stats: Option<Arc<dyn HeaderCodecStats>>) {
        self.stats = stats;
    }

    /// Compress `headers` into a header block.
    ///
    /// Names are lowercased (ASCII only) before they reach the engine; values
    /// pass through untouched. Returns `Ok(None)` if the engine produced no
    /// block.
    pub fn encode(&mut self, headers: &[Header]) -> Result<Option<HeaderBlock>, EncodeError> {
        let mut uncompressed = 0;
        let converted: Vec<HpackHeader> = headers
            .iter()
            .map(|h| {
                let header = HpackHeader::normalized(h);
                uncompressed += header.uncompressed_size();
                header
            })
            .collect();

        let block = match self.encoder.encode(&converted, self.encode_headroom) {
            Ok(block) => block,
            Err(e) => {
                error!(
                    direction = ?self.direction,
                    role = %self.encoder.role(),
                    "hpack encode failed: {e}"
                );
                return Err(e);
            }
        };

        self.encoded_size = HeaderSize {
            compressed: block.as_ref().map_or(0, HeaderBlock::len),
            uncompressed,
        };
        if let Some(stats) = &self.stats {
            stats.record_encode(CodecType::Hpack, self.encoded_size);
        }
        trace!(
            headers = headers.len(),
            compressed = self.encoded_size.compressed,
            uncompressed,
            "encoded header block"
        );
        Ok(block)
    }

    /// Decode the `length`-byte header block at the front of `cursor`.
    ///
    /// Whenever the cursor holds all `length` bytes, it is advanced past the
    /// block, whether or not decoding succeeds. A cursor shorter than
    /// `length` is left untouched and the decode fails with
    /// [`DecodeError::BadEncoding`]; the engine never sees those bytes, so
    /// the decoder stays usable.
    pub fn decode<B: Buf>(
        &mut self,
        cursor: &mut B,
        length: usize,
    ) -> Result<DecodeOutcome<'_>, DecodeError> {
        self.out_pieces.clear();
        self.decoded_headers.clear();

        let available = cursor.remaining();
        let result = if length > available {
            Err(EngineError::Truncated {
                declared: length,
                available,
            })
        } else if cursor.chunk().len() >= length {
            let result = self
                .decoder
                .decode(&cursor.chunk()[..length], &mut self.decoded_headers);
            cursor.advance(length);
            result
        } else {
            // block spans several chunks
            self.scratch.clear();
            self.scratch.resize(length, 0);
            cursor.copy_to_slice(&mut self.scratch);
            self.decoder.decode(&self.scratch, &mut self.decoded_headers)
        };

        let consumed = match result {
            Ok(consumed) => consumed,
            Err(err) => return Err(self.decode_failed(&err)),
        };

        let mut uncompressed = 0;
        for h in &self.decoded_headers {
            // HPACK allows repeated names, so every piece is multi-valued.
            self.out_pieces.push(HeaderPiece::new(h.name.clone(), true));
            self.out_pieces.push(HeaderPiece::new(h.value.clone(), true));
            uncompressed += h.uncompressed_size();
        }

        self.decoded_size = HeaderSize {
            compressed: consumed,
            uncompressed,
        };
        if let Some(stats) = &self.stats {
            stats.record_decode(CodecType::Hpack, self.decoded_size);
        }
        trace!(
            headers = self.decoded_headers.len(),
            compressed = consumed,
            uncompressed,
            "decoded header block"
        );

        Ok(DecodeOutcome {
            pieces: &self.out_pieces,
            bytes_consumed: consumed,
        })
    }

    fn decode_failed(&mut self, err: &EngineError) -> DecodeError {
        error!(
            direction = ?self.direction,
            error = %err,
            "decoder state: {}",
            self.decoder.table_state()
        );
        if let Some(stats) = &self.stats {
            stats.record_decode_error(CodecType::Hpack);
        }
        DecodeError::from(err)
    }
}
