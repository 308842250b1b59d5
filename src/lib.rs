//! h2-header-codec: a direction-aware HPACK header codec
//!
//! This crate adapts the header lists of an HTTP transport codec to a stateful
//! HPACK compression engine. It is sans-I/O: callers hand it header lists and
//! byte cursors and get header blocks and header pieces back.
//!
//! # Features
//!
//! - **Role binding**: a downstream (server) codec decodes requests and
//!   encodes responses; an upstream (client) codec does the reverse
//! - **Name normalization**: header names are lowercased before encoding
//! - **Size accounting**: compressed/uncompressed sizes for every operation,
//!   optionally pushed to a shared stats sink
//! - **Typed decode errors**: engine failures collapse to `HeadersTooLarge`
//!   or `BadEncoding`
//! - **Pluggable engine**: `fluke-hpack` by default, or anything implementing
//!   [`HeaderEncoder`] / [`HeaderDecoder`]
//!
//! # Quick Start
//!
//! ```rust
//! use h2_header_codec::{Header, HpackCodec, TransportDirection};
//!
//! let mut server = HpackCodec::new(TransportDirection::Downstream);
//! let mut client = HpackCodec::new(TransportDirection::Upstream);
//!
//! let block = server
//!     .encode(&[Header::new(":status", "200"), Header::new("Content-Type", "text/html")])
//!     .unwrap()
//!     .unwrap();
//!
//! let len = block.len();
//! let outcome = client.decode(&mut block.as_bytes(), len).unwrap();
//! for (name, value) in outcome.headers() {
//!     println!("{}: {}", name.to_str_lossy(), value.to_str_lossy());
//! }
//! assert_eq!(outcome.pieces[2].as_bytes(), b"content-type");
//! ```
//!
//! # Architecture
//!
//! It does NOT provide:
//! - The HPACK dynamic table, Huffman or integer coding (see `fluke-hpack`)
//! - HTTP/2 framing (you supply complete header blocks)
//! - Stats aggregation beyond the [`CodecCounters`] totals

pub mod block;
pub mod codec;
pub mod config;
pub mod error;
pub mod header;
pub mod hpack;
pub mod stats;

pub use block::HeaderBlock;
pub use codec::{DecodeOutcome, HpackCodec, TransportDirection, HPACK_NPN};
pub use config::{CodecConfig, DEFAULT_MAX_HEADER_LIST_SIZE};
pub use error::{DecodeError, EncodeError, EngineError};
pub use header::{Header, HeaderPiece, HpackHeader, HEADER_OVERHEAD};
pub use hpack::{HeaderDecoder, HeaderEncoder, HpackDecoder, HpackEncoder, MessageType};
pub use stats::{CodecCounters, CodecType, CounterSnapshot, HeaderCodecStats, HeaderSize};
