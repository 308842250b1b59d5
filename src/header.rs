//! Header representations on both sides of the codec.
//!
//! [`Header`] is what the surrounding transport codec hands us; [`HpackHeader`]
//! is what the compression engine consumes and produces; [`HeaderPiece`] is
//! the flattened name-or-value fragment returned from a decode.

use bytes::Bytes;

/// Fixed per-header overhead added to uncompressed size accounting.
pub const HEADER_OVERHEAD: usize = 2;

/// A header field as seen by the transport codec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub name: String,
    pub value: String,
}

impl Header {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A header field in the form the compression engine works with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HpackHeader {
    pub name: Bytes,
    pub value: Bytes,
}

impl HpackHeader {
    pub fn new(name: impl Into<Bytes>, value: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Build the engine form of `header`, lowercasing the name.
    ///
    /// HPACK requires lowercase field names. Only ASCII is folded; values are
    /// copied untouched.
    pub fn normalized(header: &Header) -> Self {
        Self {
            name: Bytes::from(header.name.to_ascii_lowercase()),
            value: Bytes::copy_from_slice(header.value.as_bytes()),
        }
    }

    /// Contribution of this header to uncompressed size accounting.
    pub fn uncompressed_size(&self) -> usize {
        self.name.len() + self.value.len() + HEADER_OVERHEAD
    }
}

/// One half (name or value) of a decoded header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderPiece {
    data: Bytes,
    multi_valued: bool,
}

impl HeaderPiece {
    pub fn new(data: Bytes, multi_valued: bool) -> Self {
        Self { data, multi_valued }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Whether consumers should tolerate repeats of this header name.
    pub fn is_multi_valued(&self) -> bool {
        self.multi_valued
    }

    /// The piece as text, with invalid UTF-8 replaced.
    pub fn to_str_lossy(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.data)
    }
}
