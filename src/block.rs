//! Encoded header block with reserved leading headroom.

use bytes::Bytes;

/// An HPACK-encoded header block.
///
/// The backing buffer starts with `headroom` spare bytes that outer framing
/// layers can fill with [`prepend`](Self::prepend) without reallocating.
/// The headroom is not part of the block's data.
#[derive(Clone, PartialEq, Eq)]
pub struct HeaderBlock {
    buf: Vec<u8>,
    start: usize,
}

impl std::fmt::Debug for HeaderBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeaderBlock")
            .field("headroom", &self.start)
            .field("len", &self.len())
            .finish()
    }
}

impl HeaderBlock {
    /// Wrap `buf`, treating its first `headroom` bytes as spare space.
    ///
    /// `headroom` is clamped to the buffer length.
    pub fn from_parts(buf: Vec<u8>, headroom: usize) -> Self {
        let start = headroom.min(buf.len());
        Self { buf, start }
    }

    /// Remaining spare bytes in front of the data.
    pub fn headroom(&self) -> usize {
        self.start
    }

    /// Length of the data, headroom excluded.
    pub fn len(&self) -> usize {
        self.buf.len() - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[self.start..]
    }

    /// Copy `prefix` into the headroom directly in front of the data.
    ///
    /// Returns `false` and leaves the block untouched if the headroom is too
    /// small.
    pub fn prepend(&mut self, prefix: &[u8]) -> bool {
        if prefix.len() > self.start {
            return false;
        }
        let new_start = self.start - prefix.len();
        self.buf[new_start..self.start].copy_from_slice(prefix);
        self.start = new_start;
        true
    }

    /// Convert into `Bytes` covering only the data.
    pub fn into_bytes(self) -> Bytes {
        let start = self.start;
        Bytes::from(self.buf).slice(start..)
    }
}

impl AsRef<[u8]> for HeaderBlock {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}
