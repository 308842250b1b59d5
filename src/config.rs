/// Default cap on the decoded header list, in RFC 7541 entry-size bytes.
pub const DEFAULT_MAX_HEADER_LIST_SIZE: usize = 128 * 1024;

/// Tunables for an [`HpackCodec`](crate::HpackCodec).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecConfig {
    /// Spare bytes reserved in front of every encoded block.
    pub encode_headroom: usize,
    /// Largest header list the decoder accepts before failing with
    /// `HeadersTooLarge`.
    pub max_header_list_size: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            encode_headroom: 0,
            max_header_list_size: DEFAULT_MAX_HEADER_LIST_SIZE,
        }
    }
}

impl CodecConfig {
    pub fn with_encode_headroom(mut self, headroom: usize) -> Self {
        self.encode_headroom = headroom;
        self
    }

    pub fn with_max_header_list_size(mut self, size: usize) -> Self {
        self.max_header_list_size = size;
        self
    }
}
