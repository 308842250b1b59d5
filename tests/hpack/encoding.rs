//! Tests for HPACK encoding

use h2_header_codec::{
    HeaderDecoder, HeaderEncoder, HpackDecoder, HpackEncoder, HpackHeader, MessageType,
};

const LIMIT: usize = h2_header_codec::DEFAULT_MAX_HEADER_LIST_SIZE;

fn roundtrip(
    encoder: &mut HpackEncoder,
    decoder: &mut HpackDecoder,
    headers: &[HpackHeader],
) -> Vec<HpackHeader> {
    let block = encoder.encode(headers, 0).unwrap().unwrap();
    let mut decoded = Vec::new();
    let consumed = decoder.decode(block.as_bytes(), &mut decoded).unwrap();
    assert_eq!(consumed, block.len());
    decoded
}

#[test]
fn test_encode_decode_roundtrip() {
    let mut encoder = HpackEncoder::new(MessageType::Response);
    let mut decoder = HpackDecoder::new(MessageType::Response, LIMIT);
    let headers = vec![
        HpackHeader::new(":status", "200"),
        HpackHeader::new("content-type", "application/json"),
    ];
    let decoded = roundtrip(&mut encoder, &mut decoder, &headers);
    assert_eq!(decoded.len(), 2);
}

#[test]
fn test_encode_literal_header() {
    let mut encoder = HpackEncoder::new(MessageType::Request);
    let mut decoder = HpackDecoder::new(MessageType::Request, LIMIT);
    let headers = vec![HpackHeader::new("x-custom", "value")];
    let decoded = roundtrip(&mut encoder, &mut decoder, &headers);
    assert_eq!(&decoded[0].name[..], b"x-custom");
}

#[test]
fn test_dynamic_table_shrinks_repeat_blocks() {
    let mut encoder = HpackEncoder::new(MessageType::Request);
    let mut decoder = HpackDecoder::new(MessageType::Request, LIMIT);
    let headers = vec![
        HpackHeader::new(":method", "GET"),
        HpackHeader::new("x-request-id", "abc-123-def"),
    ];

    let first = encoder.encode(&headers, 0).unwrap().unwrap();
    let second = encoder.encode(&headers, 0).unwrap().unwrap();
    assert!(second.len() < first.len());

    let mut decoded = Vec::new();
    decoder.decode(first.as_bytes(), &mut decoded).unwrap();
    decoded.clear();
    decoder.decode(second.as_bytes(), &mut decoded).unwrap();
    assert_eq!(decoded, headers);
}

#[test]
fn test_encode_headroom() {
    let mut encoder = HpackEncoder::new(MessageType::Request);
    let mut block = encoder
        .encode(&[HpackHeader::new(":method", "GET")], 9)
        .unwrap()
        .unwrap();
    assert_eq!(block.headroom(), 9);
    assert_eq!(block.as_bytes(), &[0x82]);

    assert!(block.prepend(&[0, 0, 1, 1, 4, 0, 0, 0, 1]));
    assert_eq!(block.len(), 10);
    assert_eq!(block.headroom(), 0);
}

#[test]
fn test_encode_decode_comprehensive_roundtrip() {
    // Comprehensive roundtrip with mixed pseudo + regular headers
    let mut encoder = HpackEncoder::new(MessageType::Response);
    let mut decoder = HpackDecoder::new(MessageType::Response, LIMIT);

    let headers = vec![
        HpackHeader::new(":status", "200"),
        HpackHeader::new("content-type", "application/json"),
        HpackHeader::new("x-request-id", "abc-123-def"),
        HpackHeader::new("set-cookie", "session=xyz"),
        HpackHeader::new("set-cookie", "theme=dark"),
    ];

    let decoded = roundtrip(&mut encoder, &mut decoder, &headers);
    assert_eq!(decoded, headers);
}
