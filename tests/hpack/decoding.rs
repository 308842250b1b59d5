//! Tests for HPACK decoding

use h2_header_codec::{EngineError, HeaderDecoder, HpackDecoder, HpackHeader, MessageType};

const LIMIT: usize = h2_header_codec::DEFAULT_MAX_HEADER_LIST_SIZE;

fn decode(decoder: &mut HpackDecoder, data: &[u8]) -> Result<Vec<HpackHeader>, EngineError> {
    let mut headers = Vec::new();
    decoder.decode(data, &mut headers)?;
    Ok(headers)
}

#[test]
fn test_decode_indexed_header() {
    let mut decoder = HpackDecoder::new(MessageType::Request, LIMIT);

    // 0x82 = indexed header, index 2 = :method: GET
    let headers = decode(&mut decoder, &[0x82]).unwrap();

    assert_eq!(headers, vec![HpackHeader::new(":method", "GET")]);
}

#[test]
fn test_decode_multiple_indexed_headers() {
    let mut decoder = HpackDecoder::new(MessageType::Request, LIMIT);

    // 0x82 = :method: GET, 0x86 = :scheme: http, 0x84 = :path: /
    let headers = decode(&mut decoder, &[0x82, 0x86, 0x84]).unwrap();

    assert_eq!(
        headers,
        vec![
            HpackHeader::new(":method", "GET"),
            HpackHeader::new(":scheme", "http"),
            HpackHeader::new(":path", "/"),
        ]
    );
}

#[test]
fn test_decode_literal_indexed_name() {
    let mut decoder = HpackDecoder::new(MessageType::Request, LIMIT);

    // 0x41 = literal with indexing, indexed name (index 1 = :authority)
    let data = [
        0x41, // Literal with indexing, name index 1
        0x0B, // Value length: 11
        b'e', b'x', b'a', b'm', b'p', b'l', b'e', b'.', b'c', b'o', b'm',
    ];

    let headers = decode(&mut decoder, &data).unwrap();
    assert_eq!(headers, vec![HpackHeader::new(":authority", "example.com")]);
}

#[test]
fn test_decode_duplicate_names_kept() {
    let mut decoder = HpackDecoder::new(MessageType::Response, LIMIT);

    // 0x00 = literal without indexing, new name; two set-cookie fields
    let mut data = Vec::new();
    for value in [b"a=1", b"b=2"] {
        data.push(0x00);
        data.push(10);
        data.extend_from_slice(b"set-cookie");
        data.push(3);
        data.extend_from_slice(value);
    }

    let headers = decode(&mut decoder, &data).unwrap();
    assert_eq!(headers.len(), 2);
    assert_eq!(headers[0].name, headers[1].name);
}

#[test]
fn test_decode_truncated_literal_fails() {
    let mut decoder = HpackDecoder::new(MessageType::Request, LIMIT);

    // Name length claims 6 bytes, only 2 follow
    let err = decode(&mut decoder, &[0x40, 0x06, b'c', b'u']).unwrap_err();
    assert!(matches!(err, EngineError::Compression(_)));
}

#[test]
fn test_decode_empty_block() {
    let mut decoder = HpackDecoder::new(MessageType::Request, LIMIT);
    let mut headers = Vec::new();
    assert_eq!(decoder.decode(&[], &mut headers).unwrap(), 0);
    assert!(headers.is_empty());
}
