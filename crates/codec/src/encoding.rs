//! Base64 helpers shared by both codec directions.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use reviewdesk_core::error::CodecError;

/// Encode raw bytes.
pub fn encode_bytes(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Encode text through its UTF-8 bytes, so non-ASCII survives intact.
pub fn encode_text(text: &str) -> String {
    STANDARD.encode(text.as_bytes())
}

pub fn decode(data: &str) -> Result<Vec<u8>, CodecError> {
    STANDARD
        .decode(data.trim())
        .map_err(|e| CodecError::Base64(e.to_string()))
}

/// Decode a payload that is expected to hold UTF-8 text.
pub fn decode_text(data: &str) -> Result<String, CodecError> {
    let bytes = decode(data)?;
    String::from_utf8(bytes).map_err(|e| CodecError::Base64(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unicode_text_round_trips() {
        let text = "Résumé — 契約書 ✅ naïve";
        assert_eq!(decode_text(&encode_text(text)).unwrap(), text);
    }

    #[test]
    fn invalid_payload_is_an_error() {
        assert!(matches!(decode("not base64!!"), Err(CodecError::Base64(_))));
    }

    #[test]
    fn binary_payload_is_not_text() {
        let data = encode_bytes(&[0xff, 0xfe, 0x00]);
        assert!(decode_text(&data).is_err());
        assert_eq!(decode(&data).unwrap(), vec![0xff, 0xfe, 0x00]);
    }
}
