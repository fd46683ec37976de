//! Base64 payload decoding
//!
//! The generation service transports raw PCM as base64 text (standard
//! alphabet). Decoding is the first pipeline stage and has no knowledge of
//! the sample format; that arrives out-of-band as a [`PcmFormat`].
//!
//! [`PcmFormat`]: crate::audio::PcmFormat

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::Result;

/// Decode a base64 audio payload into raw bytes
///
/// An empty string decodes to zero bytes; that is a valid (silent) payload,
/// not an error.
///
/// # Errors
///
/// Returns [`Error::Decode`](crate::Error::Decode) if the input contains
/// characters outside the standard base64 alphabet or has invalid padding.
pub fn decode_base64(payload: &str) -> Result<Vec<u8>> {
    Ok(STANDARD.decode(payload)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_empty_payload() {
        assert_eq!(decode_base64("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_decode_known_bytes() {
        // "AAD/fw==" is [0x00, 0x00, 0xFF, 0x7F]
        assert_eq!(decode_base64("AAD/fw==").unwrap(), vec![0x00, 0x00, 0xFF, 0x7F]);
    }

    #[test]
    fn test_decode_rejects_invalid_alphabet() {
        assert!(decode_base64("not base64!!").is_err());
    }

    #[test]
    fn test_decode_rejects_bad_padding() {
        assert!(decode_base64("AAD=").is_err());
    }

    #[test]
    fn test_decode_is_deterministic() {
        let a = decode_base64("SGVsbG8gd29ybGQ=").unwrap();
        let b = decode_base64("SGVsbG8gd29ybGQ=").unwrap();
        assert_eq!(a, b);
    }
}
