//! RIFF/WAVE container encoding
//!
//! Builds the canonical 44-byte PCM header by hand so every derived field
//! (chunk size, byte rate, block align) is computed from the stream's actual
//! format and payload length. Tests read the output back with an independent
//! WAV parser to keep the layout honest.

use crate::audio::pcm::{BYTES_PER_SAMPLE, SampleStream};

/// Length of the canonical PCM header in bytes
pub const HEADER_LEN: usize = 44;

/// RIFF chunk size contribution of everything before the data payload
const RIFF_CHUNK_BASE: u32 = 36;

/// Size of the `fmt ` subchunk for linear PCM
const FMT_CHUNK_LEN: u32 = 16;

/// WAVE format tag for uncompressed linear PCM
const FORMAT_LINEAR_PCM: u16 = 1;

/// Encode a sample stream as a complete RIFF/WAVE file
///
/// All header fields are little-endian and derived from the stream; a
/// zero-length stream yields a valid 44-byte file declaring an empty data
/// chunk, playable as silence.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn encode(stream: &SampleStream) -> Vec<u8> {
    let format = stream.format();
    let data_size = stream.byte_len() as u32;

    let mut wav = Vec::with_capacity(HEADER_LEN + stream.byte_len());

    // RIFF chunk descriptor
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&(RIFF_CHUNK_BASE + data_size).to_le_bytes());
    wav.extend_from_slice(b"WAVE");

    // fmt subchunk
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&FMT_CHUNK_LEN.to_le_bytes());
    wav.extend_from_slice(&FORMAT_LINEAR_PCM.to_le_bytes());
    wav.extend_from_slice(&format.channels.to_le_bytes());
    wav.extend_from_slice(&format.sample_rate.to_le_bytes());
    wav.extend_from_slice(&format.byte_rate().to_le_bytes());
    wav.extend_from_slice(&format.block_align().to_le_bytes());
    wav.extend_from_slice(&((BYTES_PER_SAMPLE * 8) as u16).to_le_bytes());

    // data subchunk
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_size.to_le_bytes());
    wav.extend_from_slice(&stream.to_le_bytes());

    wav
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::pcm::PcmFormat;

    fn field_u16(wav: &[u8], offset: usize) -> u16 {
        u16::from_le_bytes([wav[offset], wav[offset + 1]])
    }

    fn field_u32(wav: &[u8], offset: usize) -> u32 {
        u32::from_le_bytes([wav[offset], wav[offset + 1], wav[offset + 2], wav[offset + 3]])
    }

    #[test]
    fn test_header_layout() {
        let stream =
            SampleStream::interpret(&[0x00, 0x00, 0xFF, 0x7F], PcmFormat::mono(24_000)).unwrap();
        let wav = encode(&stream);

        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(field_u32(&wav, 4), 36 + 4);
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(&wav[12..16], b"fmt ");
        assert_eq!(field_u32(&wav, 16), 16);
        assert_eq!(field_u16(&wav, 20), 1);
        assert_eq!(field_u16(&wav, 22), 1);
        assert_eq!(field_u32(&wav, 24), 24_000);
        assert_eq!(field_u32(&wav, 28), 48_000);
        assert_eq!(field_u16(&wav, 32), 2);
        assert_eq!(field_u16(&wav, 34), 16);
        assert_eq!(&wav[36..40], b"data");
        assert_eq!(field_u32(&wav, 40), 4);
        assert_eq!(&wav[44..], [0x00, 0x00, 0xFF, 0x7F]);
    }

    #[test]
    fn test_empty_stream_is_valid_silence_file() {
        let stream = SampleStream::interpret(&[], PcmFormat::mono(24_000)).unwrap();
        let wav = encode(&stream);

        assert_eq!(wav.len(), HEADER_LEN);
        assert_eq!(field_u32(&wav, 4), 36);
        assert_eq!(field_u32(&wav, 40), 0);
    }

    #[test]
    fn test_declared_data_size_matches_payload() {
        for frames in [0usize, 1, 3, 1024] {
            let bytes = vec![0u8; frames * 2];
            let stream = SampleStream::interpret(&bytes, PcmFormat::mono(24_000)).unwrap();
            let wav = encode(&stream);

            let data_size = field_u32(&wav, 40) as usize;
            assert_eq!(data_size, wav.len() - HEADER_LEN);
            assert_eq!(field_u32(&wav, 4) as usize, 36 + data_size);
        }
    }

    #[test]
    fn test_encode_is_deterministic() {
        let stream =
            SampleStream::interpret(&[0x01, 0x02, 0x03, 0x04], PcmFormat::mono(24_000)).unwrap();
        assert_eq!(encode(&stream), encode(&stream));
    }
}
