//! Raw PCM interpretation
//!
//! Reinterprets raw bytes from the generation service as signed 16-bit
//! little-endian samples. The byte order is part of the service contract,
//! not a platform detail — a byte-order mistake corrupts audio silently
//! instead of failing, so it is fixed here and covered by tests.

use crate::{Error, Result};

/// Bytes per sample; this pipeline is fixed at 16-bit linear PCM
pub const BYTES_PER_SAMPLE: usize = 2;

/// Caller-supplied interpretation of a raw PCM payload
///
/// The service emits bare sample bytes with no embedded metadata, so the
/// channel count and sample rate travel alongside the bytes at every
/// pipeline boundary rather than being assumed globally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PcmFormat {
    /// Number of interleaved channels
    pub channels: u16,
    /// Frames per second, in Hz
    pub sample_rate: u32,
}

impl PcmFormat {
    /// Single-channel format at the given sample rate
    #[must_use]
    pub const fn mono(sample_rate: u32) -> Self {
        Self {
            channels: 1,
            sample_rate,
        }
    }

    /// Bytes consumed per frame (all channels at one instant)
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn block_align(&self) -> u16 {
        self.channels * BYTES_PER_SAMPLE as u16
    }

    /// Bytes consumed per second of audio
    #[must_use]
    pub const fn byte_rate(&self) -> u32 {
        self.sample_rate * self.block_align() as u32
    }

    fn validate(self) -> Result<()> {
        if self.channels == 0 {
            return Err(Error::Config("channel count must be nonzero".to_string()));
        }
        if self.sample_rate == 0 {
            return Err(Error::Config("sample rate must be nonzero".to_string()));
        }
        Ok(())
    }
}

/// An interpreted sequence of 16-bit samples plus its format
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleStream {
    samples: Vec<i16>,
    format: PcmFormat,
}

impl SampleStream {
    /// Interpret raw little-endian bytes as 16-bit samples
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the format has a zero channel count or
    /// sample rate, and [`Error::MalformedPcm`] if the byte length is not a
    /// whole number of frames. Misaligned input is never truncated: dropping
    /// a partial trailing sample would desynchronize channel pairing.
    pub fn interpret(bytes: &[u8], format: PcmFormat) -> Result<Self> {
        format.validate()?;

        let block_align = format.block_align() as usize;
        if bytes.len() % block_align != 0 {
            return Err(Error::MalformedPcm {
                byte_len: bytes.len(),
                block_align,
            });
        }

        let samples = bytes
            .chunks_exact(BYTES_PER_SAMPLE)
            .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
            .collect();

        Ok(Self { samples, format })
    }

    /// The interpreted samples, channel-interleaved per frame
    #[must_use]
    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    /// The format the stream was interpreted with
    #[must_use]
    pub const fn format(&self) -> PcmFormat {
        self.format
    }

    /// Number of frames (samples across all channels at one instant)
    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.samples.len() / self.format.channels as usize
    }

    /// Payload size in bytes
    #[must_use]
    pub fn byte_len(&self) -> usize {
        self.samples.len() * BYTES_PER_SAMPLE
    }

    /// Whether the stream holds no samples
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Serialize the samples back to little-endian bytes
    #[must_use]
    pub fn to_le_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.byte_len());
        for sample in &self.samples {
            bytes.extend_from_slice(&sample.to_le_bytes());
        }
        bytes
    }
}
