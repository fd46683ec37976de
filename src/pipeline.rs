//! End-to-end audio conversion
//!
//! One call takes a base64 payload from the generation service to both of
//! its consumable forms: a registered WAV artifact and a playback buffer.
//! Conversions share no state, so independent requests (a word and its
//! example sentences, say) can run in parallel without coordination, and a
//! failure leaves artifacts from earlier conversions untouched.

use crate::Result;
use crate::audio::{
    AudioStore, HandleId, PcmFormat, PlaybackBuffer, SampleStream, decode_base64, wav,
};

/// The two artifacts produced by one conversion
#[derive(Debug)]
pub struct Conversion {
    /// Handle of the registered WAV container
    pub handle: HandleId,
    /// Normalized samples for immediate playback
    pub playback: PlaybackBuffer,
}

/// Convert a base64 PCM payload into a stored WAV artifact and a playback buffer
///
/// # Errors
///
/// Returns [`Error::Decode`](crate::Error::Decode) for malformed base64,
/// [`Error::MalformedPcm`](crate::Error::MalformedPcm) for byte lengths
/// that are not whole frames, and [`Error::Config`](crate::Error::Config)
/// for a zero sample rate or channel count. Nothing is registered in the
/// store unless the whole conversion succeeds.
pub fn convert(base64_audio: &str, format: PcmFormat, store: &AudioStore) -> Result<Conversion> {
    let bytes = decode_base64(base64_audio)?;
    let stream = SampleStream::interpret(&bytes, format)?;

    tracing::debug!(
        frames = stream.frame_count(),
        sample_rate = format.sample_rate,
        channels = format.channels,
        "decoded PCM payload"
    );

    let container = wav::encode(&stream);
    let playback = PlaybackBuffer::from_stream(&stream);
    let handle = store.register(container);

    Ok(Conversion { handle, playback })
}
