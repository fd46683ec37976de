//! Audio transcoding pipeline
//!
//! Turns the generation service's base64 PCM payloads into playable
//! artifacts: a RIFF/WAVE container held in the [`store::AudioStore`] and a
//! normalized [`playback::PlaybackBuffer`] for speaker output. Every stage
//! is a pure, synchronous transformation over caller-owned data; the sample
//! format travels explicitly as a [`pcm::PcmFormat`].

mod decode;
mod playback;
pub mod pcm;
mod store;
pub mod wav;

pub use decode::decode_base64;
pub use pcm::{BYTES_PER_SAMPLE, PcmFormat, SampleStream};
pub use playback::{AudioPlayback, PlaybackBuffer};
pub use store::{AudioStore, HandleId};
