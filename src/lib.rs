//! Kotoba - Japanese vocabulary lookup and speech synthesis
//!
//! This library provides the core functionality for the kotoba CLI:
//! - Word analysis via a Gemini-style generation service
//! - An audio transcoding pipeline from base64 PCM payloads to playable
//!   WAV artifacts and normalized playback buffers
//! - A lifecycle-managed in-memory store for the encoded artifacts
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │              Generation service (Gemini)              │
//! │        word record (JSON)  │  speech (base64 PCM)     │
//! └─────────────┬──────────────────────┬─────────────────┘
//!               │                      │
//!        ┌──────▼──────┐        ┌──────▼──────────────────┐
//!        │   lexicon   │        │    audio pipeline       │
//!        │ (validated  │        │ base64 → i16 stream →   │
//!        │   decode)   │        │ {WAV store, playback}   │
//!        └─────────────┘        └─────────────────────────┘
//! ```

pub mod audio;
pub mod config;
pub mod error;
pub mod gemini;
pub mod lexicon;
pub mod pipeline;

pub use audio::{AudioPlayback, AudioStore, HandleId, PcmFormat, PlaybackBuffer, SampleStream};
pub use config::Config;
pub use error::{Error, Result};
pub use gemini::GeminiClient;
pub use lexicon::{Sentence, WordRecord};
pub use pipeline::{Conversion, convert};
