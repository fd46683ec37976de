//! Configuration management
//!
//! Defaults, overlaid by an optional TOML file at the platform config dir
//! (`~/.config/kotoba/config.toml` on Linux), overlaid by environment
//! variables. All file fields are optional; the file is a partial overlay,
//! not a full schema.

use std::env;
use std::path::PathBuf;

use serde::Deserialize;

use crate::Result;

/// Default Gemini API base URL
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default text model for word analysis
const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";

/// Default TTS model
const DEFAULT_AUDIO_MODEL: &str = "gemini-2.5-flash-preview-tts";

/// Default prebuilt TTS voice
const DEFAULT_VOICE: &str = "Erinome";

/// Sample rate the TTS model emits; not embedded in the payload
const DEFAULT_SAMPLE_RATE: u32 = 24_000;

/// Runtime configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Gemini API key (`GEMINI_API_KEY`)
    pub api_key: String,

    /// Gemini API base URL
    pub base_url: String,

    /// Model for word analysis
    pub text_model: String,

    /// Model for speech synthesis
    pub audio_model: String,

    /// Prebuilt TTS voice name
    pub voice: String,

    /// PCM sample rate of the TTS payloads, in Hz
    pub sample_rate: u32,

    /// Directory for saved WAV files (`KOTOBA_SAVE_DIR`; default cwd)
    pub save_dir: PathBuf,
}

/// Partial TOML configuration file schema
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    api_key: Option<String>,
    base_url: Option<String>,
    text_model: Option<String>,
    audio_model: Option<String>,
    voice: Option<String>,
    sample_rate: Option<u32>,
    save_dir: Option<PathBuf>,
}

impl ConfigFile {
    /// Load the config file if one exists; a missing file is not an error
    fn load() -> Result<Self> {
        let Some(dirs) = directories::ProjectDirs::from("dev", "omni", "kotoba") else {
            return Ok(Self::default());
        };

        let path = dirs.config_dir().join("config.toml");
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&path)?;
        let file = toml::from_str(&contents)?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(file)
    }
}

impl Config {
    /// Assemble the configuration from defaults, config file, and environment
    ///
    /// # Errors
    ///
    /// Returns error if the config file exists but cannot be read or parsed
    pub fn load() -> Result<Self> {
        let file = ConfigFile::load()?;

        let api_key = env::var("GEMINI_API_KEY")
            .ok()
            .or(file.api_key)
            .unwrap_or_default();

        let save_dir = env::var("KOTOBA_SAVE_DIR")
            .ok()
            .map(PathBuf::from)
            .or(file.save_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(Self {
            api_key,
            base_url: file.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            text_model: file
                .text_model
                .unwrap_or_else(|| DEFAULT_TEXT_MODEL.to_string()),
            audio_model: file
                .audio_model
                .unwrap_or_else(|| DEFAULT_AUDIO_MODEL.to_string()),
            voice: file.voice.unwrap_or_else(|| DEFAULT_VOICE.to_string()),
            sample_rate: file.sample_rate.unwrap_or(DEFAULT_SAMPLE_RATE),
            save_dir,
        })
    }
}
