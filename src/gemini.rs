//! Gemini generateContent client
//!
//! The generation service is an external collaborator with exactly two
//! outputs this crate consumes: a JSON word record from the text model and
//! a base64 raw-PCM payload from the TTS model. The PCM sample rate is not
//! embedded in the payload; it comes from configuration and travels with
//! the bytes as a `PcmFormat`.

use serde_json::json;

use crate::lexicon::{WordRecord, parse_word_record};
use crate::{Error, Result};

/// Response envelope from `models/{model}:generateContent`
#[derive(serde::Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(serde::Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(serde::Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(serde::Deserialize)]
struct Part {
    text: Option<String>,
    #[serde(rename = "inlineData")]
    inline_data: Option<InlineData>,
}

#[derive(serde::Deserialize)]
struct InlineData {
    data: Option<String>,
}

impl GenerateContentResponse {
    fn first_part(self) -> Option<Part> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()
    }
}

/// Client for the word analysis and speech synthesis models
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    text_model: String,
    audio_model: String,
    voice: String,
}

impl GeminiClient {
    /// Create a new client
    ///
    /// # Errors
    ///
    /// Returns error if the API key is empty
    pub fn new(
        api_key: String,
        base_url: String,
        text_model: String,
        audio_model: String,
        voice: String,
    ) -> Result<Self> {
        if api_key.is_empty() {
            return Err(Error::Config("Gemini API key required".to_string()));
        }

        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            base_url,
            text_model,
            audio_model,
            voice,
        })
    }

    /// Ask the text model for a structured analysis of a word
    ///
    /// # Errors
    ///
    /// Returns [`Error::Analysis`] on API failures and [`Error::Schema`]
    /// when the response does not match the word record shape
    pub async fn analyze(&self, word: &str) -> Result<WordRecord> {
        let request = json!({
            "contents": [{
                "parts": [{
                    "text": format!(
                        "Analyze the Japanese word \"{word}\". Provide the reading in \
                         Hiragana, Romaji, English meanings, and 3 example sentences \
                         (Japanese, Reading, English Translation)."
                    )
                }]
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "OBJECT",
                    "properties": {
                        "original": {"type": "STRING"},
                        "reading": {"type": "STRING"},
                        "romaji": {"type": "STRING"},
                        "meanings": {"type": "ARRAY", "items": {"type": "STRING"}},
                        "sentences": {
                            "type": "ARRAY",
                            "items": {
                                "type": "OBJECT",
                                "properties": {
                                    "japanese": {"type": "STRING"},
                                    "reading": {"type": "STRING"},
                                    "english": {"type": "STRING"}
                                }
                            }
                        }
                    }
                }
            }
        });

        let response = self
            .generate(&self.text_model, &request, Error::Analysis)
            .await?;

        let text = response
            .first_part()
            .and_then(|part| part.text)
            .ok_or_else(|| Error::Analysis("no text in model response".to_string()))?;

        tracing::debug!(word, bytes = text.len(), "word analysis received");
        parse_word_record(&text)
    }

    /// Ask the TTS model to speak the given text
    ///
    /// Returns the base64 PCM payload exactly as the service sent it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Synthesis`] on API failures and
    /// [`Error::EmptyPayload`] when the response carries no audio data
    pub async fn synthesize(&self, text: &str) -> Result<String> {
        let request = json!({
            "contents": [{
                "parts": [{
                    "text": format!(
                        "Read the following Japanese text with an instructional & \
                         professional tone: {text}"
                    )
                }]
            }],
            "generationConfig": {
                "responseModalities": ["AUDIO"],
                "speechConfig": {
                    "voiceConfig": {
                        "prebuiltVoiceConfig": {"voiceName": self.voice}
                    }
                }
            }
        });

        let response = self
            .generate(&self.audio_model, &request, Error::Synthesis)
            .await?;

        let payload = response
            .first_part()
            .and_then(|part| part.inline_data)
            .and_then(|inline| inline.data)
            .ok_or(Error::EmptyPayload)?;

        tracing::debug!(chars = text.chars().count(), base64_len = payload.len(), "speech synthesized");
        Ok(payload)
    }

    async fn generate(
        &self,
        model: &str,
        request: &serde_json::Value,
        api_error: fn(String) -> Error,
    ) -> Result<GenerateContentResponse> {
        let url = format!("{}/models/{model}:generateContent", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(api_error(format!(
                "generateContent failed: {status} - {body}"
            )));
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_api_key_rejected() {
        let result = GeminiClient::new(
            String::new(),
            "https://example.invalid".to_string(),
            "text-model".to_string(),
            "audio-model".to_string(),
            "Erinome".to_string(),
        );
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_first_part_extracts_inline_data() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates": [{"content": {"parts": [{"inlineData": {"data": "AAD/fw=="}}]}}]}"#,
        )
        .unwrap();

        let part = response.first_part().unwrap();
        assert_eq!(part.inline_data.unwrap().data.unwrap(), "AAD/fw==");
    }

    #[test]
    fn test_first_part_handles_empty_candidates() {
        let response: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(response.first_part().is_none());
    }
}
