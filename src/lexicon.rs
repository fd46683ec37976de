//! Word record model
//!
//! The shape the generation service is asked to produce for a vocabulary
//! lookup. The service's JSON is decoded through a validating step: a
//! missing or mistyped field fails with a schema error naming the field,
//! never an unchecked structural cast.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// An example sentence with reading and translation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sentence {
    /// Native sentence text
    pub japanese: String,
    /// Kana reading
    pub reading: String,
    /// English translation
    pub english: String,
}

/// Structured analysis of a single vocabulary word
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordRecord {
    /// The word as submitted
    pub original: String,
    /// Hiragana reading
    pub reading: String,
    /// Romanized reading
    pub romaji: String,
    /// English meanings
    pub meanings: Vec<String>,
    /// Example sentences
    pub sentences: Vec<Sentence>,
}

/// Decode a word record from the service's JSON text
///
/// # Errors
///
/// Returns [`Error::Schema`] naming the missing or mismatched field when
/// the JSON does not match the expected shape.
pub fn parse_word_record(json: &str) -> Result<WordRecord> {
    serde_json::from_str(json).map_err(|e| Error::Schema(e.to_string()))
}
