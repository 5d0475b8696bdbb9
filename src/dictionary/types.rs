//! Dictionary Types
//!
//! Types for word lookups and pronunciation synthesis.

use serde::{Deserialize, Serialize};

use crate::annotations::Definition;

/// Result of a word lookup: phonetic transcription plus senses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordInfo {
    /// IPA transcription, e.g. `/ˈkɒfi/`.
    pub phonetic: String,
    /// Senses in the provider's order, usually one to three.
    #[serde(default)]
    pub definitions: Vec<Definition>,
}

impl WordInfo {
    /// Placeholder entry used when a lookup fails or returns garbage.
    pub fn fallback(word: &str) -> Self {
        Self {
            phonetic: format!("/{}/", word),
            definitions: Vec::new(),
        }
    }
}

/// Dictionary error types
#[derive(Debug, thiserror::Error)]
pub enum DictionaryError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Malformed provider response: {0}")]
    InvalidResponse(String),

    #[error("Audio synthesis not available: {0}")]
    AudioNotSupported(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_wraps_word_in_slashes() {
        let info = WordInfo::fallback("serendipity");
        assert_eq!(info.phonetic, "/serendipity/");
        assert!(info.definitions.is_empty());
    }

    #[test]
    fn test_word_info_deserializes_without_definitions() {
        let info: WordInfo = serde_json::from_str(r#"{"phonetic": "/kat/"}"#).unwrap();
        assert_eq!(info.phonetic, "/kat/");
        assert!(info.definitions.is_empty());
    }

    #[test]
    fn test_word_info_requires_phonetic() {
        let result: Result<WordInfo, _> = serde_json::from_str(r#"{"definitions": []}"#);
        assert!(result.is_err());
    }
}
