//! Dictionary Providers
//!
//! Defines the provider trait and the chat-completion backed implementation.

use async_trait::async_trait;

use super::types::{DictionaryError, WordInfo};

/// Dictionary provider trait
#[async_trait]
pub trait DictionaryProvider: Send + Sync {
    /// Look up phonetic transcription and definitions for a word or phrase.
    async fn lookup_word(&self, word: &str) -> Result<WordInfo, DictionaryError>;

    /// Synthesize pronunciation audio as MP3 bytes.
    async fn synthesize_audio(&self, word: &str, voice: &str)
        -> Result<Vec<u8>, DictionaryError>;
}

/// Provider backed by an OpenAI-style API: `/chat/completions` for word
/// lookups and `/audio/speech` for pronunciation synthesis.
pub struct ChatCompletionProvider {
    client: reqwest::Client,
    /// API base URL, without a trailing slash
    base_url: String,
    api_key: String,
    /// Chat model used for lookups
    model: String,
    /// Speech model used for audio synthesis
    speech_model: String,
}

impl ChatCompletionProvider {
    pub fn new(base_url: &str, api_key: &str, model: &str, speech_model: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            speech_model: speech_model.to_string(),
        }
    }
}

#[async_trait]
impl DictionaryProvider for ChatCompletionProvider {
    async fn lookup_word(&self, word: &str) -> Result<WordInfo, DictionaryError> {
        let url = format!("{}/chat/completions", self.base_url);

        // Low temperature keeps the JSON output stable.
        let request = serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "user", "content": lookup_prompt(word) }
            ],
            "temperature": 0.3
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| DictionaryError::ApiError(format!("Failed to call provider: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DictionaryError::ApiError(format!(
                "Provider returned {}: {}",
                status, body
            )));
        }

        let result: serde_json::Value = response
            .json()
            .await
            .map_err(|e| DictionaryError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        let content = result["choices"][0]["message"]["content"]
            .as_str()
            .unwrap_or("");

        Ok(parse_word_info(word, content))
    }

    async fn synthesize_audio(
        &self,
        word: &str,
        voice: &str,
    ) -> Result<Vec<u8>, DictionaryError> {
        let url = format!("{}/audio/speech", self.base_url);

        let request = serde_json::json!({
            "model": self.speech_model,
            "input": word,
            "voice": voice,
            "response_format": "mp3"
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                DictionaryError::AudioNotSupported(format!("Failed to call speech endpoint: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(DictionaryError::AudioNotSupported(format!(
                "Speech endpoint returned {}",
                status
            )));
        }

        let is_json = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.starts_with("application/json"))
            .unwrap_or(false);

        if is_json {
            // Some backends wrap the audio as base64 inside a JSON envelope
            // instead of streaming raw bytes.
            use base64::Engine;

            let value: serde_json::Value = response.json().await.map_err(|e| {
                DictionaryError::InvalidResponse(format!("Failed to parse audio response: {}", e))
            })?;

            let encoded = value["audio"]
                .as_str()
                .or_else(|| value["data"].as_str())
                .ok_or_else(|| {
                    DictionaryError::InvalidResponse(
                        "Audio response carries no audio field".to_string(),
                    )
                })?;

            base64::engine::general_purpose::STANDARD
                .decode(encoded)
                .map_err(|e| {
                    DictionaryError::InvalidResponse(format!("Invalid base64 audio: {}", e))
                })
        } else {
            let bytes = response.bytes().await.map_err(|e| {
                DictionaryError::AudioNotSupported(format!("Failed to read audio bytes: {}", e))
            })?;
            Ok(bytes.to_vec())
        }
    }
}

fn lookup_prompt(word: &str) -> String {
    format!(
        r#"Provide details for the English word or phrase "{}". Reply with exactly the following JSON shape and nothing else:

{{
  "phonetic": "IPA transcription",
  "definitions": [
    {{"pos": "part of speech (n., v., adj., ...)", "meaning": "concise sense"}}
  ]
}}

Rules:
1. Use standard IPA for the phonetic transcription.
2. For a phrase, transcribe the phrase as a whole.
3. Include one to three common senses in definitions.
4. Use standard abbreviations for pos (n., v., adj., adv., prep.).
5. Return only the JSON, no prose and no code fences.

Example output:
{{
  "phonetic": "/ˈkɒfi/",
  "definitions": [
    {{"pos": "n.", "meaning": "a hot drink brewed from roasted beans"}}
  ]
}}"#,
        word
    )
}

/// Parse a chat completion body into a [`WordInfo`], tolerating markdown
/// fences. A malformed body degrades to a placeholder entry rather than
/// an error so annotation capture keeps working.
fn parse_word_info(word: &str, content: &str) -> WordInfo {
    let cleaned = strip_markdown_fences(content);

    match serde_json::from_str::<WordInfo>(&cleaned) {
        Ok(info) => info,
        Err(e) => {
            tracing::warn!(word, error = %e, raw = content, "failed to parse dictionary response");
            WordInfo::fallback(word)
        }
    }
}

/// Remove ```json fences that chat models wrap JSON output in.
fn strip_markdown_fences(content: &str) -> String {
    content
        .replace("```json", "")
        .replace("```", "")
        .trim()
        .to_string()
}

/// Mock provider for testing
#[cfg(test)]
pub struct MockProvider {
    /// `None` makes lookups fail with an API error.
    pub word_info: Option<WordInfo>,
    /// `None` makes synthesis fail, as a backend without TTS would.
    pub audio: Option<Vec<u8>>,
    /// Number of lookup calls that reached this provider.
    pub lookups: std::sync::atomic::AtomicUsize,
}

#[cfg(test)]
impl MockProvider {
    pub fn new(word_info: Option<WordInfo>, audio: Option<Vec<u8>>) -> Self {
        Self {
            word_info,
            audio,
            lookups: std::sync::atomic::AtomicUsize::new(0),
        }
    }
}

#[cfg(test)]
impl Default for MockProvider {
    fn default() -> Self {
        use crate::annotations::Definition;

        Self::new(
            Some(WordInfo {
                phonetic: "/mɒk/".to_string(),
                definitions: vec![Definition {
                    pos: "n.".to_string(),
                    meaning: "a canned test entry".to_string(),
                }],
            }),
            Some(vec![0x49, 0x44, 0x33, 0x04]),
        )
    }
}

#[cfg(test)]
#[async_trait]
impl DictionaryProvider for MockProvider {
    async fn lookup_word(&self, word: &str) -> Result<WordInfo, DictionaryError> {
        self.lookups
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        self.word_info
            .clone()
            .ok_or_else(|| DictionaryError::ApiError(format!("mock lookup disabled for {}", word)))
    }

    async fn synthesize_audio(
        &self,
        _word: &str,
        _voice: &str,
    ) -> Result<Vec<u8>, DictionaryError> {
        self.audio
            .clone()
            .ok_or_else(|| DictionaryError::AudioNotSupported("mock synthesis disabled".to_string()))
    }
}
