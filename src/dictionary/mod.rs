//! Dictionary Module
//!
//! Word enrichment for annotations: phonetic transcription, definitions
//! and pronunciation audio via an OpenAI-style completion API.
//!
//! Lookups degrade instead of failing: a provider error or a malformed
//! response yields a placeholder entry, so annotation capture never
//! blocks on the network. Audio synthesis does surface errors, which the
//! capture flow tolerates by leaving `audio_url` empty.

mod provider;
mod service;
mod types;

pub use provider::{ChatCompletionProvider, DictionaryProvider};
pub use service::DictionaryService;
pub use types::{DictionaryError, WordInfo};

#[cfg(test)]
pub use provider::MockProvider;
