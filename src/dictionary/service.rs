//! Dictionary Service
//!
//! Wraps a provider with an LRU word cache and the degradation policy
//! for failed lookups.

use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;
use parking_lot::Mutex;

use super::provider::DictionaryProvider;
use super::types::{DictionaryError, WordInfo};

/// Default number of cached word entries
const DEFAULT_CACHE_SIZE: usize = 256;

/// Dictionary service shared across request handlers.
pub struct DictionaryService {
    provider: Arc<dyn DictionaryProvider>,
    /// Voice passed to audio synthesis, also part of the storage key
    voice: String,
    cache: Mutex<LruCache<String, WordInfo>>,
}

impl DictionaryService {
    pub fn new(provider: Arc<dyn DictionaryProvider>, voice: &str) -> Self {
        Self::with_cache_size(provider, voice, DEFAULT_CACHE_SIZE)
    }

    pub fn with_cache_size(
        provider: Arc<dyn DictionaryProvider>,
        voice: &str,
        cache_size: usize,
    ) -> Self {
        let size = NonZeroUsize::new(cache_size)
            .unwrap_or(NonZeroUsize::new(DEFAULT_CACHE_SIZE).unwrap());

        Self {
            provider,
            voice: voice.to_string(),
            cache: Mutex::new(LruCache::new(size)),
        }
    }

    /// Look up a word, serving repeats from the cache.
    ///
    /// A provider failure degrades to a placeholder entry instead of an
    /// error. Fallback entries are not cached, so a later lookup of the
    /// same word retries the provider.
    pub async fn lookup_word(&self, word: &str) -> WordInfo {
        let key = word.to_lowercase();

        if let Some(info) = self.cache.lock().get(&key).cloned() {
            return info;
        }

        match self.provider.lookup_word(word).await {
            Ok(info) => {
                self.cache.lock().put(key, info.clone());
                info
            }
            Err(e) => {
                tracing::warn!(word, error = %e, "dictionary lookup failed, using fallback");
                WordInfo::fallback(word)
            }
        }
    }

    /// Synthesize pronunciation audio with the configured voice.
    pub async fn synthesize_audio(&self, word: &str) -> Result<Vec<u8>, DictionaryError> {
        self.provider.synthesize_audio(word, &self.voice).await
    }

    pub fn voice(&self) -> &str {
        &self.voice
    }
}
