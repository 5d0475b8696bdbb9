//! Application state management

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::Config;
use crate::dictionary::DictionaryService;
use crate::storage::AudioStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    pub config: Config,
    pub db: SqlitePool,
    pub dictionary: DictionaryService,
    /// Absent when no storage is configured; annotations are then
    /// created without audio.
    pub audio_store: Option<AudioStore>,
}

impl AppState {
    /// Create a new application state
    pub fn new(
        config: Config,
        db: SqlitePool,
        dictionary: DictionaryService,
        audio_store: Option<AudioStore>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                db,
                dictionary,
                audio_store,
            }),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the database pool
    pub fn db(&self) -> &SqlitePool {
        &self.inner.db
    }

    /// Get the dictionary service
    pub fn dictionary(&self) -> &DictionaryService {
        &self.inner.dictionary
    }

    /// Get the audio store, if one is configured
    pub fn audio_store(&self) -> Option<&AudioStore> {
        self.inner.audio_store.as_ref()
    }
}
