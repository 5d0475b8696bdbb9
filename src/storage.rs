//! Audio storage
//!
//! S3-compatible store for synthesized pronunciation clips (MinIO,
//! Cloudflare R2, Backblaze B2, AWS S3). Object keys are
//! content-addressed from the word and voice, so annotating the same
//! word again reuses the stored clip instead of uploading another copy.

use aws_config::BehaviorVersion;
use aws_sdk_s3::{
    config::{Credentials, Region},
    primitives::ByteStream,
    Client,
};
use sha2::{Digest, Sha256};

use crate::config::StorageConfig;
use crate::error::{AppError, Result};

/// Bucket prefix for pronunciation clips
const AUDIO_PREFIX: &str = "pronunciations";

/// S3-compatible audio store
#[derive(Clone)]
pub struct AudioStore {
    client: Client,
    bucket: String,
    /// Endpoint without a trailing slash, used to build public URLs
    endpoint: String,
}

impl AudioStore {
    /// Create a new store from configuration
    pub async fn new(config: &StorageConfig) -> Result<Self> {
        let credentials = Credentials::new(
            &config.access_key,
            &config.secret_key,
            None,
            None,
            "lectura",
        );

        let region = config
            .region
            .clone()
            .unwrap_or_else(|| "us-east-1".to_string());

        let s3_config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .endpoint_url(&config.endpoint)
            .region(Region::new(region))
            .credentials_provider(credentials)
            .force_path_style(true) // Required for MinIO and other S3-compatible services
            .build();

        let client = Client::from_conf(s3_config);

        // Test connection by checking if bucket exists
        let bucket = config.bucket.clone();
        match client.head_bucket().bucket(&bucket).send().await {
            Ok(_) => {
                tracing::info!("Connected to audio bucket: {}", bucket);
            }
            Err(e) => {
                tracing::warn!(
                    "Could not verify bucket {}: {}. Will attempt operations anyway.",
                    bucket,
                    e
                );
            }
        }

        Ok(Self {
            client,
            bucket,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
        })
    }

    /// Get the bucket name
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Store a pronunciation clip and return its public URL.
    pub async fn put_pronunciation(
        &self,
        word: &str,
        voice: &str,
        data: Vec<u8>,
    ) -> Result<String> {
        let key = pronunciation_key(word, voice);

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(data))
            .content_type("audio/mpeg")
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("Failed to store {}: {}", key, e)))?;

        Ok(self.public_url(&key))
    }

    /// Check whether a clip for this word and voice is already stored.
    pub async fn pronunciation_exists(&self, word: &str, voice: &str) -> Result<bool> {
        let key = pronunciation_key(word, voice);

        match self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(&key)
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(e) => {
                let msg = e.to_string();
                if msg.contains("404") || msg.contains("NotFound") || msg.contains("NoSuchKey") {
                    Ok(false)
                } else {
                    Err(AppError::Storage(format!("Failed to head {}: {}", key, msg)))
                }
            }
        }
    }

    /// Public URL of an already-stored clip for this word and voice.
    pub fn pronunciation_url(&self, word: &str, voice: &str) -> String {
        self.public_url(&pronunciation_key(word, voice))
    }

    /// Path-style public URL for an object key.
    pub fn public_url(&self, key: &str) -> String {
        build_public_url(&self.endpoint, &self.bucket, key)
    }
}

/// Content-addressed object key for a word and voice pair.
pub fn pronunciation_key(word: &str, voice: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(word.as_bytes());
    hasher.update(b"|");
    hasher.update(voice.as_bytes());
    format!("{}/{}.mp3", AUDIO_PREFIX, hex::encode(hasher.finalize()))
}

fn build_public_url(endpoint: &str, bucket: &str, key: &str) -> String {
    let encoded: Vec<String> = key
        .split('/')
        .map(|part| urlencoding::encode(part).into_owned())
        .collect();
    format!("{}/{}/{}", endpoint, bucket, encoded.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pronunciation_key_is_deterministic() {
        let a = pronunciation_key("ephemeral", "alloy");
        let b = pronunciation_key("ephemeral", "alloy");
        assert_eq!(a, b);

        assert!(a.starts_with("pronunciations/"));
        assert!(a.ends_with(".mp3"));
        // prefix + "/" + 64 hex chars + ".mp3"
        assert_eq!(a.len(), "pronunciations/".len() + 64 + 4);
    }

    #[test]
    fn test_pronunciation_key_varies_by_word_and_voice() {
        let base = pronunciation_key("ephemeral", "alloy");
        assert_ne!(base, pronunciation_key("ephemera", "alloy"));
        assert_ne!(base, pronunciation_key("ephemeral", "nova"));
    }

    #[test]
    fn test_public_url_is_path_style() {
        let url = build_public_url(
            "http://localhost:9000",
            "lectura-audio",
            "pronunciations/abc123.mp3",
        );
        assert_eq!(
            url,
            "http://localhost:9000/lectura-audio/pronunciations/abc123.mp3"
        );
    }

    #[test]
    fn test_public_url_encodes_key_segments() {
        let url = build_public_url("http://localhost:9000", "bucket", "some dir/a b.mp3");
        assert_eq!(url, "http://localhost:9000/bucket/some%20dir/a%20b.mp3");
    }
}
