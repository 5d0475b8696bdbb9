//! Configuration management for the Lectura server

use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub dictionary: DictionaryConfig,
    /// Audio storage is optional; without it annotations carry no
    /// `audio_url` and clients fall back to speech synthesis.
    pub storage: Option<StorageConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DictionaryConfig {
    /// OpenAI-style API base URL
    pub base_url: String,
    pub api_key: String,
    /// Chat model used for word lookups
    pub model: String,
    /// Speech model used for pronunciation synthesis
    pub speech_model: String,
    /// Voice passed to the speech endpoint
    pub voice: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    pub endpoint: String,
    pub bucket: String,
    pub access_key: String,
    pub secret_key: String,
    pub region: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            database: DatabaseConfig {
                url: "sqlite:./lectura.db".to_string(),
            },
            dictionary: DictionaryConfig {
                base_url: "https://open.bigmodel.cn/api/paas/v4".to_string(),
                api_key: String::new(),
                model: "glm-4-flash".to_string(),
                speech_model: "glm-4-voice".to_string(),
                voice: "alloy".to_string(),
            },
            storage: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        // Storage is configured as a block: setting the endpoint makes
        // the remaining credentials required.
        let storage = match env::var("LECTURA_S3_ENDPOINT") {
            Ok(endpoint) => Some(StorageConfig {
                endpoint,
                bucket: env::var("LECTURA_S3_BUCKET")?,
                access_key: env::var("LECTURA_S3_ACCESS_KEY")?,
                secret_key: env::var("LECTURA_S3_SECRET_KEY")?,
                region: env::var("LECTURA_S3_REGION").ok(),
            }),
            Err(_) => None,
        };

        Ok(Config {
            server: ServerConfig {
                host: env::var("LECTURA_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("LECTURA_PORT")
                    .unwrap_or_else(|_| "3000".to_string())
                    .parse()
                    .unwrap_or(3000),
            },
            database: DatabaseConfig {
                url: env::var("LECTURA_DATABASE_URL")
                    .or_else(|_| env::var("DATABASE_URL"))
                    .unwrap_or_else(|_| "sqlite:./lectura.db".to_string()),
            },
            dictionary: DictionaryConfig {
                base_url: env::var("LECTURA_DICTIONARY_BASE_URL")
                    .unwrap_or_else(|_| "https://open.bigmodel.cn/api/paas/v4".to_string()),
                api_key: env::var("LECTURA_DICTIONARY_API_KEY").unwrap_or_default(),
                model: env::var("LECTURA_DICTIONARY_MODEL")
                    .unwrap_or_else(|_| "glm-4-flash".to_string()),
                speech_model: env::var("LECTURA_SPEECH_MODEL")
                    .unwrap_or_else(|_| "glm-4-voice".to_string()),
                voice: env::var("LECTURA_SPEECH_VOICE").unwrap_or_else(|_| "alloy".to_string()),
            },
            storage,
        })
    }
}
