use crate::domain::audio::AudioFormat;
use crate::domain::narration::chunk_bound;
use crate::infrastructure::repositories::{google_tts_repository, openai_tts_repository};
use anyhow::{bail, Context};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub environment: Environment,
    pub log_format: LogFormat,
    // Synthesis provider
    pub tts_provider: TtsProvider,
    pub google_tts_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub openai_tts_model: String,
    pub openai_tts_voice: String,
    // Voice
    pub tts_language_code: String,
    pub tts_voice_name: String,
    pub audio_format: AudioFormat,
    // Chunking and stitching
    pub max_chunk_bytes: Option<usize>,
    pub synthesis_concurrency: usize,
    pub synthesis_timeout_secs: Option<u64>,
    // Output
    pub audio_output_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum TtsProvider {
    Google,
    OpenAi,
}

impl TtsProvider {
    /// Largest input the provider accepts per synthesis call
    pub fn max_input_bytes(&self) -> usize {
        match self {
            TtsProvider::Google => google_tts_repository::MAX_INPUT_BYTES,
            TtsProvider::OpenAi => openai_tts_repository::MAX_INPUT_BYTES,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Config {
            environment: match env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string())
                .as_str()
            {
                "production" => Environment::Production,
                _ => Environment::Development,
            },
            log_format: match env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .as_str()
            {
                "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            tts_provider: match env::var("TTS_PROVIDER")
                .unwrap_or_else(|_| "google".to_string())
                .to_lowercase()
                .as_str()
            {
                "google" => TtsProvider::Google,
                "openai" => TtsProvider::OpenAi,
                other => bail!("unknown TTS_PROVIDER: {}", other),
            },
            google_tts_api_key: env::var("GOOGLE_TTS_API_KEY").ok(),
            openai_api_key: env::var("OPENAI_API_KEY").ok(),
            openai_tts_model: env::var("OPENAI_TTS_MODEL").unwrap_or_else(|_| "tts-1".to_string()),
            openai_tts_voice: env::var("OPENAI_TTS_VOICE").unwrap_or_else(|_| "nova".to_string()),
            tts_language_code: env::var("TTS_LANGUAGE_CODE")
                .unwrap_or_else(|_| "th-TH".to_string()),
            tts_voice_name: env::var("TTS_VOICE_NAME")
                .unwrap_or_else(|_| "th-TH-Standard-A".to_string()),
            audio_format: env::var("AUDIO_FORMAT")
                .unwrap_or_else(|_| "mp3".to_string())
                .parse::<AudioFormat>()
                .map_err(|e| anyhow::anyhow!("invalid AUDIO_FORMAT: {}", e))?,
            max_chunk_bytes: match env::var("MAX_CHUNK_BYTES") {
                Ok(value) => Some(value.parse::<usize>().context("invalid MAX_CHUNK_BYTES")?),
                Err(_) => None,
            },
            synthesis_concurrency: env::var("SYNTHESIS_CONCURRENCY")
                .unwrap_or_else(|_| "1".to_string())
                .parse::<usize>()
                .context("invalid SYNTHESIS_CONCURRENCY")?,
            synthesis_timeout_secs: match env::var("SYNTHESIS_TIMEOUT_SECS") {
                Ok(value) => Some(
                    value
                        .parse::<u64>()
                        .context("invalid SYNTHESIS_TIMEOUT_SECS")?,
                ),
                Err(_) => None,
            },
            audio_output_dir: env::var("AUDIO_OUTPUT_DIR")
                .unwrap_or_else(|_| "audio_files".to_string())
                .into(),
        };

        config.validate()?;
        Ok(config)
    }

    /// Provider keys are checked when the provider is built, since the
    /// chunk dry run never calls one
    fn validate(&self) -> anyhow::Result<()> {
        if self.max_chunk_bytes == Some(0) {
            bail!("MAX_CHUNK_BYTES must be greater than zero");
        }
        if self.synthesis_concurrency == 0 {
            bail!("SYNTHESIS_CONCURRENCY must be at least 1");
        }
        Ok(())
    }

    /// Chunk size bound for the configured provider
    pub fn chunk_bound(&self) -> usize {
        chunk_bound(self.max_chunk_bytes, self.tts_provider.max_input_bytes())
    }

    pub fn synthesis_timeout(&self) -> Option<Duration> {
        self.synthesis_timeout_secs.map(Duration::from_secs)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }
}
