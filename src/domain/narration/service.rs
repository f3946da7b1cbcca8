use super::error::NarrationServiceError;
use super::NarrationResult;
use crate::domain::audio::{AudioFormat, AudioStitcher};
use crate::domain::chunking::{chunk, Chunk};
use crate::domain::shared::clean_text;
use crate::infrastructure::repositories::{AudioRepository, TtsRepository};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::{Duration, Instant};

const CHARACTERS_PER_MINUTE: f32 = 1000.0;

/// Tuning for the chunk-synthesize-stitch pipeline
#[derive(Debug, Clone)]
pub struct NarrationOptions {
    pub format: AudioFormat,
    /// Upper bound per chunk; capped at what the provider accepts
    pub max_chunk_bytes: Option<usize>,
    pub max_in_flight: usize,
    pub timeout: Option<Duration>,
}

impl Default for NarrationOptions {
    fn default() -> Self {
        Self {
            format: AudioFormat::Mp3,
            max_chunk_bytes: None,
            max_in_flight: 1,
            timeout: None,
        }
    }
}

/// Chunk size bound: the configured value, never above what the provider accepts
pub fn chunk_bound(configured: Option<usize>, provider_limit: usize) -> usize {
    configured.map_or(provider_limit, |configured| configured.min(provider_limit))
}

/// Clean the text and split it into the chunks it would be synthesized as
pub fn plan_chunks(text: &str, max_chunk_bytes: usize) -> Result<Vec<Chunk>, NarrationServiceError> {
    let cleaned_text = clean_text(text);

    tracing::debug!(
        original_length = text.len(),
        cleaned_length = cleaned_text.len(),
        "Text cleaned"
    );

    Ok(chunk(&cleaned_text, max_chunk_bytes)?)
}

pub struct NarrationService {
    stitcher: AudioStitcher,
    audio_repo: Arc<dyn AudioRepository>,
    max_chunk_bytes: usize,
}

impl NarrationService {
    pub fn new(
        tts_repo: Arc<dyn TtsRepository>,
        audio_repo: Arc<dyn AudioRepository>,
        options: NarrationOptions,
    ) -> Self {
        let max_chunk_bytes = chunk_bound(options.max_chunk_bytes, tts_repo.max_input_bytes());

        let stitcher = AudioStitcher::new(tts_repo, options.format)
            .with_max_in_flight(options.max_in_flight)
            .with_timeout(options.timeout);

        Self {
            stitcher,
            audio_repo,
            max_chunk_bytes,
        }
    }

    pub fn max_chunk_bytes(&self) -> usize {
        self.max_chunk_bytes
    }
}

#[async_trait]
pub trait NarrationServiceApi: Send + Sync {
    /// Narrate text into one audio artifact named `artifact_name`
    ///
    /// This operation:
    /// - Cleans the text (HTML, URLs, whitespace)
    /// - Splits it into byte-bounded chunks on sentence boundaries
    /// - Synthesizes every chunk and stitches the audio in order
    /// - Persists the stitched audio
    ///
    /// Chunks that fail to synthesize are skipped and reported in the result.
    async fn narrate(
        &self,
        text: String,
        artifact_name: String,
    ) -> Result<NarrationResult, NarrationServiceError>;

    /// Chunks the text would be synthesized as, without calling the provider
    fn plan(&self, text: &str) -> Result<Vec<Chunk>, NarrationServiceError>;
}

#[async_trait]
impl NarrationServiceApi for NarrationService {
    async fn narrate(
        &self,
        text: String,
        artifact_name: String,
    ) -> Result<NarrationResult, NarrationServiceError> {
        let start_time = Instant::now();

        tracing::info!(
            artifact = %artifact_name,
            text_length = text.len(),
            "Narration request"
        );

        // 1. Clean and chunk
        let chunks = self.plan(&text)?;
        if chunks.is_empty() {
            return Err(NarrationServiceError::Invalid(
                "Text cannot be empty".to_string(),
            ));
        }
        let char_count: usize = chunks.iter().map(|c| c.content.chars().count()).sum();

        // 2. Synthesize and stitch
        let audio = self.stitcher.stitch(&chunks).await?;

        if audio.skipped_count() > 0 {
            tracing::warn!(
                artifact = %artifact_name,
                skipped_count = audio.skipped_count(),
                chunk_count = chunks.len(),
                "Narration is missing audio for some chunks"
            );
        }

        // 3. Persist
        let path = self.audio_repo.save(&audio, &artifact_name).await?;

        let result = NarrationResult {
            path,
            format: audio.format(),
            chunk_count: chunks.len(),
            skipped_chunks: audio.skipped_indices().to_vec(),
            audio_size_bytes: audio.byte_len(),
            char_count,
            duration_minutes: char_count as f32 / CHARACTERS_PER_MINUTE,
        };

        let duration = start_time.elapsed();
        let throughput_chars_per_sec = if duration.as_secs_f64() > 0.0 {
            char_count as f64 / duration.as_secs_f64()
        } else {
            0.0
        };

        tracing::info!(
            artifact = %artifact_name,
            latency_ms = duration.as_millis(),
            characters_count = char_count,
            chunk_count = result.chunk_count,
            skipped_count = result.skipped_chunks.len(),
            audio_size_bytes = result.audio_size_bytes,
            throughput_chars_per_sec = format!("{:.2}", throughput_chars_per_sec),
            "Narration completed"
        );

        Ok(result)
    }

    fn plan(&self, text: &str) -> Result<Vec<Chunk>, NarrationServiceError> {
        plan_chunks(text, self.max_chunk_bytes)
    }
}
