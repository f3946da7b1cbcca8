use super::error::{StitchError, SynthesisError};
use super::model::{AudioBuffer, AudioFormat, StitchedAudio};
use crate::domain::chunking::Chunk;
use crate::infrastructure::repositories::TtsRepository;
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::{Duration, Instant};

type SynthesisOutcome = Result<AudioBuffer, SynthesisError>;

/// Synthesizes chunks through a TTS repository and stitches the audio in
/// chunk order.
///
/// A failed chunk is logged and skipped. The stitch only fails when every
/// chunk failed, or when the overall timeout elapses.
pub struct AudioStitcher {
    tts_repo: Arc<dyn TtsRepository>,
    format: AudioFormat,
    max_in_flight: usize,
    timeout: Option<Duration>,
}

impl AudioStitcher {
    pub fn new(tts_repo: Arc<dyn TtsRepository>, format: AudioFormat) -> Self {
        Self {
            tts_repo,
            format,
            max_in_flight: 1,
            timeout: None,
        }
    }

    /// Number of synthesis calls allowed in flight at once (1 = sequential)
    pub fn with_max_in_flight(mut self, max_in_flight: usize) -> Self {
        self.max_in_flight = max_in_flight.max(1);
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub async fn stitch(&self, chunks: &[Chunk]) -> Result<StitchedAudio, StitchError> {
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.stitch_all(chunks))
                .await
                .map_err(|_| {
                    tracing::error!(
                        timeout_ms = limit.as_millis(),
                        chunk_count = chunks.len(),
                        "Audio stitching timed out, discarding partial output"
                    );
                    StitchError::Timeout(limit)
                })?,
            None => self.stitch_all(chunks).await,
        }
    }

    async fn stitch_all(&self, chunks: &[Chunk]) -> Result<StitchedAudio, StitchError> {
        let start_time = Instant::now();

        let outcomes = if self.max_in_flight == 1 {
            self.synthesize_sequential(chunks).await
        } else {
            self.synthesize_concurrent(chunks).await
        };

        let audio = self.assemble(chunks, outcomes)?;

        tracing::info!(
            provider = self.tts_repo.provider_name(),
            latency_ms = start_time.elapsed().as_millis(),
            chunk_count = chunks.len(),
            segment_count = audio.segment_count(),
            skipped_count = audio.skipped_count(),
            audio_size_bytes = audio.byte_len(),
            max_in_flight = self.max_in_flight,
            "Audio stitching completed"
        );

        Ok(audio)
    }

    async fn synthesize_sequential(&self, chunks: &[Chunk]) -> Vec<SynthesisOutcome> {
        let mut outcomes = Vec::with_capacity(chunks.len());

        for chunk in chunks {
            tracing::info!(
                chunk_index = chunk.index,
                chunk_bytes = chunk.byte_size,
                "Synthesizing chunk"
            );
            outcomes.push(self.tts_repo.synthesize(&chunk.content).await);
        }

        outcomes
    }

    /// Run up to `max_in_flight` calls at once. Each outcome lands in the slot
    /// of its chunk position, so completion order never leaks into the output.
    async fn synthesize_concurrent(&self, chunks: &[Chunk]) -> Vec<SynthesisOutcome> {
        let mut slots: Vec<Option<SynthesisOutcome>> = vec![None; chunks.len()];

        // Futures are built up front; a stream combinator closure borrowing
        // `&Chunk` does not satisfy the Send bound of async_trait callers.
        let pending: Vec<_> = chunks
            .iter()
            .enumerate()
            .map(|(position, chunk)| async move {
                tracing::info!(
                    chunk_index = chunk.index,
                    chunk_bytes = chunk.byte_size,
                    "Synthesizing chunk"
                );
                (position, self.tts_repo.synthesize(&chunk.content).await)
            })
            .collect();

        let mut completions = stream::iter(pending).buffer_unordered(self.max_in_flight);

        while let Some((position, outcome)) = completions.next().await {
            slots[position] = Some(outcome);
        }

        slots
            .into_iter()
            .map(|slot| {
                slot.unwrap_or_else(|| {
                    Err(SynthesisError::Provider(
                        "synthesis finished without an outcome".to_string(),
                    ))
                })
            })
            .collect()
    }

    fn assemble(
        &self,
        chunks: &[Chunk],
        outcomes: Vec<SynthesisOutcome>,
    ) -> Result<StitchedAudio, StitchError> {
        let mut audio = StitchedAudio::new(self.format);
        let mut last_error = None;

        for (chunk, outcome) in chunks.iter().zip(outcomes) {
            match outcome {
                Ok(buffer) => {
                    if buffer.format != self.format {
                        tracing::warn!(
                            chunk_index = chunk.index,
                            expected_format = %self.format,
                            received_format = %buffer.format,
                            "Provider returned a different audio format"
                        );
                    }
                    audio.push_segment(chunk.index, buffer);
                    tracing::debug!(
                        chunk_index = chunk.index,
                        total_audio_size = audio.byte_len(),
                        "Chunk synthesized and merged"
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        chunk_index = chunk.index,
                        chunk_bytes = chunk.byte_size,
                        error = %e,
                        "Chunk synthesis failed, skipping chunk"
                    );
                    audio.mark_skipped(chunk.index);
                    last_error = Some(e);
                }
            }
        }

        if audio.is_empty() {
            if let Some(last_error) = last_error {
                tracing::error!(
                    attempted = chunks.len(),
                    error = %last_error,
                    "Every chunk failed to synthesize"
                );
                return Err(StitchError::AllChunksFailed {
                    attempted: chunks.len(),
                    last_error,
                });
            }
        }

        Ok(audio)
    }
}
