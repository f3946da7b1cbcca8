use crate::domain::audio::{AudioBuffer, SynthesisError};
use async_trait::async_trait;

/// Repository for TTS synthesis operations.
/// Abstracts the underlying TTS provider (Google Cloud TTS, OpenAI, ...)
///
/// Implementations synthesize exactly one piece of text per call. Splitting
/// long text and merging audio is done by the caller, which keeps every
/// request under `max_input_bytes`.
#[async_trait]
pub trait TtsRepository: Send + Sync {
    /// Synthesize a single chunk of text with the configured voice
    ///
    /// # Errors
    /// Returns a `SynthesisError` if the provider rejects the text, rate
    /// limits the request, or is unavailable
    async fn synthesize(&self, text: &str) -> Result<AudioBuffer, SynthesisError>;

    /// Largest request, in UTF-8 bytes, the provider accepts
    fn max_input_bytes(&self) -> usize;

    fn provider_name(&self) -> &'static str;
}
