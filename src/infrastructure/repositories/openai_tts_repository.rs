use super::tts_repository::TtsRepository;
use crate::domain::audio::{AudioBuffer, AudioFormat, SynthesisError};
use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::{CreateSpeechRequest, SpeechModel, SpeechResponseFormat, Voice},
    Client,
};
use async_trait::async_trait;
use std::sync::Arc;

/// OpenAI has a limit of 4096 characters per request; bytes are the
/// stricter bound for Thai text
pub const MAX_INPUT_BYTES: usize = 4096;

/// OpenAI TTS implementation of TTS repository
pub struct OpenAiTtsRepository {
    client: Arc<Client<OpenAIConfig>>,
    model: String,
    voice: String,
    format: AudioFormat,
}

impl OpenAiTtsRepository {
    pub fn new(
        client: Arc<Client<OpenAIConfig>>,
        model: String,
        voice: String,
        format: AudioFormat,
    ) -> Self {
        Self {
            client,
            model,
            voice,
            format,
        }
    }

    fn speech_model(model: &str) -> SpeechModel {
        match model {
            "tts-1" => SpeechModel::Tts1,
            "tts-1-hd" => SpeechModel::Tts1Hd,
            other => SpeechModel::Other(other.to_string()),
        }
    }

    fn voice(voice: &str) -> Voice {
        match voice.to_lowercase().as_str() {
            "alloy" => Voice::Alloy,
            "echo" => Voice::Echo,
            "fable" => Voice::Fable,
            "onyx" => Voice::Onyx,
            "nova" => Voice::Nova,
            "shimmer" => Voice::Shimmer,
            _ => Voice::Alloy,
        }
    }

    fn response_format(format: AudioFormat) -> SpeechResponseFormat {
        match format {
            AudioFormat::Mp3 => SpeechResponseFormat::Mp3,
            AudioFormat::OggOpus => SpeechResponseFormat::Opus,
        }
    }

    fn classify_error(error: OpenAIError) -> SynthesisError {
        match error {
            OpenAIError::ApiError(api_error) => {
                let message = format!("OpenAI TTS error: {}", api_error.message);
                if api_error.message.to_lowercase().contains("rate limit") {
                    SynthesisError::RateLimited(message)
                } else {
                    SynthesisError::Provider(message)
                }
            }
            OpenAIError::InvalidArgument(message) => SynthesisError::Rejected(message),
            OpenAIError::JSONDeserialize(e) => SynthesisError::InvalidResponse(e.to_string()),
            other => SynthesisError::Provider(format!("OpenAI TTS error: {}", other)),
        }
    }
}

#[async_trait]
impl TtsRepository for OpenAiTtsRepository {
    async fn synthesize(&self, text: &str) -> Result<AudioBuffer, SynthesisError> {
        tracing::info!(
            model = %self.model,
            voice = %self.voice,
            output_format = %self.format,
            text_length = text.len(),
            "Calling OpenAI TTS API"
        );

        let request = CreateSpeechRequest {
            model: Self::speech_model(&self.model),
            input: text.to_string(),
            voice: Self::voice(&self.voice),
            response_format: Some(Self::response_format(self.format)),
            speed: None,
        };

        let response = self.client.audio().speech(request).await.map_err(|e| {
            tracing::error!(
                error = %e,
                model = %self.model,
                voice = %self.voice,
                text_length = text.len(),
                "OpenAI TTS API call failed"
            );
            Self::classify_error(e)
        })?;

        let audio_bytes = response.bytes.to_vec();
        tracing::debug!(
            audio_size = audio_bytes.len(),
            "OpenAI TTS audio received successfully"
        );

        Ok(AudioBuffer::new(audio_bytes, self.format))
    }

    fn max_input_bytes(&self) -> usize {
        MAX_INPUT_BYTES
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }
}
