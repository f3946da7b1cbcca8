use super::tts_repository::TtsRepository;
use crate::domain::audio::{AudioBuffer, AudioFormat, SynthesisError};
use async_trait::async_trait;
use base64::Engine;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

/// Google Cloud TTS accepts at most 5000 bytes of input per request
pub const MAX_INPUT_BYTES: usize = 5000;

const DEFAULT_ENDPOINT: &str = "https://texttospeech.googleapis.com/v1/text:synthesize";

/// Sent as a header so the key never appears in request URLs or their errors
const API_KEY_HEADER: &str = "X-Goog-Api-Key";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeRequest<'a> {
    input: SynthesisInput<'a>,
    voice: VoiceSelection<'a>,
    audio_config: AudioConfig,
}

#[derive(Debug, Serialize)]
struct SynthesisInput<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceSelection<'a> {
    language_code: &'a str,
    name: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AudioConfig {
    audio_encoding: &'static str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeResponse {
    audio_content: String,
}

/// Google Cloud Text-to-Speech implementation of TTS repository
pub struct GoogleTtsRepository {
    http_client: reqwest::Client,
    api_key: String,
    endpoint: String,
    language_code: String,
    voice_name: String,
    format: AudioFormat,
}

impl GoogleTtsRepository {
    pub fn new(
        http_client: reqwest::Client,
        api_key: String,
        language_code: String,
        voice_name: String,
        format: AudioFormat,
    ) -> Self {
        Self {
            http_client,
            api_key,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            language_code,
            voice_name,
            format,
        }
    }

    /// Point the repository at a different endpoint (local emulators, tests)
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    fn audio_encoding(format: AudioFormat) -> &'static str {
        match format {
            AudioFormat::Mp3 => "MP3",
            AudioFormat::OggOpus => "OGG_OPUS",
        }
    }

    fn classify_status(status: StatusCode, body: &str) -> SynthesisError {
        let message = format!("Google TTS returned {}: {}", status, body);
        if status == StatusCode::TOO_MANY_REQUESTS {
            SynthesisError::RateLimited(message)
        } else if status.is_client_error() {
            SynthesisError::Rejected(message)
        } else {
            SynthesisError::Provider(message)
        }
    }

    fn decode_audio(body: &str, format: AudioFormat) -> Result<AudioBuffer, SynthesisError> {
        let response: SynthesizeResponse = serde_json::from_str(body)
            .map_err(|e| SynthesisError::InvalidResponse(format!("malformed body: {}", e)))?;

        let audio_bytes = base64::engine::general_purpose::STANDARD
            .decode(response.audio_content.as_bytes())
            .map_err(|e| SynthesisError::InvalidResponse(format!("bad audioContent: {}", e)))?;

        Ok(AudioBuffer::new(audio_bytes, format))
    }
}

#[async_trait]
impl TtsRepository for GoogleTtsRepository {
    async fn synthesize(&self, text: &str) -> Result<AudioBuffer, SynthesisError> {
        let start_time = std::time::Instant::now();

        tracing::info!(
            language = %self.language_code,
            voice = %self.voice_name,
            output_format = %self.format,
            text_length = text.len(),
            "Calling Google TTS synthesize"
        );

        let request = SynthesizeRequest {
            input: SynthesisInput { text },
            voice: VoiceSelection {
                language_code: &self.language_code,
                name: &self.voice_name,
            },
            audio_config: AudioConfig {
                audio_encoding: Self::audio_encoding(self.format),
            },
        };

        let response = self
            .http_client
            .post(&self.endpoint)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                let e = e.without_url();
                tracing::error!(error = %e, text_length = text.len(), "Google TTS request failed");
                SynthesisError::Provider(format!("Google TTS request failed: {}", e))
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| {
                SynthesisError::InvalidResponse(format!("unreadable body: {}", e.without_url()))
            })?;

        if !status.is_success() {
            tracing::error!(
                status = status.as_u16(),
                voice = %self.voice_name,
                text_length = text.len(),
                "Google TTS synthesize failed"
            );
            return Err(Self::classify_status(status, &body));
        }

        let audio = Self::decode_audio(&body, self.format)?;

        tracing::debug!(
            audio_size = audio.len(),
            latency_ms = start_time.elapsed().as_millis(),
            "Google TTS audio received successfully"
        );

        Ok(audio)
    }

    fn max_input_bytes(&self) -> usize {
        MAX_INPUT_BYTES
    }

    fn provider_name(&self) -> &'static str {
        "google"
    }
}
