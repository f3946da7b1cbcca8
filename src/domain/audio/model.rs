use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Encodings the narrator can stitch by plain byte concatenation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AudioFormat {
    #[serde(rename = "mp3")]
    Mp3,
    #[serde(rename = "ogg")]
    OggOpus,
}

impl AudioFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "mp3",
            AudioFormat::OggOpus => "ogg",
        }
    }

    /// File extension for persisted artifacts
    pub fn extension(&self) -> &'static str {
        self.as_str()
    }
}

impl std::fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AudioFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mp3" => Ok(AudioFormat::Mp3),
            "ogg" | "ogg_opus" | "opus" => Ok(AudioFormat::OggOpus),
            other => Err(format!("unsupported audio format: {}", other)),
        }
    }
}

/// Encoded audio returned by one synthesis call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioBuffer {
    pub data: Vec<u8>,
    pub format: AudioFormat,
}

impl AudioBuffer {
    pub fn new(data: Vec<u8>, format: AudioFormat) -> Self {
        Self { data, format }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Audio for one chunk, tagged with the chunk it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioSegment {
    pub chunk_index: usize,
    pub buffer: AudioBuffer,
}

/// Ordered concatenation of per-chunk audio.
///
/// Segments are kept in chunk order; chunks whose synthesis failed are
/// recorded in `skipped` so callers can detect partial output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StitchedAudio {
    format: AudioFormat,
    segments: Vec<AudioSegment>,
    skipped: Vec<usize>,
}

impl StitchedAudio {
    pub fn new(format: AudioFormat) -> Self {
        Self {
            format,
            segments: Vec::new(),
            skipped: Vec::new(),
        }
    }

    pub(crate) fn push_segment(&mut self, chunk_index: usize, buffer: AudioBuffer) {
        self.segments.push(AudioSegment {
            chunk_index,
            buffer,
        });
    }

    pub(crate) fn mark_skipped(&mut self, chunk_index: usize) {
        self.skipped.push(chunk_index);
    }

    pub fn format(&self) -> AudioFormat {
        self.format
    }

    pub fn segments(&self) -> &[AudioSegment] {
        &self.segments
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn skipped_indices(&self) -> &[usize] {
        &self.skipped
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Total encoded size in bytes
    pub fn byte_len(&self) -> usize {
        self.segments.iter().map(|s| s.buffer.len()).sum()
    }

    /// Concatenate all segments into one continuous buffer
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut merged = Vec::with_capacity(self.byte_len());
        for segment in &self.segments {
            merged.extend_from_slice(&segment.buffer.data);
        }
        merged
    }
}
