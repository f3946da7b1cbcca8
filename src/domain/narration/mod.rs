pub mod error;
pub mod service;

pub use error::NarrationServiceError;
pub use service::{
    chunk_bound, plan_chunks, NarrationOptions, NarrationService, NarrationServiceApi,
};

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::domain::audio::AudioFormat;

/// Outcome of narrating one text into a persisted audio artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NarrationResult {
    pub path: PathBuf,
    pub format: AudioFormat,
    pub chunk_count: usize,
    pub skipped_chunks: Vec<usize>,
    pub audio_size_bytes: usize,
    pub char_count: usize,
    pub duration_minutes: f32,
}

impl NarrationResult {
    /// True when some chunks were dropped from the audio
    pub fn is_partial(&self) -> bool {
        !self.skipped_chunks.is_empty()
    }
}
