use crate::domain::audio::StitchedAudio;
use async_trait::async_trait;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("invalid artifact name: {0}")]
    InvalidName(String),
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Repository for persisting stitched narration audio.
///
/// Naming and retention of artifacts belong to the caller.
#[async_trait]
pub trait AudioRepository: Send + Sync {
    /// Write the audio under `name` and return where it was stored
    async fn save(&self, audio: &StitchedAudio, name: &str) -> Result<PathBuf, PersistenceError>;
}
