use super::audio_repository::{AudioRepository, PersistenceError};
use crate::domain::audio::StitchedAudio;
use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};

/// Stores narration audio as files under a single output directory
pub struct FsAudioRepository {
    output_dir: PathBuf,
}

impl FsAudioRepository {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Only plain file names are accepted, so artifacts cannot escape the output directory
    fn resolve(&self, name: &str) -> Result<PathBuf, PersistenceError> {
        let mut components = Path::new(name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(self.output_dir.join(name)),
            _ => Err(PersistenceError::InvalidName(name.to_string())),
        }
    }
}

#[async_trait]
impl AudioRepository for FsAudioRepository {
    async fn save(&self, audio: &StitchedAudio, name: &str) -> Result<PathBuf, PersistenceError> {
        let path = self.resolve(name)?;

        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|source| PersistenceError::Io {
                path: self.output_dir.clone(),
                source,
            })?;

        // Written beside the target and renamed, so a failed write never
        // leaves a truncated artifact under the final name
        let temp_path = self.output_dir.join(format!(".{}.partial", name));
        let bytes = audio.to_bytes();
        let written = match tokio::fs::write(&temp_path, &bytes).await {
            Ok(()) => tokio::fs::rename(&temp_path, &path).await,
            Err(e) => Err(e),
        };

        if let Err(source) = written {
            tracing::error!(path = %path.display(), error = %source, "Failed to write audio file");
            if let Err(e) = tokio::fs::remove_file(&temp_path).await {
                tracing::debug!(path = %temp_path.display(), error = %e, "No partial file to clean up");
            }
            return Err(PersistenceError::Io { path, source });
        }

        tracing::info!(
            path = %path.display(),
            audio_size_bytes = bytes.len(),
            format = %audio.format(),
            "Audio file written"
        );

        Ok(path)
    }
}
