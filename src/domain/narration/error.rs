use crate::domain::audio::StitchError;
use crate::domain::chunking::ChunkingError;
use crate::error::AppError;
use crate::infrastructure::repositories::PersistenceError;

#[derive(Debug, thiserror::Error)]
pub enum NarrationServiceError {
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("synthesis failed: {0}")]
    Synthesis(#[from] StitchError),
    #[error("persistence failed: {0}")]
    Persistence(#[from] PersistenceError),
}

impl From<ChunkingError> for NarrationServiceError {
    fn from(err: ChunkingError) -> Self {
        NarrationServiceError::Invalid(err.to_string())
    }
}

impl From<NarrationServiceError> for AppError {
    fn from(err: NarrationServiceError) -> Self {
        match err {
            NarrationServiceError::Invalid(msg) => AppError::BadRequest(msg),
            NarrationServiceError::Synthesis(e) => AppError::ExternalService(e.to_string()),
            NarrationServiceError::Persistence(e) => AppError::Storage(e.to_string()),
        }
    }
}
