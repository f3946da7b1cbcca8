#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ChunkingError {
    #[error("max chunk size must be greater than zero")]
    InvalidMaxBytes,
}
