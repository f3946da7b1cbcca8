use std::time::Duration;

/// Failure of a single synthesis call
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum SynthesisError {
    #[error("rate limited: {0}")]
    RateLimited(String),
    #[error("input rejected: {0}")]
    Rejected(String),
    #[error("provider error: {0}")]
    Provider(String),
    #[error("invalid provider response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, thiserror::Error)]
pub enum StitchError {
    #[error("all {attempted} chunks failed to synthesize, last error: {last_error}")]
    AllChunksFailed {
        attempted: usize,
        last_error: SynthesisError,
    },
    #[error("synthesis timed out after {0:?}")]
    Timeout(Duration),
}
