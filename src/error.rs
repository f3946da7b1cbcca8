use serde::{Deserialize, Serialize};

/// Main application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    BadRequest(String),

    #[error("External service error: {0}")]
    ExternalService(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error output structure - just the message
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

impl AppError {
    /// Process exit code for this error, following sysexits.h
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::BadRequest(_) => 65,      // EX_DATAERR
            Self::ExternalService(_) => 69, // EX_UNAVAILABLE
            Self::Internal(_) => 70,        // EX_SOFTWARE
            Self::Storage(_) => 74,         // EX_IOERR
            Self::Config(_) => 78,          // EX_CONFIG
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            message: self.to_string(),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::BadRequest(format!("cannot read input: {}", err))
    }
}

/// Custom result type for the application
pub type AppResult<T> = Result<T, AppError>;
