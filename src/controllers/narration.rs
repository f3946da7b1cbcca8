use chrono::{DateTime, FixedOffset, Utc};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::AsyncReadExt;

use crate::{
    domain::{
        audio::AudioFormat,
        narration::{NarrationResult, NarrationService, NarrationServiceApi},
    },
    error::{AppError, AppResult},
};

/// Daily digests are dated in Bangkok time (UTC+7)
const BANGKOK_UTC_OFFSET_SECS: i32 = 7 * 3600;

/// Where narration text comes from
#[derive(Debug, Clone, PartialEq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

impl From<PathBuf> for InputSource {
    fn from(path: PathBuf) -> Self {
        if path.as_os_str() == "-" {
            InputSource::Stdin
        } else {
            InputSource::File(path)
        }
    }
}

#[derive(Debug, Clone)]
pub struct NarrateRequest {
    pub input: InputSource,
    pub name: Option<String>,
    pub daily: bool,
}

pub struct NarrationController {
    narration_service: Arc<NarrationService>,
    format: AudioFormat,
}

impl NarrationController {
    pub fn new(narration_service: Arc<NarrationService>, format: AudioFormat) -> Self {
        Self {
            narration_service,
            format,
        }
    }

    /// narrate - Turn a text into one persisted audio artifact
    pub async fn narrate(&self, request: NarrateRequest) -> AppResult<NarrationResult> {
        let text = read_input(&request.input).await?;
        let artifact_name = artifact_name(&request, self.format, Utc::now())?;

        let result = self
            .narration_service
            .narrate(text, artifact_name)
            .await?;

        Ok(result)
    }
}

pub(crate) async fn read_input(input: &InputSource) -> AppResult<String> {
    match input {
        InputSource::Stdin => {
            let mut text = String::new();
            tokio::io::stdin().read_to_string(&mut text).await?;
            Ok(text)
        }
        InputSource::File(path) => Ok(tokio::fs::read_to_string(path).await?),
    }
}

/// Resolve the artifact name: explicit name, then the daily digest name,
/// then the input file stem, then a timestamped name
pub fn artifact_name(
    request: &NarrateRequest,
    format: AudioFormat,
    now: DateTime<Utc>,
) -> AppResult<String> {
    if let Some(name) = &request.name {
        if name.trim().is_empty() {
            return Err(AppError::BadRequest("Artifact name cannot be empty".to_string()));
        }
        return Ok(name.clone());
    }

    if request.daily {
        let offset = FixedOffset::east_opt(BANGKOK_UTC_OFFSET_SECS)
            .ok_or_else(|| AppError::Internal("invalid Bangkok offset".to_string()))?;
        let today = now.with_timezone(&offset).date_naive();
        return Ok(format!(
            "daily_summary_{}.{}",
            today.format("%Y-%m-%d"),
            format.extension()
        ));
    }

    let stem = match &request.input {
        InputSource::File(path) => Path::new(path)
            .file_stem()
            .and_then(|s| s.to_str())
            .map(str::to_string),
        InputSource::Stdin => None,
    };

    Ok(match stem {
        Some(stem) => format!("{}.{}", stem, format.extension()),
        None => format!("narration_{}.{}", now.timestamp(), format.extension()),
    })
}
