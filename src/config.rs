//! Environment-driven configuration

use crate::transport::DEFAULT_TIMEOUT;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000/next";
pub const DEFAULT_LOG_PATH: &str = "interview_chat.log";
pub const DEFAULT_FIRST_MESSAGE: &str =
    "Hello, and thank you for taking part in this interview. What would you like to talk about first?";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown host `{0}` (expected `standalone` or `survey`)")]
    UnknownHost(String),
    #[error("invalid timeout `{0}` (expected whole seconds > 0)")]
    InvalidTimeout(String),
    #[error("INTERVIEW_SURVEY_FILE must be set for the survey host")]
    MissingSurveyFile,
    #[error("failed to read survey question {}: {source}", path.display())]
    ReadSurveyFile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse survey question {}: {source}", path.display())]
    ParseSurveyFile {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Which host adapter to run, with its own settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostConfig {
    Standalone {
        session_id: String,
        first_message: String,
    },
    Survey {
        question_file: PathBuf,
    },
}

#[derive(Debug, Clone)]
pub struct ChatConfig {
    pub host: HostConfig,
    pub endpoint: String,
    pub timeout: Duration,
    pub log_path: PathBuf,
}

impl ChatConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; empty values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = match var("INTERVIEW_HOST").as_deref().map(str::trim) {
            None | Some("standalone") => HostConfig::Standalone {
                session_id: var("INTERVIEW_SESSION_ID")
                    .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
                first_message: var("INTERVIEW_FIRST_MESSAGE")
                    .unwrap_or_else(|| DEFAULT_FIRST_MESSAGE.to_string()),
            },
            Some("survey") => HostConfig::Survey {
                question_file: var("INTERVIEW_SURVEY_FILE")
                    .map(PathBuf::from)
                    .ok_or(ConfigError::MissingSurveyFile)?,
            },
            Some(other) => return Err(ConfigError::UnknownHost(other.to_string())),
        };

        let timeout = match var("INTERVIEW_TIMEOUT_SECS") {
            None => DEFAULT_TIMEOUT,
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => return Err(ConfigError::InvalidTimeout(raw)),
            },
        };

        Ok(Self {
            host,
            endpoint: var("INTERVIEW_ENDPOINT").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            timeout,
            log_path: var("INTERVIEW_LOG_PATH")
                .map_or_else(|| PathBuf::from(DEFAULT_LOG_PATH), PathBuf::from),
        })
    }
}
