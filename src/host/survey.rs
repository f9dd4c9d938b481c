//! Survey-platform question
//!
//! The backend is stateless here: every request carries the full interview
//! configuration for the question alongside the respondent's identifiers.

use crate::config::ConfigError;
use crate::runtime::Host;
use crate::state_machine::HostKind;
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Embedded-data flag set once the backend ends the interview
pub const INTERVIEW_CONCLUDED_KEY: &str = "interview_concluded";

/// Interview configuration for one survey question
///
/// Prompt templates, topic plan and identifiers are passed to the backend
/// verbatim; nothing here interprets them.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyQuestion {
    pub first_question: String,
    pub topics: Value,
    pub topics_length: Value,
    pub prompt_topic: String,
    pub prompt_history: String,
    pub prompt_finish: Value,
    pub prompt_probing: String,
    #[serde(default = "default_temperature")]
    pub temperature_topic: f64,
    #[serde(default)]
    pub temperature_history: f64,
    #[serde(default = "default_temperature")]
    pub temperature_finish: f64,
    #[serde(default = "default_temperature")]
    pub temperature_probing: f64,
    #[serde(default = "default_model")]
    pub model_name_short: String,
    #[serde(default = "default_model")]
    pub model_name_long: String,
    /// Platform-managed values: `userID`, `customSurveyID`, `questionID`, `versionID`
    #[serde(default)]
    pub embedded_data: BTreeMap<String, Value>,
}

fn default_temperature() -> f64 {
    0.7
}

fn default_model() -> String {
    "gpt-4o".to_string()
}

impl SurveyQuestion {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadSurveyFile {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::ParseSurveyFile {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// The platform's per-respondent key/value store
#[derive(Debug, Clone, Default)]
pub struct EmbeddedData {
    inner: Arc<Mutex<BTreeMap<String, Value>>>,
}

impl EmbeddedData {
    pub fn new(initial: BTreeMap<String, Value>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(initial)),
        }
    }

    /// Missing keys read as `null`, as the platform reports them
    pub fn get(&self, key: &str) -> Value {
        self.lock().get(key).cloned().unwrap_or(Value::Null)
    }

    pub fn set(&self, key: &str, value: impl Into<Value>) {
        self.lock().insert(key.to_string(), value.into());
    }

    pub fn snapshot(&self) -> BTreeMap<String, Value> {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, Value>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

pub struct SurveyHost {
    question: SurveyQuestion,
    data: EmbeddedData,
}

impl SurveyHost {
    pub fn new(question: SurveyQuestion) -> Self {
        let data = EmbeddedData::new(question.embedded_data.clone());
        Self { question, data }
    }

    pub fn first_question(&self) -> &str {
        &self.question.first_question
    }

    /// Handle onto the embedded data, for reading it back after the chat ends
    pub fn embedded_data(&self) -> EmbeddedData {
        self.data.clone()
    }

    /// Identifier for logs, built from the respondent's ids
    pub fn session_id(&self) -> String {
        ["customSurveyID", "questionID", "userID"]
            .iter()
            .map(|key| match self.data.get(key) {
                Value::String(s) => s,
                Value::Null => "-".to_string(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join("/")
    }
}

impl Host for SurveyHost {
    fn kind(&self) -> HostKind {
        HostKind::Survey
    }

    fn request_body(&self, message: &str) -> Value {
        let q = &self.question;
        json!({
            "message": message,
            "topics": q.topics,
            "topicsLength": q.topics_length,
            "firstQuestion": q.first_question,
            "promptTopic": q.prompt_topic,
            "promptHistory": q.prompt_history,
            "promptFinish": q.prompt_finish,
            "promptProbing": q.prompt_probing,
            "temperatureTopic": q.temperature_topic,
            "temperatureHistory": q.temperature_history,
            "temperatureFinish": q.temperature_finish,
            "temperatureProbing": q.temperature_probing,
            "modelNameShort": q.model_name_short,
            "modelNameLong": q.model_name_long,
            "userID": self.data.get("userID"),
            "surveyID": self.data.get("customSurveyID"),
            "questionID": self.data.get("questionID"),
            "versionID": self.data.get("versionID"),
        })
    }

    fn interview_concluded(&self) {
        self.data.set(INTERVIEW_CONCLUDED_KEY, "1");
    }
}
