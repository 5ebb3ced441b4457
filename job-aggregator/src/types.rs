use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
// Use the interfaces crate for core types
pub use interfaces::defs::{
    ColumnManifest, ColumnSpec, FetchMethod, FilterVariant, JobRecord, Presenter, RenderRule,
    SourceSpec, WorkType, WorkTypeRule,
};

#[derive(Debug, Clone)]
pub struct FetchResult {
    pub source_id: String,
    pub success: bool,
    pub error: Option<String>,
    pub fetch_time: DateTime<Utc>,
    pub response_time_ms: u64,
    pub http_status: Option<u16>,
    pub attempts: u32,
    pub content: Option<String>, // JSON body
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub user_agent: String,
    /// No timeout unless set.
    pub timeout_seconds: Option<u64>,
    pub max_retries: u32,
    pub retry_delay_seconds: u64,
    pub max_redirects: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "Job-Aggregator/1.0".to_string(),
            timeout_seconds: None,
            max_retries: 0,
            retry_delay_seconds: 1,
            max_redirects: 10,
        }
    }
}

/// What happens when a source cannot be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Only sources marked `critical` abort the aggregation.
    #[default]
    CriticalOnly,
    /// Every failure degrades to an empty contribution.
    Degrade,
    /// Any failure aborts the aggregation.
    Abort,
}

impl FailurePolicy {
    pub fn aborts(&self, spec: &SourceSpec) -> bool {
        match self {
            FailurePolicy::CriticalOnly => spec.critical,
            FailurePolicy::Degrade => false,
            FailurePolicy::Abort => true,
        }
    }
}

impl std::str::FromStr for FailurePolicy {
    type Err = AggregatorError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "critical-only" | "critical" => Ok(FailurePolicy::CriticalOnly),
            "degrade" => Ok(FailurePolicy::Degrade),
            "abort" => Ok(FailurePolicy::Abort),
            other => Err(AggregatorError::Config(format!("unknown failure policy: {other}"))),
        }
    }
}

/// Why a single source contributed nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum SourceFailure {
    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("unexpected response shape: {0}")]
    Shape(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "failure", rename_all = "snake_case")]
pub enum SourceOutcome {
    Ok,
    Degraded(SourceFailure),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceReport {
    pub source_id: String,
    pub outcome: SourceOutcome,
    /// Records parsed from the body before the work type rule.
    pub fetched: usize,
    pub kept: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AggregateReport {
    pub records: Vec<JobRecord>,
    pub sources: Vec<SourceReport>,
}

#[derive(Debug, thiserror::Error)]
pub enum AggregatorError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("source {source_id} failed: {failure}")]
    SourceFailed {
        source_id: String,
        failure: SourceFailure,
    },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AggregatorError>;
