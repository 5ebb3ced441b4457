use crate::types::{Result, SourceFailure, SourceSpec};
use async_trait::async_trait;

/// Trait for pulling job listings from an upstream source (VMS endpoints,
/// fixtures, etc.)
#[async_trait]
pub trait JobSource: Send + Sync {
    /// Static description of the source, including its work type rule
    fn spec(&self) -> &SourceSpec;

    /// Read the raw response body once.
    /// A transport failure or non-success status is `Err(SourceFailure)`
    async fn pull(&self) -> std::result::Result<String, SourceFailure>;

    /// Check if the source is reachable and answers with a success status
    async fn health_check(&self) -> Result<SourceHealth>;

    fn source_id(&self) -> &str {
        &self.spec().id
    }

    fn source_name(&self) -> &str {
        &self.spec().name
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceHealth {
    pub source_id: String,
    pub reachable: bool,
    pub http_status: Option<u16>,
    pub response_time_ms: u64,
    pub error: Option<String>,
}
