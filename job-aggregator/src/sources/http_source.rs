use crate::traits::{JobSource, SourceHealth};
use crate::types::{Result, SourceFailure, SourceSpec};
use crate::Fetcher;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info};

/// Job source backed by one HTTP endpoint
pub struct HttpJobSource {
    spec: SourceSpec,
    fetcher: Arc<Fetcher>,
}

impl HttpJobSource {
    pub fn new(spec: SourceSpec, fetcher: Arc<Fetcher>) -> Self {
        Self { spec, fetcher }
    }
}

#[async_trait]
impl JobSource for HttpJobSource {
    fn spec(&self) -> &SourceSpec {
        &self.spec
    }

    async fn pull(&self) -> std::result::Result<String, SourceFailure> {
        info!("Pulling job source: {} ({})", self.spec.name, self.spec.url);

        let fetch_result = self
            .fetcher
            .fetch_source(&self.spec)
            .await
            .map_err(|e| SourceFailure::Network(e.to_string()))?;

        if !fetch_result.success {
            let failure = match fetch_result.http_status {
                Some(status) => SourceFailure::Status(status),
                None => SourceFailure::Network(
                    fetch_result.error.unwrap_or_else(|| "Fetch failed".to_string()),
                ),
            };
            error!("Failed to fetch job source {}: {}", self.spec.id, failure);
            return Err(failure);
        }

        Ok(fetch_result.content.unwrap_or_default())
    }

    async fn health_check(&self) -> Result<SourceHealth> {
        let fetch_result = self.fetcher.fetch_source(&self.spec).await?;

        Ok(SourceHealth {
            source_id: self.spec.id.clone(),
            reachable: fetch_result.success,
            http_status: fetch_result.http_status,
            response_time_ms: fetch_result.response_time_ms,
            error: fetch_result.error,
        })
    }
}
