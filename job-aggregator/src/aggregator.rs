use crate::config::AggregatorConfig;
use crate::parser::JobParser;
use crate::sources::HttpJobSource;
use crate::traits::{JobSource, SourceHealth};
use crate::types::{
    AggregateReport, AggregatorError, FailurePolicy, JobRecord, Result, SourceFailure,
    SourceOutcome, SourceReport,
};
use crate::Fetcher;
use futures::future::join_all;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Fetches every configured source, keeps the permanent listings, and
/// concatenates them in declaration order.
pub struct JobAggregator {
    sources: Vec<Box<dyn JobSource>>,
    policy: FailurePolicy,
}

impl JobAggregator {
    pub fn new(sources: Vec<Box<dyn JobSource>>, policy: FailurePolicy) -> Self {
        Self { sources, policy }
    }

    /// Build HTTP sources from configuration, sharing one client.
    pub fn from_config(config: &AggregatorConfig) -> Result<Self> {
        if config.sources.is_empty() {
            return Err(AggregatorError::Config("no sources configured".to_string()));
        }

        let fetcher = Arc::new(Fetcher::new(config.fetch.clone())?);
        let sources = config
            .sources
            .iter()
            .cloned()
            .map(|spec| Box::new(HttpJobSource::new(spec, fetcher.clone())) as Box<dyn JobSource>)
            .collect();

        Ok(Self::new(sources, config.failure_policy))
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    pub async fn aggregate(&self) -> Result<Vec<JobRecord>> {
        Ok(self.aggregate_with_report().await?.records)
    }

    pub async fn aggregate_with_report(&self) -> Result<AggregateReport> {
        info!("Aggregating {} sources (policy: {:?})", self.sources.len(), self.policy);

        let bodies = join_all(self.sources.iter().map(|source| source.pull())).await;

        let mut records = Vec::new();
        let mut reports = Vec::with_capacity(self.sources.len());

        for (source, body) in self.sources.iter().zip(bodies) {
            let spec = source.spec();

            let body = match body {
                Ok(body) => body,
                Err(failure) => {
                    if self.policy.aborts(spec) {
                        error!("Aborting aggregation, source {} failed: {}", spec.id, failure);
                        return Err(AggregatorError::SourceFailed {
                            source_id: spec.id.clone(),
                            failure,
                        });
                    }
                    warn!("Source {} contributes nothing: {}", spec.id, failure);
                    reports.push(degraded(&spec.id, failure));
                    continue;
                }
            };

            let parsed = match JobParser::parse_records(&body, spec) {
                Ok(parsed) => parsed,
                Err(failure) => {
                    warn!("Source {} contributes nothing: {}", spec.id, failure);
                    reports.push(degraded(&spec.id, failure));
                    continue;
                }
            };

            let fetched = parsed.len();
            let before = records.len();
            records.extend(parsed.into_iter().filter(|record| record.work_type.is_permanent()));
            let kept = records.len() - before;

            info!("Source {}: kept {}/{} records", spec.id, kept, fetched);
            reports.push(SourceReport {
                source_id: spec.id.clone(),
                outcome: SourceOutcome::Ok,
                fetched,
                kept,
            });
        }

        info!("Aggregated {} records from {} sources", records.len(), self.sources.len());

        Ok(AggregateReport {
            records,
            sources: reports,
        })
    }

    /// Probe every source concurrently, in declaration order.
    pub async fn health_check(&self) -> Vec<Result<SourceHealth>> {
        join_all(self.sources.iter().map(|source| source.health_check())).await
    }
}

fn degraded(source_id: &str, failure: SourceFailure) -> SourceReport {
    SourceReport {
        source_id: source_id.to_string(),
        outcome: SourceOutcome::Degraded(failure),
        fetched: 0,
        kept: 0,
    }
}
