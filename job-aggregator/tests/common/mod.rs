#![allow(dead_code)]

use async_trait::async_trait;
use job_aggregator::{
    FetchMethod, JobSource, Result, SourceFailure, SourceHealth, SourceSpec, WorkTypeRule,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once};

static INIT: Once = Once::new();

pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

pub fn spec(id: &str, accepted: &str, critical: bool) -> SourceSpec {
    SourceSpec {
        id: id.to_string(),
        name: id.to_uppercase(),
        url: format!("http://127.0.0.1:9/{id}"),
        method: FetchMethod::Get,
        rule: WorkTypeRule::new([accepted]),
        critical,
    }
}

/// Source answering from memory with a fixed body or failure.
pub struct StubSource {
    spec: SourceSpec,
    response: std::result::Result<String, SourceFailure>,
    pulls: Arc<AtomicUsize>,
}

impl StubSource {
    pub fn ok(spec: SourceSpec, body: &str) -> Self {
        Self {
            spec,
            response: Ok(body.to_string()),
            pulls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing(spec: SourceSpec, failure: SourceFailure) -> Self {
        Self {
            spec,
            response: Err(failure),
            pulls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn pull_counter(&self) -> Arc<AtomicUsize> {
        self.pulls.clone()
    }

    pub fn boxed(self) -> Box<dyn JobSource> {
        Box::new(self)
    }
}

#[async_trait]
impl JobSource for StubSource {
    fn spec(&self) -> &SourceSpec {
        &self.spec
    }

    async fn pull(&self) -> std::result::Result<String, SourceFailure> {
        self.pulls.fetch_add(1, Ordering::SeqCst);
        self.response.clone()
    }

    async fn health_check(&self) -> Result<SourceHealth> {
        Ok(SourceHealth {
            source_id: self.spec.id.clone(),
            reachable: self.response.is_ok(),
            http_status: match &self.response {
                Ok(_) => Some(200),
                Err(SourceFailure::Status(status)) => Some(*status),
                Err(_) => None,
            },
            response_time_ms: 0,
            error: self.response.as_ref().err().map(|e| e.to_string()),
        })
    }
}

/// Source A/B/C bodies from the canonical example.
pub const SOURCE_A: &str = r#"[[{"SourceID":"1","WorkType":"Perm"},{"SourceID":"2","WorkType":"Temp"}]]"#;
pub const SOURCE_B: &str = r#"[[{"SourceID":"3","WorkType":"Permanent"}]]"#;
pub const SOURCE_C: &str = r#"[[{"SourceID":"4","WorkType":"Direct Hire"}]]"#;

pub fn ids(records: &[job_aggregator::JobRecord]) -> Vec<&str> {
    records.iter().map(|r| r.source_id.as_str()).collect()
}
