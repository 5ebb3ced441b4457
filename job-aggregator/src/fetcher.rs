use crate::types::{AggregatorError, FetchConfig, FetchMethod, FetchResult, Result, SourceSpec};
use backoff::{backoff::Backoff, exponential::ExponentialBackoff};
use chrono::Utc;
use reqwest::header::{ACCEPT, HeaderValue};
use reqwest::{Client, Response};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};
use url::Url;

pub struct Fetcher {
    client: Client,
    config: FetchConfig,
}

impl Fetcher {
    pub fn new(config: FetchConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .user_agent(&config.user_agent)
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects));

        if let Some(seconds) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }

        let client = builder.build()?;

        Ok(Self { client, config })
    }

    /// Read one source. Transport failures and non-success statuses are
    /// reported inside the result; only an unusable URL is an `Err`.
    pub async fn fetch_source(&self, spec: &SourceSpec) -> Result<FetchResult> {
        let start_time = Instant::now();
        let fetch_time = Utc::now();
        let url = Url::parse(&spec.url)?;

        debug!("Fetching source: {} ({})", spec.id, url);

        let mut backoff: ExponentialBackoff<backoff::SystemClock> = ExponentialBackoff {
            current_interval: Duration::from_secs(self.config.retry_delay_seconds),
            initial_interval: Duration::from_secs(self.config.retry_delay_seconds),
            max_interval: Duration::from_secs(self.config.retry_delay_seconds.saturating_mul(32)),
            multiplier: 2.0,
            max_elapsed_time: None,
            ..Default::default()
        };

        let mut last_error = None;
        let mut last_status = None;
        let mut attempts = 0;

        for attempt in 0..=self.config.max_retries {
            attempts = attempt + 1;
            match self.send(spec.method, url.clone()).await {
                Ok(response) => {
                    let status = response.status();
                    last_status = Some(status.as_u16());

                    if !status.is_success() {
                        last_error = Some(format!(
                            "HTTP {}: {}",
                            status.as_u16(),
                            status.canonical_reason().unwrap_or("Unknown")
                        ));
                    } else {
                        match response.text().await {
                            Ok(content) => {
                                info!("Fetched source {} ({} bytes)", spec.id, content.len());
                                return Ok(FetchResult {
                                    source_id: spec.id.clone(),
                                    success: true,
                                    error: None,
                                    fetch_time,
                                    response_time_ms: start_time.elapsed().as_millis() as u64,
                                    http_status: Some(status.as_u16()),
                                    attempts,
                                    content: Some(content),
                                });
                            }
                            Err(e) => {
                                last_status = None;
                                last_error = Some(AggregatorError::Http(e).to_string());
                            }
                        }
                    }
                }
                Err(e) => {
                    last_status = None;
                    last_error = Some(e.to_string());
                }
            }

            if attempt < self.config.max_retries {
                if let Some(delay) = backoff.next_backoff() {
                    warn!(
                        "Attempt {} failed for {}, retrying in {:?}",
                        attempt + 1,
                        spec.id,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    continue;
                }
            }
            break;
        }

        let error_msg = last_error.unwrap_or_else(|| "Unknown error".to_string());
        error!("Failed to fetch source {} after {} attempt(s): {}", spec.id, attempts, error_msg);

        Ok(FetchResult {
            source_id: spec.id.clone(),
            success: false,
            error: Some(error_msg),
            fetch_time,
            response_time_ms: start_time.elapsed().as_millis() as u64,
            http_status: last_status,
            attempts,
            content: None,
        })
    }

    async fn send(&self, method: FetchMethod, url: Url) -> Result<Response> {
        let request = match method {
            FetchMethod::Get => self.client.get(url),
        };

        let response = request
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .send()
            .await?;
        Ok(response)
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }
}
