use crate::sources::vms::{VmsPreset, DEFAULT_BASE_URL};
use crate::types::{AggregatorError, FailurePolicy, FetchConfig, Result, SourceSpec};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

pub const CONFIG_PATH_ENV: &str = "JOB_AGGREGATOR_CONFIG";
pub const BASE_URL_ENV: &str = "JOB_AGGREGATOR_BASE_URL";
pub const POLICY_ENV: &str = "JOB_AGGREGATOR_POLICY";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatorConfig {
    #[serde(default)]
    pub failure_policy: FailurePolicy,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default = "default_sources")]
    pub sources: Vec<SourceSpec>,
}

fn default_sources() -> Vec<SourceSpec> {
    VmsPreset::default_sources(DEFAULT_BASE_URL)
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            failure_policy: FailurePolicy::default(),
            fetch: FetchConfig::default(),
            sources: default_sources(),
        }
    }
}

impl AggregatorConfig {
    /// Load from a TOML file. Missing sections fall back to the VMS presets.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml(&content)?;
        info!("Loaded configuration from {} ({} sources)", path.display(), config.sources.len());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Resolution order: explicit path, then `$JOB_AGGREGATOR_CONFIG`, then
    /// built-in presets. Environment overrides are applied last.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let env_path = std::env::var(CONFIG_PATH_ENV).ok();
        let mut config = match path.or(env_path.as_deref().map(Path::new)) {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides()?;
        Ok(config)
    }

    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            info!("Rebasing preset sources onto {}", base_url);
            self.rebase_presets(&base_url);
        }
        if let Ok(policy) = std::env::var(POLICY_ENV) {
            self.failure_policy = policy.parse()?;
        }
        self.validate()
    }

    /// Point every preset source at another dump endpoint. Custom sources
    /// keep their URLs.
    pub fn rebase_presets(&mut self, base_url: &str) {
        for preset in VmsPreset::ALL {
            if let Some(spec) = self.sources.iter_mut().find(|spec| spec.id == preset.id()) {
                spec.url = preset.spec(base_url).url;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.sources.is_empty() {
            return Err(AggregatorError::Config("at least one source is required".to_string()));
        }
        for (index, spec) in self.sources.iter().enumerate() {
            if self.sources[..index].iter().any(|other| other.id == spec.id) {
                return Err(AggregatorError::Config(format!("duplicate source id: {}", spec.id)));
            }
            let url = url::Url::parse(&spec.url)?;
            if url.scheme() != "http" && url.scheme() != "https" {
                return Err(AggregatorError::Config(format!(
                    "source {} must use http or https, got {}",
                    spec.id,
                    url.scheme()
                )));
            }
            if spec.rule.accepted.is_empty() {
                return Err(AggregatorError::Config(format!(
                    "source {} accepts no work types",
                    spec.id
                )));
            }
        }
        Ok(())
    }
}
