use job_aggregator::config::{BASE_URL_ENV, CONFIG_PATH_ENV, POLICY_ENV};
use job_aggregator::sources::vms::DEFAULT_BASE_URL;
use job_aggregator::{AggregatorConfig, AggregatorError, FailurePolicy, FetchMethod, VmsPreset};
use std::fs;
use std::sync::{Mutex, MutexGuard};

// Environment variables are process-wide; tests touching them run one at a time.
static ENV_LOCK: Mutex<()> = Mutex::new(());

struct EnvGuard {
    _lock: MutexGuard<'static, ()>,
}

impl EnvGuard {
    fn acquire() -> Self {
        let lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        clear_env();
        Self { _lock: lock }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        clear_env();
    }
}

fn clear_env() {
    for name in [CONFIG_PATH_ENV, BASE_URL_ENV, POLICY_ENV] {
        std::env::remove_var(name);
    }
}

#[test]
fn test_defaults_are_the_three_vms_presets() {
    let config = AggregatorConfig::default();

    assert_eq!(config.failure_policy, FailurePolicy::CriticalOnly);
    assert_eq!(config.fetch.max_retries, 0);
    assert_eq!(config.fetch.timeout_seconds, None);

    let ids: Vec<&str> = config.sources.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["ahsa", "staffing-engine", "focusone"]);
    assert_eq!(config.sources[0].url, format!("{DEFAULT_BASE_URL}AHSA"));
    assert!(config.sources[0].rule.accepts("Perm"));
    assert!(config.sources[1].rule.accepts("Permanent"));
    assert!(config.sources[2].rule.accepts("Direct Hire"));
    assert_eq!(
        config.sources.iter().filter(|s| s.critical).map(|s| s.id.as_str()).collect::<Vec<_>>(),
        vec!["focusone"]
    );
}

#[test]
fn test_toml_sources_and_policy() {
    let config = AggregatorConfig::from_toml(
        r#"
failure_policy = "degrade"

[fetch]
timeout_seconds = 15
max_retries = 2

[[sources]]
id = "acme"
name = "Acme VMS"
url = "https://vms.example.com/jobs"
method = "GET"
accepted_work_types = ["Perm", "Direct Hire"]
critical = true
"#,
    )
    .unwrap();

    assert_eq!(config.failure_policy, FailurePolicy::Degrade);
    assert_eq!(config.fetch.timeout_seconds, Some(15));
    assert_eq!(config.fetch.max_retries, 2);
    assert_eq!(config.fetch.user_agent, "Job-Aggregator/1.0");
    assert_eq!(config.sources.len(), 1);

    let acme = &config.sources[0];
    assert_eq!(acme.method, FetchMethod::Get);
    assert!(acme.critical);
    assert!(acme.rule.accepts("Direct Hire"));
    assert!(!acme.rule.accepts("direct hire"));
}

#[test]
fn test_missing_sources_fall_back_to_presets() {
    let config = AggregatorConfig::from_toml("failure_policy = \"abort\"\n").unwrap();
    assert_eq!(config.failure_policy, FailurePolicy::Abort);
    assert_eq!(config.sources.len(), 3);
}

#[test]
fn test_invalid_configs_are_rejected() {
    let duplicate = r#"
[[sources]]
id = "x"
name = "X"
url = "https://a.example.com"
accepted_work_types = ["Perm"]

[[sources]]
id = "x"
name = "X again"
url = "https://b.example.com"
accepted_work_types = ["Perm"]
"#;
    assert!(AggregatorConfig::from_toml(duplicate).is_err());

    let no_rule = r#"
[[sources]]
id = "x"
name = "X"
url = "https://a.example.com"
accepted_work_types = []
"#;
    assert!(AggregatorConfig::from_toml(no_rule).is_err());

    let bad_scheme = r#"
[[sources]]
id = "x"
name = "X"
url = "ftp://a.example.com"
accepted_work_types = ["Perm"]
"#;
    assert!(AggregatorConfig::from_toml(bad_scheme).is_err());

    assert!(AggregatorConfig::from_toml("failure_policy = \"sometimes\"").is_err());
}

#[test]
fn test_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sources.toml");
    fs::write(&path, "[fetch]\nuser_agent = \"Test/1.0\"\n").unwrap();

    let config = AggregatorConfig::from_file(&path).unwrap();
    assert_eq!(config.fetch.user_agent, "Test/1.0");
    assert_eq!(config.sources.len(), 3);

    assert!(AggregatorConfig::from_file(&dir.path().join("missing.toml")).is_err());
}

#[test]
fn test_rebase_moves_presets_only() {
    let mut config = AggregatorConfig::default();
    let mut custom = VmsPreset::Ahsa.spec("https://other.example.com/");
    custom.id = "custom".to_string();
    config.sources.push(custom);

    config.rebase_presets("http://localhost:8080/dump");

    assert_eq!(config.sources[0].url, "http://localhost:8080/dump/AHSA");
    assert_eq!(config.sources[2].url, "http://localhost:8080/dump/Focusone");
    assert_eq!(config.sources[3].url, "https://other.example.com/AHSA");
}

#[test]
fn test_policy_parsing() {
    assert_eq!("critical-only".parse::<FailurePolicy>().unwrap(), FailurePolicy::CriticalOnly);
    assert_eq!(" Degrade ".parse::<FailurePolicy>().unwrap(), FailurePolicy::Degrade);
    assert_eq!("abort".parse::<FailurePolicy>().unwrap(), FailurePolicy::Abort);
    assert!("never".parse::<FailurePolicy>().is_err());
}

#[test]
fn test_load_without_file_or_env_uses_presets() {
    let _env = EnvGuard::acquire();

    let config = AggregatorConfig::load(None).unwrap();
    assert_eq!(config, AggregatorConfig::default());
}

#[test]
fn test_load_resolves_config_path_from_env() {
    let _env = EnvGuard::acquire();
    let dir = tempfile::tempdir().unwrap();

    let from_env = dir.path().join("env.toml");
    fs::write(&from_env, "failure_policy = \"abort\"\n").unwrap();
    let explicit = dir.path().join("explicit.toml");
    fs::write(&explicit, "failure_policy = \"degrade\"\n").unwrap();

    std::env::set_var(CONFIG_PATH_ENV, &from_env);
    assert_eq!(AggregatorConfig::load(None).unwrap().failure_policy, FailurePolicy::Abort);

    // An explicit path beats the environment.
    let config = AggregatorConfig::load(Some(explicit.as_path())).unwrap();
    assert_eq!(config.failure_policy, FailurePolicy::Degrade);

    std::env::set_var(CONFIG_PATH_ENV, dir.path().join("missing.toml"));
    assert!(matches!(AggregatorConfig::load(None), Err(AggregatorError::Io(_))));
}

#[test]
fn test_load_rebases_presets_from_env() {
    let _env = EnvGuard::acquire();
    std::env::set_var(BASE_URL_ENV, "http://127.0.0.1:8080/dump/");

    let config = AggregatorConfig::load(None).unwrap();
    let urls: Vec<&str> = config.sources.iter().map(|s| s.url.as_str()).collect();
    assert_eq!(
        urls,
        vec![
            "http://127.0.0.1:8080/dump/AHSA",
            "http://127.0.0.1:8080/dump/StaffingEngine",
            "http://127.0.0.1:8080/dump/Focusone",
        ]
    );

    std::env::set_var(BASE_URL_ENV, "not a url");
    assert!(AggregatorConfig::load(None).is_err());
}

#[test]
fn test_load_policy_override_from_env() {
    let _env = EnvGuard::acquire();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sources.toml");
    fs::write(&path, "failure_policy = \"abort\"\n").unwrap();
    std::env::set_var(CONFIG_PATH_ENV, &path);

    std::env::set_var(POLICY_ENV, "degrade");
    assert_eq!(AggregatorConfig::load(None).unwrap().failure_policy, FailurePolicy::Degrade);

    std::env::set_var(POLICY_ENV, "sometimes");
    assert!(matches!(AggregatorConfig::load(None), Err(AggregatorError::Config(_))));
}
