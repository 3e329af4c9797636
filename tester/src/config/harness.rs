//! Harness Configuration
//!
//! Everything the lifecycle controller and the scenarios need to know about
//! the server under test, with defaults matching the reference setup.

use std::path::PathBuf;
use std::time::Duration;

use shared::{DEFAULT_CONFIG_SET, PLACEHOLDER_COLLECTION, SharedError};

use crate::config::builder::HarnessConfigBuilder;
use crate::error::TesterResult;

pub const ENV_URL: &str = "SOLR_TESTER_URL";
pub const ENV_IMAGE: &str = "SOLR_TESTER_IMAGE";
pub const ENV_IMAGE_TAG: &str = "SOLR_TESTER_IMAGE_TAG";
pub const ENV_CONFIGSET_ROOT: &str = "SOLR_TESTER_CONFIGSET_ROOT";
pub const ENV_READINESS_ATTEMPTS: &str = "SOLR_TESTER_READINESS_ATTEMPTS";
pub const ENV_READINESS_INTERVAL_MS: &str = "SOLR_TESTER_READINESS_INTERVAL_MS";
pub const ENV_STRICT_READINESS: &str = "SOLR_TESTER_STRICT_READINESS";
pub const ENV_LOG_LEVEL: &str = "SOLR_TESTER_LOG_LEVEL";

/// What to do when the readiness budget runs out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadinessPolicy {
    /// Log a warning and carry on against a possibly unready server
    #[default]
    Lenient,
    /// Fail with `TesterError::NotReady`
    Strict,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReadinessConfig {
    pub attempts: u32,
    pub interval: Duration,
    pub policy: ReadinessPolicy,
}

impl Default for ReadinessConfig {
    fn default() -> Self {
        Self {
            attempts: 10,
            interval: Duration::from_secs(1),
            policy: ReadinessPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HarnessConfig {
    pub image: String,
    pub image_tag: String,
    pub solr_port: u16,
    /// Use an already running server instead of starting a container
    pub external_url: Option<String>,
    pub configset_root: PathBuf,
    pub placeholder_collection: String,
    pub placeholder_config: String,
    pub bootstrap_placeholder: bool,
    pub readiness: ReadinessConfig,
    pub request_timeout: Duration,
    pub log_level: String,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            image: "solr".to_string(),
            image_tag: "9.0.0".to_string(),
            solr_port: 8983,
            external_url: None,
            configset_root: default_configset_root(),
            placeholder_collection: PLACEHOLDER_COLLECTION.to_string(),
            placeholder_config: DEFAULT_CONFIG_SET.to_string(),
            bootstrap_placeholder: true,
            readiness: ReadinessConfig::default(),
            request_timeout: Duration::from_secs(30),
            log_level: "info".to_string(),
        }
    }
}

/// Config sets bundled with the crate's test resources
pub fn default_configset_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("resources")
        .join("configset")
}

impl HarnessConfig {
    /// Create a new builder
    pub fn builder() -> HarnessConfigBuilder {
        HarnessConfigBuilder::new()
    }

    /// Load defaults overridden by `SOLR_TESTER_*` variables, reading `.env` first
    pub fn from_env() -> TesterResult<Self> {
        let _ = dotenv::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load defaults overridden by whatever `lookup` returns for each variable
    pub fn from_lookup<F>(lookup: F) -> TesterResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_URL).filter(|v| !v.trim().is_empty()) {
            config.external_url = Some(url);
        }
        if let Some(image) = lookup(ENV_IMAGE) {
            config.image = image;
        }
        if let Some(tag) = lookup(ENV_IMAGE_TAG) {
            config.image_tag = tag;
        }
        if let Some(root) = lookup(ENV_CONFIGSET_ROOT) {
            config.configset_root = PathBuf::from(root);
        }
        if let Some(raw) = lookup(ENV_READINESS_ATTEMPTS) {
            config.readiness.attempts = parse_number(ENV_READINESS_ATTEMPTS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_READINESS_INTERVAL_MS) {
            let millis: u64 = parse_number(ENV_READINESS_INTERVAL_MS, &raw)?;
            config.readiness.interval = Duration::from_millis(millis);
        }
        if let Some(raw) = lookup(ENV_STRICT_READINESS) {
            if parse_flag(ENV_STRICT_READINESS, &raw)? {
                config.readiness.policy = ReadinessPolicy::Strict;
            }
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            config.log_level = level;
        }

        Ok(config)
    }

    /// Full image reference, e.g. `solr:9.0.0`
    pub fn image_ref(&self) -> String {
        format!("{}:{}", self.image, self.image_tag)
    }

    /// Check if this configuration is usable
    pub fn validate(&self) -> TesterResult<()> {
        if self.readiness.attempts == 0 {
            return Err(invalid("readiness.attempts", "0").into());
        }
        if self.placeholder_collection.trim().is_empty() {
            return Err(invalid("placeholder_collection", "").into());
        }
        if self.external_url.is_none() && self.image.trim().is_empty() {
            return Err(invalid("image", "").into());
        }
        Ok(())
    }
}

fn invalid(field: &str, value: &str) -> SharedError {
    SharedError::InvalidConfig {
        field: field.to_string(),
        value: value.to_string(),
    }
}

fn parse_number<T: std::str::FromStr>(field: &str, raw: &str) -> Result<T, SharedError> {
    raw.trim().parse().map_err(|_| invalid(field, raw))
}

fn parse_flag(field: &str, raw: &str) -> Result<bool, SharedError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(invalid(field, raw)),
    }
}
