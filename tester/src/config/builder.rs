//! Harness Configuration Builder
//!
//! Provides a flexible builder pattern for constructing harness configurations

use std::path::PathBuf;
use std::time::Duration;

use super::{HarnessConfig, ReadinessPolicy};

pub struct HarnessConfigBuilder {
    config: HarnessConfig,
}

impl HarnessConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: HarnessConfig::default(),
        }
    }

    /// Start from an existing configuration, e.g. one loaded from the environment
    pub fn from_config(config: HarnessConfig) -> Self {
        Self { config }
    }

    /// Set the Solr image name
    pub fn image<S: Into<String>>(mut self, image: S) -> Self {
        self.config.image = image.into();
        self
    }

    /// Set the Solr image tag
    pub fn image_tag<S: Into<String>>(mut self, tag: S) -> Self {
        self.config.image_tag = tag.into();
        self
    }

    /// Target an already running server instead of a container
    pub fn external_url<S: Into<String>>(mut self, url: S) -> Self {
        self.config.external_url = Some(url.into());
        self
    }

    /// Set the directory holding one sub-directory per config set
    pub fn configset_root<P: Into<PathBuf>>(mut self, root: P) -> Self {
        self.config.configset_root = root.into();
        self
    }

    /// Set the placeholder collection pinged during readiness polling
    pub fn placeholder_collection<S: Into<String>>(mut self, name: S) -> Self {
        self.config.placeholder_collection = name.into();
        self
    }

    /// Enable or disable creating the placeholder collection after start
    pub fn bootstrap_placeholder(mut self, enabled: bool) -> Self {
        self.config.bootstrap_placeholder = enabled;
        self
    }

    /// Set readiness budget
    pub fn readiness_attempts(mut self, attempts: u32) -> Self {
        self.config.readiness.attempts = attempts;
        self
    }

    /// Set spacing between readiness attempts
    pub fn readiness_interval(mut self, interval: Duration) -> Self {
        self.config.readiness.interval = interval;
        self
    }

    /// Fail instead of continuing when the readiness budget runs out
    pub fn strict_readiness(mut self) -> Self {
        self.config.readiness.policy = ReadinessPolicy::Strict;
        self
    }

    /// Set per-request HTTP timeout
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = timeout;
        self
    }

    /// Set log level (trace, debug, info, warn, error)
    pub fn log_level<S: Into<String>>(mut self, level: S) -> Self {
        self.config.log_level = level.into();
        self
    }

    /// Build the configuration
    pub fn build(self) -> HarnessConfig {
        self.config
    }
}

impl Default for HarnessConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overrides() {
        let config = HarnessConfig::builder()
            .image_tag("9.2.1")
            .external_url("http://localhost:8983/solr")
            .readiness_attempts(3)
            .readiness_interval(Duration::from_millis(10))
            .strict_readiness()
            .bootstrap_placeholder(false)
            .build();

        assert_eq!(config.image_ref(), "solr:9.2.1");
        assert_eq!(config.external_url.as_deref(), Some("http://localhost:8983/solr"));
        assert_eq!(config.readiness.attempts, 3);
        assert_eq!(config.readiness.interval, Duration::from_millis(10));
        assert_eq!(config.readiness.policy, ReadinessPolicy::Strict);
        assert!(!config.bootstrap_placeholder);
    }
}
