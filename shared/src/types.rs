//! Core shared types for the Solr test harness

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use url::Url;

use crate::errors::{SharedError, SharedResult};

/// Placeholder collection pinged while waiting for the server
pub const PLACEHOLDER_COLLECTION: &str = "dummy";

/// Config set that ships with every SolrCloud node
pub const DEFAULT_CONFIG_SET: &str = "_default";

/// Harness stage attached to every structured log line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    Lifecycle,
    Readiness,
    Provisioning,
    Scenario,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Lifecycle => write!(f, "lifecycle"),
            Stage::Readiness => write!(f, "readiness"),
            Stage::Provisioning => write!(f, "provisioning"),
            Stage::Scenario => write!(f, "scenario"),
        }
    }
}

/// Address of a running Solr node, fixed once the server reports its bound port
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServerEndpoint {
    scheme: String,
    host: String,
    port: u16,
    base_path: String,
}

impl ServerEndpoint {
    /// Create an `http` endpoint for a host, port and base path such as `/solr`
    pub fn new(host: impl Into<String>, port: u16, base_path: &str) -> Self {
        Self {
            scheme: "http".to_string(),
            host: host.into(),
            port,
            base_path: normalize_base_path(base_path),
        }
    }

    /// Parse an endpoint from a full URL, e.g. `http://127.0.0.1:8983/solr`
    pub fn parse(input: &str) -> SharedResult<Self> {
        let url = Url::parse(input).map_err(|e| SharedError::InvalidEndpoint {
            input: input.to_string(),
            reason: e.to_string(),
        })?;

        let host = url
            .host_str()
            .ok_or_else(|| SharedError::InvalidEndpoint {
                input: input.to_string(),
                reason: "missing host".to_string(),
            })?
            .to_string();

        let port = url
            .port_or_known_default()
            .ok_or_else(|| SharedError::InvalidEndpoint {
                input: input.to_string(),
                reason: format!("no default port for scheme '{}'", url.scheme()),
            })?;

        Ok(Self {
            scheme: url.scheme().to_string(),
            host,
            port,
            base_path: normalize_base_path(url.path()),
        })
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Base URL that every admin and collection path is appended to
    pub fn base_url(&self) -> String {
        format!("{}://{}:{}{}", self.scheme, self.host, self.port, self.base_path)
    }

    /// Join a relative path (no leading slash needed) onto the base URL
    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url(), path.trim_start_matches('/'))
    }
}

impl fmt::Display for ServerEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.base_url())
    }
}

fn normalize_base_path(path: &str) -> String {
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}

/// A named config set uploaded from a local directory tree
#[derive(Debug, PartialEq, Eq)]
pub struct ConfigBundle {
    name: String,
    source_dir: PathBuf,
}

impl ConfigBundle {
    pub fn new(name: impl Into<String>, source_dir: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            source_dir: source_dir.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }
}

/// A collection bound to exactly one config bundle.
///
/// Not `Clone`: deleting a collection consumes its handle.
#[derive(Debug, PartialEq, Eq)]
pub struct Collection {
    name: String,
    config_name: String,
    num_shards: u32,
}

impl Collection {
    pub fn new(name: impl Into<String>, config_name: impl Into<String>, num_shards: u32) -> Self {
        Self {
            name: name.into(),
            config_name: config_name.into(),
            num_shards,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config_name(&self) -> &str {
        &self.config_name
    }

    pub fn num_shards(&self) -> u32 {
        self.num_shards
    }
}

/// Outcome of a liveness check; status 0 means healthy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PingResult {
    pub status: i32,
    pub qtime_ms: Option<u64>,
    pub health: Option<String>,
}

impl PingResult {
    pub fn healthy() -> Self {
        Self {
            status: 0,
            qtime_ms: None,
            health: Some("OK".to_string()),
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == 0
    }
}
