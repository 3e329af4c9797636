//! Runtime test modules
//!
//! Unit tests for packaging, the admin client, readiness polling, the
//! provisioner and the lifecycle controller.


use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use shared::ServerEndpoint;
use wiremock::MockServer;

use crate::config::{ReadinessConfig, ReadinessPolicy};
use crate::error::{AdminOperation, TesterError};

/// Files written by [`write_configset`], relative to the config set root
pub const SAMPLE_FILES: &[(&str, &[u8])] = &[
    ("solrconfig.xml", b"<config><luceneMatchVersion>9.0</luceneMatchVersion></config>"),
    ("schema.xml", b"<schema name=\"sample\" version=\"1.6\"/>"),
    ("lang/stopwords_en.txt", b"a\nan\nthe\n"),
    ("lang/nested/weights.bin", &[0u8, 159, 146, 150, 255, 10, 13]),
];

/// Write a small config set tree under `root/name` and return its path
pub fn write_configset(root: &Path, name: &str) -> PathBuf {
    let dir = root.join(name);
    for (relative, contents) in SAMPLE_FILES {
        let path = dir.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, contents).unwrap();
    }
    dir
}

/// Endpoint with the `/solr` base path on a wiremock server
pub fn endpoint_for(server: &MockServer) -> ServerEndpoint {
    ServerEndpoint::parse(&format!("{}/solr", server.uri())).unwrap()
}

/// Readiness budget that does not slow tests down
pub fn fast_readiness(attempts: u32, policy: ReadinessPolicy) -> ReadinessConfig {
    ReadinessConfig {
        attempts,
        interval: Duration::from_millis(1),
        policy,
    }
}

/// Error a mock returns while the server is still coming up
pub fn unavailable(target: &str) -> TesterError {
    TesterError::Provisioning {
        operation: AdminOperation::Ping,
        target: target.to_string(),
        status: 503,
        body: "Service Unavailable".to_string(),
    }
}
