//! Test fixtures and constants

use std::path::PathBuf;

use solr_tester::config::default_configset_root;

pub struct TestFixtures;

impl TestFixtures {
    pub const PLAYGROUND_CONFIG: &'static str = "playground";
    pub const PLAYGROUND_COLLECTION: &'static str = "pgc8n";
    pub const PLACEHOLDER: &'static str = "dummy";
    pub const FAST_ATTEMPTS: u32 = 3;
    pub const FAST_INTERVAL_MS: u64 = 5;

    /// Config sets bundled with the crate
    pub fn configset_root() -> PathBuf {
        default_configset_root()
    }

    pub fn playground_dir() -> PathBuf {
        Self::configset_root().join(Self::PLAYGROUND_CONFIG)
    }

    /// Standard Solr success envelope
    pub fn ok_body() -> serde_json::Value {
        serde_json::json!({ "responseHeader": { "status": 0, "QTime": 4 } })
    }

    pub fn ping_body(status: i32) -> serde_json::Value {
        serde_json::json!({
            "responseHeader": { "zkConnected": true, "status": status, "QTime": 1 },
            "status": if status == 0 { "OK" } else { "FAIL" }
        })
    }
}
