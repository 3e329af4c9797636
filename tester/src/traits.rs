//! Trait definitions with mockall annotations for testing
//!
//! The lifecycle controller, the provisioner and the scenarios only talk to
//! Solr through these seams, so every step can be driven by a mock.

use std::path::Path;

use shared::{PingResult, ServerEndpoint, SolrDocument};

use crate::error::TesterResult;

/// Administrative HTTP surface of a Solr node
///
/// Every call maps a non-200 response to `TesterError::Provisioning`.
#[mockall::automock]
#[async_trait::async_trait]
pub trait SolrAdmin: Send + Sync {
    /// Endpoint this client talks to
    fn endpoint(&self) -> &ServerEndpoint;

    /// Zip `source_dir` and upload it as config set `name`
    async fn create_config(&self, name: &str, source_dir: &Path) -> TesterResult<()>;

    /// Delete config set `name`
    async fn delete_config(&self, name: &str) -> TesterResult<()>;

    /// Create `collection` bound to `config` with `num_shards` shards
    async fn create_collection(&self, config: &str, collection: &str, num_shards: u32) -> TesterResult<()>;

    /// Delete `collection`
    async fn delete_collection(&self, collection: &str) -> TesterResult<()>;

    /// Names of all collections in the cluster
    async fn list_collections(&self) -> TesterResult<Vec<String>>;

    /// Liveness check against a collection; status 0 means healthy
    async fn ping(&self, collection: &str) -> TesterResult<PingResult>;

    /// Index documents and commit
    async fn add_documents(&self, collection: &str, documents: Vec<SolrDocument>) -> TesterResult<()>;

    /// Number of documents visible to searches
    async fn count_documents(&self, collection: &str) -> TesterResult<u64>;
}

/// Lifecycle of the server process under test
#[mockall::automock]
#[async_trait::async_trait]
pub trait SolrServer: Send + Sync {
    /// Launch the server and report where it listens
    async fn start(&mut self) -> TesterResult<ServerEndpoint>;

    /// Terminate the server. Calling it when nothing runs is a no-op.
    async fn stop(&mut self) -> TesterResult<()>;

    /// Short label for logs, e.g. the image reference
    fn describe(&self) -> String;
}
