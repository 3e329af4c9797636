//! Solr Admin API Client
//!
//! Provides HTTP client functionality for the config set, collection and
//! liveness endpoints of a Solr node.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use shared::{PingResult, ServerEndpoint, SolrDocument, Stage, stage_debug, stage_info, stage_warn};
use tempfile::NamedTempFile;

use crate::error::{AdminOperation, TesterError, TesterResult};
use crate::runtime::archive;
use crate::traits::SolrAdmin;

/// HTTP client for a Solr node's admin API
#[derive(Clone, Debug)]
pub struct SolrAdminClient {
    endpoint: ServerEndpoint,
    client: reqwest::Client,
    archive_dir: PathBuf,
}

#[derive(Deserialize, Debug)]
struct ResponseHeader {
    status: i32,
    #[serde(rename = "QTime")]
    qtime: Option<u64>,
}

#[derive(Deserialize, Debug)]
struct PingResponse {
    #[serde(rename = "responseHeader")]
    response_header: ResponseHeader,
    status: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ListResponse {
    #[serde(default)]
    collections: Vec<String>,
}

#[derive(Deserialize, Debug)]
struct SelectBody {
    #[serde(rename = "numFound")]
    num_found: u64,
}

#[derive(Deserialize, Debug)]
struct SelectResponse {
    response: SelectBody,
}

impl SolrAdminClient {
    /// Create a new admin client for `endpoint`
    pub fn new(endpoint: ServerEndpoint, timeout: Duration) -> TesterResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            endpoint,
            client,
            archive_dir: std::env::temp_dir(),
        })
    }

    /// Write config set archives under `dir` instead of the system temp directory
    pub fn with_archive_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.archive_dir = dir.into();
        self
    }

    /// Upload an already packaged archive as config set `name`
    async fn upload_archive(&self, name: &str, archive: &NamedTempFile) -> TesterResult<()> {
        let body = tokio::fs::read(archive.path()).await?;
        stage_debug!(Stage::Provisioning, "📦 Uploading {} byte config set '{}'", body.len(), name);

        let response = self
            .client
            .post(self.endpoint.url_for("admin/configs"))
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .query(&[("action", "UPLOAD"), ("name", name)])
            .body(body)
            .send()
            .await?;

        expect_ok(response, AdminOperation::UploadConfig, name).await?;
        Ok(())
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        operation: AdminOperation,
        target: &str,
    ) -> TesterResult<T> {
        let response = self
            .client
            .get(self.endpoint.url_for(path))
            .query(query)
            .send()
            .await?;

        let body = expect_ok(response, operation, target).await?;
        serde_json::from_str(&body).map_err(|_| TesterError::InvalidResponse {
            operation,
            target: target.to_string(),
            body,
        })
    }

    async fn post_admin(
        &self,
        path: &str,
        query: &[(&str, &str)],
        operation: AdminOperation,
        target: &str,
    ) -> TesterResult<()> {
        let response = self
            .client
            .post(self.endpoint.url_for(path))
            .query(query)
            .send()
            .await?;

        expect_ok(response, operation, target).await?;
        Ok(())
    }
}

/// Return the body of a 200 response, or a `Provisioning` error with the body attached
async fn expect_ok(response: reqwest::Response, operation: AdminOperation, target: &str) -> TesterResult<String> {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    if status != reqwest::StatusCode::OK {
        return Err(TesterError::Provisioning {
            operation,
            target: target.to_string(),
            status: status.as_u16(),
            body,
        });
    }

    Ok(body)
}

#[async_trait]
impl SolrAdmin for SolrAdminClient {
    fn endpoint(&self) -> &ServerEndpoint {
        &self.endpoint
    }

    async fn create_config(&self, name: &str, source_dir: &Path) -> TesterResult<()> {
        stage_info!(Stage::Provisioning, "🚀 Creating config '{}' from {}", name, source_dir.display());

        let dir = source_dir.to_path_buf();
        let archive_dir = self.archive_dir.clone();
        let archive =
            tokio::task::spawn_blocking(move || archive::package_config_dir_in(&dir, &archive_dir)).await??;

        let result = self.upload_archive(name, &archive).await;

        // The archive goes away whether or not the upload worked.
        if let Err(e) = archive.close() {
            stage_warn!(Stage::Provisioning, "⚠️ Failed to remove config set archive: {}", e);
        }

        if result.is_ok() {
            stage_info!(Stage::Provisioning, "✅ Created config '{}'", name);
        }
        result
    }

    async fn delete_config(&self, name: &str) -> TesterResult<()> {
        self.post_admin(
            "admin/configs",
            &[("action", "DELETE"), ("name", name)],
            AdminOperation::DeleteConfig,
            name,
        )
        .await?;
        stage_info!(Stage::Provisioning, "🗑️ Deleted config '{}'", name);
        Ok(())
    }

    async fn create_collection(&self, config: &str, collection: &str, num_shards: u32) -> TesterResult<()> {
        let shards = num_shards.to_string();
        self.post_admin(
            "admin/collections",
            &[
                ("action", "CREATE"),
                ("name", collection),
                ("numShards", shards.as_str()),
                ("collection.configName", config),
            ],
            AdminOperation::CreateCollection,
            collection,
        )
        .await?;
        stage_info!(
            Stage::Provisioning,
            "✅ Created collection '{}' with config '{}' ({} shards)",
            collection,
            config,
            num_shards
        );
        Ok(())
    }

    async fn delete_collection(&self, collection: &str) -> TesterResult<()> {
        self.post_admin(
            "admin/collections",
            &[("action", "DELETE"), ("name", collection)],
            AdminOperation::DeleteCollection,
            collection,
        )
        .await?;
        stage_info!(Stage::Provisioning, "🗑️ Deleted collection '{}'", collection);
        Ok(())
    }

    async fn list_collections(&self) -> TesterResult<Vec<String>> {
        let list: ListResponse = self
            .get_json(
                "admin/collections",
                &[("action", "LIST"), ("wt", "json")],
                AdminOperation::ListCollections,
                "*",
            )
            .await?;
        Ok(list.collections)
    }

    async fn ping(&self, collection: &str) -> TesterResult<PingResult> {
        let path = format!("{collection}/admin/ping");
        let ping: PingResponse = self
            .get_json(&path, &[("wt", "json")], AdminOperation::Ping, collection)
            .await?;

        Ok(PingResult {
            status: ping.response_header.status,
            qtime_ms: ping.response_header.qtime,
            health: ping.status,
        })
    }

    async fn add_documents(&self, collection: &str, documents: Vec<SolrDocument>) -> TesterResult<()> {
        let count = documents.len();
        let response = self
            .client
            .post(self.endpoint.url_for(&format!("{collection}/update")))
            .query(&[("commit", "true")])
            .json(&documents)
            .send()
            .await?;

        expect_ok(response, AdminOperation::AddDocuments, collection).await?;
        stage_info!(Stage::Provisioning, "📥 Indexed {} documents into '{}'", count, collection);
        Ok(())
    }

    async fn count_documents(&self, collection: &str) -> TesterResult<u64> {
        let path = format!("{collection}/select");
        let select: SelectResponse = self
            .get_json(
                &path,
                &[("q", "*:*"), ("rows", "0"), ("wt", "json")],
                AdminOperation::CountDocuments,
                collection,
            )
            .await?;
        Ok(select.response.num_found)
    }
}
