//! Server launchers
//!
//! `ContainerServer` runs a throwaway SolrCloud node in Docker through
//! testcontainers. `ExternalServer` points the harness at a node someone
//! else already started.

use std::time::Duration;

use async_trait::async_trait;
use shared::{ServerEndpoint, Stage, stage_info, stage_warn};
use testcontainers::core::{IntoContainerPort, WaitFor};
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, GenericImage, ImageExt};

use crate::config::HarnessConfig;
use crate::error::{TesterError, TesterResult};
use crate::traits::SolrServer;

/// Jetty's startup line as printed by Solr's console appender
const STARTED_LOG_LINE: &str = "o.e.j.s.Server Started";

const STARTUP_TIMEOUT: Duration = Duration::from_secs(120);

/// A Solr node in a Docker container, started in SolrCloud mode
pub struct ContainerServer {
    image: String,
    tag: String,
    port: u16,
    container: Option<ContainerAsync<GenericImage>>,
}

impl ContainerServer {
    pub fn new(image: impl Into<String>, tag: impl Into<String>, port: u16) -> Self {
        Self {
            image: image.into(),
            tag: tag.into(),
            port,
            container: None,
        }
    }

    pub fn from_config(config: &HarnessConfig) -> Self {
        Self::new(config.image.clone(), config.image_tag.clone(), config.solr_port)
    }

    pub fn is_running(&self) -> bool {
        self.container.is_some()
    }
}

fn container_error(context: &str, err: impl std::fmt::Display) -> TesterError {
    TesterError::Container {
        message: format!("{context}: {err}"),
    }
}

#[async_trait]
impl SolrServer for ContainerServer {
    async fn start(&mut self) -> TesterResult<ServerEndpoint> {
        if self.container.is_some() {
            return Err(TesterError::Container {
                message: format!("{} is already running", self.describe()),
            });
        }

        stage_info!(Stage::Lifecycle, "🐳 Starting {} container", self.describe());

        let container = GenericImage::new(self.image.clone(), self.tag.clone())
            .with_exposed_port(self.port.tcp())
            .with_wait_for(WaitFor::message_on_stdout(STARTED_LOG_LINE))
            .with_cmd(["solr-foreground", "-c"])
            .with_startup_timeout(STARTUP_TIMEOUT)
            .start()
            .await
            .map_err(|e| container_error("failed to start solr container", e))?;

        let host = container
            .get_host()
            .await
            .map_err(|e| container_error("failed to resolve container host", e))?;
        let port = container
            .get_host_port_ipv4(self.port.tcp())
            .await
            .map_err(|e| container_error("failed to resolve solr port", e))?;

        self.container = Some(container);

        let endpoint = ServerEndpoint::new(host.to_string(), port, "/solr");
        stage_info!(Stage::Lifecycle, "✅ {} listening on {}", self.describe(), endpoint);
        Ok(endpoint)
    }

    async fn stop(&mut self) -> TesterResult<()> {
        let Some(container) = self.container.take() else {
            return Ok(());
        };

        stage_info!(Stage::Lifecycle, "🛑 Stopping {} container", self.describe());
        if let Err(e) = container.stop().await {
            stage_warn!(Stage::Lifecycle, "⚠️ Graceful stop failed, removing anyway: {}", e);
        }
        container
            .rm()
            .await
            .map_err(|e| container_error("failed to remove solr container", e))?;

        stage_info!(Stage::Lifecycle, "✅ Container removed");
        Ok(())
    }

    fn describe(&self) -> String {
        format!("{}:{}", self.image, self.tag)
    }
}

/// A node started outside the harness; `stop` leaves it running
pub struct ExternalServer {
    url: String,
}

impl ExternalServer {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

#[async_trait]
impl SolrServer for ExternalServer {
    async fn start(&mut self) -> TesterResult<ServerEndpoint> {
        let endpoint = ServerEndpoint::parse(&self.url)?;
        stage_info!(Stage::Lifecycle, "🔗 Using external server at {}", endpoint);
        Ok(endpoint)
    }

    async fn stop(&mut self) -> TesterResult<()> {
        Ok(())
    }

    fn describe(&self) -> String {
        format!("external {}", self.url)
    }
}

/// Pick the launcher the configuration asks for
pub fn server_for(config: &HarnessConfig) -> Box<dyn SolrServer> {
    match &config.external_url {
        Some(url) => Box::new(ExternalServer::new(url.clone())),
        None => Box::new(ContainerServer::from_config(config)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_external_server_start_parses_url() {
        let mut server = ExternalServer::new("http://localhost:8983/solr");
        let endpoint = server.start().await.unwrap();
        assert_eq!(endpoint.base_url(), "http://localhost:8983/solr");
        assert!(server.stop().await.is_ok());
    }

    #[tokio::test]
    async fn test_external_server_rejects_bad_url() {
        let mut server = ExternalServer::new("localhost without scheme");
        assert!(matches!(server.start().await, Err(TesterError::Shared(_))));
    }

    #[tokio::test]
    async fn test_container_stop_without_start_is_noop() {
        let mut server = ContainerServer::new("solr", "9.0.0", 8983);
        assert!(!server.is_running());
        assert!(server.stop().await.is_ok());
        assert_eq!(server.describe(), "solr:9.0.0");
    }

    #[test]
    fn test_server_for_picks_external() {
        let config = HarnessConfig::builder().external_url("http://127.0.0.1:8983/solr").build();
        assert_eq!(server_for(&config).describe(), "external http://127.0.0.1:8983/solr");

        let config = HarnessConfig::default();
        assert_eq!(server_for(&config).describe(), "solr:9.0.0");
    }
}
