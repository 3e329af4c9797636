//! Lifecycle Controller
//!
//! Starts one server before a run, waits until it answers, hands out the
//! admin client, and stops the server afterwards.

use shared::{Stage, stage_info, stage_warn};

use crate::config::HarnessConfig;
use crate::error::{TesterError, TesterResult};
use crate::runtime::admin_client::SolrAdminClient;
use crate::runtime::readiness::{self, ReadinessOutcome};
use crate::runtime::server::server_for;
use crate::traits::SolrServer;

pub struct LifecycleController {
    config: HarnessConfig,
    server: Box<dyn SolrServer>,
    admin: Option<SolrAdminClient>,
}

impl LifecycleController {
    /// Controller for whichever server the configuration points at
    pub fn new(config: HarnessConfig) -> Self {
        let server = server_for(&config);
        Self::with_server(config, server)
    }

    pub fn with_server(config: HarnessConfig, server: Box<dyn SolrServer>) -> Self {
        Self {
            config,
            server,
            admin: None,
        }
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Admin client of the running server
    pub fn admin(&self) -> TesterResult<&SolrAdminClient> {
        self.admin.as_ref().ok_or(TesterError::NotStarted)
    }

    /// Launch the server and poll it until the placeholder collection answers.
    ///
    /// Returns the admin client to hand to the provisioner and scenarios.
    pub async fn start(&mut self) -> TesterResult<&SolrAdminClient> {
        self.config.validate()?;
        stage_info!(Stage::Lifecycle, "🚀 Starting {}", self.server.describe());

        let endpoint = self.server.start().await?;
        let admin = match SolrAdminClient::new(endpoint, self.config.request_timeout) {
            Ok(admin) => admin,
            Err(e) => {
                self.stop_after_failure().await;
                return Err(e);
            }
        };

        if let Err(e) = self.await_ready(&admin).await {
            self.stop_after_failure().await;
            return Err(e);
        }

        Ok(self.admin.insert(admin))
    }

    /// Poll the running server again; useful after a restart of an external node
    pub async fn wait_for_ready(&self) -> TesterResult<ReadinessOutcome> {
        let admin = self.admin()?;
        readiness::wait_for_ready(admin, &self.config.placeholder_collection, &self.config.readiness).await
    }

    /// Stop the server unconditionally. A no-op when nothing runs.
    pub async fn stop(&mut self) -> TesterResult<()> {
        self.admin = None;
        self.server.stop().await?;
        stage_info!(Stage::Lifecycle, "🏁 {} stopped", self.server.describe());
        Ok(())
    }

    async fn await_ready(&self, admin: &SolrAdminClient) -> TesterResult<ReadinessOutcome> {
        let bootstrap_from = self
            .config
            .bootstrap_placeholder
            .then_some(self.config.placeholder_config.as_str());

        readiness::await_ready(
            admin,
            &self.config.placeholder_collection,
            bootstrap_from,
            &self.config.readiness,
        )
        .await
    }

    async fn stop_after_failure(&mut self) {
        if let Err(e) = self.server.stop().await {
            stage_warn!(Stage::Lifecycle, "⚠️ Failed to stop server after startup error: {}", e);
        }
    }
}
