//! Test Scenarios
//!
//! Short scenario names for the playground end-to-end checks

pub mod core;

use shared::Stage;
use shared::logging::{log_step, log_success};

use crate::config::HarnessConfig;
use crate::error::{TesterError, TesterResult};
use crate::traits::SolrAdmin;

pub struct TestScenarios {
    config: HarnessConfig,
}

impl TestScenarios {
    pub fn new(config: HarnessConfig) -> Self {
        Self { config }
    }

    /// Run a specific scenario by name
    pub async fn run_scenario(&self, name: &str, admin: &dyn SolrAdmin) -> TesterResult<()> {
        match name {
            "run" => core::run(admin, &self.config).await,
            "ping" => core::ping(admin, &self.config).await,
            "index" => core::index(admin, &self.config).await,

            // Run all tests
            "all" => {
                log_step(Stage::Scenario, "Running full playground suite");
                core::run(admin, &self.config).await?;
                core::ping(admin, &self.config).await?;
                core::index(admin, &self.config).await?;
                log_success(Stage::Scenario, "All playground scenarios completed");
                Ok(())
            }

            _ => Err(TesterError::UnknownScenario {
                name: name.to_string(),
                available: Self::available_scenarios().join(", "),
            }),
        }
    }

    /// Get list of available scenarios
    pub fn available_scenarios() -> Vec<&'static str> {
        vec!["run", "ping", "index", "all"]
    }
}
