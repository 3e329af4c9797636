//! Solr Playground Test Runner
//!
//! - Starts a disposable Solr node (or attaches to an external one)
//! - Waits until the placeholder collection answers pings
//! - Runs the requested scenario against the admin API
//! - Stops the node whatever the scenario outcome

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, bail};
use clap::Parser;
use shared::logging::log_error;
use shared::{Stage, stage_error};
use tokio::time::timeout;

use solr_tester::{HarnessConfig, HarnessConfigBuilder, LifecycleController, TestScenarios};

#[derive(Parser)]
#[command(name = "solr-tester")]
#[command(about = "Provisioning and liveness checks against a disposable Solr node")]
struct Args {
    /// Test scenario to run
    #[arg(long, default_value = "all")]
    scenario: String,

    /// Solr image tag to start
    #[arg(long)]
    image_tag: Option<String>,

    /// Use an already running Solr node, e.g. http://localhost:8983/solr
    #[arg(long)]
    url: Option<String>,

    /// Directory holding one sub-directory per config set
    #[arg(long)]
    configset_root: Option<PathBuf>,

    /// Readiness attempts before giving up
    #[arg(long)]
    readiness_attempts: Option<u32>,

    /// Milliseconds between readiness attempts
    #[arg(long)]
    readiness_interval_ms: Option<u64>,

    /// Fail when the server never becomes ready instead of carrying on
    #[arg(long)]
    strict_readiness: bool,

    /// Do not create the placeholder collection after start
    #[arg(long)]
    no_placeholder: bool,

    /// Whole-run timeout in seconds
    #[arg(long, default_value = "300")]
    timeout_secs: u64,

    /// Enable verbose tracing output
    #[arg(long)]
    verbose: bool,
}

impl Args {
    fn into_config(self, base: HarnessConfig) -> HarnessConfig {
        let mut builder = HarnessConfigBuilder::from_config(base);

        if let Some(tag) = self.image_tag {
            builder = builder.image_tag(tag);
        }
        if let Some(url) = self.url {
            builder = builder.external_url(url);
        }
        if let Some(root) = self.configset_root {
            builder = builder.configset_root(root);
        }
        if let Some(attempts) = self.readiness_attempts {
            builder = builder.readiness_attempts(attempts);
        }
        if let Some(ms) = self.readiness_interval_ms {
            builder = builder.readiness_interval(Duration::from_millis(ms));
        }
        if self.strict_readiness {
            builder = builder.strict_readiness();
        }
        if self.no_placeholder {
            builder = builder.bootstrap_placeholder(false);
        }
        if self.verbose {
            builder = builder.log_level("debug");
        }

        builder.build()
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let scenario = args.scenario.clone();
    let timeout_secs = args.timeout_secs;

    let base = HarnessConfig::from_env().context("failed to load harness configuration")?;
    let config = args.into_config(base);

    shared::logging::init_tracing_with_level(Some(&config.log_level));

    tracing::info!("🧪 Starting Solr playground harness");
    tracing::info!("Scenario: {}, Timeout: {}s", scenario, timeout_secs);

    let scenarios = TestScenarios::new(config.clone());
    let mut controller = LifecycleController::new(config);

    let test_result = timeout(Duration::from_secs(timeout_secs), async {
        let admin = controller.start().await?;
        scenarios.run_scenario(&scenario, admin).await
    })
    .await;

    // The server goes down whatever happened above
    let stop_result = controller.stop().await;

    match test_result {
        Ok(Ok(())) => {
            tracing::info!("✅ Scenario '{}' completed successfully", scenario);
        }
        Ok(Err(e)) => {
            log_error(Stage::Scenario, &format!("scenario '{scenario}'"), &e);
            return Err(e).context(format!("scenario '{scenario}' failed"));
        }
        Err(_) => {
            stage_error!(Stage::Scenario, "⏰ Scenario '{}' timed out after {}s", scenario, timeout_secs);
            bail!("scenario '{scenario}' timed out after {timeout_secs}s");
        }
    }

    stop_result.context("failed to stop solr server")?;
    tracing::info!("🏁 Solr playground harness finished");
    Ok(())
}
