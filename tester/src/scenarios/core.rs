//! Core Scenarios
//!
//! Provision a config set and collection, ping them, tear them down.

use shared::{Company, IntoSolrDocument, Stage, stage_info};

use crate::config::HarnessConfig;
use crate::error::{TesterError, TesterResult};
use crate::runtime::Provisioner;
use crate::traits::SolrAdmin;

pub const PLAYGROUND_CONFIG: &str = "playground";
pub const PLAYGROUND_COLLECTION: &str = "pgc8n";

fn fail(scenario: &str, message: impl Into<String>) -> TesterError {
    TesterError::AssertionFailed {
        scenario: scenario.to_string(),
        message: message.into(),
    }
}

/// Create config "playground", collection "pgc8n", ping it, delete both
pub async fn run(admin: &dyn SolrAdmin, config: &HarnessConfig) -> TesterResult<()> {
    stage_info!(Stage::Scenario, "🧪 Run: provision and ping '{}'", PLAYGROUND_COLLECTION);

    let mut provisioner = Provisioner::new(admin, &config.configset_root);

    let bundle = provisioner.create_config(PLAYGROUND_CONFIG).await?;
    let collection = provisioner.create_collection(&bundle, PLAYGROUND_COLLECTION, 1).await?;

    let response = admin.ping(collection.name()).await?;
    if response.status != 0 {
        return Err(fail("run", format!("expected ping status 0, got {}", response.status)));
    }

    provisioner.delete_collection(collection).await?;
    provisioner.delete_config(&bundle).await?;

    stage_info!(Stage::Scenario, "✅ Run: PASSED");
    Ok(())
}

/// Ping the placeholder, which was never created by the scenario itself
pub async fn ping(admin: &dyn SolrAdmin, config: &HarnessConfig) -> TesterResult<()> {
    stage_info!(Stage::Scenario, "🧪 Ping: '{}'", config.placeholder_collection);

    let response = admin.ping(&config.placeholder_collection).await?;
    if response.status != 0 {
        return Err(fail("ping", format!("expected ping status 0, got {}", response.status)));
    }

    stage_info!(Stage::Scenario, "✅ Ping: PASSED");
    Ok(())
}

/// Index sample companies into a fresh collection and count them
pub async fn index(admin: &dyn SolrAdmin, config: &HarnessConfig) -> TesterResult<()> {
    let collection_name = format!("companies_{}", uuid::Uuid::new_v4().simple());
    stage_info!(Stage::Scenario, "🧪 Index: companies into '{}'", collection_name);

    let companies = [
        Company::new("1", "CodeLibs Project"),
        Company::new("2", "Marevol Software"),
    ];

    let mut provisioner = Provisioner::new(admin, &config.configset_root);
    let outcome = index_into(admin, &mut provisioner, &collection_name, &companies).await;

    // Clean up even when an assertion failed
    let teardown = provisioner.teardown().await;
    outcome?;
    teardown?;

    stage_info!(Stage::Scenario, "✅ Index: PASSED");
    Ok(())
}

async fn index_into(
    admin: &dyn SolrAdmin,
    provisioner: &mut Provisioner<'_>,
    collection_name: &str,
    companies: &[Company],
) -> TesterResult<()> {
    let bundle = provisioner.create_config(PLAYGROUND_CONFIG).await?;
    let collection = provisioner.create_collection(&bundle, collection_name, 1).await?;

    let documents = companies.iter().map(IntoSolrDocument::to_document).collect();
    admin.add_documents(collection.name(), documents).await?;

    let found = admin.count_documents(collection.name()).await?;
    if found != companies.len() as u64 {
        return Err(fail("index", format!("expected {} documents, found {}", companies.len(), found)));
    }
    Ok(())
}
