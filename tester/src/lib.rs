//! Solr Playground Test Harness
//!
//! Spins up a disposable Solr node, provisions a config set and a collection
//! over the admin API, and checks that they answer pings.
//!
//! ## Quick Start
//!
//! ```no_run
//! use solr_tester::*;
//!
//! # async fn example() -> Result<(), TesterError> {
//! let config = HarnessConfig::builder().strict_readiness().build();
//! let mut controller = LifecycleController::new(config.clone());
//!
//! let admin = controller.start().await?;
//! let result = TestScenarios::new(config).run_scenario("run", admin).await;
//!
//! // Always stop the server, even when the scenario failed
//! controller.stop().await?;
//! result
//! # }
//! ```

// Core modules
pub mod config;
pub mod error;
pub mod runtime;
pub mod scenarios;
pub mod traits;

// Main interfaces - re-exported at crate root for convenience
pub use config::{HarnessConfig, HarnessConfigBuilder, ReadinessConfig, ReadinessPolicy};
pub use error::{AdminOperation, TesterError, TesterResult};
pub use runtime::{LifecycleController, Provisioner, ReadinessOutcome, SolrAdminClient};
pub use scenarios::TestScenarios;
pub use traits::{SolrAdmin, SolrServer};
