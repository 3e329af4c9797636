//! Runtime Management
//!
//! This module handles the server lifecycle, readiness polling and the admin
//! calls made during test execution.

pub mod admin_client;
pub mod archive;
pub mod lifecycle;
pub mod provisioner;
pub mod readiness;
pub mod server;

#[cfg(test)]
mod tests;

// Re-export main types
pub use admin_client::SolrAdminClient;
pub use archive::{ArchiveEntry, package_config_dir, package_config_dir_in};
pub use lifecycle::LifecycleController;
pub use provisioner::Provisioner;
pub use readiness::{ReadinessOutcome, await_ready, ensure_placeholder, wait_for_ready};
pub use server::{ContainerServer, ExternalServer, server_for};
