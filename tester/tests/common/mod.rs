//! Common test utilities and infrastructure
//!
//! Shared fixtures and a wiremock-backed fake Solr used across the
//! integration suites.

#![allow(dead_code)]

pub mod fixtures;
pub mod helpers;

pub use fixtures::TestFixtures;
#[allow(unused_imports)]
pub use helpers::FakeSolr;
