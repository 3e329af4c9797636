//! Shared types for the Solr playground test harness
//!
//! Contains the data model handed between the lifecycle controller, the
//! admin provisioner and the scenarios, plus logging setup used by every
//! binary and test.

pub mod document;
pub mod errors;
pub mod logging;
pub mod types;

pub use document::{Company, IntoSolrDocument, SolrDocument};
pub use errors::*;
pub use types::*;
