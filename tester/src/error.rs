//! Harness error types

use std::fmt;
use std::path::PathBuf;

use shared::SharedError;
use thiserror::Error;

/// Admin call that produced a failure, used for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminOperation {
    UploadConfig,
    DeleteConfig,
    CreateCollection,
    DeleteCollection,
    ListCollections,
    Ping,
    AddDocuments,
    CountDocuments,
}

impl fmt::Display for AdminOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AdminOperation::UploadConfig => "create config",
            AdminOperation::DeleteConfig => "delete config",
            AdminOperation::CreateCollection => "create collection",
            AdminOperation::DeleteCollection => "delete collection",
            AdminOperation::ListCollections => "list collections",
            AdminOperation::Ping => "ping",
            AdminOperation::AddDocuments => "add documents to",
            AdminOperation::CountDocuments => "count documents in",
        };
        write!(f, "{label}")
    }
}

#[derive(Error, Debug)]
pub enum TesterError {
    #[error("Failed to {operation} '{target}': HTTP {status}: {body}")]
    Provisioning {
        operation: AdminOperation,
        target: String,
        status: u16,
        body: String,
    },

    #[error("Unexpected response to {operation} '{target}': {body}")]
    InvalidResponse {
        operation: AdminOperation,
        target: String,
        body: String,
    },

    #[error("Config '{config}' is still used by collections: {collections:?}")]
    ConfigInUse { config: String, collections: Vec<String> },

    #[error("Config set directory not found: {}", path.display())]
    MissingConfigSet { path: PathBuf },

    #[error("Cannot package {}: {reason}", path.display())]
    UnsupportedConfigSetEntry { path: PathBuf, reason: String },

    #[error("Server at {url} not ready after {attempts} attempts")]
    NotReady { url: String, attempts: u32 },

    #[error("Container error: {message}")]
    Container { message: String },

    #[error("Server has not been started")]
    NotStarted,

    #[error("Unknown test scenario: '{name}'. Available: {available}")]
    UnknownScenario { name: String, available: String },

    #[error("Scenario '{scenario}' failed: {message}")]
    AssertionFailed { scenario: String, message: String },

    #[error("Shared component error: {0}")]
    Shared(#[from] SharedError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Task join error: {0}")]
    Join(#[from] tokio::task::JoinError),
}

pub type TesterResult<T> = Result<T, TesterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provisioning_error_message() {
        let err = TesterError::Provisioning {
            operation: AdminOperation::UploadConfig,
            target: "playground".to_string(),
            status: 400,
            body: "bad zip".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to create config 'playground': HTTP 400: bad zip");
    }

    #[test]
    fn test_config_in_use_message() {
        let err = TesterError::ConfigInUse {
            config: "playground".to_string(),
            collections: vec!["pgc8n".to_string()],
        };
        assert!(err.to_string().contains("pgc8n"));
    }
}
