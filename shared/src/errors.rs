//! Shared error types for the Solr test harness

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SharedError {
    #[error("Invalid server endpoint '{input}': {reason}")]
    InvalidEndpoint { input: String, reason: String },

    #[error("Document is missing field: {field}")]
    MissingField { field: String },

    #[error("Document field '{field}' is invalid: {message}")]
    InvalidField { field: String, message: String },

    #[error("Invalid configuration: {field} = {value}")]
    InvalidConfig { field: String, value: String },
}

pub type SharedResult<T> = Result<T, SharedError>;
