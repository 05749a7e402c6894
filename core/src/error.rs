//! Error types for the catalog client.
//!
//! # Design
//! `ApiError` keeps the protocol-level taxonomy (status, decode, encode,
//! transport) for logging. Everything shown to the user goes through
//! `OperationFailed`, which collapses all of them into one message: the
//! server's body text when it sent one, otherwise a fixed description.

use std::fmt;

use thiserror::Error;

/// Errors returned by `CatalogClient` build/parse methods and transports.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("invalid response body: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// No response was received at all.
    #[error("network error: {0}")]
    Transport(String),
}

impl ApiError {
    /// Human-readable detail for the error banner.
    pub fn detail(&self) -> String {
        match self {
            ApiError::Status { status, body } if body.trim().is_empty() => format!("HTTP {status}"),
            ApiError::Status { body, .. } => body.trim().to_string(),
            other => other.to_string(),
        }
    }
}

/// The five network operations the controller performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Load,
    Create,
    Update,
    Delete,
}

impl Operation {
    fn failure_prefix(self) -> &'static str {
        match self {
            Operation::List => "Failed to fetch the book list",
            Operation::Load => "Failed to load book",
            Operation::Create => "Failed to register book",
            Operation::Update => "Failed to update book",
            Operation::Delete => "Failed to delete book",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::List => "list",
            Operation::Load => "load",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// The single user-facing error class. Its message is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct OperationFailed {
    pub operation: Operation,
    pub message: String,
}

impl OperationFailed {
    pub fn new(operation: Operation, source: &ApiError) -> Self {
        Self {
            operation,
            message: format!("{}: {}", operation.failure_prefix(), source.detail()),
        }
    }
}
