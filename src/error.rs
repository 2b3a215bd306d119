//! # Errors
//!
//! Error types for every layer of the crate. Registration errors are programming
//! errors and surface immediately; everything else converges into an
//! [`ErrorDocument`] at the [`Store`](crate::store::Store) boundary so callers have
//! exactly one failure shape to handle.

use crate::wire::{WireDocument, WireError};
use serde_json::Value;
use thiserror::Error;

/// A resource type was declared with no resolvable wire type name.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RegistrationError {
    #[error("JSON API resource type not specified for {0}")]
    TypeNotSpecified(&'static str),
}

/// Errors raised while converting between typed resources and wire documents.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SerializerError {
    /// The Rust type has no finalized metadata in the registry.
    #[error("resource type {0} is not registered")]
    UnregisteredType(String),

    /// The wire document is malformed or cannot be linked.
    #[error("cannot deserialize document: {0}")]
    Deserialization(String),

    /// An identifier was required but the resource has no id.
    #[error("resource of type {0} has no id")]
    MissingId(String),

    /// The resource could not be encoded through serde.
    #[error("cannot encode resource: {0}")]
    Encode(String),
}

/// Request-level validation failures detected before any transport call.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    #[error("You cannot create and update resources in the same time")]
    MixedNewAndExisting,

    #[error("No resources given")]
    Empty,
}

/// Failure reported by a [`StoreAdapter`](crate::adapter::StoreAdapter).
#[derive(Debug, Error)]
pub enum AdapterError {
    /// The remote side answered with a wire error document.
    #[error("remote error document")]
    Document(WireDocument),

    /// Opaque transport or runtime failure.
    #[error("{0}")]
    Transport(Box<dyn std::error::Error + Send + Sync>),
}

impl AdapterError {
    /// Wraps a plain message as an opaque transport failure.
    pub fn transport(message: impl Into<String>) -> Self {
        AdapterError::Transport(message.into().into())
    }
}

/// The typed failure envelope every store operation resolves to.
#[derive(Debug, Clone, Default, Error, PartialEq)]
#[error("{}", summarize(.errors))]
pub struct ErrorDocument {
    pub errors: Vec<WireError>,
    pub meta: Option<Value>,
}

fn summarize(errors: &[WireError]) -> String {
    match errors {
        [] => "request failed".to_string(),
        [only] => only.title.clone(),
        [first, rest @ ..] => format!("{} (and {} more)", first.title, rest.len()),
    }
}

impl ErrorDocument {
    /// A single error whose title is `message`, as used for opaque failures.
    pub fn from_message(message: impl Into<String>) -> Self {
        Self {
            errors: vec![WireError::titled(message)],
            meta: None,
        }
    }

    /// First error title, if any.
    pub fn title(&self) -> Option<&str> {
        self.errors.first().map(|e| e.title.as_str())
    }
}

impl From<SerializerError> for ErrorDocument {
    fn from(err: SerializerError) -> Self {
        ErrorDocument::from_message(err.to_string())
    }
}

impl From<ValidationError> for ErrorDocument {
    fn from(err: ValidationError) -> Self {
        Self {
            errors: vec![WireError {
                id: Some(uuid::Uuid::new_v4().to_string()),
                status: Some("400".to_string()),
                title: err.to_string(),
                detail: None,
            }],
            meta: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_becomes_single_400() {
        let doc = ErrorDocument::from(ValidationError::MixedNewAndExisting);
        assert_eq!(doc.errors.len(), 1);
        let error = &doc.errors[0];
        assert_eq!(error.status.as_deref(), Some("400"));
        assert!(error.id.is_some());
        assert_eq!(
            error.title,
            "You cannot create and update resources in the same time"
        );
    }

    #[test]
    fn display_uses_first_title() {
        let doc = ErrorDocument {
            errors: vec![WireError::titled("Not found"), WireError::titled("Gone")],
            meta: None,
        };
        assert_eq!(doc.to_string(), "Not found (and 1 more)");
        assert_eq!(ErrorDocument::default().to_string(), "request failed");
    }
}
