//! # Backend Errors
//!
//! Failures of the in-memory backend. Request failures are rendered as wire
//! error documents; channel failures stay opaque transport errors.

use jsonapi_store::{WireDocument, WireError};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BackendError {
    #[error("Backend closed")]
    Closed,
    #[error("Backend dropped response channel")]
    Dropped,
    #[error("Resource not found")]
    NotFound { path: String, id: String },
    #[error("Resource already exists")]
    Conflict { path: String, id: String },
    #[error("Invalid document")]
    Invalid(String),
}

impl BackendError {
    pub fn not_found(path: &str, id: &str) -> Self {
        BackendError::NotFound {
            path: path.to_string(),
            id: id.to_string(),
        }
    }

    /// HTTP-style status code of the failure.
    pub fn status(&self) -> &'static str {
        match self {
            BackendError::NotFound { .. } => "404",
            BackendError::Conflict { .. } => "409",
            BackendError::Invalid(_) => "400",
            BackendError::Closed | BackendError::Dropped => "503",
        }
    }

    /// Renders the failure as a one-error wire document.
    pub fn to_document(&self) -> WireDocument {
        let detail = match self {
            BackendError::NotFound { path, id } | BackendError::Conflict { path, id } => {
                Some(format!("{path}/{id}"))
            }
            BackendError::Invalid(reason) => Some(reason.clone()),
            BackendError::Closed | BackendError::Dropped => None,
        };
        WireDocument::with_errors(vec![WireError {
            id: None,
            status: Some(self.status().to_string()),
            title: self.to_string(),
            detail,
        }])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_renders_as_404_document() {
        let document = BackendError::not_found("articles", "7").to_document();
        let errors = document.errors.unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].status.as_deref(), Some("404"));
        assert_eq!(errors[0].title, "Resource not found");
        assert_eq!(errors[0].detail.as_deref(), Some("articles/7"));
    }
}
