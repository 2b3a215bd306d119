//! # Store Adapter
//!
//! The transport seam. A [`Store`](crate::store::Store) never talks to the network
//! itself; it hands fully built wire documents to a `StoreAdapter` and gets raw
//! wire documents (or failures) back.
//!
//! Adapters are responsible for building requests (the collection path comes
//! from [`ModelMetadata::path`] or a per-call [`RequestOptions::path`] override),
//! encoding [`Params`] as query parameters, and reporting failures either as a
//! structured error document ([`AdapterError::Document`]) or as an opaque
//! transport failure ([`AdapterError::Transport`]).

use crate::error::AdapterError;
use crate::metadata::ModelMetadata;
use crate::wire::{ResourceIdentifier, WireDocument};
use async_trait::async_trait;
use std::collections::BTreeMap;

/// Query parameters forwarded verbatim to the adapter.
pub type Params = BTreeMap<String, String>;

/// Per-call request options.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RequestOptions {
    /// Overrides the collection path of the resource type for this call.
    pub path: Option<String>,
}

impl RequestOptions {
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Collection path for `model`, honoring the override when one is set.
    pub fn resolve_path<'a>(options: Option<&'a RequestOptions>, model: &'a ModelMetadata) -> &'a str {
        options
            .and_then(|o| o.path.as_deref())
            .unwrap_or_else(|| model.path())
    }
}

/// Transport operations the store relies on.
///
/// Every method issues exactly one request and resolves exactly once.
#[async_trait]
pub trait StoreAdapter: Send + Sync {
    async fn get(
        &self,
        model: &ModelMetadata,
        id: &str,
        params: Option<&Params>,
        options: Option<&RequestOptions>,
    ) -> Result<WireDocument, AdapterError>;

    async fn get_list(
        &self,
        model: &ModelMetadata,
        params: Option<&Params>,
        options: Option<&RequestOptions>,
    ) -> Result<WireDocument, AdapterError>;

    async fn create(
        &self,
        model: &ModelMetadata,
        payload: WireDocument,
        params: Option<&Params>,
        options: Option<&RequestOptions>,
    ) -> Result<WireDocument, AdapterError>;

    async fn update(
        &self,
        model: &ModelMetadata,
        id: &str,
        payload: WireDocument,
        params: Option<&Params>,
        options: Option<&RequestOptions>,
    ) -> Result<WireDocument, AdapterError>;

    async fn update_all(
        &self,
        model: &ModelMetadata,
        payload: WireDocument,
        params: Option<&Params>,
        options: Option<&RequestOptions>,
    ) -> Result<WireDocument, AdapterError>;

    async fn remove(
        &self,
        model: &ModelMetadata,
        id: &str,
        params: Option<&Params>,
        options: Option<&RequestOptions>,
    ) -> Result<WireDocument, AdapterError>;

    async fn remove_all(
        &self,
        model: &ModelMetadata,
        ids: Vec<ResourceIdentifier>,
        params: Option<&Params>,
        options: Option<&RequestOptions>,
    ) -> Result<WireDocument, AdapterError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{ModelBuilder, ModelMetadata};
    use crate::resource::Resource;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize, Deserialize)]
    struct Page {
        id: Option<String>,
    }

    impl Resource for Page {
        fn id(&self) -> Option<&str> {
            self.id.as_deref()
        }
    }

    #[test]
    fn path_override_wins() {
        let model: std::sync::Arc<ModelMetadata> = ModelBuilder::<Page>::new()
            .type_name("adapter-pages")
            .register()
            .unwrap();
        assert_eq!(RequestOptions::resolve_path(None, &model), "adapter-pages");

        let options = RequestOptions::with_path("archive/pages");
        assert_eq!(
            RequestOptions::resolve_path(Some(&options), &model),
            "archive/pages"
        );
    }
}
