//! # Backend Client
//!
//! [`BackendClient`] is the [`StoreAdapter`] over the in-memory backend. It
//! resolves the collection path, forwards the request over the actor's
//! channel and translates the reply:
//!
//! - request failures arrive as [`AdapterError::Document`] carrying the
//!   backend's error document,
//! - a closed backend arrives as [`AdapterError::Transport`].

use super::error::BackendError;
use super::message::{BackendRequest, Response};
use async_trait::async_trait;
use jsonapi_store::{
    AdapterError, ModelMetadata, Params, RequestOptions, ResourceIdentifier, StoreAdapter,
    WireDocument,
};
use tokio::sync::{mpsc, oneshot};

/// Cheap to clone; holds only the sender half of the backend channel.
#[derive(Clone)]
pub struct BackendClient {
    sender: mpsc::Sender<BackendRequest>,
}

impl BackendClient {
    pub fn new(sender: mpsc::Sender<BackendRequest>) -> Self {
        Self { sender }
    }

    async fn send(
        &self,
        request: impl FnOnce(Response) -> BackendRequest,
    ) -> Result<WireDocument, AdapterError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(request(respond_to))
            .await
            .map_err(|_| AdapterError::Transport(Box::new(BackendError::Closed)))?;
        response
            .await
            .map_err(|_| AdapterError::Transport(Box::new(BackendError::Dropped)))?
            .map_err(|err| AdapterError::Document(err.to_document()))
    }
}

fn path_of(model: &ModelMetadata, options: Option<&RequestOptions>) -> String {
    RequestOptions::resolve_path(options, model).to_string()
}

#[async_trait]
impl StoreAdapter for BackendClient {
    async fn get(
        &self,
        model: &ModelMetadata,
        id: &str,
        params: Option<&Params>,
        options: Option<&RequestOptions>,
    ) -> Result<WireDocument, AdapterError> {
        let path = path_of(model, options);
        let params = params.cloned().unwrap_or_default();
        let id = id.to_string();
        self.send(|respond_to| BackendRequest::Get {
            path,
            id,
            params,
            respond_to,
        })
        .await
    }

    async fn get_list(
        &self,
        model: &ModelMetadata,
        params: Option<&Params>,
        options: Option<&RequestOptions>,
    ) -> Result<WireDocument, AdapterError> {
        let path = path_of(model, options);
        let params = params.cloned().unwrap_or_default();
        self.send(|respond_to| BackendRequest::List {
            path,
            params,
            respond_to,
        })
        .await
    }

    async fn create(
        &self,
        model: &ModelMetadata,
        payload: WireDocument,
        params: Option<&Params>,
        options: Option<&RequestOptions>,
    ) -> Result<WireDocument, AdapterError> {
        let path = path_of(model, options);
        let params = params.cloned().unwrap_or_default();
        self.send(|respond_to| BackendRequest::Create {
            path,
            document: payload,
            params,
            respond_to,
        })
        .await
    }

    async fn update(
        &self,
        model: &ModelMetadata,
        id: &str,
        payload: WireDocument,
        params: Option<&Params>,
        options: Option<&RequestOptions>,
    ) -> Result<WireDocument, AdapterError> {
        let path = path_of(model, options);
        let params = params.cloned().unwrap_or_default();
        let id = id.to_string();
        self.send(|respond_to| BackendRequest::Update {
            path,
            id,
            document: payload,
            params,
            respond_to,
        })
        .await
    }

    async fn update_all(
        &self,
        model: &ModelMetadata,
        payload: WireDocument,
        params: Option<&Params>,
        options: Option<&RequestOptions>,
    ) -> Result<WireDocument, AdapterError> {
        let path = path_of(model, options);
        let params = params.cloned().unwrap_or_default();
        self.send(|respond_to| BackendRequest::UpdateAll {
            path,
            document: payload,
            params,
            respond_to,
        })
        .await
    }

    async fn remove(
        &self,
        model: &ModelMetadata,
        id: &str,
        _params: Option<&Params>,
        options: Option<&RequestOptions>,
    ) -> Result<WireDocument, AdapterError> {
        let path = path_of(model, options);
        let id = id.to_string();
        self.send(|respond_to| BackendRequest::Remove {
            path,
            id,
            respond_to,
        })
        .await
    }

    async fn remove_all(
        &self,
        model: &ModelMetadata,
        ids: Vec<ResourceIdentifier>,
        _params: Option<&Params>,
        options: Option<&RequestOptions>,
    ) -> Result<WireDocument, AdapterError> {
        let path = path_of(model, options);
        self.send(|respond_to| BackendRequest::RemoveAll {
            path,
            ids,
            respond_to,
        })
        .await
    }
}
