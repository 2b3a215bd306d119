//! # Backend Messages
//!
//! Requests sent from the [`BackendClient`](super::BackendClient) to the
//! [`BackendActor`](super::BackendActor). One variant per adapter operation;
//! each carries a oneshot channel for its reply.

use super::error::BackendError;
use jsonapi_store::{Params, ResourceIdentifier, WireDocument};
use tokio::sync::oneshot;

/// One-shot reply channel used by the backend.
pub type Response = oneshot::Sender<Result<WireDocument, BackendError>>;

#[derive(Debug)]
pub enum BackendRequest {
    Get {
        path: String,
        id: String,
        params: Params,
        respond_to: Response,
    },
    List {
        path: String,
        params: Params,
        respond_to: Response,
    },
    Create {
        path: String,
        document: WireDocument,
        params: Params,
        respond_to: Response,
    },
    Update {
        path: String,
        id: String,
        document: WireDocument,
        params: Params,
        respond_to: Response,
    },
    UpdateAll {
        path: String,
        document: WireDocument,
        params: Params,
        respond_to: Response,
    },
    Remove {
        path: String,
        id: String,
        respond_to: Response,
    },
    RemoveAll {
        path: String,
        ids: Vec<ResourceIdentifier>,
        respond_to: Response,
    },
}
