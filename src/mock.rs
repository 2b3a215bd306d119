//! # Mock Adapter & Testing Guide
//!
//! [`MockAdapter`] implements [`StoreAdapter`] entirely in memory. Queue one
//! expectation per adapter call you expect the store to make, run the store
//! operation, then inspect what was sent with [`MockAdapter::calls`].
//!
//! | Feature | MockAdapter | Real adapter |
//! |---------|-------------|--------------|
//! | **Speed** | Instant (in-memory) | Network bound |
//! | **Determinism** | 100% Deterministic | Subject to the server |
//! | **Error Injection** | Easy (`return_err`, `return_transport_error`) | Hard |
//! | **Use Case** | Testing store orchestration and mapping | End-to-end flows |
//!
//! # Example
//! ```ignore
//! let mock = MockAdapter::new();
//! mock.expect(Operation::Get).return_ok(serde_json::from_value(json!({
//!     "data": {"type": "articles", "id": "42", "attributes": {"title": "Hi"}}
//! }))?);
//!
//! let store = Store::new(mock.clone());
//! let doc = store.get::<Article>("42", None, None).await?;
//! assert_eq!(doc.data().unwrap().title, "Hi");
//! mock.verify(); // Ensures all expectations were met
//! ```

use crate::adapter::{Params, RequestOptions, StoreAdapter};
use crate::error::AdapterError;
use crate::metadata::ModelMetadata;
use crate::wire::{ResourceIdentifier, WireDocument};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Adapter operation kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Get,
    GetList,
    Create,
    Update,
    UpdateAll,
    Remove,
    RemoveAll,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Get => "get",
            Operation::GetList => "get_list",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::UpdateAll => "update_all",
            Operation::Remove => "remove",
            Operation::RemoveAll => "remove_all",
        };
        f.write_str(name)
    }
}

/// One recorded adapter call.
#[derive(Clone, Debug, PartialEq)]
pub struct Call {
    pub operation: Operation,
    pub type_name: String,
    pub path: String,
    pub id: Option<String>,
    pub payload: Option<WireDocument>,
    pub ids: Option<Vec<ResourceIdentifier>>,
    pub params: Option<Params>,
}

struct Expectation {
    operation: Operation,
    response: Result<WireDocument, AdapterError>,
}

#[derive(Default)]
struct MockState {
    expectations: VecDeque<Expectation>,
    calls: Vec<Call>,
}

/// In-memory [`StoreAdapter`] with queued responses and call recording.
///
/// Clones share state, so keep one handle for assertions and give another to
/// the store.
#[derive(Clone, Default)]
pub struct MockAdapter {
    state: Arc<Mutex<MockState>>,
}

impl MockAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues the response for the next call, which must be `operation`.
    pub fn expect(&self, operation: Operation) -> ExpectationBuilder {
        ExpectationBuilder {
            operation,
            state: self.state.clone(),
        }
    }

    /// Every call received so far, in order.
    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    /// Panics if queued expectations were not consumed.
    pub fn verify(&self) {
        let state = self.lock();
        if !state.expectations.is_empty() {
            panic!(
                "Not all expectations were met. {} remaining",
                state.expectations.len()
            );
        }
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn respond(&self, call: Call) -> Result<WireDocument, AdapterError> {
        let mut state = self.lock();
        let operation = call.operation;
        state.calls.push(call);
        match state.expectations.pop_front() {
            Some(expectation) if expectation.operation == operation => expectation.response,
            Some(expectation) => Err(AdapterError::transport(format!(
                "Unexpected request: expected {}, got {operation}",
                expectation.operation
            ))),
            None => Err(AdapterError::transport(format!(
                "Unexpected request: {operation}"
            ))),
        }
    }
}

/// Builder returned by [`MockAdapter::expect`].
pub struct ExpectationBuilder {
    operation: Operation,
    state: Arc<Mutex<MockState>>,
}

impl ExpectationBuilder {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, document: WireDocument) {
        self.push(Ok(document));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: AdapterError) {
        self.push(Err(error));
    }

    /// Shorthand for an opaque transport failure with `message`.
    pub fn return_transport_error(self, message: impl Into<String>) {
        self.push(Err(AdapterError::transport(message)));
    }

    fn push(self, response: Result<WireDocument, AdapterError>) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.expectations.push_back(Expectation {
            operation: self.operation,
            response,
        });
    }
}

fn call(
    operation: Operation,
    model: &ModelMetadata,
    params: Option<&Params>,
    options: Option<&RequestOptions>,
) -> Call {
    Call {
        operation,
        type_name: model.type_name().to_string(),
        path: RequestOptions::resolve_path(options, model).to_string(),
        id: None,
        payload: None,
        ids: None,
        params: params.cloned(),
    }
}

#[async_trait]
impl StoreAdapter for MockAdapter {
    async fn get(
        &self,
        model: &ModelMetadata,
        id: &str,
        params: Option<&Params>,
        options: Option<&RequestOptions>,
    ) -> Result<WireDocument, AdapterError> {
        self.respond(Call {
            id: Some(id.to_string()),
            ..call(Operation::Get, model, params, options)
        })
    }

    async fn get_list(
        &self,
        model: &ModelMetadata,
        params: Option<&Params>,
        options: Option<&RequestOptions>,
    ) -> Result<WireDocument, AdapterError> {
        self.respond(call(Operation::GetList, model, params, options))
    }

    async fn create(
        &self,
        model: &ModelMetadata,
        payload: WireDocument,
        params: Option<&Params>,
        options: Option<&RequestOptions>,
    ) -> Result<WireDocument, AdapterError> {
        self.respond(Call {
            payload: Some(payload),
            ..call(Operation::Create, model, params, options)
        })
    }

    async fn update(
        &self,
        model: &ModelMetadata,
        id: &str,
        payload: WireDocument,
        params: Option<&Params>,
        options: Option<&RequestOptions>,
    ) -> Result<WireDocument, AdapterError> {
        self.respond(Call {
            id: Some(id.to_string()),
            payload: Some(payload),
            ..call(Operation::Update, model, params, options)
        })
    }

    async fn update_all(
        &self,
        model: &ModelMetadata,
        payload: WireDocument,
        params: Option<&Params>,
        options: Option<&RequestOptions>,
    ) -> Result<WireDocument, AdapterError> {
        self.respond(Call {
            payload: Some(payload),
            ..call(Operation::UpdateAll, model, params, options)
        })
    }

    async fn remove(
        &self,
        model: &ModelMetadata,
        id: &str,
        params: Option<&Params>,
        options: Option<&RequestOptions>,
    ) -> Result<WireDocument, AdapterError> {
        self.respond(Call {
            id: Some(id.to_string()),
            ..call(Operation::Remove, model, params, options)
        })
    }

    async fn remove_all(
        &self,
        model: &ModelMetadata,
        ids: Vec<ResourceIdentifier>,
        params: Option<&Params>,
        options: Option<&RequestOptions>,
    ) -> Result<WireDocument, AdapterError> {
        self.respond(Call {
            ids: Some(ids),
            ..call(Operation::RemoveAll, model, params, options)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::ModelMetadata;

    #[tokio::test]
    async fn responses_are_served_in_order() {
        let mock = MockAdapter::new();
        mock.expect(Operation::GetList).return_ok(WireDocument::default());
        mock.expect(Operation::Remove).return_transport_error("offline");

        let model = ModelMetadata::default();
        assert!(mock.get_list(&model, None, None).await.is_ok());
        let err = mock.remove(&model, "1", None, None).await.unwrap_err();
        assert_eq!(err.to_string(), "offline");
        mock.verify();

        let calls = mock.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].id.as_deref(), Some("1"));
    }

    #[tokio::test]
    async fn mismatched_operation_is_a_transport_error() {
        let mock = MockAdapter::new();
        mock.expect(Operation::Create).return_ok(WireDocument::default());

        let model = ModelMetadata::default();
        let err = mock.get(&model, "1", None, None).await.unwrap_err();
        assert!(err.to_string().contains("expected create, got get"));
    }

    #[test]
    #[should_panic(expected = "Not all expectations were met")]
    fn verify_panics_on_leftovers() {
        let mock = MockAdapter::new();
        mock.expect(Operation::Get).return_ok(WireDocument::default());
        mock.verify();
    }
}
