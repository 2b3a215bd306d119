//! # Store
//!
//! The orchestration facade application code talks to. Every operation:
//!
//! 1. resolves the registered model of the resource type,
//! 2. builds the payload through the [`DocumentSerializer`] when one is needed,
//! 3. issues exactly one [`StoreAdapter`] call,
//! 4. normalizes the outcome into `Result<Document<T>, ErrorDocument>`.
//!
//! Operations are plain `async fn`s: nothing is sent until the future is
//! polled, and dropping the future discards the outcome. Validation failures,
//! serializer failures, wire error documents and opaque transport failures all
//! arrive as the same [`ErrorDocument`].

use crate::adapter::{Params, RequestOptions, StoreAdapter};
use crate::document::Document;
use crate::error::{AdapterError, ErrorDocument, SerializerError, ValidationError};
use crate::metadata::{registry, ModelMetadata, ResourceType};
use crate::resource::{Entity, Resource};
use crate::serializer::DocumentSerializer;
use crate::wire::{OneOrMany, WireDocument};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Typed CRUD facade over a [`StoreAdapter`].
///
/// Cheap to clone: clones share the adapter.
pub struct Store<A> {
    serializer: DocumentSerializer,
    adapter: Arc<A>,
}

impl<A> Clone for Store<A> {
    fn clone(&self) -> Self {
        Self {
            serializer: self.serializer,
            adapter: self.adapter.clone(),
        }
    }
}

impl<A: StoreAdapter> Store<A> {
    pub fn new(adapter: A) -> Self {
        Self::with_serializer(DocumentSerializer::new(), adapter)
    }

    pub fn with_serializer(serializer: DocumentSerializer, adapter: A) -> Self {
        Self {
            serializer,
            adapter: Arc::new(adapter),
        }
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    /// Fetches one resource by id.
    #[instrument(skip(self, params, options), fields(resource = %ResourceType::of::<T>()))]
    pub async fn get<T: Resource>(
        &self,
        id: &str,
        params: Option<&Params>,
        options: Option<&RequestOptions>,
    ) -> Result<Document<T>, ErrorDocument> {
        let model = model_of::<T>()?;
        debug!("Sending get");
        let response = self.adapter.get(&model, id, params, options).await;
        self.settle(response)
    }

    /// Fetches a collection.
    #[instrument(skip(self, params, options), fields(resource = %ResourceType::of::<T>()))]
    pub async fn get_list<T: Resource>(
        &self,
        params: Option<&Params>,
        options: Option<&RequestOptions>,
    ) -> Result<Document<T>, ErrorDocument> {
        let model = model_of::<T>()?;
        debug!(?params, "Sending get_list");
        let response = self.adapter.get_list(&model, params, options).await;
        self.settle(response)
    }

    /// Creates new entities or updates persisted ones.
    ///
    /// All entities of a batch must agree on being new; a mixed batch fails
    /// before the adapter is called.
    #[instrument(skip_all, fields(resource = %ResourceType::of::<T>()))]
    pub async fn save<'a, T: Resource>(
        &self,
        entities: impl Into<OneOrMany<&'a Entity<T>>>,
        params: Option<&Params>,
        options: Option<&RequestOptions>,
    ) -> Result<Document<T>, ErrorDocument> {
        let entities = entities.into();
        let model = model_of::<T>()?;
        let is_new = batch_is_new(&entities).map_err(|err| {
            warn!(error = %err, "Save rejected");
            ErrorDocument::from(err)
        })?;
        let payload = self.serializer.serialize(entities.clone())?;

        let response = if is_new {
            debug!(count = entities.as_slice().len(), "Sending create");
            self.adapter.create(&model, payload, params, options).await
        } else {
            match &entities {
                OneOrMany::One(entity) => {
                    let id = entity_id(&model, entity)?;
                    debug!(id, "Sending update");
                    self.adapter.update(&model, id, payload, params, options).await
                }
                OneOrMany::Many(batch) => {
                    debug!(count = batch.len(), "Sending update_all");
                    self.adapter.update_all(&model, payload, params, options).await
                }
            }
        };
        self.settle(response)
    }

    /// Removes one entity by id, or a batch by identifiers.
    #[instrument(skip_all, fields(resource = %ResourceType::of::<T>()))]
    pub async fn remove<'a, T: Resource>(
        &self,
        entities: impl Into<OneOrMany<&'a Entity<T>>>,
        params: Option<&Params>,
        options: Option<&RequestOptions>,
    ) -> Result<Document<T>, ErrorDocument> {
        let entities = entities.into();
        let model = model_of::<T>()?;
        if entities.is_empty() {
            let err = ValidationError::Empty;
            warn!(error = %err, "Remove rejected");
            return Err(err.into());
        }

        let response = match entities {
            OneOrMany::One(entity) => {
                let id = entity_id(&model, entity)?;
                debug!(id, "Sending remove");
                self.adapter.remove(&model, id, params, options).await
            }
            batch @ OneOrMany::Many(_) => {
                let ids = self.serializer.serialize_as_id(batch)?.into_vec();
                debug!(count = ids.len(), "Sending remove_all");
                self.adapter.remove_all(&model, ids, params, options).await
            }
        };
        self.settle(response)
    }

    /// Folds an adapter outcome into the typed envelope.
    fn settle<T: Resource>(
        &self,
        response: Result<WireDocument, AdapterError>,
    ) -> Result<Document<T>, ErrorDocument> {
        let outcome = match response {
            Ok(document) => self
                .serializer
                .deserialize::<T>(document)
                .map_err(ErrorDocument::from)
                .and_then(|parsed| parsed.into_result()),
            Err(AdapterError::Document(document)) => {
                match self.serializer.deserialize::<T>(document) {
                    Ok(parsed) => match parsed.into_result() {
                        Ok(_) => Err(ErrorDocument::from_message(
                            "request failed without an error document",
                        )),
                        Err(errors) => Err(errors),
                    },
                    Err(err) => Err(err.into()),
                }
            }
            Err(AdapterError::Transport(err)) => Err(ErrorDocument::from_message(err.to_string())),
        };

        match &outcome {
            Ok(document) => info!(count = document.nodes().len(), "Request ok"),
            Err(errors) => warn!(error = %errors, "Request failed"),
        }
        outcome
    }
}

fn model_of<T: Resource>() -> Result<Arc<ModelMetadata>, ErrorDocument> {
    let resource_type = ResourceType::of::<T>();
    registry::metadata_for(resource_type).ok_or_else(|| {
        warn!(resource = %resource_type, "Unregistered resource type");
        SerializerError::UnregisteredType(resource_type.to_string()).into()
    })
}

fn entity_id<'e, T: Resource>(model: &ModelMetadata, entity: &'e Entity<T>) -> Result<&'e str, ErrorDocument> {
    entity
        .id()
        .ok_or_else(|| SerializerError::MissingId(model.type_name().to_string()).into())
}

/// Whether the batch is to be created; all entities must agree.
fn batch_is_new<T: Resource>(entities: &OneOrMany<&Entity<T>>) -> Result<bool, ValidationError> {
    let mut states = entities.iter().map(|entity| entity.is_new());
    let first = states.next().ok_or(ValidationError::Empty)?;
    if states.any(|state| state != first) {
        return Err(ValidationError::MixedNewAndExisting);
    }
    Ok(first)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize, Deserialize)]
    struct Item {
        id: Option<String>,
    }

    impl Resource for Item {
        fn id(&self) -> Option<&str> {
            self.id.as_deref()
        }
    }

    fn item(id: &str) -> Item {
        Item {
            id: Some(id.to_string()),
        }
    }

    #[test]
    fn batch_state_must_agree() {
        let fresh = Entity::new(item("1"));
        let stored = Entity::persisted(item("2"));

        assert_eq!(batch_is_new(&OneOrMany::One(&fresh)), Ok(true));
        assert_eq!(batch_is_new(&OneOrMany::One(&stored)), Ok(false));
        assert_eq!(
            batch_is_new(&OneOrMany::Many(vec![&fresh, &stored])),
            Err(ValidationError::MixedNewAndExisting)
        );
        assert_eq!(
            batch_is_new::<Item>(&OneOrMany::Many(vec![])),
            Err(ValidationError::Empty)
        );
    }
}
