//! # In-Memory JSON:API Backend
//!
//! [`BackendActor`] plays the server side of a JSON:API service. It owns one
//! collection of wire resources per path and processes requests sequentially
//! in its own task, so the collections need no locking.
//!
//! ## Behavior
//!
//! * **Create**: assigns `<id_prefix><n>` to resources without an id; an id
//!   that already exists in the collection is a `409`.
//! * **Update**: merges attributes key by key and replaces the relationships
//!   present in the payload. Unknown ids are a `404`.
//! * **Remove**: deletes by id; batches are checked before anything is removed.
//! * **Get / List**: `filter[<attr>]=<value>` narrows lists; `include=a,b`
//!   embeds the targets of the named relationships in `included`.
//!
//! Every response is self-contained: relationship linkage is only returned
//! when all of its targets are part of the same document.

use super::client::BackendClient;
use super::error::BackendError;
use super::message::{BackendRequest, Response};
use super::BackendConfig;
use jsonapi_store::{OneOrMany, Params, ResourceIdentifier, WireDocument, WireResource};
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

pub struct BackendActor {
    receiver: mpsc::Receiver<BackendRequest>,
    collections: HashMap<String, Vec<WireResource>>,
    next_id: u64,
    id_prefix: String,
}

impl BackendActor {
    /// Creates the actor and the client that talks to it.
    ///
    /// The actor does nothing until [`BackendActor::run`] is spawned.
    pub fn new(config: &BackendConfig) -> (Self, BackendClient) {
        let (sender, receiver) = mpsc::channel(config.buffer_size);
        let actor = Self {
            receiver,
            collections: HashMap::new(),
            next_id: 1,
            id_prefix: config.id_prefix.clone(),
        };
        (actor, BackendClient::new(sender))
    }

    /// Processes requests until every client is dropped.
    pub async fn run(mut self) {
        info!("Backend started");

        while let Some(request) = self.receiver.recv().await {
            match request {
                BackendRequest::Get {
                    path,
                    id,
                    params,
                    respond_to,
                } => {
                    debug!(%path, %id, "Get");
                    let result = self.get(&path, &id, &params);
                    reply("get", &path, respond_to, result);
                }
                BackendRequest::List {
                    path,
                    params,
                    respond_to,
                } => {
                    debug!(%path, ?params, "List");
                    let result = Ok(self.list(&path, &params));
                    reply("list", &path, respond_to, result);
                }
                BackendRequest::Create {
                    path,
                    document,
                    params,
                    respond_to,
                } => {
                    debug!(%path, "Create");
                    let result = self.create(&path, document, &params);
                    reply("create", &path, respond_to, result);
                }
                BackendRequest::Update {
                    path,
                    id,
                    document,
                    params,
                    respond_to,
                } => {
                    debug!(%path, %id, "Update");
                    let result = self.update(&path, &id, document, &params);
                    reply("update", &path, respond_to, result);
                }
                BackendRequest::UpdateAll {
                    path,
                    document,
                    params,
                    respond_to,
                } => {
                    debug!(%path, "UpdateAll");
                    let result = self.update_all(&path, document, &params);
                    reply("update_all", &path, respond_to, result);
                }
                BackendRequest::Remove {
                    path,
                    id,
                    respond_to,
                } => {
                    debug!(%path, %id, "Remove");
                    let result = self.remove(&path, &[id]);
                    reply("remove", &path, respond_to, result);
                }
                BackendRequest::RemoveAll {
                    path,
                    ids,
                    respond_to,
                } => {
                    debug!(%path, count = ids.len(), "RemoveAll");
                    let ids: Vec<String> = ids.into_iter().map(|target| target.id).collect();
                    let result = self.remove(&path, &ids);
                    reply("remove_all", &path, respond_to, result);
                }
            }
        }

        let size: usize = self.collections.values().map(Vec::len).sum();
        info!(size, "Shutdown");
    }

    fn get(&self, path: &str, id: &str, params: &Params) -> Result<WireDocument, BackendError> {
        let resource = self
            .find(path, id)
            .cloned()
            .ok_or_else(|| BackendError::not_found(path, id))?;
        Ok(self.respond(OneOrMany::One(resource), params, None))
    }

    fn list(&self, path: &str, params: &Params) -> WireDocument {
        let filters = filters(params);
        let resources: Vec<WireResource> = self
            .collections
            .get(path)
            .into_iter()
            .flatten()
            .filter(|resource| matches_filters(resource, &filters))
            .cloned()
            .collect();
        let meta = json!({ "total": resources.len() });
        self.respond(OneOrMany::Many(resources), params, Some(meta))
    }

    fn create(
        &mut self,
        path: &str,
        document: WireDocument,
        params: &Params,
    ) -> Result<WireDocument, BackendError> {
        let data = primary_data(document)?;

        let mut pending: HashSet<String> = HashSet::new();
        for resource in data.iter() {
            if resource.type_name.is_empty() {
                return Err(BackendError::Invalid("resource object without type".to_string()));
            }
            if let Some(id) = &resource.id {
                if self.find(path, id).is_some() || !pending.insert(id.clone()) {
                    return Err(BackendError::Conflict {
                        path: path.to_string(),
                        id: id.clone(),
                    });
                }
            }
        }

        let created = data.map(|mut resource| {
            if resource.id.is_none() {
                resource.id = Some(self.generate_id(path, &pending));
            }
            resource
        });
        let collection = self.collections.entry(path.to_string()).or_default();
        collection.extend(created.iter().cloned());
        info!(%path, count = created.as_slice().len(), size = collection.len(), "Created");

        Ok(self.respond(created, params, None))
    }

    fn update(
        &mut self,
        path: &str,
        id: &str,
        document: WireDocument,
        params: &Params,
    ) -> Result<WireDocument, BackendError> {
        let changes = match primary_data(document)? {
            OneOrMany::One(resource) => resource,
            OneOrMany::Many(_) => {
                return Err(BackendError::Invalid(
                    "expected a single resource object".to_string(),
                ))
            }
        };
        let resource = self
            .find_mut(path, id)
            .ok_or_else(|| BackendError::not_found(path, id))?;
        merge(resource, changes);
        let updated = resource.clone();
        info!(%path, %id, "Updated");
        Ok(self.respond(OneOrMany::One(updated), params, None))
    }

    fn update_all(
        &mut self,
        path: &str,
        document: WireDocument,
        params: &Params,
    ) -> Result<WireDocument, BackendError> {
        let batch = primary_data(document)?.into_vec();
        for changes in &batch {
            let id = changes
                .id
                .as_deref()
                .ok_or_else(|| BackendError::Invalid("resource object without id".to_string()))?;
            if self.find(path, id).is_none() {
                return Err(BackendError::not_found(path, id));
            }
        }

        let mut updated = Vec::with_capacity(batch.len());
        for changes in batch {
            let id = changes.id.clone().unwrap_or_default();
            if let Some(resource) = self.find_mut(path, &id) {
                merge(resource, changes);
                updated.push(resource.clone());
            }
        }
        info!(%path, count = updated.len(), "Updated");
        Ok(self.respond(OneOrMany::Many(updated), params, None))
    }

    fn remove(&mut self, path: &str, ids: &[String]) -> Result<WireDocument, BackendError> {
        if let Some(missing) = ids.iter().find(|id| self.find(path, id).is_none()) {
            return Err(BackendError::not_found(path, missing));
        }
        let collection = self.collections.entry(path.to_string()).or_default();
        collection.retain(|resource| {
            resource
                .id
                .as_ref()
                .map_or(true, |id| !ids.contains(id))
        });
        info!(%path, count = ids.len(), size = collection.len(), "Deleted");
        Ok(WireDocument::default())
    }

    /// Builds a response: embeds requested includes and prunes linkage
    /// whose targets are not in the document.
    fn respond(
        &self,
        primary: OneOrMany<WireResource>,
        params: &Params,
        meta: Option<Value>,
    ) -> WireDocument {
        let included = self.included(primary.as_slice(), params);
        let present: HashSet<ResourceIdentifier> = primary
            .iter()
            .chain(&included)
            .filter_map(WireResource::identifier)
            .collect();

        let prune = |mut resource: WireResource| {
            if let Some(relationships) = resource.relationships.as_mut() {
                relationships.retain(|_, relationship| {
                    relationship
                        .data
                        .as_ref()
                        .map_or(true, |linkage| linkage.iter().all(|id| present.contains(id)))
                });
            }
            resource
        };

        WireDocument {
            data: Some(primary.map(&prune)),
            included: (!included.is_empty()).then(|| included.into_iter().map(&prune).collect()),
            errors: None,
            meta,
        }
    }

    fn included(&self, primary: &[WireResource], params: &Params) -> Vec<WireResource> {
        let Some(include) = params.get("include") else {
            return Vec::new();
        };
        let names: Vec<&str> = include
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .collect();

        let mut seen: HashSet<ResourceIdentifier> =
            primary.iter().filter_map(WireResource::identifier).collect();
        let mut included = Vec::new();
        for resource in primary {
            let Some(relationships) = &resource.relationships else {
                continue;
            };
            for name in &names {
                let linkage = relationships.get(*name).and_then(|r| r.data.as_ref());
                for identifier in linkage.into_iter().flat_map(|l| l.iter()) {
                    if !seen.insert(identifier.clone()) {
                        continue;
                    }
                    if let Some(target) = self.find_identifier(identifier) {
                        included.push(target.clone());
                    }
                }
            }
        }
        included
    }

    fn find(&self, path: &str, id: &str) -> Option<&WireResource> {
        self.collections
            .get(path)?
            .iter()
            .find(|resource| resource.id.as_deref() == Some(id))
    }

    fn find_mut(&mut self, path: &str, id: &str) -> Option<&mut WireResource> {
        self.collections
            .get_mut(path)?
            .iter_mut()
            .find(|resource| resource.id.as_deref() == Some(id))
    }

    fn find_identifier(&self, identifier: &ResourceIdentifier) -> Option<&WireResource> {
        self.collections.values().flatten().find(|resource| {
            resource.type_name == identifier.type_name
                && resource.id.as_deref() == Some(identifier.id.as_str())
        })
    }

    /// Next `<prefix><n>` id not taken in `path` or by the pending batch.
    fn generate_id(&mut self, path: &str, pending: &HashSet<String>) -> String {
        loop {
            let id = format!("{}{}", self.id_prefix, self.next_id);
            self.next_id += 1;
            if self.find(path, &id).is_none() && !pending.contains(&id) {
                return id;
            }
        }
    }
}

fn reply(
    operation: &str,
    path: &str,
    respond_to: Response,
    result: Result<WireDocument, BackendError>,
) {
    if let Err(err) = &result {
        warn!(operation, %path, error = %err, status = err.status(), "Request failed");
    }
    let _ = respond_to.send(result);
}

fn primary_data(document: WireDocument) -> Result<OneOrMany<WireResource>, BackendError> {
    document
        .data
        .ok_or_else(|| BackendError::Invalid("document without data".to_string()))
}

/// Attributes are merged key by key; relationships are replaced by name.
fn merge(resource: &mut WireResource, changes: WireResource) {
    if let Some(attributes) = changes.attributes {
        resource
            .attributes
            .get_or_insert_with(Default::default)
            .extend(attributes);
    }
    if let Some(relationships) = changes.relationships {
        resource
            .relationships
            .get_or_insert_with(Default::default)
            .extend(relationships);
    }
}

fn filters(params: &Params) -> Vec<(&str, &str)> {
    params
        .iter()
        .filter_map(|(key, value)| {
            let attribute = key.strip_prefix("filter[")?.strip_suffix(']')?;
            Some((attribute, value.as_str()))
        })
        .collect()
}

fn matches_filters(resource: &WireResource, filters: &[(&str, &str)]) -> bool {
    filters.iter().all(|(attribute, expected)| {
        match resource.attributes.as_ref().and_then(|a| a.get(*attribute)) {
            Some(Value::String(value)) => value == expected,
            Some(value) => value.to_string() == *expected,
            None => false,
        }
    })
}
