//! # Document Serializer
//!
//! Stateless conversion between typed resources and wire documents, driven by
//! the metadata [`registry`](crate::metadata::registry).
//!
//! ## Serializing
//! Each entity is looked up by its own Rust type (no ancestor walk). Declared
//! attributes are emitted under their wire names; declared relationships are
//! emitted as bare `{type, id}` identifiers, never as nested resources.
//!
//! ## Deserializing
//! Responses may repeat a resource across `data` and `included`, and
//! relationships may form cycles. Deserialization therefore runs in passes over
//! an identity cache keyed by `(type, id)` that lives for one call only:
//!
//! 1. **Allocate** one slot per distinct identity (last writer wins).
//! 2. **Resolve** the Rust type of every slot: primary data become the requested
//!    type, relationship targets their declared target type, anything else the
//!    type registered for its wire type name.
//! 3. **Materialize** every slot and wire relationship edges between slots.
//!
//! Any unresolvable piece fails the whole call; a partially linked graph is never
//! returned.

use crate::document::{Document, NodeId, Parsed, ResourceGraph};
use crate::error::{ErrorDocument, SerializerError};
use crate::metadata::registry::{self, ModelEntry};
use crate::metadata::{ModelMetadata, ResourceType};
use crate::resource::{Entity, Resource};
use crate::wire::{OneOrMany, ResourceIdentifier, WireDocument, WireRelationship, WireResource};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::Arc;
use tracing::{debug, trace};

/// Converts typed resources to wire documents and back.
#[derive(Clone, Copy, Debug, Default)]
pub struct DocumentSerializer;

impl DocumentSerializer {
    pub fn new() -> Self {
        Self
    }

    /// Builds the payload document for one or many entities.
    pub fn serialize<'a, T: Resource>(
        &self,
        entities: impl Into<OneOrMany<&'a Entity<T>>>,
    ) -> Result<WireDocument, SerializerError> {
        let entities = entities.into();
        let model = model_of::<T>()?;
        let data = entities.try_map(|entity| serialize_resource(&model, entity))?;
        Ok(WireDocument::with_data(data))
    }

    /// Identifiers only, as used by bulk removal.
    pub fn serialize_as_id<'a, T: Resource>(
        &self,
        entities: impl Into<OneOrMany<&'a Entity<T>>>,
    ) -> Result<OneOrMany<ResourceIdentifier>, SerializerError> {
        let entities = entities.into();
        let model = model_of::<T>()?;
        entities.try_map(|entity| {
            entity
                .id()
                .map(|id| ResourceIdentifier::new(model.type_name(), id))
                .ok_or_else(|| SerializerError::MissingId(model.type_name().to_string()))
        })
    }

    /// Parses a wire document whose primary data are `T`s.
    pub fn deserialize<T: Resource>(&self, document: WireDocument) -> Result<Parsed<T>, SerializerError> {
        if let Some(errors) = document.errors {
            return Ok(Parsed::Errors(ErrorDocument {
                errors,
                meta: document.meta,
            }));
        }

        let requested = registry::lookup(ResourceType::of::<T>())
            .ok_or_else(|| SerializerError::UnregisteredType(ResourceType::of::<T>().to_string()))?;

        let mut cache = IdentityCache::default();
        let primary = match document.data {
            None => None,
            Some(data) => Some(data.try_map(|resource| cache.allocate(resource))?),
        };
        for resource in document.included.unwrap_or_default() {
            cache.allocate(resource)?;
        }

        let types = cache.resolve_types(&requested, primary.as_ref())?;
        let graph = cache.materialize(types)?;
        debug!(
            resource = %requested.resource_type,
            nodes = graph.len(),
            "Deserialized document"
        );
        Ok(Parsed::Data(Document::new(primary, graph, document.meta)))
    }
}

fn model_of<T: Resource>() -> Result<Arc<ModelMetadata>, SerializerError> {
    let resource_type = ResourceType::of::<T>();
    registry::metadata_for(resource_type)
        .ok_or_else(|| SerializerError::UnregisteredType(resource_type.to_string()))
}

fn serialize_resource<T: Resource>(
    model: &ModelMetadata,
    entity: &Entity<T>,
) -> Result<WireResource, SerializerError> {
    let fields = match serde_json::to_value(entity.resource()) {
        Ok(Value::Object(fields)) => fields,
        Ok(_) => {
            return Err(SerializerError::Encode(format!(
                "{} does not serialize to an object",
                model.type_name()
            )))
        }
        Err(err) => return Err(SerializerError::Encode(err.to_string())),
    };

    let mut attributes = Map::new();
    for attribute in model.attributes() {
        // null clears the value on the server, an absent attribute is left unchanged
        if let Some(value) = fields.get(&attribute.property) {
            attributes.insert(attribute.wire_name.clone(), attribute.encode(value.clone()));
        }
    }

    let mut relationships = BTreeMap::new();
    for relationship in model.relationships() {
        let value = match fields.get(&relationship.property) {
            None | Some(Value::Null) => continue,
            Some(Value::Array(items)) if items.is_empty() => continue,
            Some(value) => value.clone(),
        };
        let linkage: OneOrMany<ResourceIdentifier> = serde_json::from_value(value).map_err(|err| {
            SerializerError::Encode(format!("relationship {}: {err}", relationship.property))
        })?;
        relationships.insert(
            relationship.wire_name.clone(),
            WireRelationship { data: Some(linkage) },
        );
    }

    let id = if entity.is_new() {
        None
    } else {
        entity.id().map(str::to_owned)
    };

    Ok(WireResource {
        type_name: model.type_name().to_string(),
        id,
        attributes: (!attributes.is_empty()).then_some(attributes),
        relationships: (!relationships.is_empty()).then_some(relationships),
    })
}

/// Per-call identity cache: one slot per distinct `(type, id)`.
#[derive(Default)]
struct IdentityCache {
    slots: Vec<WireResource>,
    index: HashMap<ResourceIdentifier, usize>,
}

impl IdentityCache {
    fn allocate(&mut self, resource: WireResource) -> Result<NodeId, SerializerError> {
        if resource.type_name.is_empty() {
            return Err(SerializerError::Deserialization(
                "resource object without type".to_string(),
            ));
        }
        let slot = match resource.identifier() {
            Some(identifier) => match self.index.get(&identifier) {
                Some(&slot) => {
                    trace!(type_name = %identifier.type_name, id = %identifier.id, "Duplicate resource, last one wins");
                    self.slots[slot] = resource;
                    slot
                }
                None => {
                    let slot = self.slots.len();
                    self.index.insert(identifier, slot);
                    self.slots.push(resource);
                    slot
                }
            },
            None => {
                self.slots.push(resource);
                self.slots.len() - 1
            }
        };
        Ok(node_id(slot))
    }

    fn find(&self, identifier: &ResourceIdentifier) -> Option<usize> {
        self.index.get(identifier).copied()
    }

    /// Decides which registered type each slot is materialized as.
    fn resolve_types(
        &self,
        requested: &ModelEntry,
        primary: Option<&OneOrMany<NodeId>>,
    ) -> Result<Vec<ModelEntry>, SerializerError> {
        let mut resolved: Vec<Option<ModelEntry>> = vec![None; self.slots.len()];
        let mut queue = VecDeque::new();

        for node in primary.map(OneOrMany::as_slice).unwrap_or(&[]) {
            let slot = slot_of(*node);
            if self.slots[slot].type_name == requested.metadata.type_name() {
                resolved[slot] = Some(requested.clone());
                queue.push_back(slot);
            }
        }
        self.propagate(&mut resolved, &mut queue);

        for slot in 0..self.slots.len() {
            if resolved[slot].is_some() {
                continue;
            }
            let type_name = &self.slots[slot].type_name;
            let entry = registry::lookup_wire_type(type_name).ok_or_else(|| {
                SerializerError::Deserialization(format!("unknown resource type `{type_name}`"))
            })?;
            resolved[slot] = Some(entry);
            queue.push_back(slot);
            self.propagate(&mut resolved, &mut queue);
        }

        Ok(resolved.into_iter().flatten().collect())
    }

    /// Pushes declared relationship target types onto not-yet-resolved slots.
    fn propagate(&self, resolved: &mut [Option<ModelEntry>], queue: &mut VecDeque<usize>) {
        while let Some(slot) = queue.pop_front() {
            let Some(source) = resolved[slot].clone() else {
                continue;
            };
            let Some(relationships) = &self.slots[slot].relationships else {
                continue;
            };
            for (wire_name, relationship) in relationships {
                let Some(declared) = source.metadata.relationship_by_wire_name(wire_name) else {
                    continue;
                };
                let Some(target) = registry::lookup(declared.target) else {
                    continue;
                };
                let Some(linkage) = &relationship.data else {
                    continue;
                };
                for identifier in linkage.iter() {
                    if identifier.type_name != target.metadata.type_name() {
                        continue;
                    }
                    if let Some(target_slot) = self.find(identifier) {
                        if resolved[target_slot].is_none() {
                            resolved[target_slot] = Some(target.clone());
                            queue.push_back(target_slot);
                        }
                    }
                }
            }
        }
    }

    /// Builds every slot and links relationships by slot handle.
    fn materialize(self, types: Vec<ModelEntry>) -> Result<ResourceGraph, SerializerError> {
        let mut graph = ResourceGraph::with_capacity(self.slots.len());
        let index = self.index;

        for (resource, entry) in self.slots.into_iter().zip(types) {
            let identifier = resource.identifier();
            let mut fields = Map::new();
            if let Some(id) = resource.id {
                fields.insert("id".to_string(), Value::String(id));
            }

            if let Some(mut attributes) = resource.attributes {
                for attribute in entry.metadata.attributes() {
                    if let Some(value) = attributes.remove(&attribute.wire_name) {
                        fields.insert(attribute.property.clone(), attribute.decode(value));
                    }
                }
            }

            let mut links = HashMap::new();
            let mut relationships = resource.relationships.unwrap_or_default();
            for declared in entry.metadata.relationships() {
                let Some(relationship) = relationships.remove(&declared.wire_name) else {
                    continue;
                };
                let Some(linkage) = relationship.data else {
                    continue;
                };
                let targets = linkage.clone().try_map(|identifier| {
                    index.get(&identifier).map(|slot| node_id(*slot)).ok_or_else(|| {
                        SerializerError::Deserialization(format!(
                            "relationship `{}` points at {}/{} which is not in the document",
                            declared.wire_name, identifier.type_name, identifier.id
                        ))
                    })
                })?;
                let value = serde_json::to_value(&linkage)
                    .map_err(|err| SerializerError::Deserialization(err.to_string()))?;
                fields.insert(declared.property.clone(), value);
                links.insert(declared.property.clone(), targets);
            }

            let value = (entry.materialize)(Value::Object(fields)).map_err(|err| {
                SerializerError::Deserialization(format!(
                    "cannot build {} from `{}`: {err}",
                    entry.resource_type,
                    entry.metadata.type_name()
                ))
            })?;
            graph.push(identifier, entry.resource_type, value, links);
        }

        Ok(graph)
    }
}

// Slots and graph nodes share one numbering: slot `n` becomes node `n`.
fn node_id(slot: usize) -> NodeId {
    NodeId::from_index(slot)
}

fn slot_of(node: NodeId) -> usize {
    node.index()
}

impl<'a, T> From<&'a Entity<T>> for OneOrMany<&'a Entity<T>> {
    fn from(entity: &'a Entity<T>) -> Self {
        OneOrMany::One(entity)
    }
}

impl<'a, T> From<&'a [Entity<T>]> for OneOrMany<&'a Entity<T>> {
    fn from(entities: &'a [Entity<T>]) -> Self {
        OneOrMany::Many(entities.iter().collect())
    }
}

impl<'a, T> From<&'a Vec<Entity<T>>> for OneOrMany<&'a Entity<T>> {
    fn from(entities: &'a Vec<Entity<T>>) -> Self {
        OneOrMany::Many(entities.iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{AttributeMetadata, ModelBuilder};
    use serde::{Deserialize, Serialize};
    use serde_json::json;
    use std::sync::Once;

    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    struct Book {
        id: Option<String>,
        #[serde(default)]
        title: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pages: Option<u32>,
        #[serde(default)]
        writer: Option<ResourceIdentifier>,
    }

    impl Resource for Book {
        fn id(&self) -> Option<&str> {
            self.id.as_deref()
        }
    }

    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    struct Writer {
        id: Option<String>,
        #[serde(default)]
        name: String,
        #[serde(default)]
        books: Vec<ResourceIdentifier>,
    }

    impl Resource for Writer {
        fn id(&self) -> Option<&str> {
            self.id.as_deref()
        }
    }

    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    struct Draft {
        id: Option<String>,
        #[serde(default)]
        subtitle: Option<String>,
    }

    impl Resource for Draft {
        fn id(&self) -> Option<&str> {
            self.id.as_deref()
        }
    }

    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    struct Tag {
        id: Option<String>,
    }

    impl Resource for Tag {
        fn id(&self) -> Option<&str> {
            self.id.as_deref()
        }
    }

    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    struct Unknown {
        id: Option<String>,
    }

    impl Resource for Unknown {
        fn id(&self) -> Option<&str> {
            self.id.as_deref()
        }
    }

    fn shout(value: Value) -> Value {
        match value {
            Value::String(s) => Value::String(s.to_uppercase()),
            other => other,
        }
    }

    fn register() {
        static ONCE: Once = Once::new();
        ONCE.call_once(|| {
            ModelBuilder::<Book>::new()
                .type_name("serializer-books")
                .attribute("title")
                .attribute(AttributeMetadata::new("pages").wire_name("page-count"))
                .to_one::<Writer>("writer")
                .register()
                .unwrap();
            ModelBuilder::<Writer>::new()
                .type_name("serializer-writers")
                .attribute(AttributeMetadata::new("name").serialize_with(shout))
                .to_many::<Book>("books")
                .register()
                .unwrap();
            ModelBuilder::<Draft>::new()
                .type_name("serializer-drafts")
                .attribute("subtitle")
                .register()
                .unwrap();
            ModelBuilder::<Tag>::new()
                .type_name("serializer-tags")
                .register()
                .unwrap();
        });
    }

    #[test]
    fn new_resource_omits_id_and_empty_relationships() {
        register();
        let book = Entity::new(Book {
            id: Some("tmp".into()),
            title: "Dune".into(),
            ..Book::default()
        });
        let payload = DocumentSerializer.serialize(&book).unwrap();
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({"data": {"type": "serializer-books", "attributes": {"title": "Dune"}}})
        );
    }

    #[test]
    fn persisted_resource_keeps_id_aliases_and_links() {
        register();
        let book = Entity::persisted(Book {
            id: Some("1".into()),
            title: "Dune".into(),
            pages: Some(412),
            writer: Some(ResourceIdentifier::new("serializer-writers", "7")),
        });
        let payload = DocumentSerializer.serialize(&book).unwrap();
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({"data": {
                "type": "serializer-books",
                "id": "1",
                "attributes": {"title": "Dune", "page-count": 412},
                "relationships": {"writer": {"data": {"type": "serializer-writers", "id": "7"}}}
            }})
        );
    }

    #[test]
    fn serialize_transform_applies() {
        register();
        let writer = Entity::new(Writer {
            name: "frank".into(),
            ..Writer::default()
        });
        let payload = DocumentSerializer.serialize(&writer).unwrap();
        match payload.data {
            Some(OneOrMany::One(resource)) => {
                assert_eq!(resource.attributes.unwrap()["name"], json!("FRANK"));
            }
            other => panic!("unexpected data: {other:?}"),
        }
    }

    #[test]
    fn to_many_linkage_serializes_as_array() {
        register();
        let writer = Entity::persisted(Writer {
            id: Some("7".into()),
            name: "frank".into(),
            books: vec![
                ResourceIdentifier::new("serializer-books", "b1"),
                ResourceIdentifier::new("serializer-books", "b2"),
            ],
        });
        let payload = DocumentSerializer.serialize(&writer).unwrap();
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({"data": {
                "type": "serializer-writers",
                "id": "7",
                "attributes": {"name": "FRANK"},
                "relationships": {"books": {"data": [
                    {"type": "serializer-books", "id": "b1"},
                    {"type": "serializer-books", "id": "b2"}
                ]}}
            }})
        );
    }

    #[test]
    fn resource_without_attributes_omits_the_member() {
        register();
        let tag = Entity::persisted(Tag { id: Some("t1".into()) });
        let payload = DocumentSerializer.serialize(&tag).unwrap();
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({"data": {"type": "serializer-tags", "id": "t1"}})
        );
    }

    #[test]
    fn unregistered_type_fails_serialization() {
        let err = DocumentSerializer
            .serialize(&Entity::new(Unknown::default()))
            .unwrap_err();
        assert!(matches!(err, SerializerError::UnregisteredType(_)));
    }

    #[test]
    fn serialize_as_id_lists_identifiers() {
        register();
        let books = vec![
            Entity::persisted(Book { id: Some("1".into()), ..Book::default() }),
            Entity::persisted(Book { id: Some("2".into()), ..Book::default() }),
        ];
        let ids = DocumentSerializer.serialize_as_id(&books).unwrap();
        assert_eq!(
            ids,
            OneOrMany::Many(vec![
                ResourceIdentifier::new("serializer-books", "1"),
                ResourceIdentifier::new("serializer-books", "2"),
            ])
        );

        let unsaved = Entity::new(Book::default());
        let err = DocumentSerializer.serialize_as_id(&unsaved).unwrap_err();
        assert!(matches!(err, SerializerError::MissingId(_)));
    }

    #[test]
    fn error_documents_skip_data_processing() {
        register();
        let doc: WireDocument = serde_json::from_value(json!({
            "data": {"type": "nobody-knows", "id": "1"},
            "errors": [{"status": "404", "title": "Not found"}],
            "meta": {"request": "abc"}
        }))
        .unwrap();
        match DocumentSerializer.deserialize::<Book>(doc).unwrap() {
            Parsed::Errors(errors) => {
                assert_eq!(errors.errors.len(), 1);
                assert_eq!(errors.errors[0].title, "Not found");
                assert_eq!(errors.meta, Some(json!({"request": "abc"})));
            }
            Parsed::Data(_) => panic!("expected errors"),
        }
    }

    #[test]
    fn cyclic_relationships_share_identity() {
        register();
        let doc: WireDocument = serde_json::from_value(json!({
            "data": {
                "type": "serializer-books", "id": "1",
                "attributes": {"title": "Dune", "page-count": 412},
                "relationships": {"writer": {"data": {"type": "serializer-writers", "id": "7"}}}
            },
            "included": [{
                "type": "serializer-writers", "id": "7",
                "attributes": {"name": "Frank"},
                "relationships": {"books": {"data": [{"type": "serializer-books", "id": "1"}]}}
            }]
        }))
        .unwrap();

        let document = DocumentSerializer
            .deserialize::<Book>(doc)
            .unwrap()
            .into_result()
            .unwrap();
        let graph = document.graph();
        assert_eq!(graph.len(), 2);

        let book_node = document.nodes()[0];
        let book = document.data().unwrap();
        assert_eq!(book.title, "Dune");
        assert_eq!(book.pages, Some(412));

        let writer_node = graph.related_one(book_node, "writer").unwrap();
        let writer = graph.get::<Writer>(writer_node).unwrap();
        assert_eq!(writer.name, "Frank");
        assert_eq!(graph.related_many(writer_node, "books"), &[book_node]);
    }

    #[test]
    fn forward_references_in_included_resolve() {
        register();
        let doc: WireDocument = serde_json::from_value(json!({
            "data": [{"type": "serializer-writers", "id": "7",
                      "relationships": {"books": {"data": [{"type": "serializer-books", "id": "2"}]}}}],
            "included": [
                {"type": "serializer-books", "id": "2",
                 "relationships": {"writer": {"data": {"type": "serializer-writers", "id": "7"}}}}
            ]
        }))
        .unwrap();
        let document = DocumentSerializer
            .deserialize::<Writer>(doc)
            .unwrap()
            .into_result()
            .unwrap();
        let writer_node = document.nodes()[0];
        let book_node = document.graph().related_many(writer_node, "books")[0];
        assert_eq!(document.graph().related_one(book_node, "writer"), Some(writer_node));
        let book = document.graph().get::<Book>(book_node).unwrap();
        assert_eq!(
            book.writer,
            Some(ResourceIdentifier::new("serializer-writers", "7"))
        );
    }

    #[test]
    fn duplicate_identity_last_writer_wins() {
        register();
        let doc: WireDocument = serde_json::from_value(json!({
            "data": {"type": "serializer-books", "id": "1", "attributes": {"title": "Old"}},
            "included": [{"type": "serializer-books", "id": "1", "attributes": {"title": "New"}}]
        }))
        .unwrap();
        let document = DocumentSerializer
            .deserialize::<Book>(doc)
            .unwrap()
            .into_result()
            .unwrap();
        assert_eq!(document.graph().len(), 1);
        assert_eq!(document.data().unwrap().title, "New");
    }

    #[test]
    fn dangling_relationship_fails() {
        register();
        let doc: WireDocument = serde_json::from_value(json!({
            "data": {"type": "serializer-books", "id": "1",
                     "relationships": {"writer": {"data": {"type": "serializer-writers", "id": "404"}}}}
        }))
        .unwrap();
        let err = DocumentSerializer.deserialize::<Book>(doc).unwrap_err();
        assert!(matches!(err, SerializerError::Deserialization(_)));
    }

    #[test]
    fn missing_type_and_unknown_type_fail() {
        register();
        let untyped: WireDocument =
            serde_json::from_value(json!({"data": {"id": "1"}})).unwrap();
        assert!(matches!(
            DocumentSerializer.deserialize::<Book>(untyped),
            Err(SerializerError::Deserialization(_))
        ));

        let unknown: WireDocument = serde_json::from_value(json!({
            "data": {"type": "serializer-books", "id": "1"},
            "included": [{"type": "serializer-nobody", "id": "1"}]
        }))
        .unwrap();
        assert!(matches!(
            DocumentSerializer.deserialize::<Book>(unknown),
            Err(SerializerError::Deserialization(_))
        ));
    }

    #[test]
    fn round_trip_keeps_ids_and_attributes() {
        register();
        let wire = json!({"data": [
            {"type": "serializer-books", "id": "1", "attributes": {"title": "Dune", "page-count": 412}},
            {"type": "serializer-books", "id": "2", "attributes": {"title": "Emma"}}
        ]});
        let doc: WireDocument = serde_json::from_value(wire.clone()).unwrap();
        let document = DocumentSerializer
            .deserialize::<Book>(doc)
            .unwrap()
            .into_result()
            .unwrap();
        let entities = document.entities();
        assert!(entities.iter().all(|e| !e.is_new()));

        let payload = DocumentSerializer.serialize(&entities).unwrap();
        assert_eq!(serde_json::to_value(&payload).unwrap(), wire);
    }

    #[test]
    fn null_attributes_survive_round_trip() {
        register();
        let wire = json!({"data": [
            {"type": "serializer-drafts", "id": "1", "attributes": {"subtitle": null}}
        ]});
        let doc: WireDocument = serde_json::from_value(wire.clone()).unwrap();
        let document = DocumentSerializer
            .deserialize::<Draft>(doc)
            .unwrap()
            .into_result()
            .unwrap();
        let entities = document.entities();
        assert_eq!(entities[0].subtitle, None);

        let payload = DocumentSerializer.serialize(&entities).unwrap();
        assert_eq!(serde_json::to_value(&payload).unwrap(), wire);
    }

    #[test]
    fn clearing_an_attribute_sends_null() {
        register();
        let mut draft = Entity::persisted(Draft {
            id: Some("1".into()),
            subtitle: Some("First pass".into()),
        });
        draft.subtitle = None;
        let payload = DocumentSerializer.serialize(&draft).unwrap();
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({"data": {"type": "serializer-drafts", "id": "1", "attributes": {"subtitle": null}}})
        );
    }

    #[test]
    fn absent_data_yields_empty_document() {
        register();
        let doc: WireDocument = serde_json::from_value(json!({"meta": {"deleted": 2}})).unwrap();
        let document = DocumentSerializer
            .deserialize::<Book>(doc)
            .unwrap()
            .into_result()
            .unwrap();
        assert!(document.primary().is_none());
        assert!(document.data().is_none());
        assert_eq!(document.meta(), Some(&json!({"deleted": 2})));
    }
}
