//! # Resource Metadata
//!
//! Plain data describing how a Rust type maps onto the wire: its JSON:API type
//! name, collection path, attributes and relationships.
//!
//! Metadata is attached to types through the [`registry`] (directly or with
//! [`ModelBuilder`]) and read back by the serializer and the store.

pub mod builder;
pub mod registry;

pub use builder::ModelBuilder;
pub use registry::{
    define_attribute, define_relationship, metadata, metadata_for, register_model, ModelConfig,
};

use serde_json::Value;
use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;

/// Key identifying a Rust resource type in the registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ResourceType {
    id: TypeId,
    name: &'static str,
}

impl ResourceType {
    pub fn of<T: 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Fully qualified Rust type name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Last path segment of the Rust type name (e.g. "Article").
    pub fn short_name(&self) -> &'static str {
        self.name.rsplit("::").next().unwrap_or(self.name)
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

/// Value transform applied to an attribute on its way to or from the wire.
pub type ValueTransform = fn(Value) -> Value;

/// How one struct property maps onto a wire attribute.
#[derive(Clone, Debug)]
pub struct AttributeMetadata {
    pub property: String,
    pub wire_name: String,
    serialize: Option<ValueTransform>,
    deserialize: Option<ValueTransform>,
}

impl AttributeMetadata {
    pub fn new(property: impl Into<String>) -> Self {
        let property = property.into();
        Self {
            wire_name: property.clone(),
            property,
            serialize: None,
            deserialize: None,
        }
    }

    /// Uses a different field name on the wire.
    pub fn wire_name(mut self, name: impl Into<String>) -> Self {
        self.wire_name = name.into();
        self
    }

    pub fn serialize_with(mut self, transform: ValueTransform) -> Self {
        self.serialize = Some(transform);
        self
    }

    pub fn deserialize_with(mut self, transform: ValueTransform) -> Self {
        self.deserialize = Some(transform);
        self
    }

    /// Property value → wire value.
    pub fn encode(&self, value: Value) -> Value {
        match self.serialize {
            Some(transform) => transform(value),
            None => value,
        }
    }

    /// Wire value → property value.
    pub fn decode(&self, value: Value) -> Value {
        match self.deserialize {
            Some(transform) => transform(value),
            None => value,
        }
    }
}

impl From<&str> for AttributeMetadata {
    fn from(property: &str) -> Self {
        AttributeMetadata::new(property)
    }
}

/// Cardinality of a relationship.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cardinality {
    ToOne,
    ToMany,
}

/// How one struct property maps onto a wire relationship.
#[derive(Clone, Debug, PartialEq)]
pub struct RelationshipMetadata {
    pub property: String,
    pub wire_name: String,
    pub target: ResourceType,
    pub cardinality: Cardinality,
}

impl RelationshipMetadata {
    pub fn to_one<R: 'static>(property: impl Into<String>) -> Self {
        Self::with_target(property, ResourceType::of::<R>(), Cardinality::ToOne)
    }

    pub fn to_many<R: 'static>(property: impl Into<String>) -> Self {
        Self::with_target(property, ResourceType::of::<R>(), Cardinality::ToMany)
    }

    fn with_target(property: impl Into<String>, target: ResourceType, cardinality: Cardinality) -> Self {
        let property = property.into();
        Self {
            wire_name: property.clone(),
            property,
            target,
            cardinality,
        }
    }

    pub fn wire_name(mut self, name: impl Into<String>) -> Self {
        self.wire_name = name.into();
        self
    }
}

/// Everything the registry knows about one resource type.
#[derive(Clone, Debug, Default)]
pub struct ModelMetadata {
    type_name: String,
    path: Option<String>,
    attributes: HashMap<String, AttributeMetadata>,
    relationships: HashMap<String, RelationshipMetadata>,
}

impl ModelMetadata {
    /// Wire type name. Empty only for a model that has not been registered yet.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Collection path, defaulting to the type name.
    pub fn path(&self) -> &str {
        self.path.as_deref().unwrap_or(&self.type_name)
    }

    pub fn attribute(&self, property: &str) -> Option<&AttributeMetadata> {
        self.attributes.get(property)
    }

    pub fn attributes(&self) -> impl Iterator<Item = &AttributeMetadata> {
        self.attributes.values()
    }

    pub fn relationship(&self, property: &str) -> Option<&RelationshipMetadata> {
        self.relationships.get(property)
    }

    /// Looks a relationship up by its wire name rather than its property.
    pub fn relationship_by_wire_name(&self, wire_name: &str) -> Option<&RelationshipMetadata> {
        self.relationships.values().find(|r| r.wire_name == wire_name)
    }

    pub fn relationships(&self) -> impl Iterator<Item = &RelationshipMetadata> {
        self.relationships.values()
    }

    pub(crate) fn set_type_name(&mut self, type_name: impl Into<String>) {
        self.type_name = type_name.into();
    }

    pub(crate) fn set_path(&mut self, path: Option<String>) {
        self.path = path;
    }

    pub(crate) fn add_attribute(&mut self, attribute: AttributeMetadata) -> &mut Self {
        self.attributes.insert(attribute.property.clone(), attribute);
        self
    }

    pub(crate) fn add_relationship(&mut self, relationship: RelationshipMetadata) -> &mut Self {
        self.relationships
            .insert(relationship.property.clone(), relationship);
        self
    }

    /// Seeds this model from its parent's.
    ///
    /// The type name is inherited; attributes and relationships are copied only
    /// for properties this model has not declared itself. The path is not
    /// inherited.
    pub(crate) fn inherit(&mut self, parent: &ModelMetadata) {
        self.type_name = parent.type_name.clone();
        for (property, attribute) in &parent.attributes {
            self.attributes
                .entry(property.clone())
                .or_insert_with(|| attribute.clone());
        }
        for (property, relationship) in &parent.relationships {
            self.relationships
                .entry(property.clone())
                .or_insert_with(|| relationship.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Parent;
    struct Other;

    fn upper(value: Value) -> Value {
        match value {
            Value::String(s) => Value::String(s.to_uppercase()),
            other => other,
        }
    }

    #[test]
    fn path_defaults_to_type_name() {
        let mut model = ModelMetadata::default();
        model.set_type_name("articles");
        assert_eq!(model.path(), "articles");
        model.set_path(Some("blog/articles".into()));
        assert_eq!(model.path(), "blog/articles");
    }

    #[test]
    fn attribute_transforms_apply_per_direction() {
        let attr = AttributeMetadata::new("title")
            .wire_name("headline")
            .serialize_with(upper);
        assert_eq!(attr.wire_name, "headline");
        assert_eq!(attr.encode(json!("hi")), json!("HI"));
        assert_eq!(attr.decode(json!("hi")), json!("hi"));
    }

    #[test]
    fn inherit_keeps_own_declarations() {
        let mut parent = ModelMetadata::default();
        parent.set_type_name("parents");
        parent.add_attribute(AttributeMetadata::new("name"));
        parent.add_attribute(AttributeMetadata::new("title").wire_name("parent-title"));
        parent.add_relationship(RelationshipMetadata::to_one::<Other>("owner"));

        let mut child = ModelMetadata::default();
        child.add_attribute(AttributeMetadata::new("title"));
        child.inherit(&parent);

        assert_eq!(child.type_name(), "parents");
        assert!(child.attribute("name").is_some());
        assert_eq!(child.attribute("title").unwrap().wire_name, "title");
        assert!(child.relationship("owner").is_some());

        // copies, not shared maps
        child.add_attribute(AttributeMetadata::new("extra"));
        assert!(parent.attribute("extra").is_none());
    }

    #[test]
    fn short_name_strips_module_path() {
        assert_eq!(ResourceType::of::<Parent>().short_name(), "Parent");
    }
}
