//! Fluent registration on top of the [`registry`](super::registry) functions.

use super::registry::{define_attribute, define_relationship, register_model, ModelConfig};
use super::{AttributeMetadata, ModelMetadata, RelationshipMetadata, ResourceType};
use crate::error::RegistrationError;
use crate::resource::Resource;
use std::marker::PhantomData;
use std::sync::Arc;

/// Declares the wire shape of `T` in one expression.
///
/// Attributes and relationships are applied before the model is finalized, so
/// the order of the builder calls does not matter.
///
/// # Example
/// ```ignore
/// ModelBuilder::<Article>::new()
///     .type_name("articles")
///     .attribute("title")
///     .to_one::<Author>("author")
///     .register()?;
/// ```
pub struct ModelBuilder<T> {
    config: ModelConfig,
    attributes: Vec<AttributeMetadata>,
    relationships: Vec<RelationshipMetadata>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Resource> ModelBuilder<T> {
    pub fn new() -> Self {
        Self {
            config: ModelConfig::default(),
            attributes: Vec::new(),
            relationships: Vec::new(),
            _marker: PhantomData,
        }
    }

    pub fn type_name(mut self, type_name: impl Into<String>) -> Self {
        self.config.type_name = Some(type_name.into());
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.config.path = Some(path.into());
        self
    }

    /// Inherits type name, attributes and relationships from `P`.
    pub fn extends<P: Resource>(mut self) -> Self {
        self.config.parent = Some(ResourceType::of::<P>());
        self
    }

    pub fn attribute(mut self, attribute: impl Into<AttributeMetadata>) -> Self {
        self.attributes.push(attribute.into());
        self
    }

    pub fn relationship(mut self, relationship: RelationshipMetadata) -> Self {
        self.relationships.push(relationship);
        self
    }

    pub fn to_one<R: Resource>(self, property: impl Into<String>) -> Self {
        self.relationship(RelationshipMetadata::to_one::<R>(property))
    }

    pub fn to_many<R: Resource>(self, property: impl Into<String>) -> Self {
        self.relationship(RelationshipMetadata::to_many::<R>(property))
    }

    pub fn register(self) -> Result<Arc<ModelMetadata>, RegistrationError> {
        for attribute in self.attributes {
            define_attribute::<T>(attribute);
        }
        for relationship in self.relationships {
            define_relationship::<T>(relationship);
        }
        register_model::<T>(self.config)
    }
}

impl<T: Resource> Default for ModelBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::Cardinality;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize, Deserialize)]
    struct Post {
        id: Option<String>,
    }

    impl Resource for Post {
        fn id(&self) -> Option<&str> {
            self.id.as_deref()
        }
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    struct Writer {
        id: Option<String>,
    }

    impl Resource for Writer {
        fn id(&self) -> Option<&str> {
            self.id.as_deref()
        }
    }

    #[test]
    fn builder_registers_everything() {
        let model = ModelBuilder::<Post>::new()
            .attribute(AttributeMetadata::new("title").wire_name("headline"))
            .to_one::<Writer>("writer")
            .path("builder/posts")
            .type_name("builder-posts")
            .register()
            .unwrap();

        assert_eq!(model.type_name(), "builder-posts");
        assert_eq!(model.path(), "builder/posts");
        assert_eq!(model.attribute("title").unwrap().wire_name, "headline");
        let writer = model.relationship("writer").unwrap();
        assert_eq!(writer.cardinality, Cardinality::ToOne);
        assert_eq!(writer.target, ResourceType::of::<Writer>());
    }

    #[test]
    fn builder_without_type_name_fails() {
        let result = ModelBuilder::<Writer>::new().attribute("name").register();
        assert!(result.is_err());
    }
}
