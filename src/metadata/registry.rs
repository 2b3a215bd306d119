//! # Metadata Registry
//!
//! Process-wide table mapping each [`ResourceType`] to its [`ModelMetadata`].
//!
//! Registration happens once per type, typically during program start-up:
//!
//! 1. [`define_attribute`] / [`define_relationship`] add entries to a type's model,
//!    creating an empty shell if the type has not been registered yet.
//! 2. [`register_model`] merges the parent's model (if any), applies the explicit
//!    type name and path, and finalizes the model.
//!
//! Until step 2 succeeds the type is invisible to lookups. Reads hand out
//! `Arc<ModelMetadata>` snapshots so no lock is held while a document is
//! being serialized.

use super::{AttributeMetadata, ModelMetadata, RelationshipMetadata, ResourceType};
use crate::error::RegistrationError;
use crate::resource::{ErasedResource, Resource};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};
use tracing::debug;

/// Builds a type-erased resource from its serde object representation.
pub(crate) type Materializer = fn(Value) -> Result<Box<dyn ErasedResource>, serde_json::Error>;

fn materialize<T: Resource>(value: Value) -> Result<Box<dyn ErasedResource>, serde_json::Error> {
    let resource: T = serde_json::from_value(value)?;
    Ok(Box::new(resource))
}

/// Type-level registration options.
#[derive(Clone, Debug, Default)]
pub struct ModelConfig {
    /// Wire type name; inherited from `parent` when omitted.
    pub type_name: Option<String>,
    /// Collection path; defaults to the type name.
    pub path: Option<String>,
    /// Registered type whose metadata this type extends.
    pub parent: Option<ResourceType>,
}

impl ModelConfig {
    pub fn typed(type_name: impl Into<String>) -> Self {
        Self {
            type_name: Some(type_name.into()),
            ..Self::default()
        }
    }
}

/// A finalized registry entry, cloned out to readers.
#[derive(Clone)]
pub(crate) struct ModelEntry {
    pub resource_type: ResourceType,
    pub metadata: Arc<ModelMetadata>,
    pub materialize: Materializer,
}

struct Slot {
    resource_type: ResourceType,
    metadata: Arc<ModelMetadata>,
    materialize: Option<Materializer>,
}

impl Slot {
    fn entry(&self) -> Option<ModelEntry> {
        let materialize = self.materialize?;
        Some(ModelEntry {
            resource_type: self.resource_type,
            metadata: self.metadata.clone(),
            materialize,
        })
    }
}

#[derive(Default)]
struct Registry {
    models: HashMap<ResourceType, Slot>,
    by_wire_type: HashMap<String, ResourceType>,
}

impl Registry {
    fn slot(&mut self, resource_type: ResourceType) -> &mut Slot {
        self.models.entry(resource_type).or_insert_with(|| Slot {
            resource_type,
            metadata: Arc::new(ModelMetadata::default()),
            materialize: None,
        })
    }
}

fn registry() -> &'static RwLock<Registry> {
    static REGISTRY: OnceLock<RwLock<Registry>> = OnceLock::new();
    REGISTRY.get_or_init(|| RwLock::new(Registry::default()))
}

fn with_read<R>(f: impl FnOnce(&Registry) -> R) -> R {
    let guard = registry().read().unwrap_or_else(PoisonError::into_inner);
    f(&guard)
}

fn with_write<R>(f: impl FnOnce(&mut Registry) -> R) -> R {
    let mut guard = registry().write().unwrap_or_else(PoisonError::into_inner);
    f(&mut guard)
}

/// Registers (or overwrites) one attribute of `T`, keyed by property name.
pub fn define_attribute<T: 'static>(attribute: AttributeMetadata) {
    with_write(|registry| {
        let slot = registry.slot(ResourceType::of::<T>());
        Arc::make_mut(&mut slot.metadata).add_attribute(attribute);
    });
}

/// Registers (or overwrites) one relationship of `T`, keyed by property name.
pub fn define_relationship<T: 'static>(relationship: RelationshipMetadata) {
    with_write(|registry| {
        let slot = registry.slot(ResourceType::of::<T>());
        Arc::make_mut(&mut slot.metadata).add_relationship(relationship);
    });
}

/// Finalizes the model of `T`.
///
/// Fails with [`RegistrationError::TypeNotSpecified`] when neither `config`
/// nor a registered parent supplies a type name. On failure the type stays
/// unregistered.
pub fn register_model<T: Resource>(config: ModelConfig) -> Result<Arc<ModelMetadata>, RegistrationError> {
    let resource_type = ResourceType::of::<T>();
    with_write(|registry| {
        let parent = config
            .parent
            .and_then(|parent| registry.models.get(&parent))
            .filter(|slot| slot.materialize.is_some())
            .map(|slot| slot.metadata.clone());

        let mut metadata = (*registry.slot(resource_type).metadata).clone();
        if let Some(parent) = parent {
            metadata.inherit(&parent);
        }
        if let Some(type_name) = config.type_name {
            metadata.set_type_name(type_name);
        }
        metadata.set_path(config.path);

        if metadata.type_name().is_empty() {
            return Err(RegistrationError::TypeNotSpecified(resource_type.name()));
        }

        let metadata = Arc::new(metadata);
        registry
            .by_wire_type
            .entry(metadata.type_name().to_string())
            .or_insert(resource_type);

        let slot = registry.slot(resource_type);
        slot.metadata = metadata.clone();
        slot.materialize = Some(materialize::<T>);

        debug!(
            resource = %resource_type,
            type_name = metadata.type_name(),
            path = metadata.path(),
            "Registered model"
        );
        Ok(metadata)
    })
}

/// Finalized metadata of `T`, if registered.
pub fn metadata<T: 'static>() -> Option<Arc<ModelMetadata>> {
    metadata_for(ResourceType::of::<T>())
}

/// Finalized metadata of `resource_type`, if registered.
pub fn metadata_for(resource_type: ResourceType) -> Option<Arc<ModelMetadata>> {
    lookup(resource_type).map(|entry| entry.metadata)
}

pub(crate) fn lookup(resource_type: ResourceType) -> Option<ModelEntry> {
    with_read(|registry| registry.models.get(&resource_type).and_then(Slot::entry))
}

/// The type registered first under `type_name`.
pub(crate) fn lookup_wire_type(type_name: &str) -> Option<ModelEntry> {
    with_read(|registry| {
        registry
            .by_wire_type
            .get(type_name)
            .and_then(|resource_type| registry.models.get(resource_type))
            .and_then(Slot::entry)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    macro_rules! resource {
        ($name:ident) => {
            #[derive(Debug, Clone, Serialize, Deserialize)]
            struct $name {
                id: Option<String>,
            }

            impl Resource for $name {
                fn id(&self) -> Option<&str> {
                    self.id.as_deref()
                }
            }
        };
    }

    resource!(Untyped);
    resource!(Base);
    resource!(Derived);
    resource!(Renamed);
    resource!(Orphan);
    resource!(Late);

    #[test]
    fn missing_type_name_is_rejected() {
        let err = register_model::<Untyped>(ModelConfig::default()).unwrap_err();
        assert!(matches!(err, RegistrationError::TypeNotSpecified(_)));
        assert!(metadata::<Untyped>().is_none());
    }

    #[test]
    fn derived_type_inherits_and_overrides() {
        define_attribute::<Base>(AttributeMetadata::new("name"));
        register_model::<Base>(ModelConfig::typed("registry-base")).unwrap();

        define_attribute::<Derived>(AttributeMetadata::new("title"));
        let derived = register_model::<Derived>(ModelConfig {
            parent: Some(ResourceType::of::<Base>()),
            ..ModelConfig::default()
        })
        .unwrap();
        assert_eq!(derived.type_name(), "registry-base");
        assert!(derived.attribute("name").is_some());
        assert!(derived.attribute("title").is_some());

        let renamed = register_model::<Renamed>(ModelConfig {
            type_name: Some("registry-renamed".into()),
            path: Some("renamed".into()),
            parent: Some(ResourceType::of::<Base>()),
        })
        .unwrap();
        assert_eq!(renamed.type_name(), "registry-renamed");
        assert_eq!(renamed.path(), "renamed");
        assert!(renamed.attribute("name").is_some());

        // the parent is unaffected by its children
        let base = metadata::<Base>().unwrap();
        assert!(base.attribute("title").is_none());

        // the wire type keeps pointing at its first claimant
        let entry = lookup_wire_type("registry-base").unwrap();
        assert_eq!(entry.resource_type, ResourceType::of::<Base>());
    }

    #[test]
    fn unregistered_parent_is_ignored() {
        let err = register_model::<Orphan>(ModelConfig {
            parent: Some(ResourceType::of::<Untyped>()),
            ..ModelConfig::default()
        })
        .unwrap_err();
        assert!(matches!(err, RegistrationError::TypeNotSpecified(_)));
    }

    #[test]
    fn attributes_defined_after_registration_are_visible() {
        register_model::<Late>(ModelConfig::typed("registry-late")).unwrap();
        define_attribute::<Late>(AttributeMetadata::new("added"));
        assert!(metadata::<Late>().unwrap().attribute("added").is_some());
    }
}
