//! # Resources
//!
//! The [`Resource`] trait is the contract a domain struct satisfies to be mapped
//! to and from wire documents, and [`Entity`] is the wrapper that tracks whether a
//! resource has been persisted yet.
//!
//! # Field mapping
//! Resources are read and written through their serde representation, so the
//! struct must serialize to a JSON object keyed by property name:
//!
//! - the `id` key holds the resource id;
//! - every registered attribute is read from / written to its property key;
//! - relationship properties hold [`ResourceIdentifier`]s
//!   (`Option<ResourceIdentifier>` for to-one, `Vec<ResourceIdentifier>` for to-many);
//! - fields that may be absent on the wire need `#[serde(default)]`.

use crate::wire::ResourceIdentifier;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::any::Any;
use std::fmt::Debug;
use std::ops::{Deref, DerefMut};

/// Trait that any domain struct must implement to be handled by the store.
pub trait Resource: Serialize + DeserializeOwned + Clone + Debug + Send + Sync + 'static {
    /// The server-assigned id, `None` until the resource is persisted.
    fn id(&self) -> Option<&str>;
}

/// A resource plus its out-of-band persistence state.
///
/// Constructing an entity with [`Entity::new`] marks it as new. Only the
/// deserializer produces persisted entities, so an entity built by hand is
/// always created, never updated, even if it carries an id.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity<T> {
    resource: T,
    persisted: bool,
}

impl<T: Resource> Entity<T> {
    pub fn new(resource: T) -> Self {
        Self {
            resource,
            persisted: false,
        }
    }

    pub(crate) fn persisted(resource: T) -> Self {
        Self {
            resource,
            persisted: true,
        }
    }

    pub fn is_new(&self) -> bool {
        !self.persisted
    }

    pub fn resource(&self) -> &T {
        &self.resource
    }

    pub fn into_inner(self) -> T {
        self.resource
    }
}

impl<T: Resource> From<T> for Entity<T> {
    fn from(resource: T) -> Self {
        Entity::new(resource)
    }
}

impl<T> Deref for Entity<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.resource
    }
}

impl<T> DerefMut for Entity<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.resource
    }
}

/// Builds a to-one relationship value pointing at `target`.
pub fn link<T: Resource>(type_name: &str, target: &T) -> Option<ResourceIdentifier> {
    target
        .id()
        .map(|id| ResourceIdentifier::new(type_name, id))
}

/// Type-erased resource stored in a [`ResourceGraph`](crate::document::ResourceGraph).
pub(crate) trait ErasedResource: Any + Debug + Send + Sync {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Resource> ErasedResource for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}
