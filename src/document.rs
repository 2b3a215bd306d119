//! # Typed Documents
//!
//! The result side of the serializer. A deserialized response is an arena
//! ([`ResourceGraph`]) holding exactly one node per distinct `(type, id)`, with
//! relationships stored as edges between node handles. Identity is handle
//! equality: following `article → author → articles[0]` lands on the very node
//! the walk started from, no matter how cyclic the graph is.

use crate::error::ErrorDocument;
use crate::metadata::ResourceType;
use crate::resource::{Entity, ErasedResource, Resource};
use crate::wire::{OneOrMany, ResourceIdentifier};
use serde_json::Value;
use std::collections::HashMap;
use std::marker::PhantomData;

/// Handle of one resource inside a [`ResourceGraph`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub(crate) fn from_index(index: usize) -> Self {
        NodeId(index)
    }

    /// Position of the node in its graph.
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug)]
struct Node {
    identifier: Option<ResourceIdentifier>,
    resource_type: ResourceType,
    value: Box<dyn ErasedResource>,
    links: HashMap<String, OneOrMany<NodeId>>,
}

/// Arena of resources materialized from one wire document.
#[derive(Debug, Default)]
pub struct ResourceGraph {
    nodes: Vec<Node>,
    index: HashMap<ResourceIdentifier, NodeId>,
}

impl ResourceGraph {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    pub(crate) fn push(
        &mut self,
        identifier: Option<ResourceIdentifier>,
        resource_type: ResourceType,
        value: Box<dyn ErasedResource>,
        links: HashMap<String, OneOrMany<NodeId>>,
    ) -> NodeId {
        let node = NodeId(self.nodes.len());
        if let Some(identifier) = &identifier {
            self.index.insert(identifier.clone(), node);
        }
        self.nodes.push(Node {
            identifier,
            resource_type,
            value,
            links,
        });
        node
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node holding the resource with the given wire identity.
    pub fn find(&self, type_name: &str, id: &str) -> Option<NodeId> {
        self.index
            .get(&ResourceIdentifier::new(type_name, id))
            .copied()
    }

    pub fn identifier(&self, node: NodeId) -> Option<&ResourceIdentifier> {
        self.nodes.get(node.0).and_then(|n| n.identifier.as_ref())
    }

    /// Rust type the node was materialized as.
    pub fn resource_type(&self, node: NodeId) -> Option<ResourceType> {
        self.nodes.get(node.0).map(|n| n.resource_type)
    }

    /// Borrows the resource at `node` if it is a `T`.
    pub fn get<T: Resource>(&self, node: NodeId) -> Option<&T> {
        self.nodes
            .get(node.0)
            .and_then(|n| n.value.as_any().downcast_ref::<T>())
    }

    /// Clones the resource at `node` into a persisted [`Entity`], ready for `save`.
    pub fn entity<T: Resource>(&self, node: NodeId) -> Option<Entity<T>> {
        self.get::<T>(node).cloned().map(Entity::persisted)
    }

    /// Relationship edge(s) of `node` for the given property.
    pub fn related(&self, node: NodeId, property: &str) -> Option<&OneOrMany<NodeId>> {
        self.nodes.get(node.0).and_then(|n| n.links.get(property))
    }

    /// Target of a to-one relationship.
    pub fn related_one(&self, node: NodeId, property: &str) -> Option<NodeId> {
        match self.related(node, property)? {
            OneOrMany::One(target) => Some(*target),
            OneOrMany::Many(targets) => targets.first().copied(),
        }
    }

    /// Targets of a to-many relationship; empty when the relationship is absent.
    pub fn related_many(&self, node: NodeId, property: &str) -> &[NodeId] {
        self.related(node, property)
            .map(OneOrMany::as_slice)
            .unwrap_or(&[])
    }
}

/// A successfully parsed document whose primary data are `T`s.
#[derive(Debug)]
pub struct Document<T> {
    data: Option<OneOrMany<NodeId>>,
    graph: ResourceGraph,
    meta: Option<Value>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Resource> Document<T> {
    pub(crate) fn new(data: Option<OneOrMany<NodeId>>, graph: ResourceGraph, meta: Option<Value>) -> Self {
        Self {
            data,
            graph,
            meta,
            _marker: PhantomData,
        }
    }

    /// Handles of the primary data, mirroring the wire `data` member.
    pub fn primary(&self) -> Option<&OneOrMany<NodeId>> {
        self.data.as_ref()
    }

    /// The first primary resource. For single-resource responses this is the resource.
    pub fn data(&self) -> Option<&T> {
        self.primary()
            .and_then(|data| data.as_slice().first())
            .and_then(|node| self.graph.get::<T>(*node))
    }

    /// All primary resources that are `T`s, in wire order.
    pub fn resources(&self) -> Vec<&T> {
        self.nodes()
            .iter()
            .filter_map(|node| self.graph.get::<T>(*node))
            .collect()
    }

    /// Primary resources as persisted entities.
    pub fn entities(&self) -> Vec<Entity<T>> {
        self.nodes()
            .iter()
            .filter_map(|node| self.graph.entity::<T>(*node))
            .collect()
    }

    pub fn nodes(&self) -> &[NodeId] {
        self.data.as_ref().map(OneOrMany::as_slice).unwrap_or(&[])
    }

    pub fn graph(&self) -> &ResourceGraph {
        &self.graph
    }

    pub fn meta(&self) -> Option<&Value> {
        self.meta.as_ref()
    }
}

/// Outcome of deserializing a wire document, decided once per response.
#[derive(Debug)]
pub enum Parsed<T> {
    Data(Document<T>),
    Errors(ErrorDocument),
}

impl<T> Parsed<T> {
    pub fn into_result(self) -> Result<Document<T>, ErrorDocument> {
        match self {
            Parsed::Data(document) => Ok(document),
            Parsed::Errors(errors) => Err(errors),
        }
    }
}
