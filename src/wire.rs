//! # Wire Format
//!
//! Serde types for the JSON-API-flavored transport document. These types are the
//! contract with the [`StoreAdapter`](crate::adapter::StoreAdapter): adapters hand
//! raw `WireDocument`s in and take payload `WireDocument`s out.
//!
//! ```text
//! { data?: Resource|Resource[], included?: Resource[], errors?: [{id?,status?,title,detail?}], meta?: object }
//! Resource = { type, id?, attributes?, relationships?: { [name]: { data: {type,id}|{type,id}[] } } }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// A value that is either a single item or a list of items.
///
/// JSON:API uses this shape for primary `data` and for relationship linkage;
/// the store uses it for "resource or resource array" inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    pub fn is_many(&self) -> bool {
        matches!(self, OneOrMany::Many(_))
    }

    /// True for an empty list. A single item is never empty.
    pub fn is_empty(&self) -> bool {
        match self {
            OneOrMany::One(_) => false,
            OneOrMany::Many(items) => items.is_empty(),
        }
    }

    pub fn as_slice(&self) -> &[T] {
        match self {
            OneOrMany::One(item) => std::slice::from_ref(item),
            OneOrMany::Many(items) => items,
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Applies `f` to every item, keeping the one/many shape.
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> OneOrMany<U> {
        match self {
            OneOrMany::One(item) => OneOrMany::One(f(item)),
            OneOrMany::Many(items) => OneOrMany::Many(items.into_iter().map(f).collect()),
        }
    }

    /// Like [`OneOrMany::map`] but stops at the first error.
    pub fn try_map<U, E>(self, mut f: impl FnMut(T) -> Result<U, E>) -> Result<OneOrMany<U>, E> {
        Ok(match self {
            OneOrMany::One(item) => OneOrMany::One(f(item)?),
            OneOrMany::Many(items) => {
                OneOrMany::Many(items.into_iter().map(f).collect::<Result<_, _>>()?)
            }
        })
    }

    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(item) => vec![item],
            OneOrMany::Many(items) => items,
        }
    }
}

/// `{ type, id }` pair identifying one resource on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResourceIdentifier {
    #[serde(rename = "type")]
    pub type_name: String,
    pub id: String,
}

impl ResourceIdentifier {
    pub fn new(type_name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            id: id.into(),
        }
    }
}

/// Relationship object. `data: null` is an empty to-one relationship.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WireRelationship {
    #[serde(default)]
    pub data: Option<OneOrMany<ResourceIdentifier>>,
}

/// One resource object as it travels on the wire.
///
/// A missing `type` is accepted by serde as an empty string so that the
/// serializer can reject it with a proper deserialization error.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WireResource {
    #[serde(rename = "type", default)]
    pub type_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationships: Option<BTreeMap<String, WireRelationship>>,
}

impl WireResource {
    pub fn new(type_name: impl Into<String>, id: Option<String>) -> Self {
        Self {
            type_name: type_name.into(),
            id,
            ..Self::default()
        }
    }

    /// The `{type, id}` pair, if the resource carries an id.
    pub fn identifier(&self) -> Option<ResourceIdentifier> {
        self.id
            .as_ref()
            .map(|id| ResourceIdentifier::new(self.type_name.clone(), id.clone()))
    }
}

/// Error object of a wire error document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WireError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl WireError {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// The untyped transport document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WireDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<OneOrMany<WireResource>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub included: Option<Vec<WireResource>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<WireError>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

impl WireDocument {
    pub fn with_data(data: OneOrMany<WireResource>) -> Self {
        Self {
            data: Some(data),
            ..Self::default()
        }
    }

    pub fn with_errors(errors: Vec<WireError>) -> Self {
        Self {
            errors: Some(errors),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_single_and_array_data() {
        let single: WireDocument =
            serde_json::from_value(json!({"data": {"type": "articles", "id": "1"}})).unwrap();
        assert!(matches!(single.data, Some(OneOrMany::One(_))));

        let many: WireDocument =
            serde_json::from_value(json!({"data": [{"type": "articles", "id": "1"}]})).unwrap();
        assert!(matches!(many.data, Some(OneOrMany::Many(ref v)) if v.len() == 1));
    }

    #[test]
    fn missing_type_becomes_empty_string() {
        let doc: WireDocument = serde_json::from_value(json!({"data": {"id": "1"}})).unwrap();
        match doc.data {
            Some(OneOrMany::One(resource)) => assert!(resource.type_name.is_empty()),
            other => panic!("unexpected data: {other:?}"),
        }
    }

    #[test]
    fn null_relationship_data_is_none() {
        let rel: WireRelationship = serde_json::from_value(json!({"data": null})).unwrap();
        assert!(rel.data.is_none());
    }

    #[test]
    fn payload_omits_absent_members() {
        let doc = WireDocument::with_data(OneOrMany::One(WireResource::new("articles", None)));
        assert_eq!(
            serde_json::to_value(&doc).unwrap(),
            json!({"data": {"type": "articles"}})
        );
    }
}
