use jsonapi_store::{Resource, ResourceIdentifier};
use serde::{Deserialize, Serialize};

/// A person who writes articles and comments.
///
/// Registered as `people`; `name` travels as `full-name` on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub articles: Vec<ResourceIdentifier>,
}

impl Author {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

impl Resource for Author {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}
