use jsonapi_store::{Resource, ResourceIdentifier};
use serde::{Deserialize, Serialize};

/// A published article.
///
/// # Wire shape
/// Registered as `articles`. `title` and `body` travel as attributes,
/// `author` as a to-one and `comments` as a to-many relationship.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub author: Option<ResourceIdentifier>,
    #[serde(default)]
    pub comments: Vec<ResourceIdentifier>,
}

impl Article {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            ..Self::default()
        }
    }
}

impl Resource for Article {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}
