use jsonapi_store::{Resource, ResourceIdentifier};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: Option<String>,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub author: Option<ResourceIdentifier>,
}

impl Comment {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            ..Self::default()
        }
    }
}

impl Resource for Comment {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}
