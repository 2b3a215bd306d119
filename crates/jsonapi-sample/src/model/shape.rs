//! Model inheritance: a [`Circle`] is a [`Shape`] with a radius.
//!
//! Both share the `shapes` wire type. `Circle` inherits the `name` attribute
//! and adds `radius`; it keeps its own collection path.
use jsonapi_store::Resource;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
}

impl Resource for Shape {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    #[serde(flatten)]
    pub shape: Shape,
    #[serde(default)]
    pub radius: f64,
}

impl Circle {
    pub fn new(name: impl Into<String>, radius: f64) -> Self {
        Self {
            shape: Shape {
                id: None,
                name: name.into(),
            },
            radius,
        }
    }

    /// Area of the circle.
    pub fn area(&self) -> f64 {
        std::f64::consts::PI * self.radius * self.radius
    }
}

impl Resource for Circle {
    fn id(&self) -> Option<&str> {
        self.shape.id.as_deref()
    }
}
