//! # jsonapi-store
//!
//! > **Typed resources in, JSON:API documents out, and back again.**
//!
//! This crate maps between a JSON-API-flavored wire document and strongly typed
//! Rust structs. Declare the wire shape of each resource type once and get
//! bidirectional mapping, identity tracking across cyclic relationship graphs,
//! and create/update/remove orchestration on top of any transport.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Metadata ([`metadata`])
//! Which wire type, path, attributes and relationships belong to a Rust type.
//! - **Key items**: [`ModelBuilder`](metadata::ModelBuilder),
//!   [`register_model`](metadata::register_model), [`ModelMetadata`](metadata::ModelMetadata).
//!
//! ### 2. The Mapping ([`serializer`], [`document`], [`wire`])
//! Stateless conversion driven by the metadata. Responses become a
//! [`ResourceGraph`](document::ResourceGraph) arena with one node per
//! `(type, id)`, so cycles resolve to shared nodes instead of infinite recursion.
//!
//! ### 3. The Facade ([`store`])
//! [`Store`](store::Store) decides create-vs-update, fans single and batch calls
//! out to the right [`StoreAdapter`](adapter::StoreAdapter) method, and folds
//! every failure into one [`ErrorDocument`](error::ErrorDocument).
//!
//! ### 4. The Seam ([`adapter`], [`mock`])
//! The transport is yours: implement `StoreAdapter`, or use
//! [`MockAdapter`](mock::MockAdapter) in tests.
//!
//! ## 🚀 Quick Start
//!
//! ```ignore
//! #[derive(Debug, Clone, Default, Serialize, Deserialize)]
//! struct Article {
//!     id: Option<String>,
//!     #[serde(default)]
//!     title: String,
//! }
//!
//! impl Resource for Article {
//!     fn id(&self) -> Option<&str> { self.id.as_deref() }
//! }
//!
//! ModelBuilder::<Article>::new().type_name("articles").attribute("title").register()?;
//!
//! let store = Store::new(my_adapter);
//! let doc = store.get::<Article>("42", None, None).await?;
//! assert_eq!(doc.data().unwrap().title, "Hi");
//!
//! let mut article = doc.graph().entity::<Article>(doc.nodes()[0]).unwrap();
//! article.title = "Hello".into();
//! store.save(&article, None, None).await?; // persisted → update
//! ```

pub mod adapter;
pub mod document;
pub mod error;
pub mod metadata;
pub mod mock;
pub mod resource;
pub mod serializer;
pub mod store;
pub mod tracing;
pub mod wire;

// Re-export core types for convenience
pub use adapter::{Params, RequestOptions, StoreAdapter};
pub use document::{Document, NodeId, Parsed, ResourceGraph};
pub use error::{AdapterError, ErrorDocument, RegistrationError, SerializerError, ValidationError};
pub use metadata::{ModelBuilder, ModelConfig, ModelMetadata, ResourceType};
pub use resource::{Entity, Resource};
pub use serializer::DocumentSerializer;
pub use store::Store;
pub use wire::{OneOrMany, ResourceIdentifier, WireDocument, WireError, WireResource};
