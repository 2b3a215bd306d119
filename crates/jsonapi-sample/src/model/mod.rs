//! # Domain Models
//!
//! Plain serde structs. Their JSON:API shape lives in the registry, declared
//! once by [`register_models`].

pub mod article;
pub mod author;
pub mod comment;
pub mod shape;

pub use article::*;
pub use author::*;
pub use comment::*;
pub use shape::*;

use jsonapi_store::metadata::AttributeMetadata;
use jsonapi_store::{ModelBuilder, RegistrationError};
use std::sync::OnceLock;

/// Registers every sample model. Safe to call more than once.
pub fn register_models() -> Result<(), RegistrationError> {
    static REGISTERED: OnceLock<Result<(), RegistrationError>> = OnceLock::new();
    REGISTERED.get_or_init(register_all).clone()
}

fn register_all() -> Result<(), RegistrationError> {
    ModelBuilder::<Author>::new()
        .type_name("people")
        .attribute(AttributeMetadata::new("name").wire_name("full-name"))
        .to_many::<Article>("articles")
        .register()?;

    ModelBuilder::<Comment>::new()
        .type_name("comments")
        .attribute("body")
        .to_one::<Author>("author")
        .register()?;

    ModelBuilder::<Article>::new()
        .type_name("articles")
        .attribute("title")
        .attribute("body")
        .to_one::<Author>("author")
        .to_many::<Comment>("comments")
        .register()?;

    ModelBuilder::<Shape>::new()
        .type_name("shapes")
        .attribute("name")
        .register()?;

    ModelBuilder::<Circle>::new()
        .extends::<Shape>()
        .path("circles")
        .attribute("radius")
        .register()?;

    Ok(())
}
