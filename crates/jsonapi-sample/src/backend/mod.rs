//! # Sample Backend
//!
//! An in-memory JSON:API service built as an actor: [`BackendActor`] owns the
//! data and runs in its own task, [`BackendClient`] is the cloneable handle
//! the [`Store`](jsonapi_store::Store) uses as its adapter.

pub mod actor;
pub mod client;
pub mod error;
pub mod message;

pub use actor::BackendActor;
pub use client::BackendClient;
pub use error::BackendError;

/// Backend tuning knobs.
#[derive(Clone, Debug)]
pub struct BackendConfig {
    /// Capacity of the request channel.
    pub buffer_size: usize,
    /// Prefix of generated resource ids.
    pub id_prefix: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            buffer_size: 32,
            id_prefix: String::new(),
        }
    }
}
