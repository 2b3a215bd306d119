//! # Library Lifecycle
//!
//! [`Library`] wires the sample together: it registers the models, starts the
//! backend actor and hands out a [`Store`] bound to it.
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop the store** - its [`BackendClient`] holds the last sender, so the
//!    backend channel closes.
//! 2. **Backend drains** - `receiver.recv()` returns `None` after the queued
//!    requests are answered.
//! 3. **Await completion** - the backend task is joined.
//!
//! Clones of the store keep the channel open; drop them before calling
//! [`Library::shutdown`].

use crate::backend::{BackendActor, BackendClient, BackendConfig};
use crate::model::register_models;
use jsonapi_store::{RegistrationError, Store};
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Runtime orchestrator of the sample: models, backend and store.
///
/// # Example
///
/// ```ignore
/// let library = Library::new()?;
/// let saved = library.store.save(&Entity::new(Author::new("Ada")), None, None).await?;
/// library.shutdown().await?;
/// ```
pub struct Library {
    /// Store bound to the in-memory backend.
    pub store: Store<BackendClient>,

    handle: JoinHandle<()>,
}

impl Library {
    /// Starts a library with the default [`BackendConfig`].
    pub fn new() -> Result<Self, RegistrationError> {
        Self::with_config(BackendConfig::default())
    }

    /// Registers the models and spawns the backend task.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn with_config(config: BackendConfig) -> Result<Self, RegistrationError> {
        register_models()?;
        let (backend, client) = BackendActor::new(&config);
        let handle = tokio::spawn(backend.run());
        info!(buffer_size = config.buffer_size, "Library started");

        Ok(Self {
            store: Store::new(client),
            handle,
        })
    }

    /// Closes the backend channel and waits for the backend task.
    ///
    /// Returns `Err` if the backend task panicked.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down library...");
        drop(self.store);

        if let Err(e) = self.handle.await {
            error!("Backend task failed: {:?}", e);
            return Err(format!("Backend task failed: {:?}", e));
        }

        info!("Library shutdown complete.");
        Ok(())
    }
}
