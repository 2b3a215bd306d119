//! # Observability & Tracing
//!
//! Every [`Store`](crate::store::Store) operation runs inside a span carrying the
//! resource type, so adapter and serializer logs nest under the call that caused
//! them.
//!
//! ## What Gets Traced
//!
//! - **Registration**: every finalized model (`debug`)
//! - **Store Operations**: dispatch (`debug`), success (`info`), failure (`warn`)
//! - **Serializer**: graph sizes (`debug`), duplicate resources (`trace`)
//!
//! ## Usage Examples
//!
//! ```bash
//! # Outcomes only
//! RUST_LOG=info cargo run
//!
//! # Dispatch details and registered models
//! RUST_LOG=debug cargo run
//!
//! # Filter to the serializer
//! RUST_LOG=jsonapi_store::serializer=trace cargo run
//! ```
//!
//! With `RUST_LOG=info` a fetch looks like:
//!
//! ```text
//! INFO get{id="42" resource=Article}: Request ok count=1
//! ```

/// Initializes a compact `tracing-subscriber` filtered by `RUST_LOG`.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
