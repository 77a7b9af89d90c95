//! boxstore - configuration and lifecycle for embedded object stores
//!
//! Resolves where a store lives on disk, validates mutually exclusive
//! options as they are set, and manages an optional process-wide
//! default store. Opening the store itself is delegated to a
//! [`StoreEngine`](store::StoreEngine).

pub mod engine;
pub mod observability;
pub mod platform;
pub mod schema;
pub mod store;

pub use store::{
    clear_default_store, default_store, BoxStore, StoreBuilder, StoreError, StoreOptions,
    StoreResult,
};
