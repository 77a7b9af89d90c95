//! Store configuration and lifecycle
//!
//! - `StoreBuilder`: validated, chainable options for one store
//! - `resolve_directory`: where the store lands on disk
//! - `SingletonRegistry`: the process-wide default store slot
//! - `StoreEngine`: the external engine that actually opens stores
//!
//! # Usage
//!
//! ```ignore
//! use boxstore::engine::LocalEngine;
//! use boxstore::store::StoreBuilder;
//!
//! let mut builder = StoreBuilder::new(model_bytes)?;
//! builder.base_directory("/var/lib/app")?.name("inventory")?;
//! let store = builder.build(&LocalEngine::new())?;
//! ```

mod builder;
mod errors;
mod handle;
mod options;
mod registry;
mod resolver;

pub use builder::{StoreBuilder, DEFAULT_MAX_SIZE_KBYTES, PLATFORM_BASE_SUBDIR};
pub use errors::{BoxError, EngineError, StoreError, StoreResult};
pub use handle::{BoxStore, EngineStore, ResolvedConfig, StoreEngine};
pub use options::StoreOptions;
pub use registry::{clear_default_store, default_store, SingletonRegistry};
pub use resolver::{check_explicit_directory, resolve_directory, DEFAULT_NAME};
