//! Reference storage engine
//!
//! `LocalEngine` implements the engine boundary against the local
//! filesystem: it validates the size limit, prepares the store
//! directory and maintains its manifest. Record storage, transactions
//! and queries belong to a real engine plugged in through
//! [`StoreEngine`](crate::store::StoreEngine).

mod errors;
mod local;
mod manifest;

pub use errors::{EngineOpenError, EngineResult};
pub use local::{LocalEngine, LocalStore};
pub use manifest::{model_checksum, StoreManifest, FORMAT_VERSION, MANIFEST_FILE};
