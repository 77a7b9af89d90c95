//! Schema metadata
//!
//! Immutable descriptors consumed by the storage engine's schema and
//! query layers. Nothing here encodes or decodes records.

mod property;

pub use property::{PropertyDescriptor, PropertyType};
