//! Property metadata
//!
//! A `PropertyDescriptor` describes one stored column of an entity.
//! Descriptors are immutable once built; ordinal uniqueness within an
//! entity is the schema owner's concern.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Logical value type of a property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    Bool,
    Byte,
    Short,
    Char,
    Int,
    Long,
    Float,
    Double,
    String,
    /// Milliseconds since the Unix epoch
    Date,
    ByteArray,
}

impl PropertyType {
    /// Returns the type name for display and error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            PropertyType::Bool => "bool",
            PropertyType::Byte => "byte",
            PropertyType::Short => "short",
            PropertyType::Char => "char",
            PropertyType::Int => "int",
            PropertyType::Long => "long",
            PropertyType::Float => "float",
            PropertyType::Double => "double",
            PropertyType::String => "string",
            PropertyType::Date => "date",
            PropertyType::ByteArray => "byte_array",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Meta data describing a property
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PropertyDescriptor {
    ordinal: u32,
    #[serde(rename = "type")]
    property_type: PropertyType,
    name: String,
    primary_key: bool,
    storage_name: String,
}

impl PropertyDescriptor {
    pub fn new(
        ordinal: u32,
        property_type: PropertyType,
        name: impl Into<String>,
        primary_key: bool,
        storage_name: impl Into<String>,
    ) -> Self {
        Self {
            ordinal,
            property_type,
            name: name.into(),
            primary_key,
            storage_name: storage_name.into(),
        }
    }

    /// Position of the property within its entity
    pub fn ordinal(&self) -> u32 {
        self.ordinal
    }

    pub fn property_type(&self) -> PropertyType {
        self.property_type
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_primary_key(&self) -> bool {
        self.primary_key
    }

    /// Column name used by the storage engine
    pub fn storage_name(&self) -> &str {
        &self.storage_name
    }
}

impl fmt::Display for PropertyDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}: {}", self.ordinal, self.name, self.property_type)?;
        if self.primary_key {
            write!(f, " (primary key)")?;
        }
        if self.storage_name != self.name {
            write!(f, " as '{}'", self.storage_name)?;
        }
        Ok(())
    }
}
