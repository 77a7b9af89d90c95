//! File-based store options
//!
//! ```json
//! {
//!   "base_directory": "/var/lib/app",
//!   "name": "inventory",
//!   "max_size_kbytes": 204800
//! }
//! ```
//!
//! All fields are optional. Options are applied through the builder's
//! validating setters, so a file cannot express a configuration the
//! builder would reject.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::builder::StoreBuilder;
use super::errors::{StoreError, StoreResult};
use crate::observability::{log_event_with_fields, Event};

/// Store options as read from a JSON file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreOptions {
    /// Exact store directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,

    /// Directory the named store is placed in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_directory: Option<PathBuf>,

    /// Store name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Maximum store size in kilobytes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_size_kbytes: Option<i64>,
}

impl StoreOptions {
    /// Load options from a JSON file
    pub fn load(path: &Path) -> StoreResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            StoreError::Options(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let options = Self::from_json(&content)?;

        let display = path.display().to_string();
        log_event_with_fields(Event::OptionsLoaded, &[("path", display.as_str())]);
        Ok(options)
    }

    pub fn from_json(json: &str) -> StoreResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| StoreError::Options(format!("Invalid options JSON: {}", e)))
    }

    pub fn to_json(&self) -> StoreResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| StoreError::Options(format!("Failed to serialize options: {}", e)))
    }

    /// Applies every set option to `builder`.
    ///
    /// All or nothing: on error the builder is left untouched.
    pub fn apply_to(&self, builder: &mut StoreBuilder) -> StoreResult<()> {
        let mut staged = builder.clone();

        if let Some(ref base_directory) = self.base_directory {
            staged.base_directory(base_directory.clone())?;
        }
        if let Some(ref directory) = self.directory {
            staged.directory(directory.clone())?;
        }
        if let Some(ref name) = self.name {
            staged.name(name.clone())?;
        }
        if let Some(max_size_kbytes) = self.max_size_kbytes {
            staged.max_size_kbytes(max_size_kbytes);
        }

        *builder = staged;
        Ok(())
    }
}

impl StoreBuilder {
    /// Creates a builder for `model` configured from `options`.
    pub fn from_options(model: impl Into<Vec<u8>>, options: &StoreOptions) -> StoreResult<Self> {
        let mut builder = StoreBuilder::new(model)?;
        options.apply_to(&mut builder)?;
        Ok(builder)
    }
}
