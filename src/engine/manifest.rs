//! Store manifest
//!
//! `store.json` identifies a store directory:
//!
//! ```json
//! {
//!   "store_id": "0b8e6a2e-5a43-4f3c-9a55-7a2f5f1c1e0d",
//!   "format_version": 1,
//!   "max_size_kbytes": 102400,
//!   "model_checksum": "crc32:deadbeef",
//!   "created_at": "2026-10-18T09:30:00Z",
//!   "last_opened_at": "2026-10-18T09:30:00Z"
//! }
//! ```

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use chrono::{SecondsFormat, Utc};
use crc32fast::Hasher;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::{EngineOpenError, EngineResult};

/// Manifest file name inside a store directory
pub const MANIFEST_FILE: &str = "store.json";

/// Current manifest format version
pub const FORMAT_VERSION: u8 = 1;

/// CRC32 of the model bytes, formatted as `crc32:xxxxxxxx`
pub fn model_checksum(model: &[u8]) -> String {
    let mut hasher = Hasher::new();
    hasher.update(model);
    format!("crc32:{:08x}", hasher.finalize())
}

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreManifest {
    /// Stable identity, assigned when the store is first created
    pub store_id: Uuid,
    pub format_version: u8,
    pub max_size_kbytes: i64,
    pub model_checksum: String,
    pub created_at: String,
    pub last_opened_at: String,
}

impl StoreManifest {
    /// Creates a manifest for a new store.
    pub fn create(max_size_kbytes: i64, model: &[u8]) -> Self {
        let now = now_rfc3339();
        Self {
            store_id: Uuid::new_v4(),
            format_version: FORMAT_VERSION,
            max_size_kbytes,
            model_checksum: model_checksum(model),
            created_at: now.clone(),
            last_opened_at: now,
        }
    }

    /// Records a reopen with the given settings. Identity is kept.
    pub fn reopen(&mut self, max_size_kbytes: i64, model: &[u8]) {
        self.max_size_kbytes = max_size_kbytes;
        self.model_checksum = model_checksum(model);
        self.last_opened_at = now_rfc3339();
    }

    pub fn read_from_file(path: &Path) -> EngineResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| EngineOpenError::io(path, e))?;
        let manifest: Self = serde_json::from_str(&content)
            .map_err(|e| EngineOpenError::manifest(path, e.to_string()))?;

        if manifest.format_version != FORMAT_VERSION {
            return Err(EngineOpenError::UnsupportedFormat {
                found: manifest.format_version,
                expected: FORMAT_VERSION,
            });
        }
        Ok(manifest)
    }

    /// Atomically replaces the manifest at `path`.
    ///
    /// Writes and fsyncs a sibling temp file, then renames it over `path`,
    /// so a crash leaves either the old or the new manifest, never a
    /// truncated one.
    pub fn write_to_file(&self, path: &Path) -> EngineResult<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| EngineOpenError::manifest(path, e.to_string()))?;

        let temp_path = path.with_extension("json.tmp");
        let mut file = File::create(&temp_path).map_err(|e| EngineOpenError::io(&temp_path, e))?;
        file.write_all(json.as_bytes()).map_err(|e| EngineOpenError::io(&temp_path, e))?;
        file.sync_all().map_err(|e| EngineOpenError::io(&temp_path, e))?;
        drop(file);

        fs::rename(&temp_path, path).map_err(|e| EngineOpenError::io(path, e))?;
        Ok(())
    }
}
