//! Store builder
//!
//! Options are validated on every mutation, not at build time:
//! - explicit directory excludes name
//! - explicit directory excludes base directory, unless a platform
//!   context supplied the base directory
//! - name must not contain `/` or `\`
//!
//! A rejected call leaves the builder exactly as it was.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::errors::{StoreError, StoreResult};
use super::handle::{BoxStore, ResolvedConfig, StoreEngine};
use super::registry::default_registry;
use super::resolver::{check_explicit_directory, resolve_directory};
use crate::observability::{log_event_with_fields, Event};
use crate::platform::PlatformContext;

/// Default maximum store size: 100 MiB, in kilobytes
pub const DEFAULT_MAX_SIZE_KBYTES: i64 = 100 * 1024;

/// Subdirectory created beneath a platform files directory
pub const PLATFORM_BASE_SUBDIR: &str = "objectbox";

/// A requested change to the directory options
#[derive(Debug, Clone, Copy)]
enum Transition<'a> {
    SetName(&'a str),
    SetDirectory,
    SetBaseDirectory,
}

/// Builder for [`BoxStore`]s
#[derive(Debug, Clone)]
pub struct StoreBuilder {
    model: Vec<u8>,
    directory: Option<PathBuf>,
    base_directory: Option<PathBuf>,
    name: Option<String>,
    max_size_kbytes: i64,
    platform_context: bool,
}

impl StoreBuilder {
    /// Creates a builder for the given serialized model.
    ///
    /// Fails with `ModelRequired` if `model` is empty.
    pub fn new(model: impl Into<Vec<u8>>) -> StoreResult<Self> {
        let model = model.into();
        if model.is_empty() {
            return Err(StoreError::ModelRequired);
        }
        Ok(Self {
            model,
            directory: None,
            base_directory: None,
            name: None,
            max_size_kbytes: DEFAULT_MAX_SIZE_KBYTES,
            platform_context: false,
        })
    }

    /// Checks a transition against the current state.
    fn check(&self, transition: Transition<'_>) -> StoreResult<()> {
        match transition {
            Transition::SetName(name) => {
                if self.directory.is_some() {
                    return Err(StoreError::ConfigConflict(
                        "Already has directory, cannot assign name".into(),
                    ));
                }
                if name.contains(['/', '\\']) {
                    return Err(StoreError::InvalidName(name.to_string()));
                }
            }
            Transition::SetDirectory => {
                if self.name.is_some() {
                    return Err(StoreError::ConfigConflict(
                        "Already has name, cannot assign directory".into(),
                    ));
                }
                if !self.platform_context && self.base_directory.is_some() {
                    return Err(StoreError::ConfigConflict(
                        "Already has base directory, cannot assign directory".into(),
                    ));
                }
            }
            Transition::SetBaseDirectory => {
                if self.directory.is_some() {
                    return Err(StoreError::ConfigConflict(
                        "Already has directory, cannot assign base directory".into(),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Sets the store name, a single path component below the base directory.
    pub fn name(&mut self, name: impl Into<String>) -> StoreResult<&mut Self> {
        let name = name.into();
        self.check(Transition::SetName(&name))?;
        self.name = Some(name);
        Ok(self)
    }

    /// Sets the exact store directory, bypassing name and base directory.
    pub fn directory(&mut self, directory: impl Into<PathBuf>) -> StoreResult<&mut Self> {
        self.check(Transition::SetDirectory)?;
        self.directory = Some(directory.into());
        Ok(self)
    }

    /// Sets the directory the named store is placed in.
    pub fn base_directory(&mut self, base_directory: impl Into<PathBuf>) -> StoreResult<&mut Self> {
        self.check(Transition::SetBaseDirectory)?;
        self.base_directory = Some(base_directory.into());
        Ok(self)
    }

    /// Places stores under the platform's private files directory.
    ///
    /// Creates `<files_dir>/objectbox` if needed. On any failure the
    /// builder is unchanged, even if directories were created on disk.
    pub fn platform_context<C>(&mut self, context: &C) -> StoreResult<&mut Self>
    where
        C: PlatformContext + ?Sized,
    {
        let files_dir = context
            .files_dir()
            .map_err(|e| StoreError::platform_with_source("files directory lookup failed", e))?
            .ok_or_else(|| StoreError::platform("platform files directory is not available"))?;

        let base_dir = files_dir.join(PLATFORM_BASE_SUBDIR);
        if !base_dir.exists() {
            if let Err(e) = fs::create_dir_all(&base_dir) {
                let path = base_dir.display().to_string();
                let reason = e.to_string();
                log_event_with_fields(
                    Event::PlatformBaseDirCreateFailed,
                    &[("directory", path.as_str()), ("reason", reason.as_str())],
                );
            }
        }
        if !base_dir.is_dir() {
            return Err(StoreError::platform(format!(
                "could not init base directory at {}",
                base_dir.display()
            )));
        }

        let path = base_dir.display().to_string();
        log_event_with_fields(Event::PlatformBaseDirReady, &[("directory", path.as_str())]);

        self.base_directory = Some(base_dir);
        self.platform_context = true;
        Ok(self)
    }

    /// Sets the maximum store size in kilobytes.
    ///
    /// Not validated here; the engine decides what it accepts.
    pub fn max_size_kbytes(&mut self, max_size_kbytes: i64) -> &mut Self {
        self.max_size_kbytes = max_size_kbytes;
        self
    }

    pub fn model(&self) -> &[u8] {
        &self.model
    }

    pub fn get_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn get_directory(&self) -> Option<&Path> {
        self.directory.as_deref()
    }

    pub fn get_base_directory(&self) -> Option<&Path> {
        self.base_directory.as_deref()
    }

    pub fn get_max_size_kbytes(&self) -> i64 {
        self.max_size_kbytes
    }

    pub fn is_platform_context(&self) -> bool {
        self.platform_context
    }

    /// Resolves the final configuration without opening anything.
    ///
    /// Fails with `InvalidDirectory` if an explicit directory exists
    /// but is not a directory.
    pub fn resolve(&self) -> StoreResult<ResolvedConfig> {
        if let Some(ref directory) = self.directory {
            check_explicit_directory(directory)?;
        }
        let directory = resolve_directory(
            self.directory.as_deref(),
            self.base_directory.as_deref(),
            self.name.as_deref(),
        );
        Ok(ResolvedConfig::new(
            directory,
            self.max_size_kbytes,
            self.model.clone(),
        ))
    }

    /// Resolves the configuration and opens the store with `engine`.
    ///
    /// Engine failures are returned as `StoreError::Engine` unchanged.
    pub fn build(&self, engine: &dyn StoreEngine) -> StoreResult<BoxStore> {
        log_event_with_fields(Event::StoreBuildBegin, &[]);

        let config = self.resolve()?;
        let directory = config.directory().display().to_string();
        let max_size = config.max_size_kbytes().to_string();
        log_event_with_fields(
            Event::StoreDirectoryResolved,
            &[
                ("directory", directory.as_str()),
                ("max_size_kbytes", max_size.as_str()),
            ],
        );

        match engine.open(&config) {
            Ok(inner) => {
                log_event_with_fields(Event::StoreOpened, &[("directory", directory.as_str())]);
                Ok(BoxStore::new(config, inner))
            }
            Err(e) => {
                let reason = e.to_string();
                log_event_with_fields(
                    Event::StoreOpenFailed,
                    &[("directory", directory.as_str()), ("reason", reason.as_str())],
                );
                Err(StoreError::Engine(e))
            }
        }
    }

    /// Builds the store and installs it as the process-wide default.
    ///
    /// Fails with `AlreadyInitialized` if a default exists. Nothing is
    /// installed when the build fails.
    pub fn build_default(&self, engine: &dyn StoreEngine) -> StoreResult<Arc<BoxStore>> {
        default_registry().build_and_register(|| self.build(engine))
    }
}
