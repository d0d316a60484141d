//! The artifact model accumulated over one compilation.
//!
//! [`ArtifactModel`] is shared by every declaration visit. Each visit only
//! adds to it: ports are unioned, copy-file directives are appended, and the
//! image config is replaced as a whole. The generator reads it once through
//! [`ArtifactModel::take`].

use std::collections::BTreeSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use secrecy::SecretString;

use crate::config::ImageDefaults;
use crate::processor::Fragment;

/// Image settings taken from `Config` metadata.
#[derive(Debug, Clone)]
pub struct DockerModel {
    /// Image name; the compiled artifact's file stem is used when unset
    pub name: Option<String>,
    pub registry: Option<String>,
    pub tag: String,
    pub base_image: String,
    pub push: bool,
    pub build_image: bool,
    pub username: Option<String>,
    pub password: Option<SecretString>,
    pub enable_debug: bool,
    pub debug_port: u16,
    pub docker_host: Option<String>,
    pub docker_cert_path: Option<String>,
}

impl DockerModel {
    pub fn with_defaults(defaults: &ImageDefaults) -> Self {
        Self {
            name: None,
            registry: None,
            tag: defaults.tag.clone(),
            base_image: defaults.base_image.clone(),
            push: false,
            build_image: true,
            username: None,
            password: None,
            enable_debug: false,
            debug_port: defaults.debug_port,
            docker_host: None,
            docker_cert_path: None,
        }
    }

    /// Full image reference, `[registry/]name:tag`.
    pub fn image_reference(&self, fallback_name: &str) -> String {
        let name = self.name.as_deref().unwrap_or(fallback_name);
        match self.registry.as_deref() {
            Some(registry) => format!("{}/{name}:{}", registry.trim_end_matches('/'), self.tag),
            None => format!("{name}:{}", self.tag),
        }
    }
}

impl Default for DockerModel {
    fn default() -> Self {
        Self::with_defaults(&ImageDefaults::default())
    }
}

/// A `CopyFiles` directive: stage `source` and copy it to `target` in the image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyFileModel {
    pub source: String,
    pub target: String,
}

impl CopyFileModel {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// Point-in-time contents of an [`ArtifactModel`].
#[derive(Debug, Clone, Default)]
pub struct ArtifactSnapshot {
    pub docker: Option<DockerModel>,
    pub ports: BTreeSet<u16>,
    pub external_files: Vec<CopyFileModel>,
}

impl ArtifactSnapshot {
    pub fn is_empty(&self) -> bool {
        self.docker.is_none() && self.ports.is_empty() && self.external_files.is_empty()
    }
}

/// Thread-safe accumulator for everything discovered during a compilation.
#[derive(Debug, Default)]
pub struct ArtifactModel {
    state: Mutex<ArtifactSnapshot>,
}

impl ArtifactModel {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, ArtifactSnapshot> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replaces the image config, returning the one it overwrote.
    pub fn set_docker_model(&self, model: DockerModel) -> Option<DockerModel> {
        self.lock().docker.replace(model)
    }

    /// Adds a port; returns `false` if it was already present.
    pub fn add_port(&self, port: u16) -> bool {
        self.lock().ports.insert(port)
    }

    pub fn add_external_file(&self, file: CopyFileModel) {
        self.lock().external_files.push(file);
    }

    /// Merges the fragments of one declaration under a single lock.
    ///
    /// Returns `true` if a previously set image config was overwritten.
    pub fn merge(&self, fragments: Vec<Fragment>) -> bool {
        let mut state = self.lock();
        let mut overwritten = false;
        for fragment in fragments {
            match fragment {
                Fragment::Config(model) => {
                    overwritten |= state.docker.replace(model).is_some();
                }
                Fragment::CopyFiles(files) => state.external_files.extend(files),
            }
        }
        overwritten
    }

    pub fn ports(&self) -> BTreeSet<u16> {
        self.lock().ports.clone()
    }

    pub fn snapshot(&self) -> ArtifactSnapshot {
        self.lock().clone()
    }

    /// Removes and returns the accumulated contents, leaving the model empty.
    pub fn take(&self) -> ArtifactSnapshot {
        std::mem::take(&mut *self.lock())
    }

    pub fn reset(&self) {
        *self.lock() = ArtifactSnapshot::default();
    }
}
