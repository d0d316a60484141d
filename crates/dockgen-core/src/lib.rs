//! Core types and metadata processing for dockgen.
//!
//! This crate defines the metadata literals attached to declarations
//! ([`Attachment`], [`KeyValue`]), the process-wide [`ArtifactModel`]
//! accumulated while a program is compiled, the [`MetadataProcessor`] and
//! [`extract_port`] that turn declarations into model fragments, and the
//! `dockgen.toml` schema ([`DockgenConfig`]).

pub mod config;
pub mod error;
pub mod metadata;
pub mod model;
pub mod port;
pub mod processor;

pub use config::{DockgenConfig, ImageDefaults, OutputConfig};
pub use error::{Error, PortError, ProcessError, Result};
pub use metadata::{Attachment, KeyValue, Literal};
pub use model::{ArtifactModel, ArtifactSnapshot, CopyFileModel, DockerModel};
pub use port::{PORT_KEY, extract_port};
pub use processor::{COPY_FILES_ATTACHMENT, CONFIG_ATTACHMENT, Fragment, MetadataProcessor};
