//! Generate Docker artifacts from declaration metadata.
//!
//! This is the facade crate that re-exports the dockgen sub-crates.
//! Use feature flags to control which components are included.
//!
//! # Feature flags
//!
//! | Feature | Default | Crate | Description |
//! |---------|---------|-------|-------------|
//! | `core` | yes | [`dockgen-core`](https://crates.io/crates/dockgen-core) | Metadata, artifact model, configuration |
//! | `build` | yes | [`dockgen-build`](https://crates.io/crates/dockgen-build) | Dockerfile rendering and staging |
//! | `plugin` | yes | [`dockgen-plugin`](https://crates.io/crates/dockgen-plugin) | Compiler plugin callbacks and generation |
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use dockgen::{Attachment, DockgenConfig, KeyValue};
//! use dockgen::plugin::{
//!     CollectingLog, CompilerPlugin, DockerPlugin, ServiceNode, SourcePosition,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = DockgenConfig::load(Path::new("."))?;
//! let plugin = DockerPlugin::new(&config, CollectingLog::new());
//!
//! plugin.process_service(&ServiceNode {
//!     name: "hello".to_owned(),
//!     position: SourcePosition::new("main.src", 1, 1),
//!     annotations: vec![Attachment::new("Config", vec![KeyValue::new("name", "hello")])],
//!     anonymous_endpoint: Some(vec![KeyValue::new("port", 8080_i64)]),
//! });
//! let outcome = plugin.code_generated(Path::new("target/release/hello"));
//! # Ok(())
//! # }
//! ```

// Core types flattened into root namespace for convenience.
#[cfg(feature = "core")]
pub use dockgen_core::*;

/// Dockerfile rendering, file staging, and target directory handling.
///
/// See [`dockgen-build`](https://crates.io/crates/dockgen-build) for details.
#[cfg(feature = "build")]
pub mod build {
    pub use dockgen_build::*;
}

/// Host interfaces and the Docker compiler plugin.
///
/// See [`dockgen-plugin`](https://crates.io/crates/dockgen-plugin) for details.
#[cfg(feature = "plugin")]
pub mod plugin {
    pub use dockgen_plugin::*;
}
