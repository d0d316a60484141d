//! Dockerfile rendering and artifact staging for dockgen.
//!
//! # Generation
//!
//! ```text
//! code generated (artifact at out/app)
//!   1. Reset      ── remove out/docker/ if present
//!   2. Validate   ── Config present, artifact exists, staged names unique
//!   3. Stage      ── copy artifact + CopyFiles sources → out/docker/
//!   4. Dockerfile ── DockerfileGenerator::render() → out/docker/Dockerfile
//! ```
//!
//! Failure handling (removing a partially written directory) is the
//! caller's job; see [`artifacts::reset_target_dir`].

pub mod artifacts;
pub mod dockerfile;
pub mod staging;

pub use artifacts::{
    ArtifactError, GenerationRequest, GenerationSummary, reset_target_dir, target_dir,
    write_artifacts,
};
pub use dockerfile::DockerfileGenerator;
pub use staging::{StagedFile, plan_staging};
