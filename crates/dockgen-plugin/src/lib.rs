//! Compiler plugin that turns declaration metadata into Docker artifacts.
//!
//! The host compiler drives a [`DockerPlugin`] through the [`CompilerPlugin`]
//! callbacks:
//!
//! ```text
//! init()                      reset model and "generation requested"
//! process_package(pkg)        collect `port` of every global endpoint
//! process_endpoint(ep)   ┐    Config / CopyFiles → artifact model
//! process_service(svc)   ┘    (+ anonymous endpoint port for services)
//! code_generated(artifact)    render <artifact dir>/docker/, or clean up on failure
//! ```
//!
//! Per-declaration failures are reported to the host's [`DiagnosticLog`]
//! against the declaration's position and never stop the compilation.

pub mod error;
pub mod host;
pub mod plugin;

pub use error::GenerationFailure;
pub use host::{
    CollectingLog, CompilerPlugin, Diagnostic, DiagnosticKind, DiagnosticLog, EndpointNode,
    PackageNode, ServiceNode, SourcePosition, StderrChannel, UserChannel,
};
pub use plugin::{DockerPlugin, GenerationOutcome, PluginContext};
