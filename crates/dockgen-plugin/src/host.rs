//! Interfaces between the host compiler and the plugin.

use std::fmt;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

use dockgen_core::{Attachment, KeyValue};

use crate::plugin::GenerationOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    Error,
    Warning,
    Note,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DiagnosticKind::Error => "error",
            DiagnosticKind::Warning => "warning",
            DiagnosticKind::Note => "note",
        })
    }
}

/// Location of a declaration in the compiled source.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourcePosition {
    pub file: String,
    pub line: u32,
    pub column: u32,
}

impl SourcePosition {
    pub fn new(file: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub position: Option<SourcePosition>,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.position {
            Some(position) => write!(f, "{}: {position}: {}", self.kind, self.message),
            None => write!(f, "{}: {}", self.kind, self.message),
        }
    }
}

/// The host compiler's diagnostic sink.
pub trait DiagnosticLog: Send + Sync {
    fn log(&self, kind: DiagnosticKind, position: Option<SourcePosition>, message: &str);
}

impl<T: DiagnosticLog + ?Sized> DiagnosticLog for Arc<T> {
    fn log(&self, kind: DiagnosticKind, position: Option<SourcePosition>, message: &str) {
        (**self).log(kind, position, message);
    }
}

impl<T: DiagnosticLog + ?Sized> DiagnosticLog for &T {
    fn log(&self, kind: DiagnosticKind, position: Option<SourcePosition>, message: &str) {
        (**self).log(kind, position, message);
    }
}

/// Diagnostic sink that keeps every report in memory.
#[derive(Debug, Default)]
pub struct CollectingLog {
    entries: Mutex<Vec<Diagnostic>>,
}

impl CollectingLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn errors(&self) -> Vec<Diagnostic> {
        self.diagnostics()
            .into_iter()
            .filter(|d| d.kind == DiagnosticKind::Error)
            .collect()
    }

    pub fn has_errors(&self) -> bool {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(|d| d.kind == DiagnosticKind::Error)
    }
}

impl DiagnosticLog for CollectingLog {
    fn log(&self, kind: DiagnosticKind, position: Option<SourcePosition>, message: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Diagnostic {
                kind,
                position,
                message: message.to_owned(),
            });
    }
}

/// User-visible error output, separate from compiler diagnostics.
pub trait UserChannel: Send + Sync {
    fn error(&self, message: &str);
}

impl<T: UserChannel + ?Sized> UserChannel for Arc<T> {
    fn error(&self, message: &str) {
        (**self).error(message);
    }
}

/// Writes user-visible errors to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrChannel;

impl UserChannel for StderrChannel {
    fn error(&self, message: &str) {
        eprintln!("error [docker plugin]: {message}");
    }
}

/// Global declarations of one package.
#[derive(Debug, Clone, Default)]
pub struct PackageNode {
    pub name: String,
    pub endpoints: Vec<EndpointNode>,
}

/// A named network endpoint declaration.
#[derive(Debug, Clone)]
pub struct EndpointNode {
    pub name: String,
    pub position: SourcePosition,
    /// Endpoint configuration record (`port`, `host`, ...)
    pub config: Vec<KeyValue>,
    pub annotations: Vec<Attachment>,
}

/// A service declaration.
#[derive(Debug, Clone)]
pub struct ServiceNode {
    pub name: String,
    pub position: SourcePosition,
    pub annotations: Vec<Attachment>,
    /// Inline endpoint configuration, when the service declares one
    pub anonymous_endpoint: Option<Vec<KeyValue>>,
}

/// Callbacks a host compiler invokes on a plugin.
///
/// `process_*` may be called from several threads at once; `code_generated`
/// is called once, after every declaration has been visited.
pub trait CompilerPlugin: Send + Sync {
    fn init(&self);

    fn process_package(&self, package: &PackageNode);

    fn process_service(&self, service: &ServiceNode);

    fn process_endpoint(&self, endpoint: &EndpointNode);

    fn code_generated(&self, artifact_path: &Path) -> GenerationOutcome;
}
