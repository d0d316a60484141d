//! Program manifest: the declarations a compiler would present to the plugin.
//!
//! ```toml
//! source = "main.src"
//!
//! [[endpoints]]
//! name = "listener"
//! line = 3
//! config = { port = 9090 }
//!
//! [[services]]
//! name = "hello"
//! line = 10
//! endpoint = { port = 8080 }
//!
//! [[services.annotations]]
//! name = "Config"
//! args = { name = "hello", tag = "v1" }
//! ```

use std::path::Path;

use anyhow::Context;
use dockgen_core::{Attachment, KeyValue, Literal};
use dockgen_plugin::{CompilerPlugin, EndpointNode, PackageNode, ServiceNode, SourcePosition};
use indexmap::IndexMap;
use serde::Deserialize;

/// Key/value tables keep document order, so a later key (`imageName` after
/// `name`) overrides an earlier one the way repeated arguments do.
type Record = IndexMap<String, Literal>;

#[derive(Debug, Deserialize)]
pub struct ProgramManifest {
    #[serde(default = "default_package")]
    pub package: String,
    /// Source file positions are reported against
    #[serde(default = "default_source")]
    pub source: String,
    #[serde(default)]
    pub endpoints: Vec<EndpointEntry>,
    #[serde(default)]
    pub services: Vec<ServiceEntry>,
}

#[derive(Debug, Deserialize)]
pub struct EndpointEntry {
    pub name: String,
    #[serde(default)]
    pub line: u32,
    #[serde(default)]
    pub column: u32,
    #[serde(default)]
    pub config: Record,
    #[serde(default)]
    pub annotations: Vec<AnnotationEntry>,
}

#[derive(Debug, Deserialize)]
pub struct ServiceEntry {
    pub name: String,
    #[serde(default)]
    pub line: u32,
    #[serde(default)]
    pub column: u32,
    /// Anonymous endpoint configuration
    #[serde(default)]
    pub endpoint: Option<Record>,
    #[serde(default)]
    pub annotations: Vec<AnnotationEntry>,
}

#[derive(Debug, Deserialize)]
pub struct AnnotationEntry {
    pub name: String,
    #[serde(default)]
    pub args: Record,
}

impl ProgramManifest {
    pub async fn load(path: &Path) -> anyhow::Result<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read manifest {}", path.display()))?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let manifest: Self = if is_json {
            serde_json::from_str(&content)
                .with_context(|| format!("failed to parse manifest {}", path.display()))?
        } else {
            toml::from_str(&content)
                .with_context(|| format!("failed to parse manifest {}", path.display()))?
        };
        Ok(manifest)
    }

    fn position(&self, line: u32, column: u32) -> SourcePosition {
        SourcePosition::new(self.source.clone(), line, column)
    }

    pub fn package_node(&self) -> PackageNode {
        PackageNode {
            name: self.package.clone(),
            endpoints: self.endpoint_nodes(),
        }
    }

    pub fn endpoint_nodes(&self) -> Vec<EndpointNode> {
        self.endpoints
            .iter()
            .map(|e| EndpointNode {
                name: e.name.clone(),
                position: self.position(e.line, e.column),
                config: key_values(&e.config),
                annotations: attachments(&e.annotations),
            })
            .collect()
    }

    pub fn service_nodes(&self) -> Vec<ServiceNode> {
        self.services
            .iter()
            .map(|s| ServiceNode {
                name: s.name.clone(),
                position: self.position(s.line, s.column),
                annotations: attachments(&s.annotations),
                anonymous_endpoint: s.endpoint.as_ref().map(key_values),
            })
            .collect()
    }

    /// Presents every declaration to the plugin the way a compiler would:
    /// the package pass first, then each annotated endpoint and service.
    pub fn visit(&self, plugin: &impl CompilerPlugin) {
        let package = self.package_node();
        plugin.process_package(&package);

        for endpoint in package.endpoints.iter().filter(|e| !e.annotations.is_empty()) {
            plugin.process_endpoint(endpoint);
        }
        for service in self.service_nodes().iter().filter(|s| !s.annotations.is_empty()) {
            plugin.process_service(service);
        }
    }
}

fn attachments(entries: &[AnnotationEntry]) -> Vec<Attachment> {
    entries
        .iter()
        .map(|a| Attachment::new(a.name.clone(), key_values(&a.args)))
        .collect()
}

fn key_values(record: &Record) -> Vec<KeyValue> {
    record
        .iter()
        .map(|(key, value)| KeyValue::new(key.clone(), value.clone()))
        .collect()
}

fn default_package() -> String {
    "main".to_owned()
}

fn default_source() -> String {
    "main".to_owned()
}
