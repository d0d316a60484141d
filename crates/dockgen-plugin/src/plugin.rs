use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use dockgen_build::artifacts::reset_target_dir;
use dockgen_build::{GenerationRequest, GenerationSummary, write_artifacts};
use dockgen_core::{
    ArtifactModel, Attachment, DockgenConfig, MetadataProcessor, OutputConfig, PortError,
    extract_port,
};

use crate::error::GenerationFailure;
use crate::host::{
    CompilerPlugin, DiagnosticKind, DiagnosticLog, EndpointNode, PackageNode, ServiceNode,
    SourcePosition, StderrChannel, UserChannel,
};

/// State shared by every callback of one compilation.
#[derive(Debug, Default)]
pub struct PluginContext {
    model: ArtifactModel,
    generation_requested: AtomicBool,
}

impl PluginContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn model(&self) -> &ArtifactModel {
        &self.model
    }

    /// Marks generation as requested; returns whether it already was.
    pub fn request_generation(&self) -> bool {
        self.generation_requested.swap(true, Ordering::SeqCst)
    }

    pub fn generation_requested(&self) -> bool {
        self.generation_requested.load(Ordering::SeqCst)
    }

    pub fn reset(&self) {
        self.model.reset();
        self.generation_requested.store(false, Ordering::SeqCst);
    }
}

/// Result of the `code_generated` callback.
#[derive(Debug)]
pub enum GenerationOutcome {
    /// No service or endpoint declaration was visited
    Skipped,
    Generated(GenerationSummary),
    Failed(GenerationFailure),
}

impl GenerationOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, GenerationOutcome::Failed(_))
    }

    pub fn summary(&self) -> Option<&GenerationSummary> {
        match self {
            GenerationOutcome::Generated(summary) => Some(summary),
            _ => None,
        }
    }
}

/// Collects Docker metadata from declarations and generates the artifacts.
///
/// Generic over the host's diagnostic sink and user-visible channel so hosts
/// and tests can supply their own.
pub struct DockerPlugin<L: DiagnosticLog, C: UserChannel = StderrChannel> {
    context: PluginContext,
    processor: MetadataProcessor,
    output: OutputConfig,
    project_dir: PathBuf,
    diagnostics: L,
    channel: C,
}

impl<L: DiagnosticLog> DockerPlugin<L, StderrChannel> {
    pub fn new(config: &DockgenConfig, diagnostics: L) -> Self {
        Self::with_channel(config, diagnostics, StderrChannel)
    }
}

impl<L: DiagnosticLog, C: UserChannel> DockerPlugin<L, C> {
    pub fn with_channel(config: &DockgenConfig, diagnostics: L, channel: C) -> Self {
        Self {
            context: PluginContext::new(),
            processor: MetadataProcessor::new(config.image.clone()),
            output: config.output.clone(),
            project_dir: PathBuf::from("."),
            diagnostics,
            channel,
        }
    }

    /// Directory relative `CopyFiles` sources are resolved against.
    pub fn project_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.project_dir = dir.into();
        self
    }

    pub fn context(&self) -> &PluginContext {
        &self.context
    }

    pub fn diagnostics(&self) -> &L {
        &self.diagnostics
    }

    fn report(&self, position: &SourcePosition, message: &str) {
        self.diagnostics
            .log(DiagnosticKind::Error, Some(position.clone()), message);
    }

    /// Converts a declaration's attachments and merges them into the model.
    ///
    /// Nothing is merged if any attachment is invalid. Returns whether the
    /// attachments were merged.
    fn apply_annotations(
        &self,
        declaration: &str,
        position: &SourcePosition,
        annotations: &[Attachment],
    ) -> bool {
        match self.processor.process_all(annotations) {
            Ok(fragments) => {
                if self.context.model().merge(fragments) {
                    tracing::warn!(
                        declaration,
                        %position,
                        "Config metadata overrides a previously declared Config"
                    );
                }
                true
            }
            Err(e) => {
                self.report(position, &e.to_string());
                false
            }
        }
    }

    fn generate(&self, artifact_path: &Path) -> Result<GenerationSummary, GenerationFailure> {
        let snapshot = self.context.model().take();
        let request = GenerationRequest {
            artifact_path,
            project_dir: &self.project_dir,
            output: &self.output,
        };
        let target_dir = request.target_dir().map_err(|source| GenerationFailure {
            target_dir: None,
            source,
        })?;

        reset_target_dir(&target_dir)
            .and_then(|()| write_artifacts(&snapshot, &request))
            .map_err(|source| GenerationFailure {
                target_dir: Some(target_dir),
                source,
            })
    }
}

impl<L: DiagnosticLog, C: UserChannel> CompilerPlugin for DockerPlugin<L, C> {
    fn init(&self) {
        self.context.reset();
    }

    fn process_package(&self, package: &PackageNode) {
        for endpoint in &package.endpoints {
            match extract_port(&endpoint.config) {
                Ok(port) => {
                    self.context.model().add_port(port);
                }
                Err(PortError::NotFound) => {
                    tracing::debug!(endpoint = %endpoint.name, "global endpoint declares no port");
                }
                Err(e) => {
                    tracing::warn!(
                        endpoint = %endpoint.name,
                        position = %endpoint.position,
                        error = %e,
                        "skipping global endpoint port"
                    );
                }
            }
        }
    }

    fn process_service(&self, service: &ServiceNode) {
        self.context.request_generation();
        if !self.apply_annotations(&service.name, &service.position, &service.annotations) {
            return;
        }

        let binding = service.anonymous_endpoint.as_deref().unwrap_or_default();
        match extract_port(binding) {
            Ok(port) => {
                self.context.model().add_port(port);
            }
            Err(e) => self.report(&service.position, &e.to_string()),
        }
    }

    fn process_endpoint(&self, endpoint: &EndpointNode) {
        self.context.request_generation();
        self.apply_annotations(&endpoint.name, &endpoint.position, &endpoint.annotations);
    }

    fn code_generated(&self, artifact_path: &Path) -> GenerationOutcome {
        if !self.context.generation_requested() {
            tracing::debug!("no service or endpoint declarations; skipping Docker generation");
            return GenerationOutcome::Skipped;
        }

        match self.generate(artifact_path) {
            Ok(summary) => GenerationOutcome::Generated(summary),
            Err(failure) => {
                let message = failure.to_string();
                self.channel.error(&message);
                self.diagnostics.log(DiagnosticKind::Error, None, &message);
                if let Some(dir) = &failure.target_dir {
                    if let Err(cleanup) = reset_target_dir(dir) {
                        tracing::debug!(error = %cleanup, "cleanup after failed generation did not complete");
                    }
                }
                GenerationOutcome::Failed(failure)
            }
        }
    }
}
