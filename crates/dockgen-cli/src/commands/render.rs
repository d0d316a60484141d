use std::path::Path;
use std::sync::Arc;

use dockgen_build::{ArtifactError, DockerfileGenerator, plan_staging};
use dockgen_core::DockgenConfig;
use dockgen_plugin::{CollectingLog, CompilerPlugin, DockerPlugin};

use crate::manifest::ProgramManifest;

pub async fn render(manifest_path: &Path, artifact_name: &str, project_dir: &Path) -> anyhow::Result<()> {
    let config = DockgenConfig::load(project_dir)?;
    let manifest = ProgramManifest::load(manifest_path).await?;

    let log = Arc::new(CollectingLog::new());
    let plugin = DockerPlugin::new(&config, Arc::clone(&log));
    plugin.init();
    manifest.visit(&plugin);
    super::report_diagnostics(&log)?;

    let snapshot = plugin.context().model().take();
    let docker = snapshot.docker.as_ref().ok_or(ArtifactError::MissingConfig)?;
    let staged = plan_staging(&snapshot.external_files, &[artifact_name, "Dockerfile"])?;

    let generator =
        DockerfileGenerator::new(docker, &config.output, artifact_name, &snapshot.ports, &staged);
    print!("{}", generator.render());
    Ok(())
}
