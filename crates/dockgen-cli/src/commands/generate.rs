use std::path::Path;
use std::sync::Arc;

use dockgen_core::DockgenConfig;
use dockgen_plugin::{CollectingLog, CompilerPlugin, DockerPlugin, GenerationOutcome};

use crate::manifest::ProgramManifest;

pub async fn generate(manifest_path: &Path, artifact: &Path, project_dir: &Path) -> anyhow::Result<()> {
    let config = DockgenConfig::load(project_dir)?;
    let manifest = ProgramManifest::load(manifest_path).await?;

    let log = Arc::new(CollectingLog::new());
    let plugin = DockerPlugin::new(&config, Arc::clone(&log)).project_dir(project_dir);
    plugin.init();

    manifest.visit(&plugin);
    let outcome = plugin.code_generated(artifact);

    super::report_diagnostics(&log)?;

    match outcome {
        GenerationOutcome::Skipped => {
            println!("No service or endpoint declarations found; nothing to generate.");
        }
        GenerationOutcome::Generated(summary) => println!("{summary}"),
        GenerationOutcome::Failed(failure) => return Err(failure.into()),
    }
    Ok(())
}
