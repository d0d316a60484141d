use std::path::Path;

use dockgen_build::artifacts::reset_target_dir;
use dockgen_build::target_dir;
use dockgen_core::DockgenConfig;

pub async fn clean(artifact: &Path, project_dir: &Path) -> anyhow::Result<()> {
    let config = DockgenConfig::load(project_dir)?;
    let dir = target_dir(artifact, &config.output)?;

    if !dir.exists() {
        println!("Nothing to clean at {}", dir.display());
        return Ok(());
    }

    reset_target_dir(&dir)?;
    println!("Removed {}", dir.display());
    Ok(())
}
