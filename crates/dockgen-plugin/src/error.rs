use std::path::PathBuf;

use dockgen_build::ArtifactError;

/// The terminal generation stage failed; the target directory was removed.
#[derive(Debug, thiserror::Error)]
#[error("unable to generate Docker artifacts{}: {source}", location(.target_dir))]
pub struct GenerationFailure {
    /// `None` when no safe target directory could be derived
    pub target_dir: Option<PathBuf>,
    pub source: ArtifactError,
}

fn location(target_dir: &Option<PathBuf>) -> String {
    match target_dir {
        Some(dir) => format!(" in {}", dir.display()),
        None => String::new(),
    }
}
