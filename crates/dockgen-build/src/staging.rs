use std::collections::HashSet;
use std::path::Path;

use dockgen_core::CopyFileModel;

use crate::artifacts::ArtifactError;

/// A `CopyFiles` directive resolved to its name inside the target directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    /// Source path as written in the metadata
    pub source: String,
    /// File name the source is staged under in the target directory
    pub staged_name: String,
    /// Destination path inside the image
    pub target: String,
}

/// Assigns each copy-file directive its staged name, preserving order.
///
/// `reserved` names (the compiled artifact, the Dockerfile) may not be reused,
/// and no two directives may stage to the same name.
pub fn plan_staging(
    files: &[CopyFileModel],
    reserved: &[&str],
) -> Result<Vec<StagedFile>, ArtifactError> {
    let mut taken: HashSet<String> = reserved.iter().map(|r| (*r).to_owned()).collect();

    files
        .iter()
        .map(|file| {
            let staged_name = Path::new(&file.source)
                .file_name()
                .and_then(|n| n.to_str())
                .map(str::to_owned)
                .ok_or_else(|| ArtifactError::InvalidFileName {
                    path: file.source.clone().into(),
                })?;

            if !taken.insert(staged_name.clone()) {
                return Err(ArtifactError::StagingConflict {
                    name: staged_name,
                    source_path: file.source.clone(),
                });
            }

            Ok(StagedFile {
                source: file.source.clone(),
                staged_name,
                target: file.target.clone(),
            })
        })
        .collect()
}
