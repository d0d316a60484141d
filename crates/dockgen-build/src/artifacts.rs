use std::fmt;
use std::path::{Path, PathBuf};

use dockgen_core::{ArtifactSnapshot, OutputConfig};

use crate::dockerfile::DockerfileGenerator;
use crate::staging::{StagedFile, plan_staging};

const DOCKERFILE: &str = "Dockerfile";

/// Inputs for one generation run.
#[derive(Debug, Clone, Copy)]
pub struct GenerationRequest<'a> {
    /// The compiled program
    pub artifact_path: &'a Path,
    /// Base for relative `CopyFiles` sources
    pub project_dir: &'a Path,
    pub output: &'a OutputConfig,
}

impl GenerationRequest<'_> {
    pub fn target_dir(&self) -> Result<PathBuf, ArtifactError> {
        target_dir(self.artifact_path, self.output)
    }
}

/// Directory the artifacts for `artifact_path` are generated into:
/// `<artifact dir>/<output.dir_name>`.
///
/// `dir_name` must be a single plain component, since the result is removed
/// wholesale by [`reset_target_dir`].
pub fn target_dir(artifact_path: &Path, output: &OutputConfig) -> Result<PathBuf, ArtifactError> {
    if !output.has_valid_dir_name() {
        return Err(ArtifactError::InvalidOutputDir {
            dir_name: output.dir_name.clone(),
        });
    }
    let parent = match artifact_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok(parent.join(&output.dir_name))
}

/// Removes the target directory if it exists.
pub fn reset_target_dir(dir: &Path) -> Result<(), ArtifactError> {
    if dir.exists() {
        std::fs::remove_dir_all(dir).map_err(|e| ArtifactError::Cleanup {
            path: dir.to_path_buf(),
            source: e,
        })?;
        tracing::debug!(path = %dir.display(), "removed target directory");
    }
    Ok(())
}

/// Renders the model into the target directory.
///
/// Writes the compiled artifact, every staged `CopyFiles` source, and the
/// Dockerfile. The directory is not cleaned up on failure.
pub fn write_artifacts(
    snapshot: &ArtifactSnapshot,
    request: &GenerationRequest<'_>,
) -> Result<GenerationSummary, ArtifactError> {
    let docker = snapshot.docker.as_ref().ok_or(ArtifactError::MissingConfig)?;

    if !request.artifact_path.is_file() {
        return Err(ArtifactError::ArtifactNotFound {
            path: request.artifact_path.to_path_buf(),
        });
    }
    let artifact_name = request
        .artifact_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| ArtifactError::InvalidFileName {
            path: request.artifact_path.to_path_buf(),
        })?;
    let staged = plan_staging(&snapshot.external_files, &[artifact_name, DOCKERFILE])?;

    let target = request.target_dir()?;
    std::fs::create_dir_all(&target).map_err(|e| ArtifactError::CreateDir {
        path: target.clone(),
        source: e,
    })?;

    let artifact_copy = target.join(artifact_name);
    std::fs::copy(request.artifact_path, &artifact_copy).map_err(|e| ArtifactError::CopyFile {
        path: request.artifact_path.to_path_buf(),
        source: e,
    })?;

    let mut staged_paths = Vec::with_capacity(staged.len());
    for file in &staged {
        staged_paths.push(stage_file(file, request.project_dir, &target)?);
    }

    let generator = DockerfileGenerator::new(
        docker,
        request.output,
        artifact_name,
        &snapshot.ports,
        &staged,
    );
    let dockerfile_path = target.join(DOCKERFILE);
    std::fs::write(&dockerfile_path, generator.render()).map_err(|e| {
        ArtifactError::WriteDockerfile {
            path: dockerfile_path.clone(),
            source: e,
        }
    })?;

    let summary = GenerationSummary {
        target_dir: target,
        dockerfile: dockerfile_path,
        image: generator.image(),
        ports: snapshot.ports.iter().copied().collect(),
        exposed_ports: generator.exposed_ports().into_iter().collect(),
        staged: staged_paths,
        build_image: docker.build_image,
        push: docker.push,
        docker_host: docker.docker_host.clone(),
    };
    tracing::info!(
        target_dir = %summary.target_dir.display(),
        image = %summary.image,
        ports = ?summary.ports,
        "generated docker artifacts"
    );
    Ok(summary)
}

fn stage_file(file: &StagedFile, project_dir: &Path, target: &Path) -> Result<PathBuf, ArtifactError> {
    let source = project_dir.join(&file.source);
    if !source.exists() {
        return Err(ArtifactError::SourceNotFound { path: source });
    }

    let destination = target.join(&file.staged_name);
    if source.is_dir() {
        copy_dir_all(&source, &destination)?;
    } else {
        std::fs::copy(&source, &destination).map_err(|e| ArtifactError::CopyFile {
            path: source.clone(),
            source: e,
        })?;
    }
    tracing::debug!(source = %source.display(), staged = %destination.display(), "staged file");
    Ok(destination)
}

fn copy_dir_all(src: &Path, dst: &Path) -> Result<(), ArtifactError> {
    std::fs::create_dir_all(dst).map_err(|e| ArtifactError::CreateDir {
        path: dst.to_path_buf(),
        source: e,
    })?;

    let entries = std::fs::read_dir(src).map_err(|e| ArtifactError::CopyFile {
        path: src.to_path_buf(),
        source: e,
    })?;
    for entry in entries {
        let entry = entry.map_err(|e| ArtifactError::CopyFile {
            path: src.to_path_buf(),
            source: e,
        })?;
        let from = entry.path();
        let to = dst.join(entry.file_name());
        if from.is_dir() {
            copy_dir_all(&from, &to)?;
        } else {
            std::fs::copy(&from, &to).map_err(|e| ArtifactError::CopyFile {
                path: from.clone(),
                source: e,
            })?;
        }
    }
    Ok(())
}

/// Outcome of a successful generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationSummary {
    pub target_dir: PathBuf,
    pub dockerfile: PathBuf,
    /// Image reference, `[registry/]name:tag`
    pub image: String,
    /// Endpoint ports collected from the program
    pub ports: Vec<u16>,
    /// Ports in the EXPOSE directive (endpoint ports plus the debug port)
    pub exposed_ports: Vec<u16>,
    pub staged: Vec<PathBuf>,
    pub build_image: bool,
    pub push: bool,
    pub docker_host: Option<String>,
}

impl fmt::Display for GenerationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let docker = match &self.docker_host {
            Some(host) => format!("docker -H {host}"),
            None => "docker".to_owned(),
        };

        writeln!(f, "Generated Docker artifacts in {}", self.target_dir.display())?;
        writeln!(f, "  Dockerfile: {}", self.dockerfile.display())?;
        if self.build_image {
            writeln!(f)?;
            writeln!(f, "Build the image:")?;
            writeln!(f, "  {docker} build -t {} {}", self.image, self.target_dir.display())?;
        }
        if self.push {
            writeln!(f)?;
            writeln!(f, "Push the image:")?;
            writeln!(f, "  {docker} push {}", self.image)?;
        }
        writeln!(f)?;
        writeln!(f, "Run the container:")?;
        let publish: String = self
            .ports
            .iter()
            .map(|p| format!("-p {p}:{p} "))
            .collect();
        write!(f, "  {docker} run -d {publish}{}", self.image)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("output directory name {dir_name:?} must be a single directory name")]
    InvalidOutputDir { dir_name: String },
    #[error("no Config metadata found; add a Config annotation to a service or endpoint")]
    MissingConfig,
    #[error("compiled artifact not found at {path}")]
    ArtifactNotFound { path: PathBuf },
    #[error("cannot derive a file name from {path}")]
    InvalidFileName { path: PathBuf },
    #[error("CopyFiles source {source_path} would overwrite staged file '{name}'")]
    StagingConflict { name: String, source_path: String },
    #[error("CopyFiles source not found: {path}")]
    SourceNotFound { path: PathBuf },
    #[error("failed to create directory {path}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to copy file {path}")]
    CopyFile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write Dockerfile at {path}")]
    WriteDockerfile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to remove directory {path}")]
    Cleanup {
        path: PathBuf,
        source: std::io::Error,
    },
}
