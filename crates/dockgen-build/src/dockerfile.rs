use std::collections::BTreeSet;
use std::path::Path;

use dockgen_core::{DockerModel, OutputConfig};

use crate::staging::StagedFile;

/// Renders the Dockerfile for a compiled artifact.
pub struct DockerfileGenerator<'a> {
    docker: &'a DockerModel,
    output: &'a OutputConfig,
    artifact_name: &'a str,
    ports: &'a BTreeSet<u16>,
    files: &'a [StagedFile],
}

impl<'a> DockerfileGenerator<'a> {
    pub fn new(
        docker: &'a DockerModel,
        output: &'a OutputConfig,
        artifact_name: &'a str,
        ports: &'a BTreeSet<u16>,
        files: &'a [StagedFile],
    ) -> Self {
        Self {
            docker,
            output,
            artifact_name,
            ports,
            files,
        }
    }

    /// Ports to expose: the endpoint ports plus the debug port when enabled.
    pub fn exposed_ports(&self) -> BTreeSet<u16> {
        let mut ports = self.ports.clone();
        if self.docker.enable_debug {
            ports.insert(self.docker.debug_port);
        }
        ports
    }

    /// Image reference the Dockerfile is labelled with. The artifact's stem
    /// names the image when `Config` leaves the name unset.
    pub fn image(&self) -> String {
        let stem = Path::new(self.artifact_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(self.artifact_name);
        self.docker.image_reference(stem)
    }

    fn workdir(&self) -> &str {
        match self.output.workdir.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        }
    }

    /// Absolute path of `name` inside the image working directory.
    fn in_workdir(&self, name: &str) -> String {
        format!("{}/{name}", self.workdir().trim_end_matches('/'))
    }

    pub fn render(&self) -> String {
        let workdir = self.workdir();

        let label = match &self.output.maintainer {
            Some(maintainer) => format!("LABEL maintainer=\"{maintainer}\"\n"),
            None => String::new(),
        };

        let copies: String = self
            .files
            .iter()
            .map(|f| format!("COPY {} {}\n", f.staged_name, f.target))
            .collect();

        let exposed = self.exposed_ports();
        let expose = if exposed.is_empty() {
            String::new()
        } else {
            let list: Vec<String> = exposed.iter().map(u16::to_string).collect();
            format!("EXPOSE {}\n", list.join(" "))
        };

        let mut cmd = vec![format!("\"{}\"", self.in_workdir(self.artifact_name))];
        if self.docker.enable_debug {
            cmd.push("\"--debug\"".to_owned());
            cmd.push(format!("\"{}\"", self.docker.debug_port));
        }

        format!(
            r#"# Auto Generated Dockerfile
FROM {base}
LABEL image="{image}"
{label}WORKDIR {workdir}
COPY {artifact} {artifact_path}
{copies}{expose}CMD [{cmd}]
"#,
            base = self.docker.base_image,
            image = self.image(),
            label = label,
            workdir = workdir,
            artifact = self.artifact_name,
            artifact_path = self.in_workdir(self.artifact_name),
            copies = copies,
            expose = expose,
            cmd = cmd.join(", "),
        )
    }
}
