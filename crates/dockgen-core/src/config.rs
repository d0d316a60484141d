use std::path::{Component, Path};

use serde::{Deserialize, Serialize};

/// dockgen.toml configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DockgenConfig {
    #[serde(default)]
    pub image: ImageDefaults,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Image settings used when `Config` metadata leaves them unset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageDefaults {
    /// Base image for the generated Dockerfile
    #[serde(default = "default_base_image")]
    pub base_image: String,
    /// Image tag
    #[serde(default = "default_tag")]
    pub tag: String,
    /// Port exposed for remote debugging when debug is enabled
    #[serde(default = "default_debug_port")]
    pub debug_port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory created next to the compiled artifact; a single plain path component
    #[serde(default = "default_dir_name")]
    pub dir_name: String,
    /// Working directory inside the image
    #[serde(default = "default_workdir")]
    pub workdir: String,
    /// Optional `LABEL maintainer=...`
    #[serde(default)]
    pub maintainer: Option<String>,
}

impl Default for ImageDefaults {
    fn default() -> Self {
        Self {
            base_image: default_base_image(),
            tag: default_tag(),
            debug_port: default_debug_port(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir_name: default_dir_name(),
            workdir: default_workdir(),
            maintainer: None,
        }
    }
}

impl OutputConfig {
    /// Whether `dir_name` names exactly one subdirectory.
    ///
    /// The target directory is removed before each run, so `.`, `..`, empty
    /// and absolute or multi-component names are rejected.
    pub fn has_valid_dir_name(&self) -> bool {
        let mut components = Path::new(&self.dir_name).components();
        matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        )
    }

    pub fn validate(&self) -> crate::Result<()> {
        if self.has_valid_dir_name() {
            Ok(())
        } else {
            Err(crate::Error::InvalidOutputDir {
                dir_name: self.dir_name.clone(),
            })
        }
    }
}

impl DockgenConfig {
    /// Load from dockgen.toml in the given directory, or return defaults if not found.
    pub fn load(project_dir: &std::path::Path) -> crate::Result<Self> {
        let config_path = project_dir.join("dockgen.toml");
        if config_path.exists() {
            let content =
                std::fs::read_to_string(&config_path).map_err(|e| crate::Error::ConfigLoad {
                    path: config_path.clone(),
                    source: e,
                })?;
            let config: Self = toml::from_str(&content).map_err(|e| crate::Error::ConfigParse {
                path: config_path.clone(),
                source: e,
            })?;
            config.output.validate()?;
            tracing::debug!(path = %config_path.display(), "loaded dockgen config");
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }
}

fn default_base_image() -> String {
    "gcr.io/distroless/cc-debian12".to_owned()
}

fn default_tag() -> String {
    "latest".to_owned()
}

fn default_debug_port() -> u16 {
    5005
}

fn default_dir_name() -> String {
    "docker".to_owned()
}

fn default_workdir() -> String {
    "/home/app".to_owned()
}
