use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to load config from {path}")]
    ConfigLoad {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config at {path}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("output.dir_name {dir_name:?} must be a single directory name")]
    InvalidOutputDir { dir_name: String },
}

/// A metadata attachment could not be turned into a model fragment.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProcessError {
    #[error("invalid value for Config key '{key}': {reason}")]
    InvalidConfig { key: String, reason: String },

    #[error("invalid CopyFiles entry {index}: {reason}")]
    InvalidCopySpec { index: usize, reason: String },
}

impl ProcessError {
    pub(crate) fn config(key: &str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            key: key.to_owned(),
            reason: reason.into(),
        }
    }

    pub(crate) fn copy(index: usize, reason: impl Into<String>) -> Self {
        Self::InvalidCopySpec {
            index,
            reason: reason.into(),
        }
    }
}

/// The `port` of an endpoint binding could not be determined.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PortError {
    #[error("unable to extract port from anonymous endpoint")]
    NotFound,

    #[error("invalid port value {value:?}: expected an integer between 0 and 65535")]
    Parse { value: String },
}
