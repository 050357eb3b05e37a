use thiserror::Error;

use crate::domain::DiskState;

#[derive(Debug, Error)]
pub enum StatError {
    #[error("Couldn't stat path {path}: {source}")]
    Stat {
        path: String,
        #[source]
        source: nix::Error,
    },

    #[error("Filesystem at {path} reports zero size")]
    EmptyFilesystem { path: String },
}

impl StatError {
    pub fn path(&self) -> &str {
        match self {
            StatError::Stat { path, .. } | StatError::EmptyFilesystem { path } => path,
        }
    }
}

/// Port for reading usage of a mounted filesystem
pub trait DiskSource: Send + Sync {
    /// Take a usage snapshot of the filesystem backing `path`
    fn inspect(&self, path: &str) -> Result<DiskState, StatError>;
}
