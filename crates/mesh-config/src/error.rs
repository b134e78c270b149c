//! Error types for mesh-config

use std::path::PathBuf;

use crate::model::Configuration;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Fs(#[from] mesh_fs::Error),

    #[error("Failed to encode configuration: {message}")]
    Encode { message: String },

    #[error("Refusing to save cleartext GUI password to {path}")]
    CleartextPassword { path: PathBuf },

    #[error("Failed to hash password: {message}")]
    PasswordHash { message: String },
}

/// Failure while loading a configuration file.
///
/// A document that exists but does not decode still yields a usable
/// configuration: the elements that did decode, over defaults, normalized
/// for the local device. Callers that want to keep running can take it from
/// [`LoadError::recovered`].
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error(transparent)]
    Io(#[from] mesh_fs::Error),

    #[error("Failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: quick_xml::DeError,
        recovered: Box<Configuration>,
    },
}

impl LoadError {
    /// The fallback configuration, if the file was readable.
    pub fn recovered(&self) -> Option<&Configuration> {
        match self {
            Self::Io(_) => None,
            Self::Decode { recovered, .. } => Some(recovered),
        }
    }

    pub fn into_recovered(self) -> Option<Configuration> {
        match self {
            Self::Io(_) => None,
            Self::Decode { recovered, .. } => Some(*recovered),
        }
    }
}
