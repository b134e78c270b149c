//! Error types for mesh-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from mesh-config
    #[error(transparent)]
    Config(#[from] mesh_config::Error),

    /// Error loading a configuration file
    #[error(transparent)]
    Load(#[from] mesh_config::LoadError),

    /// Error from mesh-fs
    #[error(transparent)]
    Fs(#[from] mesh_fs::Error),

    /// Malformed device identity
    #[error("Invalid device ID: {0}")]
    DeviceId(#[from] mesh_protocol::Error),

    /// JSON output error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
