//! Error types for mesh-protocol

/// Result type for mesh-protocol operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while parsing device identities
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("device ID has {len} characters, expected 52 or 56")]
    InvalidLength { len: usize },

    #[error("device ID decodes to {len} bytes, expected {expected}")]
    InvalidByteLength { len: usize, expected: usize },

    #[error("invalid character {ch:?} in device ID")]
    InvalidCharacter { ch: char },

    #[error("check character mismatch in device ID group {group:?}")]
    CheckMismatch { group: String },

    #[error("invalid base32 in device ID: {message}")]
    Base32 { message: String },
}
