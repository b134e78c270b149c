//! Filesystem primitives for meshsync
//!
//! Provides whole-file reads and crash-safe replacement of a file's contents.

pub mod error;
pub mod io;

pub use error::{Error, Result};
