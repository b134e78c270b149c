//! Persistent configuration for a meshsync node.
//!
//! The [`ConfigStore`] turns an on-disk XML document of any historical schema
//! version into a fully defaulted, migrated and normalized [`Configuration`],
//! and writes it back atomically.

pub mod codec;
pub mod defaults;
pub mod error;
pub mod events;
mod migration;
pub mod model;
pub mod normalize;
pub mod password;
pub mod restart;
pub mod store;

pub use codec::{decode, decode_partial, encode};
pub use error::{Error, LoadError, Result};
pub use events::{ConfigEvent, EventBus, EventSink, NullSink};
pub use migration::{Decoded, DeprecatedOptions};
pub use model::{
    Configuration, DeviceConfiguration, FolderConfiguration, FolderDeviceConfiguration,
    GuiConfiguration, OptionsConfiguration, VersioningConfiguration,
};
pub use normalize::Normalizer;
pub use password::{Argon2Hasher, CredentialHasher, verify_password};
pub use restart::change_requires_restart;
pub use store::ConfigStore;
