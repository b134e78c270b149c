//! Loading and saving the configuration document
//!
//! [`ConfigStore`] is the only component that touches the file. Both entry
//! points run the full pipeline: defaults, decode and migrate (load only),
//! then normalization for the local device.

use std::path::Path;
use std::sync::Arc;

use mesh_protocol::DeviceId;

use crate::codec;
use crate::error::{Error, LoadError, Result};
use crate::events::{ConfigEvent, EventSink, NullSink};
use crate::migration::{Decoded, DeprecatedOptions};
use crate::model::Configuration;
use crate::normalize::Normalizer;
use crate::password::{self, Argon2Hasher, CredentialHasher};

/// Loads, creates and saves configurations on behalf of one local device.
///
/// The store holds no document; callers own the [`Configuration`] and must
/// serialize access to it and to [`save`](Self::save) for a given location.
pub struct ConfigStore {
    my_id: DeviceId,
    hasher: Arc<dyn CredentialHasher>,
    events: Arc<dyn EventSink>,
    device_name: Option<String>,
}

impl ConfigStore {
    pub fn new(my_id: DeviceId) -> Self {
        Self {
            my_id,
            hasher: Arc::new(Argon2Hasher),
            events: Arc::new(NullSink),
            device_name: None,
        }
    }

    pub fn with_hasher(mut self, hasher: Arc<dyn CredentialHasher>) -> Self {
        self.hasher = hasher;
        self
    }

    pub fn with_events(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = events;
        self
    }

    /// Name for the local device entry when normalization has to create it.
    pub fn with_device_name(mut self, name: impl Into<String>) -> Self {
        self.device_name = Some(name.into());
        self
    }

    pub fn my_id(&self) -> DeviceId {
        self.my_id
    }

    /// A fresh configuration with only defaults and the local device.
    pub fn create(&self, location: &Path) -> Configuration {
        let mut cfg = Configuration {
            location: location.to_path_buf(),
            ..Configuration::default()
        };
        self.normalize(&mut cfg, &DeprecatedOptions::default());
        cfg
    }

    /// Read, migrate and normalize the document at `location`.
    ///
    /// A document that fails to decode still yields every top-level element
    /// that decodes on its own, migrated and normalized like a clean load,
    /// and returned inside [`LoadError::Decode`].
    pub fn load(&self, location: &Path) -> std::result::Result<Configuration, LoadError> {
        let text = mesh_fs::io::read_text(location)?;

        match codec::decode(&text) {
            Ok(decoded) => Ok(self.finish(decoded, location)),
            Err(source) => {
                tracing::warn!(path = %location.display(), error = %source, "decoding configuration");
                let recovered = self.finish(codec::decode_partial(&text), location);
                tracing::info!(
                    folders = recovered.folders.len(),
                    devices = recovered.devices.len(),
                    "recovered configuration elements"
                );
                Err(LoadError::Decode {
                    path: location.to_path_buf(),
                    source,
                    recovered: Box::new(recovered),
                })
            }
        }
    }

    /// Write `cfg` to its location atomically, then publish
    /// [`ConfigEvent::Saved`].
    ///
    /// Refuses to write a GUI password that is not in hashed form.
    pub fn save(&self, cfg: &Configuration) -> Result<()> {
        if !cfg.gui.password.is_empty() && !password::is_hashed(&cfg.gui.password) {
            tracing::warn!(path = %cfg.location.display(), "refusing to save cleartext GUI password");
            return Err(Error::CleartextPassword {
                path: cfg.location.clone(),
            });
        }

        let text = codec::encode(cfg)?;
        tracing::debug!(path = %cfg.location.display(), bytes = text.len(), "saving configuration");

        if let Err(e) = mesh_fs::io::write_text(&cfg.location, &text) {
            tracing::warn!(path = %e.path().display(), error = %e, "saving configuration");
            return Err(e.into());
        }

        tracing::info!(
            path = %cfg.location.display(),
            device = %self.my_id.short(),
            folders = cfg.folders.len(),
            devices = cfg.devices.len(),
            "configuration saved"
        );
        self.events.publish(ConfigEvent::Saved(Box::new(cfg.clone())));
        Ok(())
    }

    fn finish(&self, decoded: Decoded, location: &Path) -> Configuration {
        let mut cfg = decoded.config;
        cfg.location = location.to_path_buf();
        self.normalize(&mut cfg, &decoded.deprecated);
        cfg
    }

    fn normalize(&self, cfg: &mut Configuration, deprecated: &DeprecatedOptions) {
        let mut normalizer = Normalizer::new(self.my_id, self.hasher.as_ref());
        if let Some(name) = self.device_name.as_deref() {
            normalizer = normalizer.with_device_name(name);
        }
        normalizer.prepare(cfg, deprecated);
    }
}

impl std::fmt::Debug for ConfigStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigStore")
            .field("my_id", &self.my_id)
            .field("device_name", &self.device_name)
            .finish_non_exhaustive()
    }
}
