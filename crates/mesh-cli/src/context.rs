//! Command context resolution
//!
//! Turns the global flags into a configuration location and a local device
//! identity, the two inputs every command needs.

use std::path::{Path, PathBuf};

use mesh_config::ConfigStore;
use mesh_protocol::DeviceId;

use crate::cli::Target;
use crate::error::{CliError, Result};

/// Directory under the platform config dir that holds the file.
pub const APP_DIR: &str = "meshsync";
pub const CONFIG_FILE: &str = "config.xml";

/// Resolved inputs for a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
    pub location: PathBuf,
    pub device_id: DeviceId,
}

impl Context {
    pub fn resolve(target: &Target) -> Result<Self> {
        Ok(Self {
            location: config_location(target.config.as_deref())?,
            device_id: device_identity(target)?,
        })
    }

    pub fn store(&self) -> ConfigStore {
        ConfigStore::new(self.device_id)
    }
}

/// The explicit path, or `<config dir>/meshsync/config.xml`.
pub fn config_location(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
        .ok_or_else(|| CliError::user("No platform config directory; pass --config"))
}

/// Identity from `--device-id` or `--cert`.
pub fn device_identity(target: &Target) -> Result<DeviceId> {
    if let Some(text) = &target.device_id {
        return Ok(text.parse()?);
    }
    if let Some(cert) = &target.cert {
        return certificate_identity(cert);
    }
    Err(CliError::user(
        "The local device is unknown; pass --device-id or --cert",
    ))
}

pub fn certificate_identity(cert: &Path) -> Result<DeviceId> {
    let der = std::fs::read(cert).map_err(|e| mesh_fs::Error::io(cert, e))?;
    Ok(DeviceId::from_certificate(&der))
}
