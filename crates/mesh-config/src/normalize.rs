//! Consistency normalization
//!
//! [`Normalizer::prepare`] runs after every load and construction. It
//! enforces the relational invariants between folders and devices:
//!
//! - no two valid folders share an identifier
//! - the local device exists and is a member of every folder
//! - folder membership only references declared devices, each once
//! - root devices and folder memberships are sorted by identity

use std::collections::{HashMap, HashSet};

use mesh_protocol::DeviceId;

use crate::defaults;
use crate::migration::DeprecatedOptions;
use crate::model::{Configuration, DeviceConfiguration, FolderConfiguration, FolderDeviceConfiguration};
use crate::password::{self, CredentialHasher};

pub const NO_DIRECTORY: &str = "no directory configured";
pub const DUPLICATE_FOLDER_ID: &str = "duplicate folder ID";

/// Identifier given to folders that declare none.
pub const DEFAULT_FOLDER_ID: &str = "default";

/// Usage-reporting state meaning "permanently declined".
pub const UR_DECLINED: i32 = -1;

pub struct Normalizer<'a> {
    my_id: DeviceId,
    hasher: &'a dyn CredentialHasher,
    device_name: Option<&'a str>,
}

impl<'a> Normalizer<'a> {
    pub fn new(my_id: DeviceId, hasher: &'a dyn CredentialHasher) -> Self {
        Self {
            my_id,
            hasher,
            device_name: None,
        }
    }

    /// Name the local device is given when it has to be created. Defaults to
    /// the host name.
    pub fn with_device_name(mut self, name: &'a str) -> Self {
        self.device_name = Some(name);
        self
    }

    pub fn prepare(&self, cfg: &mut Configuration, deprecated: &DeprecatedOptions) {
        prepare_listen_addresses(cfg);
        resolve_folder_ids(&mut cfg.folders);

        if deprecated.ur_declined {
            cfg.options.ur_accepted = UR_DECLINED;
        }

        self.hash_gui_password(cfg);
        let existing = self.ensure_local_device(cfg);

        for folder in &mut cfg.folders {
            self.reconcile_membership(folder, &existing);
        }

        for device in &mut cfg.devices {
            fill_dynamic_address(device);
        }
    }

    fn hash_gui_password(&self, cfg: &mut Configuration) {
        let current = &cfg.gui.password;
        if current.is_empty() || password::is_hashed(current) {
            return;
        }
        match self.hasher.hash(current) {
            Ok(hash) => cfg.gui.password = hash,
            Err(e) => tracing::warn!(error = %e, "hashing GUI password; keeping cleartext"),
        }
    }

    /// Collapse duplicate root devices, add the local device if missing and
    /// sort. Returns the set of identities folders may reference.
    fn ensure_local_device(&self, cfg: &mut Configuration) -> HashSet<DeviceId> {
        let mut existing = HashSet::with_capacity(cfg.devices.len() + 1);
        cfg.devices.retain(|d| {
            let first = existing.insert(d.device_id);
            if !first {
                tracing::warn!(device = %d.device_id.short(), "collapsed duplicate device entry");
            }
            first
        });

        if existing.insert(self.my_id) {
            let name = match self.device_name {
                Some(name) => name.to_string(),
                None => host_name(),
            };
            cfg.devices.push(DeviceConfiguration {
                name,
                ..DeviceConfiguration::new(self.my_id)
            });
        }

        cfg.devices.sort_by(|a, b| a.device_id.cmp(&b.device_id));
        existing
    }

    fn reconcile_membership(&self, folder: &mut FolderConfiguration, existing: &HashSet<DeviceId>) {
        if !folder.devices.iter().any(|d| d.device_id == self.my_id) {
            folder.devices.push(FolderDeviceConfiguration::from(self.my_id));
        }

        let folder_id = folder.id.as_str();
        folder.devices.retain(|d| {
            let declared = existing.contains(&d.device_id);
            if !declared {
                tracing::warn!(
                    folder = %folder_id,
                    device = %d.device_id.short(),
                    "removed reference to undeclared device"
                );
            }
            declared
        });

        let mut seen = HashSet::with_capacity(folder.devices.len());
        folder.devices.retain(|d| seen.insert(d.device_id));

        folder.devices.sort_by(|a, b| a.device_id.cmp(&b.device_id));
    }
}

/// Seed the default listen address if none was given and drop repeats,
/// keeping the first occurrence.
fn prepare_listen_addresses(cfg: &mut Configuration) {
    defaults::fill_absent_sequences(&mut cfg.options);
    if let Some(addresses) = cfg.options.listen_address.as_mut() {
        let mut seen = HashSet::with_capacity(addresses.len());
        addresses.retain(|a| seen.insert(a.clone()));
    }
}

/// Mark folders without a path, default empty identifiers, and split
/// identifier collisions.
///
/// The first folder keeps a contested identifier; every later claimant is
/// renamed `<id>~<n>` and the new identifier is claimed in turn. Both sides
/// are marked invalid and kept.
fn resolve_folder_ids(folders: &mut [FolderConfiguration]) {
    let mut claimed: HashMap<String, usize> = HashMap::new();
    let mut counter = 0;

    for i in 0..folders.len() {
        if folders[i].path.is_empty() {
            folders[i].invalid = NO_DIRECTORY.to_string();
            continue;
        }

        if folders[i].id.is_empty() {
            folders[i].id = DEFAULT_FOLDER_ID.to_string();
        }

        match claimed.get(&folders[i].id) {
            Some(&first) => {
                tracing::warn!(id = %folders[i].id, "multiple folders with the same ID; disabling");
                folders[first].invalid = DUPLICATE_FOLDER_ID.to_string();
                let folder = &mut folders[i];
                folder.invalid = DUPLICATE_FOLDER_ID.to_string();
                loop {
                    counter += 1;
                    let candidate = format!("{}~{}", folder.id, counter);
                    if !claimed.contains_key(&candidate) {
                        claimed.insert(candidate.clone(), i);
                        folder.id = candidate;
                        break;
                    }
                }
            }
            None => {
                claimed.insert(folders[i].id.clone(), i);
            }
        }
    }
}

/// An empty address list, or one holding only an empty string, means the
/// device is discovered at runtime.
fn fill_dynamic_address(device: &mut DeviceConfiguration) {
    let unset = match device.addresses.as_slice() {
        [] => true,
        [only] => only.is_empty(),
        _ => false,
    };
    if unset {
        device.addresses = vec![defaults::DYNAMIC_ADDRESS.to_string()];
    }
}

fn host_name() -> String {
    hostname::get()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
