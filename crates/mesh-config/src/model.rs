//! Configuration data model
//!
//! These types are both the in-memory document and the current (version 5)
//! on-disk shape. Field renames follow the XML layout: names starting with
//! `@` are attributes, everything else is a child element.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

use mesh_protocol::DeviceId;
use serde::{Deserialize, Deserializer, Serialize};

use crate::Result;
use crate::password::CredentialHasher;

/// Root configuration document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    /// Where the document is loaded from and saved to. Never persisted.
    #[serde(skip)]
    pub location: PathBuf,

    /// Schema version of the document.
    #[serde(rename = "@version")]
    pub version: i32,

    #[serde(rename = "folder")]
    pub folders: Vec<FolderConfiguration>,

    #[serde(rename = "device")]
    pub devices: Vec<DeviceConfiguration>,

    pub gui: GuiConfiguration,

    pub options: OptionsConfiguration,
}

impl Configuration {
    /// Look up a device by identity.
    pub fn device(&self, id: &DeviceId) -> Option<&DeviceConfiguration> {
        self.devices.iter().find(|d| d.device_id == *id)
    }

    pub fn device_mut(&mut self, id: &DeviceId) -> Option<&mut DeviceConfiguration> {
        self.devices.iter_mut().find(|d| d.device_id == *id)
    }

    /// Look up a folder by identifier. The first match wins.
    pub fn folder(&self, id: &str) -> Option<&FolderConfiguration> {
        self.folders.iter().find(|f| f.id == id)
    }

    pub fn folder_mut(&mut self, id: &str) -> Option<&mut FolderConfiguration> {
        self.folders.iter_mut().find(|f| f.id == id)
    }

    /// Devices keyed by identity. Later duplicates shadow earlier ones.
    pub fn device_map(&self) -> HashMap<DeviceId, &DeviceConfiguration> {
        self.devices.iter().map(|d| (d.device_id, d)).collect()
    }

    /// Folders keyed by identifier. Later duplicates shadow earlier ones.
    pub fn folder_map(&self) -> HashMap<&str, &FolderConfiguration> {
        self.folders.iter().map(|f| (f.id.as_str(), f)).collect()
    }
}

/// A synchronized directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FolderConfiguration {
    #[serde(rename = "@id")]
    pub id: String,

    #[serde(rename = "@path")]
    pub path: String,

    #[serde(rename = "@ro")]
    pub read_only: bool,

    #[serde(rename = "@rescanIntervalS")]
    pub rescan_interval_s: i32,

    #[serde(rename = "@ignorePerms")]
    pub ignore_perms: bool,

    /// Devices this folder is shared with.
    #[serde(rename = "device")]
    pub devices: Vec<FolderDeviceConfiguration>,

    pub versioning: VersioningConfiguration,

    /// Why the folder is unusable; empty when healthy. Set by normalization,
    /// never persisted.
    #[serde(skip)]
    pub invalid: String,
}

impl FolderConfiguration {
    /// Identities of the member devices, in membership order.
    pub fn device_ids(&self) -> Vec<DeviceId> {
        self.devices.iter().map(|d| d.device_id).collect()
    }

    pub fn is_invalid(&self) -> bool {
        !self.invalid.is_empty()
    }
}

/// Membership edge between a folder and a device. Holds the identity only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FolderDeviceConfiguration {
    #[serde(rename = "@id")]
    pub device_id: DeviceId,
}

impl From<DeviceId> for FolderDeviceConfiguration {
    fn from(device_id: DeviceId) -> Self {
        Self { device_id }
    }
}

/// A known peer.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConfiguration {
    #[serde(rename = "@id")]
    pub device_id: DeviceId,

    #[serde(rename = "@name", skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(rename = "@compression")]
    pub compression: bool,

    #[serde(rename = "@certName", skip_serializing_if = "String::is_empty")]
    pub cert_name: String,

    #[serde(rename = "@introducer")]
    pub introducer: bool,

    #[serde(rename = "address")]
    pub addresses: Vec<String>,
}

impl DeviceConfiguration {
    pub fn new(device_id: DeviceId) -> Self {
        Self {
            device_id,
            ..Self::default()
        }
    }
}

/// File versioning policy of a folder.
///
/// On disk the parameters are a list of `<param key="" val=""/>` elements; in
/// memory they are a mapping. Ordering of the on-disk list carries no meaning.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "WireVersioning", into = "WireVersioning")]
pub struct VersioningConfiguration {
    /// Policy name; empty means no versioning.
    pub kind: String,
    pub params: BTreeMap<String, String>,
}

#[derive(Default, Serialize, Deserialize)]
#[serde(default)]
struct WireVersioning {
    #[serde(rename = "@type", skip_serializing_if = "String::is_empty")]
    kind: String,

    #[serde(rename = "param")]
    params: Vec<WireParam>,
}

#[derive(Serialize, Deserialize)]
struct WireParam {
    #[serde(rename = "@key")]
    key: String,

    #[serde(rename = "@val")]
    val: String,
}

impl From<WireVersioning> for VersioningConfiguration {
    fn from(wire: WireVersioning) -> Self {
        Self {
            kind: wire.kind,
            params: wire.params.into_iter().map(|p| (p.key, p.val)).collect(),
        }
    }
}

impl From<VersioningConfiguration> for WireVersioning {
    fn from(cfg: VersioningConfiguration) -> Self {
        Self {
            kind: cfg.kind,
            params: cfg
                .params
                .into_iter()
                .map(|(key, val)| WireParam { key, val })
                .collect(),
        }
    }
}

/// Node-wide settings.
///
/// Every field has a declared default; see [`crate::defaults`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionsConfiguration {
    /// `None` until the sequence defaults are seeded, so a decoded list is
    /// never mixed with the default entry.
    #[serde(
        rename = "listenAddress",
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present_sequence"
    )]
    pub listen_address: Option<Vec<String>>,

    #[serde(rename = "globalAnnounceServer")]
    pub global_announce_server: String,

    #[serde(rename = "globalAnnounceEnabled")]
    pub global_announce_enabled: bool,

    #[serde(rename = "localAnnounceEnabled")]
    pub local_announce_enabled: bool,

    #[serde(rename = "localAnnouncePort")]
    pub local_announce_port: i32,

    #[serde(rename = "localAnnounceMCAddr")]
    pub local_announce_mc_addr: String,

    #[serde(rename = "maxSendKbps")]
    pub max_send_kbps: i32,

    #[serde(rename = "maxRecvKbps")]
    pub max_recv_kbps: i32,

    #[serde(rename = "reconnectionIntervalS")]
    pub reconnect_interval_s: i32,

    #[serde(rename = "startBrowser")]
    pub start_browser: bool,

    #[serde(rename = "upnpEnabled")]
    pub upnp_enabled: bool,

    #[serde(rename = "upnpLeaseMinutes")]
    pub upnp_lease_minutes: i32,

    #[serde(rename = "upnpRenewalMinutes")]
    pub upnp_renewal_minutes: i32,

    /// Accepted usage-reporting version: 0 undecided, -1 permanently off.
    #[serde(rename = "urAccepted")]
    pub ur_accepted: i32,

    #[serde(rename = "restartOnWakeup")]
    pub restart_on_wakeup: bool,

    /// Hours between upgrade checks; 0 disables them.
    #[serde(rename = "autoUpgradeIntervalH")]
    pub auto_upgrade_interval_h: i32,
}

/// A repeated element that appears at all is present, even if every entry is empty.
fn present_sequence<'de, D>(deserializer: D) -> std::result::Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Vec::<String>::deserialize(deserializer).map(Some)
}

/// Administrative interface settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuiConfiguration {
    #[serde(rename = "@enabled")]
    pub enabled: bool,

    #[serde(rename = "@tls")]
    pub use_tls: bool,

    pub address: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub user: String,

    /// PHC-format hash once persisted; see [`crate::password`].
    #[serde(skip_serializing_if = "String::is_empty")]
    pub password: String,

    #[serde(rename = "apikey", skip_serializing_if = "String::is_empty")]
    pub api_key: String,
}

impl GuiConfiguration {
    /// Replace the password with the hash of `cleartext`.
    ///
    /// An empty `cleartext` clears the password.
    pub fn set_password(&mut self, cleartext: &str, hasher: &dyn CredentialHasher) -> Result<()> {
        self.password = if cleartext.is_empty() {
            String::new()
        } else {
            hasher.hash(cleartext)?
        };
        Ok(())
    }
}
