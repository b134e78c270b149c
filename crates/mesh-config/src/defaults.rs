//! Declared default values.
//!
//! Every scalar field of the model falls back to the value here when the
//! document omits it. Sequence defaults are seeded by normalization instead,
//! so that a decoded list replaces the default rather than extending it.

use std::path::PathBuf;

use crate::model::{Configuration, FolderConfiguration, GuiConfiguration, OptionsConfiguration};

/// Schema version written by this release.
pub const CURRENT_VERSION: i32 = 5;

pub const FOLDER_RESCAN_INTERVAL_S: i32 = 60;

pub const LISTEN_ADDRESS: &str = "0.0.0.0:22000";
pub const GLOBAL_ANNOUNCE_SERVER: &str = "announce.syncthing.net:22026";
pub const LOCAL_ANNOUNCE_PORT: i32 = 21025;
pub const LOCAL_ANNOUNCE_MC_ADDR: &str = "[ff32::5222]:21026";
pub const RECONNECT_INTERVAL_S: i32 = 60;
pub const UPNP_RENEWAL_MINUTES: i32 = 30;
pub const AUTO_UPGRADE_INTERVAL_H: i32 = 12;

pub const GUI_ADDRESS: &str = "127.0.0.1:8080";

/// Address placeholder for devices discovered at runtime.
pub const DYNAMIC_ADDRESS: &str = "dynamic";

impl Default for Configuration {
    fn default() -> Self {
        Self {
            location: PathBuf::new(),
            version: CURRENT_VERSION,
            folders: Vec::new(),
            devices: Vec::new(),
            gui: GuiConfiguration::default(),
            options: OptionsConfiguration::default(),
        }
    }
}

impl Default for OptionsConfiguration {
    fn default() -> Self {
        Self {
            listen_address: None,
            global_announce_server: GLOBAL_ANNOUNCE_SERVER.to_string(),
            global_announce_enabled: true,
            local_announce_enabled: true,
            local_announce_port: LOCAL_ANNOUNCE_PORT,
            local_announce_mc_addr: LOCAL_ANNOUNCE_MC_ADDR.to_string(),
            max_send_kbps: 0,
            max_recv_kbps: 0,
            reconnect_interval_s: RECONNECT_INTERVAL_S,
            start_browser: true,
            upnp_enabled: true,
            upnp_lease_minutes: 0,
            upnp_renewal_minutes: UPNP_RENEWAL_MINUTES,
            ur_accepted: 0,
            restart_on_wakeup: true,
            auto_upgrade_interval_h: AUTO_UPGRADE_INTERVAL_H,
        }
    }
}

impl Default for GuiConfiguration {
    fn default() -> Self {
        Self {
            enabled: true,
            use_tls: false,
            address: GUI_ADDRESS.to_string(),
            user: String::new(),
            password: String::new(),
            api_key: String::new(),
        }
    }
}

impl Default for FolderConfiguration {
    fn default() -> Self {
        Self {
            id: String::new(),
            path: String::new(),
            read_only: false,
            rescan_interval_s: FOLDER_RESCAN_INTERVAL_S,
            ignore_perms: false,
            devices: Vec::new(),
            versioning: Default::default(),
            invalid: String::new(),
        }
    }
}

/// Fill every absent sequence with its declared default.
pub fn fill_absent_sequences(options: &mut OptionsConfiguration) {
    if options.listen_address.is_none() {
        options.listen_address = Some(vec![LISTEN_ADDRESS.to_string()]);
    }
}
