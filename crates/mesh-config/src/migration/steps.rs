//! Single-version upgrade steps.

use std::collections::HashSet;

use crate::defaults;
use crate::migration::DeprecatedOptions;
use crate::migration::legacy::{LegacyDocument, LegacyFolderNode};
use crate::model::{
    Configuration, DeviceConfiguration, FolderConfiguration, FolderDeviceConfiguration,
};

/// The only announce server value rewritten by the 2 to 3 step.
const LEGACY_ANNOUNCE_SERVER: &str = "announce.syncthing.net:22025";

/// Flatten repository-embedded nodes into the root node list and move the GUI
/// settings out of the options record.
pub(crate) fn v1_to_v2(mut doc: LegacyDocument, deprecated: &mut DeprecatedOptions) -> LegacyDocument {
    let read_only = std::mem::take(&mut deprecated.read_only);
    let mut seen: HashSet<_> = doc.nodes.iter().map(|n| n.device_id).collect();

    for repo in &mut doc.repositories {
        repo.read_only = read_only;
        for node in &mut repo.nodes {
            if seen.insert(node.id) {
                doc.nodes.push(DeviceConfiguration {
                    device_id: node.id,
                    name: node.name.clone(),
                    addresses: node.addresses.clone(),
                    ..DeviceConfiguration::default()
                });
            }
            *node = LegacyFolderNode {
                id: node.id,
                ..LegacyFolderNode::default()
            };
        }
    }
    doc.nodes.sort_by(|a, b| a.device_id.cmp(&b.device_id));

    if let Some(address) = deprecated.gui_address.take() {
        doc.gui.address = address;
    }
    if let Some(enabled) = deprecated.gui_enabled.take() {
        doc.gui.enabled = enabled;
    }

    doc
}

/// Make compression explicit and move off the retired announce port.
pub(crate) fn v2_to_v3(mut doc: LegacyDocument) -> LegacyDocument {
    for node in &mut doc.nodes {
        node.compression = true;
    }

    if doc.options.global_announce_server == LEGACY_ANNOUNCE_SERVER {
        doc.options.global_announce_server = defaults::GLOBAL_ANNOUNCE_SERVER.to_string();
    }

    doc
}

/// Give every repository its own rescan interval and drop the per-reference
/// node details.
pub(crate) fn v3_to_v4(mut doc: LegacyDocument, deprecated: &mut DeprecatedOptions) -> LegacyDocument {
    let interval = deprecated
        .rescan_interval_s
        .take()
        .unwrap_or(defaults::FOLDER_RESCAN_INTERVAL_S);

    for repo in &mut doc.repositories {
        repo.rescan_interval_s = interval;
        for node in &mut repo.nodes {
            node.name.clear();
            node.addresses.clear();
        }
    }

    doc
}

/// Rename repositories to folders and nodes to devices.
pub(crate) fn v4_to_v5(doc: LegacyDocument) -> Configuration {
    let folders = doc
        .repositories
        .into_iter()
        .map(|repo| FolderConfiguration {
            id: repo.id,
            path: repo.directory,
            read_only: repo.read_only,
            rescan_interval_s: repo.rescan_interval_s,
            ignore_perms: repo.ignore_perms,
            devices: repo
                .nodes
                .into_iter()
                .map(|n| FolderDeviceConfiguration::from(n.id))
                .collect(),
            versioning: repo.versioning,
            invalid: String::new(),
        })
        .collect();

    Configuration {
        version: 5,
        folders,
        devices: doc.nodes,
        gui: doc.gui,
        options: doc.options,
        ..Configuration::default()
    }
}
