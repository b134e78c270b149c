//! Restart impact of a configuration change.

use crate::model::Configuration;

/// Whether moving from `from` to `to` needs a full restart to take effect.
///
/// Any folder change, device removal, or options/GUI change does. Adding a
/// device or editing a device's name or addresses does not. The check is
/// conservative: it may ask for a restart that is not strictly needed.
pub fn change_requires_restart(from: &Configuration, to: &Configuration) -> bool {
    if from.folders.len() != to.folders.len() {
        return true;
    }

    let to_folders = to.folder_map();
    for (id, folder) in from.folder_map() {
        if to_folders.get(id) != Some(&folder) {
            return true;
        }
    }

    let to_devices = to.device_map();
    if from.device_map().keys().any(|id| !to_devices.contains_key(id)) {
        return true;
    }

    from.options != to.options || from.gui != to.gui
}
