//! End-to-end lifecycle tests against the checked-in configuration documents
//!
//! Each test copies a document from `test-fixtures/configs/` into a scratch
//! directory, then loads, inspects and saves it through the public API.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use mesh_config::normalize::{DUPLICATE_FOLDER_ID, NO_DIRECTORY, UR_DECLINED};
use mesh_config::{ConfigEvent, ConfigStore, Configuration, EventBus, verify_password};
use mesh_protocol::DeviceId;
use mesh_test_utils::dir::TestConfigDir;
use mesh_test_utils::fixtures::{device, local_device};
use pretty_assertions::assert_eq;

fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../test-fixtures/configs")
        .join(name)
}

/// Copy a fixture into a fresh directory as its config file.
fn stage(name: &str) -> (TestConfigDir, PathBuf) {
    let dir = TestConfigDir::new();
    let content = fs::read_to_string(fixture_path(name)).expect("fixture should exist");
    let path = dir.write_config(&content);
    (dir, path)
}

fn store() -> ConfigStore {
    ConfigStore::new(local_device()).with_device_name("here")
}

fn load(path: &Path) -> Configuration {
    store().load(path).expect("Should load fixture")
}

fn member_ids(cfg: &Configuration, folder: &str) -> Vec<DeviceId> {
    cfg.folder(folder).expect("folder should exist").device_ids()
}

/// Load, save, reload, save: the second write must be byte-identical.
fn assert_fixed_point(path: &Path) -> Configuration {
    let first = load(path);
    store().save(&first).expect("Should save");
    let once = fs::read_to_string(path).unwrap();

    let second = load(path);
    store().save(&second).expect("Should save again");
    let twice = fs::read_to_string(path).unwrap();

    assert_eq!(twice, once);
    assert!(once.starts_with("<configuration version=\"5\">\n"));
    assert!(once.ends_with("</configuration>\n"));
    second
}

mod version_1 {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_devices_are_flattened_and_sorted() {
        let (_dir, path) = stage("v1.xml");
        let cfg = load(&path);

        let ids: Vec<_> = cfg.devices.iter().map(|d| d.device_id).collect();
        assert_eq!(
            ids,
            vec![device(1), device(2), local_device(), DeviceId::from_bytes([0xff; 32])]
        );

        let workstation = cfg.device(&device(1)).unwrap();
        assert_eq!(workstation.name, "workstation");
        assert_eq!(workstation.addresses, vec!["192.168.1.10:22000".to_string()]);
        assert!(workstation.compression);

        let nas = cfg.device(&DeviceId::from_bytes([0xff; 32])).unwrap();
        assert_eq!(nas.addresses, vec!["dynamic".to_string()]);

        let me = cfg.device(&local_device()).unwrap();
        assert_eq!(me.name, "here");
    }

    #[test]
    fn test_memberships_reference_root_devices() {
        let (_dir, path) = stage("v1.xml");
        let cfg = load(&path);

        assert_eq!(
            member_ids(&cfg, "default"),
            vec![device(1), device(2), local_device()]
        );
        assert_eq!(
            member_ids(&cfg, "photos"),
            vec![local_device(), DeviceId::from_bytes([0xff; 32])]
        );
    }

    #[test]
    fn test_retired_options_are_applied() {
        let (_dir, path) = stage("v1.xml");
        let cfg = load(&path);

        assert_eq!(cfg.gui.address, "127.0.0.1:8081");
        assert!(cfg.gui.enabled);
        assert_eq!(cfg.options.ur_accepted, UR_DECLINED);
        assert_eq!(cfg.options.global_announce_server, "announce.syncthing.net:22026");
        assert_eq!(cfg.options.listen_address, Some(vec!["0.0.0.0:22000".to_string()]));
        for folder in &cfg.folders {
            assert_eq!(folder.rescan_interval_s, 120);
            assert!(!folder.read_only);
        }
    }

    #[test]
    fn test_reaches_fixed_point() {
        let (_dir, path) = stage("v1.xml");
        let cfg = assert_fixed_point(&path);
        assert_eq!(cfg.version, 5);
        assert_eq!(cfg.options.ur_accepted, UR_DECLINED);
    }
}

mod version_3 {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_folder_settings_survive_migration() {
        let (_dir, path) = stage("v3.xml");
        let cfg = load(&path);

        let folder = cfg.folder("default").unwrap();
        assert_eq!(folder.path, "/home/user/Sync");
        assert_eq!(folder.rescan_interval_s, 30);
        assert_eq!(folder.versioning.kind, "staggered");
        assert_eq!(folder.versioning.params["maxAge"], "31536000");
        assert_eq!(folder.versioning.params["cleanInterval"], "3600");
        assert_eq!(member_ids(&cfg, "default"), vec![device(1), local_device()]);
    }

    #[test]
    fn test_existing_local_entry_is_reused() {
        let (_dir, path) = stage("v3.xml");
        let cfg = load(&path);

        assert_eq!(cfg.devices.len(), 2);
        assert_eq!(cfg.device(&local_device()).unwrap().name, "local");
        assert!(cfg.device(&device(1)).unwrap().introducer);
        assert_eq!(cfg.options.max_send_kbps, 500);
    }

    #[test]
    fn test_cleartext_password_is_hashed_and_persisted() {
        let (dir, path) = stage("v3.xml");
        let cfg = load(&path);

        assert!(verify_password("letmein", &cfg.gui.password));
        assert_eq!(cfg.gui.user, "admin");

        store().save(&cfg).expect("Should save");
        let text = dir.read_config();
        assert!(!text.contains("letmein"));
        assert!(text.contains("<password>$argon2id$"));
    }

    #[test]
    fn test_reaches_fixed_point() {
        let (_dir, path) = stage("v3.xml");
        let cfg = assert_fixed_point(&path);
        assert!(verify_password("letmein", &cfg.gui.password));
    }
}

mod version_5 {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_collisions_and_missing_paths_are_flagged() {
        let (_dir, path) = stage("v5.xml");
        let cfg = load(&path);

        assert_eq!(cfg.folders.len(), 3);
        assert_eq!(cfg.folders[0].id, "default");
        assert_eq!(cfg.folders[0].invalid, DUPLICATE_FOLDER_ID);
        assert_eq!(cfg.folders[1].id, "default~1");
        assert_eq!(cfg.folders[1].invalid, DUPLICATE_FOLDER_ID);
        assert_eq!(cfg.folders[2].id, "music");
        assert_eq!(cfg.folders[2].invalid, NO_DIRECTORY);
    }

    #[test]
    fn test_undeclared_member_is_dropped() {
        let (_dir, path) = stage("v5.xml");
        let cfg = load(&path);

        assert!(cfg.device(&device(3)).is_none());
        assert_eq!(cfg.folders[0].device_ids(), vec![device(1), local_device()]);
        assert_eq!(cfg.folders[1].device_ids(), vec![local_device()]);
    }

    #[test]
    fn test_explicit_values_are_kept() {
        let (_dir, path) = stage("v5.xml");
        let cfg = load(&path);

        assert_eq!(
            cfg.device(&device(1)).unwrap().addresses,
            vec!["tcp://192.168.1.10:22000".to_string(), "dynamic".to_string()]
        );
        assert_eq!(
            cfg.options.listen_address,
            Some(vec!["0.0.0.0:22000".to_string(), "[::]:22000".to_string()])
        );
        assert!(!cfg.options.upnp_enabled);
        assert_eq!(cfg.options.auto_upgrade_interval_h, 0);
        assert_eq!(cfg.options.ur_accepted, 1);
        assert!(!cfg.gui.enabled);
        assert!(cfg.gui.use_tls);
        assert_eq!(cfg.gui.api_key, "abc123");
    }

    #[test]
    fn test_renamed_folder_is_valid_after_reload() {
        let (_dir, path) = stage("v5.xml");
        store().save(&load(&path)).expect("Should save");

        let cfg = load(&path);
        assert!(!cfg.folder("default").unwrap().is_invalid());
        assert!(!cfg.folder("default~1").unwrap().is_invalid());
        assert_eq!(cfg.folder("music").unwrap().invalid, NO_DIRECTORY);
    }

    #[test]
    fn test_reaches_fixed_point() {
        let (_dir, path) = stage("v5.xml");
        assert_fixed_point(&path);
    }
}

mod persistence {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_save_publishes_saved_document() {
        let (_dir, path) = stage("v1.xml");
        let bus = EventBus::default();
        let mut rx = bus.subscribe();
        let store = store().with_events(Arc::new(bus));

        let cfg = store.load(&path).expect("Should load");
        store.save(&cfg).expect("Should save");

        let ConfigEvent::Saved(saved) = rx.try_recv().expect("Should publish");
        assert_eq!(*saved, cfg);
        assert_eq!(saved.location, path);
    }

    #[test]
    fn test_stale_staging_file_does_not_leak_into_save() {
        let (dir, path) = stage("v5.xml");
        fs::write(dir.temp_path(), "garbage from an interrupted save".repeat(100)).unwrap();

        let cfg = load(&path);
        store().save(&cfg).expect("Should save");

        dir.assert_no_temp_file();
        let text = dir.read_config();
        assert!(!text.contains("garbage"));
        assert!(load(&path).folder("music").is_some());
    }

    #[test]
    fn test_interrupted_save_keeps_previous_document() {
        let (dir, path) = stage("v3.xml");
        let original = fs::read(&path).unwrap();
        fs::create_dir(dir.temp_path()).unwrap();

        let cfg = load(&path);
        assert!(store().save(&cfg).is_err());
        assert_eq!(fs::read(&path).unwrap(), original);
    }

    #[test]
    fn test_new_then_load_matches() {
        let dir = TestConfigDir::new();
        let created = store().create(&dir.config_path());
        store().save(&created).expect("Should save");

        let loaded = load(&dir.config_path());
        assert_eq!(loaded, created);
    }
}
