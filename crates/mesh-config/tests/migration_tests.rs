//! Tests for upgrading older schema versions

use mesh_config::{ConfigStore, Configuration};
use mesh_test_utils::dir::TestConfigDir;
use mesh_test_utils::fixtures::{self, device, local_device};
use pretty_assertions::assert_eq;

fn load(doc: &str) -> Configuration {
    let dir = TestConfigDir::new();
    let path = dir.write_config(doc);
    ConfigStore::new(local_device())
        .with_device_name("local")
        .load(&path)
        .expect("Should load fixture")
}

mod from_v1 {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_reaches_current_version() {
        assert_eq!(load(&fixtures::v1_document()).version, 5);
    }

    #[test]
    fn test_embedded_nodes_are_flattened() {
        let cfg = load(&fixtures::v1_document());

        let alpha = cfg.device(&device(1)).expect("alpha should be a root device");
        assert_eq!(alpha.name, "alpha");
        assert_eq!(alpha.addresses, vec!["10.0.0.1:22000".to_string()]);
        assert!(cfg.device(&device(2)).is_some());

        let docs = cfg.folder("docs").expect("docs folder");
        assert_eq!(docs.path, "/srv/docs");
        assert_eq!(docs.device_ids(), vec![device(1), device(2), local_device()]);

        let photos = cfg.folder("photos").expect("photos folder");
        assert_eq!(photos.device_ids(), vec![device(1), local_device()]);
    }

    #[test]
    fn test_migrated_devices_have_compression() {
        let cfg = load(&fixtures::v1_document());
        assert!(cfg.device(&device(1)).unwrap().compression);
        assert!(cfg.device(&device(2)).unwrap().compression);
    }

    #[test]
    fn test_gui_state_comes_from_retired_options() {
        let cfg = load(&fixtures::v1_document());
        assert!(!cfg.gui.enabled);
        assert_eq!(cfg.gui.address, "0.0.0.0:8888");
    }

    #[test]
    fn test_absent_retired_gui_options_keep_defaults() {
        let cfg = load(&format!(
            r#"<configuration version="1">
    <repository id="docs" directory="/srv/docs">
        <node id="{}"></node>
    </repository>
    <options></options>
</configuration>
"#,
            device(1)
        ));
        assert!(cfg.gui.enabled);
        assert_eq!(cfg.gui.address, "127.0.0.1:8080");
    }

    #[test]
    fn test_global_settings_move_onto_folders() {
        let cfg = load(&fixtures::v1_document());
        for folder in &cfg.folders {
            assert!(folder.read_only, "{} should be read-only", folder.id);
            assert_eq!(folder.rescan_interval_s, 90);
        }
    }

    #[test]
    fn test_legacy_announce_port_is_rewritten() {
        let cfg = load(&fixtures::v1_document());
        assert_eq!(cfg.options.global_announce_server, "announce.syncthing.net:22026");
    }
}

mod from_v3 {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_rescan_interval_applies_to_every_folder() {
        let cfg = load(&fixtures::v3_document());
        assert_eq!(cfg.folder("music").unwrap().rescan_interval_s, 300);
    }

    #[test]
    fn test_root_node_attributes_survive() {
        let cfg = load(&fixtures::v3_document());
        let charlie = cfg.device(&device(3)).unwrap();
        assert_eq!(charlie.name, "charlie");
        // v3 predates the compression step, so the stored value is kept.
        assert!(!charlie.compression);
        assert_eq!(charlie.addresses, vec!["dynamic".to_string()]);
    }

    #[test]
    fn test_folder_attributes_survive() {
        let cfg = load(&fixtures::v3_document());
        let music = cfg.folder("music").unwrap();
        assert_eq!(music.path, "/srv/music");
        assert!(music.ignore_perms);
        assert!(!music.read_only);
        assert!(cfg.gui.use_tls);
        assert_eq!(cfg.gui.address, "127.0.0.1:8384");
    }
}

mod version_edges {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_v4_without_collections_is_empty() {
        let cfg = load(r#"<configuration version="4"></configuration>"#);
        assert_eq!(cfg.version, 5);
        assert!(cfg.folders.is_empty());
        assert_eq!(cfg.devices.len(), 1);
    }

    #[test]
    fn test_v3_without_rescan_option_uses_default_interval() {
        let doc = r#"<configuration version="3">
    <repository id="a" directory="/a"></repository>
</configuration>"#;
        let cfg = load(doc);
        assert_eq!(cfg.folder("a").unwrap().rescan_interval_s, 60);
    }

    #[test]
    fn test_v2_other_announce_server_is_untouched() {
        let doc = r#"<configuration version="2">
    <options>
        <globalAnnounceServer>discovery.example.net:22025</globalAnnounceServer>
    </options>
</configuration>"#;
        let cfg = load(doc);
        assert_eq!(cfg.options.global_announce_server, "discovery.example.net:22025");
    }

    #[test]
    fn test_current_version_is_not_migrated() {
        let doc = r#"<configuration version="5">
    <options>
        <globalAnnounceServer>announce.syncthing.net:22025</globalAnnounceServer>
    </options>
</configuration>"#;
        let cfg = load(doc);
        assert_eq!(cfg.options.global_announce_server, "announce.syncthing.net:22025");
    }

    #[test]
    fn test_future_version_is_read_as_current_shape() {
        let doc = r#"<configuration version="7">
    <folder id="x" path="/x"></folder>
</configuration>"#;
        let cfg = load(doc);
        assert_eq!(cfg.version, 7);
        assert!(cfg.folder("x").is_some());
    }
}
