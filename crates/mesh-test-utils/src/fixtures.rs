//! Device identities and XML documents for tests.
//!
//! Builders produce documents in the on-disk shape of a given schema
//! version. They only cover what the tests need; every builder output
//! decodes.

use mesh_protocol::DeviceId;

/// Deterministic identity: 32 copies of `n`.
pub fn device(n: u8) -> DeviceId {
    DeviceId::from_bytes([n; 32])
}

/// The local device used throughout the test suites.
pub fn local_device() -> DeviceId {
    device(0x11)
}

/// Version 1 document: two repositories sharing one embedded node, plus
/// the retired GUI and read-only options.
pub fn v1_document() -> String {
    let a = device(1);
    let b = device(2);
    format!(
        r#"<configuration version="1">
    <repository id="docs" directory="/srv/docs">
        <node id="{a}" name="alpha">
            <address>10.0.0.1:22000</address>
        </node>
        <node id="{b}" name="bravo">
            <address>dynamic</address>
        </node>
    </repository>
    <repository id="photos" directory="/srv/photos">
        <node id="{a}" name="alpha-again">
            <address>10.0.0.9:22000</address>
        </node>
    </repository>
    <options>
        <listenAddress>0.0.0.0:22000</listenAddress>
        <globalAnnounceServer>announce.syncthing.net:22025</globalAnnounceServer>
        <readOnly>true</readOnly>
        <rescanIntervalS>90</rescanIntervalS>
        <guiEnabled>false</guiEnabled>
        <guiAddress>0.0.0.0:8888</guiAddress>
    </options>
</configuration>
"#
    )
}

/// Version 3 document: root node list, repositories referencing it.
pub fn v3_document() -> String {
    let a = device(1);
    let c = device(3);
    format!(
        r#"<configuration version="3">
    <repository id="music" directory="/srv/music" ro="false" ignorePerms="true">
        <node id="{a}" name="stale-name">
            <address>10.0.0.1:22000</address>
        </node>
        <node id="{c}"></node>
    </repository>
    <node id="{a}" name="alpha" compression="true">
        <address>10.0.0.1:22000</address>
    </node>
    <node id="{c}" name="charlie" compression="false">
        <address></address>
    </node>
    <gui enabled="true" tls="true">
        <address>127.0.0.1:8384</address>
    </gui>
    <options>
        <rescanIntervalS>300</rescanIntervalS>
    </options>
</configuration>
"#
    )
}

/// Current-version document with one folder shared with one peer.
pub fn v5_document() -> String {
    let a = device(1);
    let me = local_device();
    format!(
        r#"<configuration version="5">
    <folder id="default" path="/srv/sync" ro="false" rescanIntervalS="60" ignorePerms="false">
        <device id="{a}"></device>
        <device id="{me}"></device>
        <versioning type="simple">
            <param key="keep" val="5"></param>
        </versioning>
    </folder>
    <device id="{a}" name="alpha" compression="true" introducer="false">
        <address>tcp://10.0.0.1:22000</address>
    </device>
    <device id="{me}" name="local" compression="true" introducer="false">
        <address>dynamic</address>
    </device>
    <gui enabled="true" tls="false">
        <address>127.0.0.1:8080</address>
    </gui>
    <options>
        <listenAddress>0.0.0.0:22000</listenAddress>
    </options>
</configuration>
"#
    )
}

/// Current-version document with the given folders, each written as
/// `<folder id=.. path=..>` with no members.
pub fn folders_document(folders: &[(&str, &str)]) -> String {
    let mut doc = String::from("<configuration version=\"5\">\n");
    for (id, path) in folders {
        doc.push_str(&format!("    <folder id=\"{id}\" path=\"{path}\"></folder>\n"));
    }
    doc.push_str("</configuration>\n");
    doc
}
