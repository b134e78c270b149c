//! Document shapes of schema versions 1 through 4.
//!
//! These versions call folders "repositories" and devices "nodes". In
//! version 1 the nodes live inside each repository and carry their own name
//! and addresses; from version 2 on they are references to a root node list.

use serde::Deserialize;

use crate::defaults;
use crate::model::{
    DeviceConfiguration, GuiConfiguration, OptionsConfiguration, VersioningConfiguration,
};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub(crate) struct LegacyDocument {
    #[serde(rename = "repository")]
    pub repositories: Vec<LegacyRepository>,

    #[serde(rename = "node")]
    pub nodes: Vec<DeviceConfiguration>,

    pub gui: GuiConfiguration,

    pub options: OptionsConfiguration,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub(crate) struct LegacyRepository {
    #[serde(rename = "@id")]
    pub id: String,

    #[serde(rename = "@directory")]
    pub directory: String,

    #[serde(rename = "@ro")]
    pub read_only: bool,

    #[serde(rename = "@rescanIntervalS")]
    pub rescan_interval_s: i32,

    #[serde(rename = "@ignorePerms")]
    pub ignore_perms: bool,

    #[serde(rename = "node")]
    pub nodes: Vec<LegacyFolderNode>,

    pub versioning: VersioningConfiguration,
}

impl Default for LegacyRepository {
    fn default() -> Self {
        Self {
            id: String::new(),
            directory: String::new(),
            read_only: false,
            rescan_interval_s: defaults::FOLDER_RESCAN_INTERVAL_S,
            ignore_perms: false,
            nodes: Vec::new(),
            versioning: VersioningConfiguration::default(),
        }
    }
}

/// A node reference inside a repository. Name and addresses are only
/// meaningful in version 1.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub(crate) struct LegacyFolderNode {
    #[serde(rename = "@id")]
    pub id: mesh_protocol::DeviceId,

    #[serde(rename = "@name")]
    pub name: String,

    #[serde(rename = "address")]
    pub addresses: Vec<String>,
}
