//! Schema migration
//!
//! A document is decoded in the shape its `version` attribute names and then
//! upgraded one version at a time until it reaches the current shape. Each
//! historical shape is its own [`Schema`] variant, so every step is a
//! function from one version's type to the next and the chain cannot skip or
//! reorder a step.
//!
//! Options that earlier versions kept in `<options>` and later versions moved
//! elsewhere are read separately into [`DeprecatedOptions`]. Steps consume
//! the fields they migrate.

mod legacy;
mod steps;

use quick_xml::DeError;
use serde::Deserialize;

use crate::defaults::CURRENT_VERSION;
use crate::model::Configuration;
use legacy::LegacyDocument;

/// Oldest schema version that can still be upgraded.
pub const OLDEST_VERSION: i32 = 1;

/// Retired `<options>` fields, kept only long enough to migrate them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DeprecatedOptions {
    #[serde(rename = "rescanIntervalS")]
    pub rescan_interval_s: Option<i32>,

    #[serde(rename = "readOnly")]
    pub read_only: bool,

    #[serde(rename = "guiEnabled")]
    pub gui_enabled: Option<bool>,

    #[serde(rename = "guiAddress")]
    pub gui_address: Option<String>,

    #[serde(rename = "urEnabled")]
    pub ur_enabled: bool,

    /// Applied by normalization rather than by a step: any version may carry it.
    #[serde(rename = "urDeclined")]
    pub ur_declined: bool,
}

#[derive(Deserialize)]
struct VersionProbe {
    #[serde(rename = "@version", default = "current_version")]
    version: i32,
}

fn current_version() -> i32 {
    CURRENT_VERSION
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct DeprecatedEnvelope {
    options: DeprecatedOptions,
}

/// A document in the shape of one schema version.
#[derive(Debug)]
pub(crate) enum Schema {
    V1(LegacyDocument),
    V2(LegacyDocument),
    V3(LegacyDocument),
    V4(LegacyDocument),
    Current(Configuration),
}

impl Schema {
    /// Decode `text` in the shape its version uses. A version outside the
    /// legacy range is read as the current shape with the version kept as
    /// written.
    pub(crate) fn read(text: &str) -> Result<Self, DeError> {
        let probe: VersionProbe = quick_xml::de::from_str(text)?;
        let schema = match probe.version {
            OLDEST_VERSION => Self::V1(quick_xml::de::from_str(text)?),
            2 => Self::V2(quick_xml::de::from_str(text)?),
            3 => Self::V3(quick_xml::de::from_str(text)?),
            4 => Self::V4(quick_xml::de::from_str(text)?),
            _ => Self::Current(quick_xml::de::from_str(text)?),
        };
        Ok(schema)
    }

    pub(crate) fn version(&self) -> i32 {
        match self {
            Self::V1(_) => 1,
            Self::V2(_) => 2,
            Self::V3(_) => 3,
            Self::V4(_) => 4,
            Self::Current(cfg) => cfg.version,
        }
    }

    /// Apply the one step whose source version matches this document.
    pub(crate) fn step(self, deprecated: &mut DeprecatedOptions) -> Self {
        match self {
            Self::V1(doc) => Self::V2(steps::v1_to_v2(doc, deprecated)),
            Self::V2(doc) => Self::V3(steps::v2_to_v3(doc)),
            Self::V3(doc) => Self::V4(steps::v3_to_v4(doc, deprecated)),
            Self::V4(doc) => Self::Current(steps::v4_to_v5(doc)),
            current @ Self::Current(_) => current,
        }
    }

    /// Step until the current shape is reached.
    pub(crate) fn upgrade(mut self, deprecated: &mut DeprecatedOptions) -> Configuration {
        loop {
            match self {
                Self::Current(cfg) => return cfg,
                legacy => {
                    let from = legacy.version();
                    self = legacy.step(deprecated);
                    tracing::debug!(from, to = self.version(), "migrated configuration");
                }
            }
        }
    }
}

/// Result of decoding a document of any supported version.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Decoded {
    pub config: Configuration,
    pub deprecated: DeprecatedOptions,
}

/// Decode and upgrade a document to the current shape.
pub(crate) fn decode(text: &str) -> Result<Decoded, DeError> {
    let mut deprecated = quick_xml::de::from_str::<DeprecatedEnvelope>(text)?.options;
    let config = Schema::read(text)?.upgrade(&mut deprecated);
    Ok(Decoded { config, deprecated })
}
