//! XML encoding of the configuration document.

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use serde::Serialize;

use crate::migration::{self, Decoded};
use crate::model::Configuration;
use crate::{Error, Result};

/// Name of the document root element.
pub const ROOT_ELEMENT: &str = "configuration";

const INDENT: usize = 4;

/// Decode a document of any supported schema version and upgrade it to the
/// current shape. The result is not yet normalized.
pub fn decode(text: &str) -> std::result::Result<Decoded, quick_xml::DeError> {
    migration::decode(text)
}

/// Decode whatever can be decoded from a document that [`decode`] rejects.
///
/// The root is split into its top-level children and each child is decoded
/// on its own. Children that decode are kept and the document made of them
/// is decoded and migrated as usual. Splitting stops at the first syntax
/// error, keeping the children read before it. An unreadable `version`
/// attribute is treated as absent.
pub fn decode_partial(text: &str) -> Decoded {
    let (version, children) = split_children(text);
    let open = match version {
        Some(version) => format!(r#"<{ROOT_ELEMENT} version="{version}">"#),
        None => format!("<{ROOT_ELEMENT}>"),
    };
    let wrap = |body: &str| format!("{open}{body}</{ROOT_ELEMENT}>");

    let mut kept = String::new();
    for (name, child) in children {
        match migration::decode(&wrap(child)) {
            Ok(_) => kept.push_str(child),
            Err(e) => tracing::warn!(element = %name, error = %e, "dropping undecodable element"),
        }
    }

    migration::decode(&wrap(&kept)).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "recovered elements do not decode together; using defaults");
        Decoded::default()
    })
}

/// The root's `version` and the raw text of each complete top-level child.
fn split_children(text: &str) -> (Option<i32>, Vec<(String, &str)>) {
    let mut reader = Reader::from_str(text);
    let mut version = None;
    let mut children = Vec::new();
    let mut depth = 0usize;
    let mut child_start = 0;
    let mut child_name = String::new();

    loop {
        let before = reader.buffer_position() as usize;
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(e) => {
                tracing::debug!(position = before, error = %e, "stopped reading configuration elements");
                break;
            }
        };
        let after = reader.buffer_position() as usize;

        match event {
            Event::Start(e) => {
                match depth {
                    0 => version = root_version(&e),
                    1 => {
                        child_start = before;
                        child_name = element_name(&e);
                    }
                    _ => {}
                }
                depth += 1;
            }
            Event::End(_) => {
                depth = depth.saturating_sub(1);
                match depth {
                    0 => break,
                    1 => {
                        if let Some(child) = text.get(child_start..after) {
                            children.push((std::mem::take(&mut child_name), child));
                        }
                    }
                    _ => {}
                }
            }
            Event::Empty(e) => match depth {
                0 => {
                    version = root_version(&e);
                    break;
                }
                1 => {
                    if let Some(child) = text.get(before..after) {
                        children.push((element_name(&e), child));
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    (version, children)
}

fn root_version(root: &BytesStart<'_>) -> Option<i32> {
    let attr = root.try_get_attribute("version").ok().flatten()?;
    attr.unescape_value().ok()?.trim().parse().ok()
}

fn element_name(element: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(element.name().as_ref()).into_owned()
}

/// Encode with four-space indentation and a single trailing newline.
pub fn encode(cfg: &Configuration) -> Result<String> {
    let mut out = String::new();
    let mut ser = quick_xml::se::Serializer::with_root(&mut out, Some(ROOT_ELEMENT))
        .map_err(|e| Error::Encode {
            message: e.to_string(),
        })?;
    ser.indent(' ', INDENT);
    cfg.serialize(ser).map_err(|e| Error::Encode {
        message: e.to_string(),
    })?;
    out.push('\n');
    Ok(out)
}
