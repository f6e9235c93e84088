//! Font descriptor documents.
//!
//! A descriptor lives at `font/<namespace>/<path>.json` and holds an ordered
//! `providers` array. Each entry is tagged by `type`; the tag is inspected
//! before the entry body so an unknown tag is reported as such instead of as a
//! generic parse failure.

use std::{collections::BTreeMap, ffi::OsString, path::PathBuf};

use serde::Deserialize;
use serde_json::Value;

use crate::{error::FontError, resource_location::ResourceLocation};

/// Category under which descriptors are stored.
pub const FONT_CATEGORY: &str = "font";
/// Suffix appended to a descriptor's mapped path.
pub const DESCRIPTOR_SUFFIX: &str = ".json";

/// Relative path of the descriptor for `location`.
pub fn descriptor_path(location: &ResourceLocation) -> PathBuf {
    let mut path = OsString::from(location.to_path(FONT_CATEGORY));
    path.push(DESCRIPTOR_SUFFIX);
    PathBuf::from(path)
}

/// One parsed `providers` entry, before any resource is loaded.
#[derive(Clone, Debug, PartialEq)]
pub enum ProviderSpec {
    Bitmap(BitmapSpec),
    Space(SpaceSpec),
    Reference(ReferenceSpec),
    /// Recognized, but produces no provider.
    Unihex,
}

impl ProviderSpec {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bitmap(_) => "bitmap",
            Self::Space(_) => "space",
            Self::Reference(_) => "reference",
            Self::Unihex => "unihex",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct BitmapSpec {
    pub ascent: i32,
    /// Row height in pixels. `None` means the configured default.
    #[serde(default)]
    pub height: Option<i32>,
    /// Atlas image, resolved under the `textures` category.
    pub file: String,
    /// Grid rows, top to bottom.
    #[serde(default)]
    pub chars: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct SpaceSpec {
    /// Single-codepoint keys mapped to horizontal advances.
    #[serde(default)]
    pub advances: BTreeMap<String, i32>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ReferenceSpec {
    pub id: String,
}

#[derive(Deserialize)]
struct Document {
    providers: Vec<Value>,
}

/// Parses descriptor text into provider specs, in document order.
pub fn parse_descriptor(
    location: &ResourceLocation,
    text: &str,
) -> Result<Vec<ProviderSpec>, FontError> {
    let text = strip_trailing_commas(text);
    let document: Document =
        serde_json::from_str(&text).map_err(|e| FontError::malformed(location, e.to_string()))?;

    document
        .providers
        .into_iter()
        .enumerate()
        .map(|(index, entry)| parse_entry(location, index, entry))
        .collect()
}

fn parse_entry(
    location: &ResourceLocation,
    index: usize,
    entry: Value,
) -> Result<ProviderSpec, FontError> {
    let provider_type = entry
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            FontError::malformed(
                location,
                format!("providers[{index}]: missing string field `type`"),
            )
        })?
        .to_string();

    let spec = match provider_type.as_str() {
        "bitmap" => ProviderSpec::Bitmap(entry_body(location, index, &provider_type, entry)?),
        "space" => ProviderSpec::Space(entry_body(location, index, &provider_type, entry)?),
        "reference" => {
            ProviderSpec::Reference(entry_body(location, index, &provider_type, entry)?)
        }
        "unihex" => ProviderSpec::Unihex,
        _ => {
            return Err(FontError::UnsupportedProviderType {
                location: location.clone(),
                provider_type,
            });
        }
    };

    Ok(spec)
}

fn entry_body<T: serde::de::DeserializeOwned>(
    location: &ResourceLocation,
    index: usize,
    provider_type: &str,
    entry: Value,
) -> Result<T, FontError> {
    serde_json::from_value(entry).map_err(|e| {
        FontError::malformed(location, format!("providers[{index}] ({provider_type}): {e}"))
    })
}

/// Drops commas that directly precede a closing `]` or `}`.
///
/// Commas inside string literals are left alone.
fn strip_trailing_commas(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_string = false;
    let mut escaped = false;

    for (index, ch) in text.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
        } else if ch == '"' {
            in_string = true;
        } else if ch == ',' {
            let rest = text[index + 1..].trim_start();
            if rest.starts_with([']', '}']) {
                continue;
            }
        }
        out.push(ch);
    }

    out
}
