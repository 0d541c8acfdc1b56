//! Color-coded HTML table labels driven by a per-field color table.
//!
//! ```json
//! {"can_get_git": {"ValToColor": {"true": {"R": 200, "G": 240, "B": 200, "A": 255}}}}
//! ```
//!
//! Value keys are the string itself for string values and the JSON text of
//! anything else, so `true` and `12` match the unquoted keys above.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use super::{escape_html, label_rows, render_value, NodeLabeler};
use crate::error::{Error, Result};
use crate::graph::generic::scalar_text;
use crate::graph::GenericNode;

const BUNDLED_SCHEME: &str = include_str!("basic-colors.json");

/// An 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    /// Red.
    #[serde(rename = "R")]
    pub r: u8,
    /// Green.
    #[serde(rename = "G")]
    pub g: u8,
    /// Blue.
    #[serde(rename = "B")]
    pub b: u8,
    /// Alpha.
    #[serde(rename = "A")]
    pub a: u8,
}

impl Rgba {
    /// Used for any field or value missing from the table.
    pub const NEUTRAL: Self = Self { r: 255, g: 255, b: 255, a: 255 };
    /// Background of the id header cell.
    pub const HEADER: Self = Self { r: 200, g: 200, b: 200, a: 200 };
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}

/// Value-to-color table for one field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColorConfigVal {
    /// Value key to color.
    #[serde(rename = "ValToColor", default)]
    pub val_to_color: BTreeMap<String, Rgba>,
}

/// Field name to value-to-color table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorConfig(pub BTreeMap<String, ColorConfigVal>);

impl ColorConfig {
    /// The scheme compiled into the binary.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the bundled JSON does not parse.
    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED_SCHEME)
    }

    /// Parses a scheme from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] on malformed JSON.
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| Error::Config(format!("color scheme: {e}")))
    }

    /// Loads a scheme from a path or a `file://` URL.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the location is unreadable or not a scheme.
    pub fn load(location: &str) -> Result<Self> {
        let path = scheme_path(location)?;
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Error::Config(format!("can not load color scheme at {}: {e}", path.display()))
        })?;
        Self::from_json(&content)
    }

    /// Color for `value` of field `key`; neutral when either is not in the table.
    #[must_use]
    pub fn color_for(&self, key: &str, value: &Value) -> Rgba {
        self.0
            .get(key)
            .and_then(|table| table.val_to_color.get(&scalar_text(value)))
            .copied()
            .unwrap_or(Rgba::NEUTRAL)
    }
}

fn scheme_path(location: &str) -> Result<PathBuf> {
    if location.starts_with("file://") {
        let url = Url::parse(location)
            .map_err(|e| Error::Config(format!("bad color scheme URL {location}: {e}")))?;
        return url
            .to_file_path()
            .map_err(|()| Error::Config(format!("color scheme URL {location} is not a local path")));
    }
    Ok(Path::new(location).to_path_buf())
}

/// Renders HTML-like tables with one colored value cell per row.
#[derive(Debug, Clone)]
pub struct ColorRenderer {
    config: ColorConfig,
}

impl ColorRenderer {
    /// Uses `config` for every value cell.
    #[must_use]
    pub fn new(config: ColorConfig) -> Self {
        Self { config }
    }
}

impl NodeLabeler for ColorRenderer {
    fn node_defaults(&self) -> &'static str {
        "shape=plaintext, fontname=\"Helvetica\""
    }

    fn label(&self, node: &GenericNode) -> String {
        let id = escape_html(&node.id_text().unwrap_or_default());
        let mut lines = vec![
            r#"<<table border="0" cellspacing="0" cellpadding="6">"#.to_string(),
            format!(
                r#"<tr><td port="port0" border="1" colspan="2" align="center" bgcolor="{}">{id}</td></tr>"#,
                Rgba::HEADER
            ),
        ];
        lines.extend(label_rows(node).map(|(k, v)| {
            format!(
                r#"<tr><td border="1" align="left">{}</td><td border="1" align="right" bgcolor="{}">{}</td></tr>"#,
                escape_html(k),
                self.config.color_for(k, v),
                escape_html(&render_value(v)),
            )
        }));
        lines.push("</table>>".to_string());
        lines.join("\n")
    }
}
