//! Stylesheet system for bracket colours
//!
//! Colours are looked up by role token (`win`, `lose`, `connector`, ...) so a
//! bracket can be rendered with a different palette without touching the
//! renderer. Stylesheets are TOML files with an optional `[metadata]` table
//! and a `[colors]` table.

use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading or parsing stylesheets
#[derive(Error, Debug)]
pub enum StylesheetError {
    #[error("Failed to read stylesheet file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse stylesheet TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// A stylesheet mapping colour roles to concrete values
#[derive(Debug, Clone)]
pub struct Stylesheet {
    /// Optional name for the stylesheet
    pub name: Option<String>,
    /// Optional description
    pub description: Option<String>,
    /// Color mappings: token name -> hex color
    pub colors: HashMap<String, String>,
}

/// TOML structure for deserializing stylesheets
#[derive(Deserialize)]
struct TomlStylesheet {
    metadata: Option<TomlMetadata>,
    colors: HashMap<String, String>,
}

#[derive(Deserialize)]
struct TomlMetadata {
    name: Option<String>,
    description: Option<String>,
}

/// Default palette: light grey canvas, green winners, red losers
const DEFAULT_PALETTE: &str = r##"
[colors]
# Canvas and headings
background = "#f5f5f5"
title = "#141414"
stage = "#3c3c3c"
round-label = "#1e1e78"
footer = "#787878"

# Match boxes
box-fill = "#ffffff"
box-outline = "#c8c8c8"
connector = "#a0a0a0"

# Names and details
text = "#000000"
win = "#107a48"
lose = "#c01c1c"
bye = "#787878"
meta = "#505050"
score = "#007800"
"##;

/// Final fallback for tokens no palette defines
const FALLBACK_COLOR: &str = "#333333";

static DEFAULT_STYLESHEET: LazyLock<Stylesheet> = LazyLock::new(Stylesheet::default);

/// Concrete colours for every role the bracket renderer draws
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub background: String,
    pub title: String,
    pub stage: String,
    pub round_label: String,
    pub footer: String,
    pub box_fill: String,
    pub box_outline: String,
    pub connector: String,
    pub text: String,
    pub win: String,
    pub lose: String,
    pub bye: String,
    pub meta: String,
    pub score: String,
}

impl Stylesheet {
    /// Load stylesheet from TOML file
    pub fn from_file(path: &Path) -> Result<Self, StylesheetError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load stylesheet from TOML string
    pub fn from_str(content: &str) -> Result<Self, StylesheetError> {
        let parsed: TomlStylesheet = toml::from_str(content)?;

        Ok(Stylesheet {
            name: parsed.metadata.as_ref().and_then(|m| m.name.clone()),
            description: parsed.metadata.as_ref().and_then(|m| m.description.clone()),
            colors: parsed.colors,
        })
    }

    /// Resolve a colour token to a concrete value
    ///
    /// Returns None if the token is not defined in this stylesheet.
    pub fn resolve(&self, token: &str) -> Option<&str> {
        self.colors.get(token).map(|s| s.as_str())
    }

    /// Resolve a colour token, falling back to the default palette
    pub fn resolve_or_default(&self, token: &str) -> String {
        if let Some(color) = self.resolve(token) {
            return color.to_string();
        }
        DEFAULT_STYLESHEET
            .resolve(token)
            .unwrap_or(FALLBACK_COLOR)
            .to_string()
    }

    /// Resolve every role the renderer needs
    pub fn palette(&self) -> Palette {
        Palette {
            background: self.resolve_or_default("background"),
            title: self.resolve_or_default("title"),
            stage: self.resolve_or_default("stage"),
            round_label: self.resolve_or_default("round-label"),
            footer: self.resolve_or_default("footer"),
            box_fill: self.resolve_or_default("box-fill"),
            box_outline: self.resolve_or_default("box-outline"),
            connector: self.resolve_or_default("connector"),
            text: self.resolve_or_default("text"),
            win: self.resolve_or_default("win"),
            lose: self.resolve_or_default("lose"),
            bye: self.resolve_or_default("bye"),
            meta: self.resolve_or_default("meta"),
            score: self.resolve_or_default("score"),
        }
    }
}

impl Default for Stylesheet {
    fn default() -> Self {
        Self::from_str(DEFAULT_PALETTE).expect("Default palette should be valid TOML")
    }
}
