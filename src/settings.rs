//! Render settings as supplied by the resume builder front end.
//!
//! The settings arrive as loosely typed camelCase JSON.  Every field is optional and
//! each one degrades to a documented default instead of failing, so a partially filled
//! settings object still renders.

use log::warn;
use serde::{Deserialize, Deserializer, Serialize};

use crate::theme::ThemeVariant;

/// Base font size used when the configured value is missing or unusable.
pub const DEFAULT_FONT_SIZE: &str = "11";

/// Accent color used when the settings do not carry one.
pub const DEFAULT_THEME_COLOR: &str = "#38bdf8";

/// Visual density of the rendered letter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum Spacing {
    /// Tighter margins and gaps.
    Compact,
    /// Regular margins and gaps.
    #[default]
    Normal,
}

impl Spacing {
    /// Parses the raw setting. Only the literal `compact` selects the compact density.
    pub fn from_setting(value: &str) -> Self {
        if value == "compact" {
            Self::Compact
        } else {
            Self::Normal
        }
    }

    /// Returns the identifier used in the settings JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Compact => "compact",
            Self::Normal => "normal",
        }
    }
}

impl From<Option<String>> for Spacing {
    fn from(value: Option<String>) -> Self {
        value.as_deref().map(Self::from_setting).unwrap_or_default()
    }
}

impl From<Spacing> for String {
    fn from(value: Spacing) -> Self {
        value.as_str().to_owned()
    }
}

/// Page size identifier handed to the layout engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum DocumentSize {
    /// ISO A4, 210 x 297 mm.
    #[default]
    A4,
    /// US Letter, 8.5 x 11 in.
    Letter,
    /// US Legal, 8.5 x 14 in.
    Legal,
}

impl DocumentSize {
    /// Parses a page size identifier case-insensitively, falling back to A4.
    pub fn from_setting(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "a4" => Self::A4,
            "letter" => Self::Letter,
            "legal" => Self::Legal,
            "" => Self::default(),
            other => {
                warn!("Unknown document size '{}'; using A4.", other);
                Self::default()
            }
        }
    }

    /// Returns the identifier used in the settings JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A4 => "A4",
            Self::Letter => "Letter",
            Self::Legal => "Legal",
        }
    }
}

impl From<Option<String>> for DocumentSize {
    fn from(value: Option<String>) -> Self {
        value.as_deref().map(Self::from_setting).unwrap_or_default()
    }
}

impl From<DocumentSize> for String {
    fn from(value: DocumentSize) -> Self {
        value.as_str().to_owned()
    }
}

/// Settings record controlling typography, density, page size and theme.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Base font size in points, kept as the raw string the front end stores.
    #[serde(deserialize_with = "string_or_number")]
    pub font_size: String,
    /// Requested font family name.
    pub font_family: String,
    /// Accent color, a CSS color string used verbatim.
    pub theme_color: String,
    /// Layout density.
    pub spacing: Spacing,
    /// Page size.
    pub document_size: DocumentSize,
    /// Visual theme.
    pub cover_letter_theme: ThemeVariant,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            font_size: DEFAULT_FONT_SIZE.to_owned(),
            font_family: crate::fonts::DEFAULT_FONT_FAMILY_NAME.to_owned(),
            theme_color: DEFAULT_THEME_COLOR.to_owned(),
            spacing: Spacing::default(),
            document_size: DocumentSize::default(),
            cover_letter_theme: ThemeVariant::default(),
        }
    }
}

impl Settings {
    /// Creates settings populated with the defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses settings from the front end's JSON representation.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Sets the raw font size and returns the updated settings.
    pub fn with_font_size(mut self, font_size: impl Into<String>) -> Self {
        self.font_size = font_size.into();
        self
    }

    /// Sets the font family and returns the updated settings.
    pub fn with_font_family(mut self, font_family: impl Into<String>) -> Self {
        self.font_family = font_family.into();
        self
    }

    /// Sets the theme color and returns the updated settings.
    pub fn with_theme_color(mut self, theme_color: impl Into<String>) -> Self {
        self.theme_color = theme_color.into();
        self
    }

    /// Sets the spacing and returns the updated settings.
    pub fn with_spacing(mut self, spacing: Spacing) -> Self {
        self.spacing = spacing;
        self
    }

    /// Sets the document size and returns the updated settings.
    pub fn with_document_size(mut self, document_size: DocumentSize) -> Self {
        self.document_size = document_size;
        self
    }

    /// Sets the theme and returns the updated settings.
    pub fn with_theme(mut self, theme: ThemeVariant) -> Self {
        self.cover_letter_theme = theme;
        self
    }
}

// The front end stores the font size as a string, older exports as a number.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
        Null(()),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
        Raw::Null(()) => String::new(),
    })
}
