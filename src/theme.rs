//! Theme selection and the per-theme layout constants.
//!
//! Both themes share the same document structure and differ only in the numbers and
//! colors collected in a [`ThemeLayout`].  The style deriver in [`crate::style`] turns a
//! layout table into concrete values for a given [`Settings`] record.

use serde::{Deserialize, Serialize};

use crate::settings::{Settings, Spacing};

/// Named visual theme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum ThemeVariant {
    /// Accent-colored header with a rule underneath.
    #[default]
    Default,
    /// Slate palette without header rule and with roomier spacing.
    Minimal,
}

impl ThemeVariant {
    /// Parses the raw `coverLetterTheme` setting.
    ///
    /// An empty value selects the default theme. Otherwise only the literal `default`
    /// does; every other string, known or not, selects the minimal theme.
    pub fn from_setting(value: &str) -> Self {
        if value.is_empty() || value == "default" {
            Self::Default
        } else {
            Self::Minimal
        }
    }

    /// Returns the identifier used in the settings JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Minimal => "minimal",
        }
    }

    /// Returns the layout table for the theme.
    pub fn layout(self) -> &'static ThemeLayout {
        match self {
            Self::Default => &DEFAULT_LAYOUT,
            Self::Minimal => &MINIMAL_LAYOUT,
        }
    }
}

impl From<Option<String>> for ThemeVariant {
    fn from(value: Option<String>) -> Self {
        value.as_deref().map(Self::from_setting).unwrap_or_default()
    }
}

impl From<ThemeVariant> for String {
    fn from(value: ThemeVariant) -> Self {
        value.as_str().to_owned()
    }
}

/// Picks the layout definition for the settings' theme.
pub fn select(settings: &Settings) -> &'static ThemeLayout {
    settings.cover_letter_theme.layout()
}

/// Color reference inside a layout table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tint {
    /// The accent color from the settings.
    Theme,
    /// A fixed CSS color.
    Fixed(&'static str),
}

impl Tint {
    /// Resolves the tint to a CSS color string.
    pub fn resolve(self, theme_color: &str) -> String {
        match self {
            Tint::Theme => theme_color.to_owned(),
            Tint::Fixed(color) => color.to_owned(),
        }
    }
}

/// Bottom rule drawn under the header.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RuleSpec {
    /// Stroke width in points. Not scaled by spacing.
    pub width: f64,
    /// Stroke color.
    pub color: Tint,
}

/// Constants describing one theme.  Margins and paddings are in points and are
/// multiplied by the spacing multiplier when the style sheet is derived.
#[derive(Clone, Debug, PartialEq)]
pub struct ThemeLayout {
    pub variant: ThemeVariant,
    pub compact_multiplier: f64,
    pub normal_multiplier: f64,
    pub page_padding: f64,
    pub page_line_height: Option<f64>,
    pub header_margin_bottom: f64,
    pub header_padding_bottom: f64,
    pub header_rule: Option<RuleSpec>,
    pub name_margin_bottom: f64,
    pub name_color: Tint,
    pub title_color: Tint,
    pub contact_item_margin_bottom: f64,
    pub date_margin_bottom: f64,
    pub company_margin_bottom: f64,
    pub company_color: Tint,
    pub job_title_margin_bottom: f64,
    pub greeting_margin_bottom: f64,
    pub paragraph_margin_bottom: f64,
    pub closing_margin_top: f64,
    pub closing_margin_bottom: f64,
    pub signature_color: Tint,
}

impl ThemeLayout {
    /// Returns the spacing multiplier for the requested density.
    pub fn spacing_multiplier(&self, spacing: Spacing) -> f64 {
        match spacing {
            Spacing::Compact => self.compact_multiplier,
            Spacing::Normal => self.normal_multiplier,
        }
    }
}

static DEFAULT_LAYOUT: ThemeLayout = ThemeLayout {
    variant: ThemeVariant::Default,
    compact_multiplier: 0.6,
    normal_multiplier: 0.8,
    page_padding: 30.0,
    page_line_height: Some(1.4),
    header_margin_bottom: 16.0,
    header_padding_bottom: 12.0,
    header_rule: Some(RuleSpec {
        width: 2.0,
        color: Tint::Theme,
    }),
    name_margin_bottom: 2.0,
    name_color: Tint::Fixed("#1a202c"),
    title_color: Tint::Theme,
    contact_item_margin_bottom: 1.0,
    date_margin_bottom: 12.0,
    company_margin_bottom: 2.0,
    company_color: Tint::Fixed("#2d3748"),
    job_title_margin_bottom: 12.0,
    greeting_margin_bottom: 8.0,
    paragraph_margin_bottom: 8.0,
    closing_margin_top: 16.0,
    closing_margin_bottom: 4.0,
    signature_color: Tint::Theme,
};

static MINIMAL_LAYOUT: ThemeLayout = ThemeLayout {
    variant: ThemeVariant::Minimal,
    compact_multiplier: 0.6,
    normal_multiplier: 0.8,
    page_padding: 40.0,
    page_line_height: None,
    header_margin_bottom: 24.0,
    header_padding_bottom: 16.0,
    header_rule: None,
    name_margin_bottom: 4.0,
    name_color: Tint::Fixed("#0F172A"),
    title_color: Tint::Fixed("#64748B"),
    contact_item_margin_bottom: 2.0,
    date_margin_bottom: 16.0,
    company_margin_bottom: 4.0,
    company_color: Tint::Fixed("#1E293B"),
    job_title_margin_bottom: 16.0,
    greeting_margin_bottom: 12.0,
    paragraph_margin_bottom: 12.0,
    closing_margin_top: 16.0,
    closing_margin_bottom: 4.0,
    signature_color: Tint::Fixed("#0F172A"),
};
