//! Derivation of concrete style values from [`Settings`] and a theme layout table.
//!
//! All lengths are points.  Spacing-derived values are `base * multiplier` and are not
//! rounded here; the PDF builder converts them to the engine's units.

use serde::Serialize;

use crate::fonts;
use crate::model::HorizontalAlignment;
use crate::settings::{Settings, DEFAULT_FONT_SIZE};
use crate::theme::{self, ThemeLayout, ThemeVariant};

const PAGE_TEXT_COLOR: &str = "#2d3748";
const PAGE_BACKGROUND: &str = "#ffffff";
const MUTED_COLOR: &str = "#718096";
const JOB_TITLE_COLOR: &str = "#4a5568";

/// Font weight as declared by the layout.  The engine only distinguishes regular and bold.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Regular,
    Medium,
    Semibold,
    Bold,
}

impl FontWeight {
    /// Whether the weight is rendered with the bold face.
    pub fn is_bold(self) -> bool {
        self >= FontWeight::Semibold
    }
}

/// Style of a single text element.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    pub font_size: f64,
    pub color: String,
    pub weight: FontWeight,
    pub line_height: Option<f64>,
    pub margin_top: f64,
    pub margin_bottom: f64,
    pub alignment: HorizontalAlignment,
}

impl TextStyle {
    fn new(font_size: f64, color: impl Into<String>) -> Self {
        Self {
            font_size,
            color: color.into(),
            weight: FontWeight::Regular,
            line_height: None,
            margin_top: 0.0,
            margin_bottom: 0.0,
            alignment: HorizontalAlignment::Left,
        }
    }

    fn weight(mut self, weight: FontWeight) -> Self {
        self.weight = weight;
        self
    }

    fn line_height(mut self, line_height: f64) -> Self {
        self.line_height = Some(line_height);
        self
    }

    fn margins(mut self, top: f64, bottom: f64) -> Self {
        self.margin_top = top;
        self.margin_bottom = bottom;
        self
    }

    fn aligned(mut self, alignment: HorizontalAlignment) -> Self {
        self.alignment = alignment;
        self
    }
}

/// Horizontal rule under the header.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RuleStyle {
    pub width: f64,
    pub color: String,
}

/// Page level style.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageStyle {
    pub font_family: String,
    pub font_size: f64,
    pub padding: f64,
    pub line_height: Option<f64>,
    pub color: String,
    pub background: String,
}

/// Header container style.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderStyle {
    pub margin_bottom: f64,
    pub padding_bottom: f64,
    pub rule: Option<RuleStyle>,
}

/// Every derived style value for one render.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleSheet {
    pub theme: ThemeVariant,
    pub spacing_multiplier: f64,
    pub page: PageStyle,
    pub header: HeaderStyle,
    pub name: TextStyle,
    pub title: TextStyle,
    pub contact_item: TextStyle,
    pub date: TextStyle,
    pub company_name: TextStyle,
    pub job_title: TextStyle,
    pub greeting: TextStyle,
    pub paragraph: TextStyle,
    pub closing: TextStyle,
    pub signature: TextStyle,
}

impl StyleSheet {
    /// Derives the style sheet for the theme selected by `settings`.
    pub fn for_settings(settings: &Settings) -> Self {
        derive(settings, theme::select(settings))
    }
}

/// Parses the base font size with `parseInt` semantics, defaulting to 11.
///
/// Leading whitespace and a sign are accepted, parsing stops at the first non-digit.
/// Zero and unparsable values fall back to the default, as `parseInt(..) || 11` does.
/// Negative values also fall back to 11, where `parseInt(..) || 11` would keep them.
pub fn base_font_size(raw: &str) -> f64 {
    parse_int_prefix(raw)
        .filter(|size| *size > 0)
        .map(|size| size as f64)
        .unwrap_or_else(default_font_size)
}

fn default_font_size() -> f64 {
    parse_int_prefix(DEFAULT_FONT_SIZE).map_or(11.0, |size| size as f64)
}

fn parse_int_prefix(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let value: i64 = digits[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}

/// Derives the style sheet from `settings` using the constants of `layout`.
pub fn derive(settings: &Settings, layout: &ThemeLayout) -> StyleSheet {
    let base = base_font_size(&settings.font_size);
    let family = fonts::validate_family(&settings.font_family).to_owned();
    let accent = settings.theme_color.as_str();
    let m = layout.spacing_multiplier(settings.spacing);

    StyleSheet {
        theme: layout.variant,
        spacing_multiplier: m,
        page: PageStyle {
            font_family: family,
            font_size: base,
            padding: layout.page_padding * m,
            line_height: layout.page_line_height,
            color: PAGE_TEXT_COLOR.to_owned(),
            background: PAGE_BACKGROUND.to_owned(),
        },
        header: HeaderStyle {
            margin_bottom: layout.header_margin_bottom * m,
            padding_bottom: layout.header_padding_bottom * m,
            rule: layout.header_rule.map(|rule| RuleStyle {
                width: rule.width,
                color: rule.color.resolve(accent),
            }),
        },
        name: TextStyle::new(base + 8.0, layout.name_color.resolve(accent))
            .weight(FontWeight::Bold)
            .line_height(1.2)
            .margins(0.0, layout.name_margin_bottom * m),
        title: TextStyle::new(base + 1.0, layout.title_color.resolve(accent))
            .weight(FontWeight::Medium)
            .line_height(1.3),
        contact_item: TextStyle::new(base - 2.0, MUTED_COLOR)
            .margins(0.0, layout.contact_item_margin_bottom * m)
            .aligned(HorizontalAlignment::Right),
        date: TextStyle::new(base - 1.0, MUTED_COLOR).margins(0.0, layout.date_margin_bottom * m),
        company_name: TextStyle::new(base + 1.0, layout.company_color.resolve(accent))
            .weight(FontWeight::Semibold)
            .margins(0.0, layout.company_margin_bottom * m),
        job_title: TextStyle::new(base, JOB_TITLE_COLOR)
            .margins(0.0, layout.job_title_margin_bottom * m),
        greeting: TextStyle::new(base, PAGE_TEXT_COLOR)
            .weight(FontWeight::Medium)
            .margins(0.0, layout.greeting_margin_bottom * m),
        paragraph: TextStyle::new(base - 0.5, PAGE_TEXT_COLOR)
            .line_height(1.6)
            .margins(0.0, layout.paragraph_margin_bottom * m)
            .aligned(HorizontalAlignment::Justified),
        closing: TextStyle::new(base, PAGE_TEXT_COLOR)
            .weight(FontWeight::Medium)
            .margins(layout.closing_margin_top * m, layout.closing_margin_bottom * m),
        signature: TextStyle::new(base + 1.0, layout.signature_color.resolve(accent))
            .weight(FontWeight::Semibold),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Spacing;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn unparsable_font_size_defaults_to_eleven() {
        for raw in ["", "abc", "0", "-4", "  ", "px12"] {
            assert_eq!(base_font_size(raw), 11.0, "{raw:?}");
        }
    }

    #[test]
    fn negative_font_size_falls_back_to_eleven() {
        assert_eq!(parse_int_prefix("-4"), Some(-4));
        assert_eq!(base_font_size("-4"), 11.0);
        assert_eq!(base_font_size(" -12pt"), 11.0);
    }

    #[test]
    fn font_size_uses_leading_integer() {
        assert_eq!(base_font_size("12"), 12.0);
        assert_eq!(base_font_size(" 14px"), 14.0);
        assert_eq!(base_font_size("10.5"), 10.0);
        assert_eq!(base_font_size("+9"), 9.0);
    }

    #[test]
    fn unknown_family_falls_back_to_roboto() {
        let sheet = StyleSheet::for_settings(&Settings::new().with_font_family("Papyrus"));
        assert_eq!(sheet.page.font_family, "Roboto");

        let sheet = StyleSheet::for_settings(&Settings::new().with_font_family("Merriweather"));
        assert_eq!(sheet.page.font_family, "Merriweather");
    }

    #[test]
    fn spacing_constants_scale_with_multiplier() {
        for variant in [ThemeVariant::Default, ThemeVariant::Minimal] {
            let layout = variant.layout();
            for spacing in [Spacing::Compact, Spacing::Normal] {
                let settings = Settings::new().with_theme(variant).with_spacing(spacing);
                let sheet = derive(&settings, layout);
                let m = layout.spacing_multiplier(spacing);

                assert!(approx(sheet.spacing_multiplier, m));
                assert!(approx(sheet.page.padding, layout.page_padding * m));
                assert!(approx(sheet.header.margin_bottom, layout.header_margin_bottom * m));
                assert!(approx(sheet.header.padding_bottom, layout.header_padding_bottom * m));
                assert!(approx(sheet.name.margin_bottom, layout.name_margin_bottom * m));
                assert!(approx(
                    sheet.contact_item.margin_bottom,
                    layout.contact_item_margin_bottom * m
                ));
                assert!(approx(sheet.date.margin_bottom, layout.date_margin_bottom * m));
                assert!(approx(sheet.paragraph.margin_bottom, layout.paragraph_margin_bottom * m));
                assert!(approx(sheet.closing.margin_top, layout.closing_margin_top * m));
            }
        }
    }

    #[test]
    fn default_theme_compact_values() {
        let settings = Settings::new().with_spacing(Spacing::Compact);
        let sheet = StyleSheet::for_settings(&settings);
        assert!(approx(sheet.page.padding, 18.0));
        assert!(approx(sheet.header.margin_bottom, 9.6));
        assert_eq!(sheet.page.line_height, Some(1.4));
    }

    #[test]
    fn font_sizes_are_offsets_of_the_base() {
        let sheet = StyleSheet::for_settings(&Settings::new().with_font_size("12"));
        assert_eq!(sheet.page.font_size, 12.0);
        assert_eq!(sheet.name.font_size, 20.0);
        assert_eq!(sheet.title.font_size, 13.0);
        assert_eq!(sheet.contact_item.font_size, 10.0);
        assert_eq!(sheet.date.font_size, 11.0);
        assert_eq!(sheet.paragraph.font_size, 11.5);
        assert_eq!(sheet.signature.font_size, 13.0);
    }

    #[test]
    fn theme_color_is_used_verbatim() {
        let settings = Settings::new().with_theme_color("rebeccapurple");
        let sheet = StyleSheet::for_settings(&settings);
        assert_eq!(sheet.title.color, "rebeccapurple");
        assert_eq!(sheet.signature.color, "rebeccapurple");
        assert_eq!(
            sheet.header.rule.as_ref().map(|rule| rule.color.as_str()),
            Some("rebeccapurple")
        );
        assert_eq!(sheet.name.color, "#1a202c");
    }

    #[test]
    fn minimal_theme_ignores_accent_and_rule() {
        let settings = Settings::new()
            .with_theme(ThemeVariant::Minimal)
            .with_theme_color("#ff0000");
        let sheet = StyleSheet::for_settings(&settings);
        assert_eq!(sheet.theme, ThemeVariant::Minimal);
        assert!(sheet.header.rule.is_none());
        assert_eq!(sheet.title.color, "#64748B");
        assert_eq!(sheet.signature.color, "#0F172A");
        assert_eq!(sheet.page.line_height, None);
    }

    #[test]
    fn weights_map_to_bold_face() {
        assert!(FontWeight::Bold.is_bold());
        assert!(FontWeight::Semibold.is_bold());
        assert!(!FontWeight::Medium.is_bold());
        assert!(!FontWeight::Regular.is_bold());
    }
}
