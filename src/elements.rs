//! `genpdf` elements for the blocks of a [`LetterDocument`](crate::model::LetterDocument).
//!
//! Text blocks become one paragraph per line so that line breaks typed by the author
//! survive; empty lines become a one-line break.  The header rule is a custom element
//! since `genpdf` has no borders.

use genpdf::elements::{Break, LinearLayout, Paragraph, TableLayout};
use genpdf::error::Error;
use genpdf::style::{Color, Style};
use genpdf::{render, Alignment, Element, Margins, Mm, Position, RenderResult, Size};

use crate::color::resolve_color;
use crate::model::{HeaderBlock, HorizontalAlignment, TextBlock};
use crate::segment::NBSP;
use crate::style::{RuleStyle, TextStyle};

const MM_PER_PT: f64 = 25.4 / 72.0;
// printpdf strokes lines one point wide.
const STROKE_WIDTH_PT: f64 = 1.0;
const HEADER_COLUMN_WEIGHTS: [usize; 2] = [3, 2];
// The engine drops a word wider than the line, so longer unbroken runs are cut.
const MAX_UNBROKEN_CHARS: usize = 32;

fn mm_from_f64(value: f64) -> Mm {
    Mm::from(printpdf::Mm(value))
}

/// Converts a length in points to millimetres.
pub fn mm_from_pt(points: f64) -> Mm {
    mm_from_f64(points * MM_PER_PT)
}

/// Rounds a point size to the integer sizes `genpdf` supports.
pub fn font_size_points(size: f64) -> u8 {
    size.round().clamp(1.0, f64::from(u8::MAX)) as u8
}

fn alignment(alignment: HorizontalAlignment) -> Alignment {
    match alignment {
        HorizontalAlignment::Left | HorizontalAlignment::Justified => Alignment::Left,
        HorizontalAlignment::Center => Alignment::Center,
        HorizontalAlignment::Right => Alignment::Right,
    }
}

/// Maps a derived text style onto a `genpdf` style.
pub fn genpdf_style(style: &TextStyle, fallback_color: Color) -> Style {
    let mut mapped = Style::new()
        .with_font_size(font_size_points(style.font_size))
        .with_color(resolve_color(&style.color, fallback_color));
    if style.weight.is_bold() {
        mapped.set_bold();
    }
    if let Some(line_height) = style.line_height {
        mapped.set_line_spacing(line_height);
    }
    mapped
}

fn vertical_margins(top: f64, bottom: f64) -> Margins {
    Margins::trbl(mm_from_pt(top), 0, mm_from_pt(bottom), 0)
}

/// Splits a line into pieces that the engine may wrap between.
///
/// `genpdf` only wraps at ASCII spaces, so a piece ends after every run of non-breaking
/// spaces and after [`MAX_UNBROKEN_CHARS`] characters without an ASCII space.  The
/// pieces concatenate back to `line`.
pub fn break_opportunities(line: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut unbroken = 0;
    let mut after_nbsp = false;

    for (index, c) in line.char_indices() {
        let split = (after_nbsp && c != NBSP) || (c != ' ' && unbroken >= MAX_UNBROKEN_CHARS);
        if split && index > start {
            pieces.push(&line[start..index]);
            start = index;
            unbroken = 0;
        }
        unbroken = if c == ' ' { 0 } else { unbroken + 1 };
        after_nbsp = c == NBSP;
    }

    if start < line.len() || pieces.is_empty() {
        pieces.push(&line[start..]);
    }
    pieces
}

fn line_paragraph(line: &str, alignment: Alignment) -> Paragraph {
    let mut paragraph = Paragraph::default();
    for piece in break_opportunities(line) {
        paragraph.push(piece.to_owned());
    }
    paragraph.aligned(alignment)
}

/// Builds the element for a text block, margins included.
pub fn text_block(block: &TextBlock, fallback_color: Color) -> impl Element {
    let style = block.style();
    let mut layout = LinearLayout::vertical();
    for line in block.lines() {
        if line.is_empty() {
            layout.push(Break::new(1));
        } else {
            layout.push(line_paragraph(line, alignment(style.alignment)));
        }
    }

    layout
        .styled(genpdf_style(style, fallback_color))
        .padded(vertical_margins(style.margin_top, style.margin_bottom))
}

fn column(blocks: &[TextBlock], fallback_color: Color) -> LinearLayout {
    let mut layout = LinearLayout::vertical();
    for block in blocks {
        layout.push(text_block(block, fallback_color));
    }
    layout
}

/// Builds the two column header with its optional bottom rule.
pub fn header(block: &HeaderBlock, fallback_color: Color) -> Result<impl Element, Error> {
    let style = block.style();

    let mut table = TableLayout::new(HEADER_COLUMN_WEIGHTS.to_vec());
    table
        .row()
        .element(column(block.left(), fallback_color))
        .element(column(block.right(), fallback_color))
        .push()?;

    let mut layout = LinearLayout::vertical();
    layout.push(table.padded(vertical_margins(0.0, style.padding_bottom)));
    if let Some(rule) = &style.rule {
        layout.push(HorizontalRule::from_style(rule, fallback_color));
    }

    Ok(layout.padded(vertical_margins(0.0, style.margin_bottom)))
}

/// A full-width horizontal rule.
///
/// Rules thicker than a single stroke are drawn as stacked strokes.
pub struct HorizontalRule {
    width_pt: f64,
    color: Color,
}

impl HorizontalRule {
    /// Creates a rule `width_pt` points thick.
    pub fn new(width_pt: f64, color: Color) -> Self {
        Self { width_pt, color }
    }

    /// Creates a rule from the derived rule style.
    pub fn from_style(rule: &RuleStyle, fallback_color: Color) -> Self {
        Self::new(rule.width, resolve_color(&rule.color, fallback_color))
    }

    fn strokes(&self) -> usize {
        (self.width_pt / STROKE_WIDTH_PT).round().max(1.0) as usize
    }
}

impl Element for HorizontalRule {
    fn render(
        &mut self,
        _context: &genpdf::Context,
        area: render::Area<'_>,
        _style: Style,
    ) -> Result<RenderResult, Error> {
        let mut result = RenderResult::default();
        let strokes = self.strokes();
        let height = mm_from_pt(strokes as f64 * STROKE_WIDTH_PT);

        if height > area.size().height {
            result.has_more = true;
            return Ok(result);
        }

        let width = area.size().width;
        let line_style = Style::new().with_color(self.color);
        for stroke in 0..strokes {
            let y = mm_from_pt((stroke as f64 + 0.5) * STROKE_WIDTH_PT);
            area.draw_line(
                vec![Position::new(0, y), Position::new(width, y)],
                line_style,
            );
        }

        result.size = Size::new(width, height);
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::FontWeight;

    fn text_style() -> TextStyle {
        TextStyle {
            font_size: 10.5,
            color: "#ff0000".into(),
            weight: FontWeight::Semibold,
            line_height: Some(1.6),
            margin_top: 0.0,
            margin_bottom: 6.4,
            alignment: HorizontalAlignment::Justified,
        }
    }

    #[test]
    fn font_sizes_round_to_whole_points() {
        assert_eq!(font_size_points(10.5), 11);
        assert_eq!(font_size_points(9.0), 9);
        assert_eq!(font_size_points(-3.0), 1);
        assert_eq!(font_size_points(400.0), 255);
    }

    #[test]
    fn points_convert_to_millimetres() {
        let mm: printpdf::Mm = mm_from_pt(72.0).into();
        assert!((mm.0 - 25.4).abs() < 1e-9);
    }

    #[test]
    fn style_mapping_carries_weight_color_and_spacing() {
        let mapped = genpdf_style(&text_style(), Color::Rgb(0, 0, 0));
        assert!(mapped.is_bold());
        assert_eq!(mapped.font_size(), 11);
        assert_eq!(mapped.color(), Some(Color::Rgb(255, 0, 0)));
    }

    #[test]
    fn justified_renders_left_aligned() {
        assert!(matches!(alignment(HorizontalAlignment::Justified), Alignment::Left));
        assert!(matches!(alignment(HorizontalAlignment::Right), Alignment::Right));
    }

    #[test]
    fn space_runs_become_wrap_points() {
        let row = "Column\u{A0}\u{A0}Column\u{A0}\u{A0}Done";
        assert_eq!(
            break_opportunities(row),
            vec!["Column\u{A0}\u{A0}", "Column\u{A0}\u{A0}", "Done"]
        );
    }

    #[test]
    fn wide_protected_rows_are_split_into_pieces() {
        let row = "Intro ".to_owned() + &"Column\u{A0}\u{A0}".repeat(40);
        let pieces = break_opportunities(&row);

        assert_eq!(pieces.concat(), row);
        assert_eq!(pieces.len(), 40);
        assert!(pieces.iter().all(|piece| piece.chars().count() <= MAX_UNBROKEN_CHARS + 6));
    }

    #[test]
    fn plain_text_stays_in_one_piece() {
        let line = "I am writing to apply for the Platform Engineer role at Northwind Labs.";
        assert_eq!(break_opportunities(line), vec![line]);
        assert_eq!(break_opportunities(""), vec![""]);
    }

    #[test]
    fn long_unbroken_words_are_cut() {
        let word = "x".repeat(MAX_UNBROKEN_CHARS * 2 + 5);
        let pieces = break_opportunities(&word);

        assert_eq!(pieces.len(), 3);
        assert_eq!(pieces[0].len(), MAX_UNBROKEN_CHARS);
        assert_eq!(pieces[2].len(), 5);
        assert_eq!(pieces.concat(), word);
    }

    #[test]
    fn indented_list_items_keep_their_indent() {
        let pieces = break_opportunities("\u{A0}\u{A0}- cut release lead time");
        assert_eq!(pieces, vec!["\u{A0}\u{A0}", "- cut release lead time"]);
    }

    #[test]
    fn thick_rules_stack_strokes() {
        assert_eq!(HorizontalRule::new(2.0, Color::Rgb(0, 0, 0)).strokes(), 2);
        assert_eq!(HorizontalRule::new(0.2, Color::Rgb(0, 0, 0)).strokes(), 1);
    }
}
