//! Core entry point for the cover_letter_pdf crate.
//!
//! Turns cover letter data and render settings into a styled PDF:
//! settings select a theme and derive a [`style::StyleSheet`], the letter is normalized
//! into a [`letter::NormalizedLetter`], [`layout`] arranges both into a
//! [`model::LetterDocument`], and [`builder::PdfBuilder`] renders it through `genpdf`.

pub mod builder;
pub mod color;
pub mod elements;
pub mod fonts;
pub mod layout;
pub mod letter;
pub mod metadata;
pub mod model;
pub mod sample;
pub mod segment;
pub mod settings;
pub mod style;
pub mod theme;

pub use builder::{PdfBuildError, PdfBuilder, RenderedPdf};
pub use letter::{CoverLetter, NormalizedLetter, Profile};
pub use settings::{DocumentSize, Settings, Spacing};
pub use theme::ThemeVariant;

use model::LetterDocument;
use style::StyleSheet;

/// Normalizes `letter` and lays it out with the styles derived from `settings`.
pub fn build_document(letter: &CoverLetter, settings: &Settings) -> LetterDocument {
    let sheet = StyleSheet::for_settings(settings);
    layout::layout_letter(&letter.normalize(), &sheet, settings)
}

/// Renders `letter` to PDF bytes using the default font locations.
pub fn render_cover_letter(
    letter: &CoverLetter,
    settings: &Settings,
) -> Result<RenderedPdf, PdfBuildError> {
    PdfBuilder::new().render(&build_document(letter, settings))
}
