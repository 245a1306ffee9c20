//! Rendering of a [`LetterDocument`] into PDF bytes through `genpdf`.

use genpdf::error::Error;
use genpdf::style::Color;
use genpdf::{Margins, PaperSize, SimplePageDecorator};
use log::debug;

use crate::color::resolve_color;
use crate::elements::{self, font_size_points, mm_from_pt};
use crate::fonts::FontConfig;
use crate::metadata::{apply_document_info, MetadataError};
use crate::model::{Block, DocumentInfo, LetterDocument};
use crate::settings::DocumentSize;

const FALLBACK_TEXT_COLOR: Color = Color::Rgb(0x2d, 0x37, 0x48);

/// Errors raised while turning a document description into PDF bytes.
#[derive(Debug, thiserror::Error)]
pub enum PdfBuildError {
    /// Neither the requested nor the default font family could be loaded.
    #[error("Failed to load fonts: {0}")]
    FontLoad(#[source] Error),
    /// The layout engine failed to lay out or write the document.
    #[error("Failed to render document: {0}")]
    Render(#[source] Error),
    /// The rendered bytes could not be stamped with the document information.
    #[error(transparent)]
    Metadata(#[from] MetadataError),
}

/// A rendered PDF together with the information written into it.
#[derive(Clone, Debug)]
pub struct RenderedPdf {
    pub bytes: Vec<u8>,
    pub info: DocumentInfo,
}

/// Maps the settings' document size onto a `genpdf` paper size.
pub fn paper_size(size: DocumentSize) -> PaperSize {
    match size {
        DocumentSize::A4 => PaperSize::A4,
        DocumentSize::Letter => PaperSize::Letter,
        DocumentSize::Legal => PaperSize::Legal,
    }
}

/// Builder for `genpdf::Document` instances rendering cover letters.
#[derive(Clone, Debug, Default)]
pub struct PdfBuilder {
    fonts: FontConfig,
}

impl PdfBuilder {
    /// Creates a builder that searches the default font locations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets where fonts are looked up.
    pub fn with_font_config(mut self, fonts: FontConfig) -> Self {
        self.fonts = fonts;
        self
    }

    /// Builds a fully configured `genpdf::Document` for `letter`.
    pub fn build(&self, letter: &LetterDocument) -> Result<genpdf::Document, PdfBuildError> {
        let page = letter.page();
        let family = self
            .fonts
            .load_family(&page.style.font_family)
            .map_err(PdfBuildError::FontLoad)?;

        let mut document = genpdf::Document::new(family);
        document.set_title(letter.info().title.clone());
        document.set_paper_size(paper_size(page.size));
        document.set_font_size(font_size_points(page.style.font_size));
        if let Some(line_height) = page.style.line_height {
            document.set_line_spacing(line_height);
        }

        let mut decorator = SimplePageDecorator::new();
        decorator.set_margins(Margins::all(mm_from_pt(page.style.padding)));
        document.set_page_decorator(decorator);

        let text_color = resolve_color(&page.style.color, FALLBACK_TEXT_COLOR);
        for block in letter.blocks() {
            match block {
                Block::Header(header) => {
                    document.push(elements::header(header, text_color).map_err(PdfBuildError::Render)?)
                }
                Block::Text(text) => document.push(elements::text_block(text, text_color)),
            }
        }

        Ok(document)
    }

    /// Renders `letter` and stamps its document information.
    pub fn render(&self, letter: &LetterDocument) -> Result<RenderedPdf, PdfBuildError> {
        let document = self.build(letter)?;

        let mut bytes = Vec::new();
        document.render(&mut bytes).map_err(PdfBuildError::Render)?;
        debug!("Rendered '{}' ({} bytes)", letter.info().title, bytes.len());

        let bytes = apply_document_info(&bytes, letter.info())?;
        Ok(RenderedPdf {
            bytes,
            info: letter.info().clone(),
        })
    }
}
