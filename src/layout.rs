//! Arrangement of a normalized letter into a [`LetterDocument`].

use crate::letter::NormalizedLetter;
use crate::model::{Block, DocumentInfo, HeaderBlock, LetterDocument, PageSpec, TextBlock};
use crate::settings::Settings;
use crate::style::StyleSheet;

/// Product identifier written as PDF producer and creator.
pub const PRODUCT_ID: &str = "cv---maker";

/// Builds the document title from the candidate's name.
pub fn document_title(name: &str) -> String {
    format!("{} - Cover Letter", name)
}

/// Lays out `letter` with the styles in `sheet`.
///
/// Block order: header, date, company name (when known), greeting, one block per body
/// paragraph, closing, signature.
pub fn layout_letter(letter: &NormalizedLetter, sheet: &StyleSheet, settings: &Settings) -> LetterDocument {
    let personal = &letter.personal;

    let info = DocumentInfo {
        title: document_title(&personal.name),
        producer: PRODUCT_ID.to_owned(),
        creator: PRODUCT_ID.to_owned(),
    };
    let page = PageSpec {
        size: settings.document_size,
        style: sheet.page.clone(),
    };

    let mut header = HeaderBlock::new(sheet.header.clone())
        .with_left(TextBlock::new(personal.name.as_str(), sheet.name.clone()));
    if !personal.title.is_empty() {
        header = header.with_left(TextBlock::new(personal.title.as_str(), sheet.title.clone()));
    }
    header = header
        .with_right(TextBlock::new(personal.email.as_str(), sheet.contact_item.clone()))
        .with_right(TextBlock::new(personal.phone.as_str(), sheet.contact_item.clone()));
    if !personal.website.is_empty() {
        header = header.with_right(TextBlock::new(
            personal.website.as_str(),
            sheet.contact_item.clone(),
        ));
    }

    let mut document = LetterDocument::new(info, page)
        .with_block(Block::Header(header))
        .with_block(Block::text(letter.date.as_str(), sheet.date.clone()));

    if let Some(company) = &letter.company.name {
        document = document.with_block(Block::text(company.as_str(), sheet.company_name.clone()));
    }

    document
        .with_block(Block::text(
            letter.content.greeting.as_str(),
            sheet.greeting.clone(),
        ))
        .with_blocks(
            letter
                .content
                .body
                .iter()
                .map(|paragraph| Block::text(paragraph.as_str(), sheet.paragraph.clone())),
        )
        .with_block(Block::text(
            letter.content.closing.as_str(),
            sheet.closing.clone(),
        ))
        .with_block(Block::text(personal.name.as_str(), sheet.signature.clone()))
}
