//! Renderer independent description of a cover letter document.
//!
//! The layout step produces a [`LetterDocument`]: a small tree of text blocks carrying
//! their derived styles.  It does not reference `genpdf` types, so the structure can be
//! inspected and tested without fonts; [`crate::builder`] maps it onto `genpdf` elements.

use serde::Serialize;

use crate::settings::DocumentSize;
use crate::style::{HeaderStyle, PageStyle, TextStyle};

/// Horizontal alignment of a text block.
///
/// `genpdf` has no justification, so [`HorizontalAlignment::Justified`] renders left
/// aligned.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HorizontalAlignment {
    /// Left aligned content.
    #[default]
    Left,
    /// Center aligned content.
    Center,
    /// Right aligned content.
    Right,
    /// Fully justified paragraphs.
    Justified,
}

/// A run of text with its style.  The text may contain `\n` line breaks and may be empty,
/// in which case it still occupies one line.
#[derive(Clone, Debug, PartialEq)]
pub struct TextBlock {
    text: String,
    style: TextStyle,
}

impl TextBlock {
    /// Creates a text block.
    pub fn new(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    /// Returns the raw text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the style.
    pub fn style(&self) -> &TextStyle {
        &self.style
    }

    /// Returns the text split at its line breaks.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.split('\n')
    }
}

/// Two column header: name and title on the left, contact details on the right.
#[derive(Clone, Debug, PartialEq)]
pub struct HeaderBlock {
    left: Vec<TextBlock>,
    right: Vec<TextBlock>,
    style: HeaderStyle,
}

impl HeaderBlock {
    /// Creates an empty header.
    pub fn new(style: HeaderStyle) -> Self {
        Self {
            left: Vec::new(),
            right: Vec::new(),
            style,
        }
    }

    /// Returns the left column.
    pub fn left(&self) -> &[TextBlock] {
        &self.left
    }

    /// Returns the right column.
    pub fn right(&self) -> &[TextBlock] {
        &self.right
    }

    /// Returns the header style.
    pub fn style(&self) -> &HeaderStyle {
        &self.style
    }

    /// Appends a block to the left column and returns the updated header.
    pub fn with_left(mut self, block: TextBlock) -> Self {
        self.left.push(block);
        self
    }

    /// Appends a block to the right column and returns the updated header.
    pub fn with_right(mut self, block: TextBlock) -> Self {
        self.right.push(block);
        self
    }
}

/// Top level content block.
#[derive(Clone, Debug, PartialEq)]
pub enum Block {
    /// Letter header.
    Header(HeaderBlock),
    /// Standalone text.
    Text(TextBlock),
}

impl Block {
    /// Convenience helper for building a text block.
    pub fn text(text: impl Into<String>, style: TextStyle) -> Self {
        Self::Text(TextBlock::new(text, style))
    }
}

/// Metadata written to the PDF information dictionary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentInfo {
    pub title: String,
    pub producer: String,
    pub creator: String,
}

/// Page geometry and base typography.
#[derive(Clone, Debug, PartialEq)]
pub struct PageSpec {
    pub size: DocumentSize,
    pub style: PageStyle,
}

/// Complete document description.
#[derive(Clone, Debug, PartialEq)]
pub struct LetterDocument {
    info: DocumentInfo,
    page: PageSpec,
    blocks: Vec<Block>,
}

impl LetterDocument {
    /// Creates an empty document.
    pub fn new(info: DocumentInfo, page: PageSpec) -> Self {
        Self {
            info,
            page,
            blocks: Vec::new(),
        }
    }

    /// Returns the document metadata.
    pub fn info(&self) -> &DocumentInfo {
        &self.info
    }

    /// Returns the page specification.
    pub fn page(&self) -> &PageSpec {
        &self.page
    }

    /// Returns the blocks in render order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Appends a block and returns the updated document.
    pub fn with_block(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }

    /// Extends the document with multiple blocks and returns the updated instance.
    pub fn with_blocks<I>(mut self, blocks: I) -> Self
    where
        I: IntoIterator<Item = Block>,
    {
        self.blocks.extend(blocks);
        self
    }

    /// Iterates over the text of every block, header columns included, in render order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.blocks.iter().flat_map(block_texts)
    }
}

fn block_texts(block: &Block) -> Vec<&str> {
    match block {
        Block::Header(header) => header
            .left()
            .iter()
            .chain(header.right())
            .map(TextBlock::text)
            .collect(),
        Block::Text(text) => vec![text.text()],
    }
}
