//! Splitting of free-form letter text into paragraphs.
//!
//! Paragraph boundaries are blank lines.  Everything else the author typed is kept:
//! single line breaks stay inside their paragraph, nothing is trimmed, empty paragraphs
//! keep their slot, and runs of spaces are swapped for non-breaking spaces so the layout
//! engine cannot collapse them.

use std::sync::OnceLock;

use regex::Regex;

/// Non-breaking space used to protect runs of ordinary spaces.
pub const NBSP: char = '\u{A0}';

fn paragraph_break() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\r?\n\r?\n").expect("valid paragraph break pattern"))
}

fn line_break() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\r?\n").expect("valid line break pattern"))
}

fn space_run() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r" {2,}").expect("valid space run pattern"))
}

/// Options for [`segment_paragraphs_with`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SegmentOptions {
    /// Replace runs of two or more spaces with non-breaking spaces.
    pub protect_space_runs: bool,
}

impl Default for SegmentOptions {
    fn default() -> Self {
        Self {
            protect_space_runs: true,
        }
    }
}

impl SegmentOptions {
    /// Sets whether space runs are protected and returns the updated options.
    pub fn with_protect_space_runs(mut self, protect: bool) -> Self {
        self.protect_space_runs = protect;
        self
    }
}

/// Splits `text` into paragraphs using the default options.
pub fn segment_paragraphs(text: &str) -> Vec<String> {
    segment_paragraphs_with(text, SegmentOptions::default())
}

/// Splits `text` into paragraphs.
///
/// The result always has one entry per blank-line separated segment, in source order,
/// so an empty input yields a single empty paragraph.
pub fn segment_paragraphs_with(text: &str, options: SegmentOptions) -> Vec<String> {
    paragraph_break()
        .split(text)
        .map(|segment| {
            let segment = line_break().replace_all(segment, "\n");
            if options.protect_space_runs {
                protect_space_runs(&segment)
            } else {
                segment.into_owned()
            }
        })
        .collect()
}

/// Replaces every run of two or more ASCII spaces with as many non-breaking spaces.
pub fn protect_space_runs(text: &str) -> String {
    space_run()
        .replace_all(text, |caps: &regex::Captures<'_>| {
            NBSP.to_string().repeat(caps[0].len())
        })
        .into_owned()
}
