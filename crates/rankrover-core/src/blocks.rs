//! Document decomposition into ordered candidate blocks.
//!
//! Free text splits into paragraphs on blank lines; a paragraph that breaks
//! apart on bullet or numbered markers contributes its items instead of
//! itself. Structured callers (answer payloads that arrive pre-segmented)
//! build the block sequence directly, including reference entries.

use std::borrow::Cow;

use regex::Regex;

/// One atomic unit of document structure for match-position purposes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// A blank-line-delimited paragraph.
    Paragraph(String),
    /// A bullet or numbered entry split out of a paragraph or supplied
    /// pre-parsed by a structured caller.
    ListItem(String),
    /// A citation entry from a structured caller: title plus source name.
    Reference { title: String, source: String },
}

impl Block {
    /// Text scanned for brand mentions.
    #[must_use]
    pub fn text(&self) -> Cow<'_, str> {
        match self {
            Block::Paragraph(text) | Block::ListItem(text) => Cow::Borrowed(text),
            Block::Reference { title, source } => Cow::Owned(format!("{title} {source}")),
        }
    }

    /// Label used in match diagnostics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Block::Paragraph(_) => "paragraph",
            Block::ListItem(_) => "list item",
            Block::Reference { .. } => "reference",
        }
    }
}

/// Split free text into ordered blocks.
///
/// Paragraphs are delimited by runs of blank lines. A paragraph whose body
/// splits on list markers (`\n1.`, `\n-`, `\n*`) into more than one piece is
/// flattened into one [`Block::ListItem`] per piece — the lead-in line before
/// the first marker counts as an item of its own. Whitespace-only pieces are
/// splitter artifacts, not blocks, and are dropped.
#[must_use]
pub fn split_blocks(document: &str) -> Vec<Block> {
    let paragraph_re = Regex::new(r"\n\s*\n+").expect("valid paragraph regex");
    let list_marker_re = Regex::new(r"\n\d+\.|\n[-*]").expect("valid list marker regex");

    let mut blocks = Vec::new();
    for paragraph in paragraph_re.split(document) {
        if paragraph.trim().is_empty() {
            continue;
        }
        let items: Vec<&str> = list_marker_re
            .split(paragraph)
            .filter(|piece| !piece.trim().is_empty())
            .collect();
        if items.len() > 1 {
            blocks.extend(
                items
                    .into_iter()
                    .map(|item| Block::ListItem(item.trim().to_string())),
            );
        } else {
            blocks.push(Block::Paragraph(paragraph.trim().to_string()));
        }
    }
    blocks
}
