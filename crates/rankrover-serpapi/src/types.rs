//! Typed SerpAPI response payloads and their mapping onto locator blocks.

use rankrover_core::Block;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct SearchMetadata {
    pub id: String,
    pub status: String,
}

/// Response of a plain Google search. Only the AI Overview pointer matters
/// here; organic results are not tracked.
#[derive(Debug, Deserialize)]
pub struct GoogleSearchResult {
    pub search_metadata: SearchMetadata,
    #[serde(default)]
    pub ai_overview: Option<AiOverviewPointer>,
}

/// Pointer handed out by the search endpoint; redeemed against the
/// `google_ai_overview` engine for the full payload.
#[derive(Debug, Deserialize)]
pub struct AiOverviewPointer {
    #[serde(default)]
    pub page_token: Option<String>,
}

/// Response of the `google_ai_overview` engine.
#[derive(Debug, Deserialize)]
pub struct AiOverviewResponse {
    pub search_metadata: SearchMetadata,
    #[serde(default)]
    pub ai_overview: Option<AiOverview>,
}

#[derive(Debug, Deserialize)]
pub struct AiOverview {
    #[serde(default)]
    pub text_blocks: Vec<TextBlock>,
    #[serde(default)]
    pub references: Vec<Reference>,
}

#[derive(Debug, Deserialize)]
pub struct TextBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(default)]
    pub snippet: Option<String>,
    #[serde(default)]
    pub list: Vec<ListEntry>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListEntry {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub snippet: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Reference {
    pub title: String,
    pub link: String,
    pub source: String,
}

impl AiOverview {
    /// Flatten the payload into locator blocks in display order: paragraph
    /// snippets and list entries as they appear, then reference citations.
    /// Unknown block types and empty entries do not produce blocks.
    #[must_use]
    pub fn to_blocks(&self) -> Vec<Block> {
        let mut blocks = Vec::new();
        for text_block in &self.text_blocks {
            match text_block.block_type.as_str() {
                "paragraph" => {
                    if let Some(snippet) = &text_block.snippet {
                        blocks.push(Block::Paragraph(snippet.clone()));
                    }
                }
                "list" => {
                    for entry in &text_block.list {
                        let title = entry.title.as_deref().unwrap_or_default();
                        let snippet = entry.snippet.as_deref().unwrap_or_default();
                        let text = format!("{title} {snippet}").trim().to_string();
                        if !text.is_empty() {
                            blocks.push(Block::ListItem(text));
                        }
                    }
                }
                _ => {}
            }
        }
        for reference in &self.references {
            blocks.push(Block::Reference {
                title: reference.title.clone(),
                source: reference.source.clone(),
            });
        }
        blocks
    }

    /// First paragraph snippet, for display in run results.
    #[must_use]
    pub fn first_snippet(&self) -> Option<&str> {
        self.text_blocks
            .iter()
            .filter(|b| b.block_type == "paragraph")
            .find_map(|b| b.snippet.as_deref())
    }
}
